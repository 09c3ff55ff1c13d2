//! Control mapping: landmark observations -> control signals
//!
//! Two modes:
//! - Continuous position (maze, catcher, snake): scale a normalized keypoint
//!   into play-area pixels, optionally relative to a calibration baseline.
//! - Discrete gesture (rock-paper-scissors): finger up/down pattern matched
//!   against fixed templates.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::landmarks::{FINGER_TIPS, HandLandmarks, Landmark};
use crate::sim::PlayArea;

/// Map a normalized landmark to play-area pixels
#[inline]
pub fn map_to_area(landmark: Landmark, area: PlayArea) -> Vec2 {
    landmark.to_screen(area.width, area.height)
}

/// Top-left corner of a `size` x `size` box centred on `center`, kept fully
/// inside the play area
pub fn box_origin_from_center(center: Vec2, size: f32, area: PlayArea) -> Vec2 {
    let half = (size / 2.0).floor();
    let max = Vec2::new(area.width - size, area.height - size).max(Vec2::ZERO);
    (center - Vec2::splat(half)).clamp(Vec2::ZERO, max)
}

/// Unit step per axis derived from a tilt delta
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TiltStep {
    pub dx: i8,
    pub dy: i8,
}

impl TiltStep {
    pub fn is_still(&self) -> bool {
        self.dx == 0 && self.dy == 0
    }

    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.dx as f32, self.dy as f32)
    }
}

fn threshold_axis(delta: f32, sensitivity: f32) -> i8 {
    if delta > sensitivity {
        1
    } else if delta < -sensitivity {
        -1
    } else {
        0
    }
}

/// One-time reference point for relative control
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Calibration {
    baseline: Option<Vec2>,
}

impl Calibration {
    pub fn is_calibrated(&self) -> bool {
        self.baseline.is_some()
    }

    pub fn baseline(&self) -> Option<Vec2> {
        self.baseline
    }

    /// Feed one keypoint sighting.
    ///
    /// The first sighting after a reset becomes the baseline and yields no
    /// movement. Later sightings are compared against it and thresholded
    /// (strictly greater than `sensitivity`) into a unit step per axis.
    pub fn observe(&mut self, point: Vec2, sensitivity: f32) -> TiltStep {
        match self.baseline {
            None => {
                self.baseline = Some(point);
                TiltStep::default()
            }
            Some(base) => {
                let delta = point - base;
                TiltStep {
                    dx: threshold_axis(delta.x, sensitivity),
                    dy: threshold_axis(delta.y, sensitivity),
                }
            }
        }
    }

    /// Invalidate the baseline; the next sighting recalibrates
    pub fn reset(&mut self) {
        self.baseline = None;
    }
}

/// Up/down state of each finger, thumb..pinky
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FingerStates(pub [bool; 5]);

impl FingerStates {
    /// Build from 0/1 flags, thumb first
    pub fn from_bits(bits: [u8; 5]) -> Self {
        Self(bits.map(|b| b != 0))
    }

    /// Read finger states off a hand skeleton (mirrored frame).
    ///
    /// The thumb counts as up when its tip is left of the joint below it;
    /// every other finger when its tip is above the PIP joint. Returns `None`
    /// for an incomplete skeleton.
    pub fn from_hand(hand: &HandLandmarks) -> Option<Self> {
        if !hand.is_complete() {
            return None;
        }
        let mut states = [false; 5];

        let thumb_tip = hand.point(FINGER_TIPS[0])?;
        let thumb_ip = hand.point(FINGER_TIPS[0] - 1)?;
        states[0] = thumb_tip.x < thumb_ip.x;

        for (slot, &tip) in states.iter_mut().zip(FINGER_TIPS.iter()).skip(1) {
            let tip_pt = hand.point(tip)?;
            let pip_pt = hand.point(tip - 2)?;
            *slot = tip_pt.y < pip_pt.y;
        }

        Some(Self(states))
    }

    pub fn up_count(&self) -> usize {
        self.0.iter().filter(|&&up| up).count()
    }
}

/// A playable move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    Rock,
    Paper,
    Scissors,
}

impl Move {
    pub const ALL: [Move; 3] = [Move::Rock, Move::Paper, Move::Scissors];

    pub fn as_str(&self) -> &'static str {
        match self {
            Move::Rock => "Rock",
            Move::Paper => "Paper",
            Move::Scissors => "Scissors",
        }
    }

    /// True if `self` wins against `other`
    pub fn beats(&self, other: Move) -> bool {
        matches!(
            (self, other),
            (Move::Rock, Move::Scissors) | (Move::Scissors, Move::Paper) | (Move::Paper, Move::Rock)
        )
    }
}

/// Classified hand sign
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gesture {
    Rock,
    Paper,
    Scissors,
    /// Pattern matched no template; never a move
    Unknown,
}

impl Gesture {
    /// Match a finger pattern against the fixed templates
    pub fn classify(fingers: FingerStates) -> Self {
        match fingers.0 {
            [false, false, false, false, false] => Gesture::Rock,
            [true, true, true, true, true] => Gesture::Paper,
            [false, true, true, false, false] => Gesture::Scissors,
            _ => Gesture::Unknown,
        }
    }

    /// Classify straight from a hand skeleton
    pub fn from_hand(hand: &HandLandmarks) -> Self {
        FingerStates::from_hand(hand)
            .map(Self::classify)
            .unwrap_or(Gesture::Unknown)
    }

    pub fn to_move(self) -> Option<Move> {
        match self {
            Gesture::Rock => Some(Move::Rock),
            Gesture::Paper => Some(Move::Paper),
            Gesture::Scissors => Some(Move::Scissors),
            Gesture::Unknown => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self.to_move() {
            Some(m) => m.as_str(),
            None => "Unknown",
        }
    }
}
