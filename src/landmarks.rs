//! Landmark model output types
//!
//! The landmark model itself is an external collaborator; these are the
//! normalized keypoints it hands back for one frame. Coordinates are in image
//! space, 0..1 along each axis, measured on the already-mirrored frame.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Face mesh: nose tip
pub const NOSE_TIP: usize = 1;

/// Hand: wrist
pub const WRIST: usize = 0;
/// Hand: thumb tip
pub const THUMB_TIP: usize = 4;
/// Hand: index finger tip
pub const INDEX_TIP: usize = 8;
/// Hand: middle finger knuckle (stable palm centre)
pub const MIDDLE_MCP: usize = 9;
/// Hand: middle finger tip
pub const MIDDLE_TIP: usize = 12;
/// Hand: ring finger tip
pub const RING_TIP: usize = 16;
/// Hand: pinky tip
pub const PINKY_TIP: usize = 20;

/// Fingertips in thumb..pinky order
pub const FINGER_TIPS: [usize; 5] = [THUMB_TIP, INDEX_TIP, MIDDLE_TIP, RING_TIP, PINKY_TIP];

/// Points per detected hand
pub const HAND_POINTS: usize = 21;

/// Bones of the 21-point hand skeleton, as landmark index pairs
pub const HAND_CONNECTIONS: [(usize, usize); 21] = [
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 4),
    (0, 5),
    (5, 6),
    (6, 7),
    (7, 8),
    (5, 9),
    (9, 10),
    (10, 11),
    (11, 12),
    (9, 13),
    (13, 14),
    (14, 15),
    (15, 16),
    (13, 17),
    (0, 17),
    (17, 18),
    (18, 19),
    (19, 20),
];

/// A single normalized keypoint
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub z: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y, z: 0.0 }
    }

    /// Scale to a `width` x `height` surface, truncated to whole pixels
    pub fn to_screen(&self, width: f32, height: f32) -> Vec2 {
        Vec2::new((self.x * width).trunc(), (self.y * height).trunc())
    }
}

/// Face mesh for one detected face (468 points, 478 with refined irises)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FaceLandmarks {
    pub points: Vec<Landmark>,
}

impl FaceLandmarks {
    pub fn nose_tip(&self) -> Option<Landmark> {
        self.points.get(NOSE_TIP).copied()
    }
}

/// The 21 keypoints of one detected hand
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HandLandmarks {
    pub points: Vec<Landmark>,
}

impl HandLandmarks {
    pub fn point(&self, index: usize) -> Option<Landmark> {
        self.points.get(index).copied()
    }

    /// True if the model returned the full skeleton
    pub fn is_complete(&self) -> bool {
        self.points.len() >= HAND_POINTS
    }
}

/// Everything the landmark model found in one frame
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    #[serde(default)]
    pub faces: Vec<FaceLandmarks>,
    #[serde(default)]
    pub hands: Vec<HandLandmarks>,
}

impl Observation {
    /// No subject detected
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty() && self.hands.is_empty()
    }

    pub fn first_face(&self) -> Option<&FaceLandmarks> {
        self.faces.first()
    }

    pub fn first_hand(&self) -> Option<&HandLandmarks> {
        self.hands.first()
    }
}
