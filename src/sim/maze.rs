//! Head-tilt maze
//!
//! A dot is steered through a fixed maze by tilting the head. The nose tip
//! seen on the first frame after (re)calibration becomes the baseline; later
//! sightings move the dot one step per axis whenever the nose has drifted past
//! the sensitivity threshold. Touching a wall sends the dot back to the start,
//! reaching the finish zone shows a win message and asks for recalibration.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::state::{Actor, GameEvent, PlayArea, RoundPhase};
use crate::control::Calibration;

/// Message shown after reaching the finish zone
pub const WIN_MESSAGE: &str = "You made it!";

/// Maze tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MazeConfig {
    pub width: f32,
    pub height: f32,
    pub dot_radius: f32,
    pub start: Vec2,
    /// Pixels moved per tick while tilted
    pub dot_speed: f32,
    /// Nose drift (pixels) that must be exceeded before the dot moves
    pub tilt_sensitivity: f32,
    pub walls: Vec<Rect>,
    pub finish: Rect,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            width: 640.0,
            height: 480.0,
            dot_radius: 12.0,
            start: Vec2::new(60.0, 60.0),
            dot_speed: 2.0,
            tilt_sensitivity: 20.0,
            walls: vec![
                Rect::new(100.0, 120.0, 440.0, 20.0),
                Rect::new(100.0, 120.0, 20.0, 150.0),
                Rect::new(100.0, 250.0, 440.0, 20.0),
                Rect::new(520.0, 250.0, 20.0, 130.0),
                Rect::new(100.0, 380.0, 440.0, 20.0),
            ],
            finish: Rect::new(540.0, 360.0, 60.0, 40.0),
        }
    }
}

impl MazeConfig {
    pub fn area(&self) -> PlayArea {
        PlayArea::new(self.width, self.height)
    }
}

/// Control input for one maze tick
#[derive(Debug, Clone, Default)]
pub struct MazeInput {
    /// Nose tip in canvas pixels, if a face was found
    pub nose: Option<Vec2>,
    pub restart: bool,
}

/// Complete maze state
#[derive(Debug, Clone)]
pub struct MazeState {
    pub config: MazeConfig,
    pub dot: Actor,
    pub calibration: Calibration,
    pub phase: RoundPhase,
    /// Win banner, cleared on wall hit or restart
    pub message: Option<&'static str>,
    /// Finishes since the last restart
    pub wins: u32,
}

impl MazeState {
    pub fn new(config: MazeConfig) -> Self {
        let dot = Actor::new(config.start, config.dot_radius);
        Self {
            config,
            dot,
            calibration: Calibration::default(),
            phase: RoundPhase::NotStarted,
            message: None,
            wins: 0,
        }
    }

    pub fn is_calibrated(&self) -> bool {
        self.calibration.is_calibrated()
    }

    /// Bounding box of the dot used for collisions
    pub fn dot_rect(&self) -> Rect {
        Rect::around_circle(self.dot.pos, self.dot.radius)
    }

    fn return_to_start(&mut self) {
        self.dot.pos = self.config.start;
    }

    /// Back to a fresh round: uncalibrated, dot at start, no banner
    pub fn restart(&mut self) {
        self.calibration.reset();
        self.message = None;
        self.wins = 0;
        self.return_to_start();
        self.phase = RoundPhase::NotStarted;
    }
}

/// Advance the maze by one frame
pub fn tick(state: &mut MazeState, input: &MazeInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if input.restart {
        state.restart();
    }

    if state.phase == RoundPhase::NotStarted {
        state.phase = RoundPhase::Countdown;
        events.push(GameEvent::RoundStarted);
    }

    if let Some(nose) = input.nose {
        let was_calibrated = state.is_calibrated();
        let step = state.calibration.observe(nose, state.config.tilt_sensitivity);
        if !was_calibrated {
            state.phase = RoundPhase::Active;
            events.push(GameEvent::Calibrated);
        } else {
            state.dot.pos += step.as_vec2() * state.config.dot_speed;
        }
    }

    state.dot.clamp_to(state.config.area());

    let dot_rect = state.dot_rect();
    if state.config.walls.iter().any(|wall| dot_rect.intersects(wall)) {
        state.return_to_start();
        state.message = None;
        events.push(GameEvent::WallHit);
    }

    // Finish is tested against the pre-reset box, same frame as the walls
    if dot_rect.intersects(&state.config.finish) {
        state.message = Some(WIN_MESSAGE);
        state.wins += 1;
        state.return_to_start();
        state.calibration.reset();
        state.phase = RoundPhase::Countdown;
        events.push(GameEvent::FinishReached);
    }

    events
}
