//! Shared game-state building blocks
//!
//! Types every game uses: the bounded play area, the controlled actor, the
//! round lifecycle and the events a tick reports back to the shell.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::control::Move;

/// Bounded play surface in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayArea {
    pub width: f32,
    pub height: f32,
}

impl PlayArea {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Smaller of the two dimensions (drives size scaling)
    pub fn min_side(&self) -> f32 {
        self.width.min(self.height)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Player-controlled circle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub pos: Vec2,
    pub radius: f32,
}

impl Actor {
    pub fn new(pos: Vec2, radius: f32) -> Self {
        Self { pos, radius }
    }

    /// Keep the whole circle on the play area:
    /// `radius <= x <= width - radius`, same for y.
    pub fn clamp_to(&mut self, area: PlayArea) {
        let min = Vec2::splat(self.radius);
        let max = Vec2::new(area.width - self.radius, area.height - self.radius).max(min);
        self.pos = self.pos.clamp(min, max);
    }
}

/// Round lifecycle shared by all games
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Fresh state, or just restarted
    #[default]
    NotStarted,
    /// Intro countdown, or waiting for calibration
    Countdown,
    /// Accepting control input
    Active,
    /// Timed out or resolved; waiting for restart
    Ended,
}

/// Outcome of a rock-paper-scissors round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundOutcome {
    PlayerWins,
    ComputerWins,
    Tie,
}

impl RoundOutcome {
    pub fn decide(player: Move, computer: Move) -> Self {
        if player == computer {
            RoundOutcome::Tie
        } else if player.beats(computer) {
            RoundOutcome::PlayerWins
        } else {
            RoundOutcome::ComputerWins
        }
    }
}

/// Something that happened during a tick
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    RoundStarted,
    RoundEnded { score: u32 },
    /// Calibration baseline captured
    Calibrated,
    /// Maze dot touched a wall and went back to start
    WallHit,
    FinishReached,
    MosquitoSpawned { id: u32 },
    MosquitoSwatted { id: u32 },
    MosquitoExpired { id: u32 },
    FoodEaten { score: u32 },
    RoundResolved { player: Move, computer: Move, outcome: RoundOutcome },
    /// No recognizable gesture when the countdown ran out
    GestureMissed,
}
