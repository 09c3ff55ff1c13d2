//! Rock-paper-scissors against the computer
//!
//! A round is a four second countdown ("Rock...", "Paper...", "Scissors...",
//! "Show your move!"). When it runs out the player's hand sign is read once:
//! a recognized move is played against a random computer move and scored, an
//! unrecognized sign (or no hand at all) ends the round as "not detected".

use rand::seq::IndexedRandom;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::state::{GameEvent, RoundOutcome, RoundPhase};
use crate::control::{Gesture, Move};

/// Rock-paper-scissors tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RpsConfig {
    /// Seconds per countdown prompt
    pub prompt_secs: f32,
}

impl Default for RpsConfig {
    fn default() -> Self {
        Self { prompt_secs: 1.0 }
    }
}

/// Countdown prompts, one per `prompt_secs`
pub const COUNTDOWN_PROMPTS: [&str; 4] = ["Rock...", "Paper...", "Scissors...", "Show your move!"];

/// What the status line says
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RpsStatus {
    /// Waiting for the first round
    Idle,
    GetReady,
    Resolved(RoundOutcome),
    NotDetected,
}

impl RpsStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RpsStatus::Idle => "Press R to Start",
            RpsStatus::GetReady => "Get ready!",
            RpsStatus::Resolved(RoundOutcome::Tie) => "It's a Tie!",
            RpsStatus::Resolved(RoundOutcome::PlayerWins) => "You Win!",
            RpsStatus::Resolved(RoundOutcome::ComputerWins) => "Computer Wins!",
            RpsStatus::NotDetected => "Gesture not detected",
        }
    }
}

/// Control input for one tick
#[derive(Debug, Clone, Default)]
pub struct RpsInput {
    /// Sign of the first detected hand; `None` when no hand was found
    pub gesture: Option<Gesture>,
    /// Start the next round (ignored while counting down)
    pub play: bool,
    /// Reset the scoreboard and go back to idle
    pub new_match: bool,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct RpsState {
    pub config: RpsConfig,
    pub phase: RoundPhase,
    pub status: RpsStatus,
    pub player_score: u32,
    pub computer_score: u32,
    pub player_move: Option<Move>,
    pub computer_move: Option<Move>,
    /// Seconds into the current countdown
    pub countdown: f32,
    rng: Pcg32,
}

impl RpsState {
    pub fn new(config: RpsConfig, seed: u64) -> Self {
        Self {
            config,
            phase: RoundPhase::NotStarted,
            status: RpsStatus::Idle,
            player_score: 0,
            computer_score: 0,
            player_move: None,
            computer_move: None,
            countdown: 0.0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Current countdown prompt, if counting down
    pub fn prompt(&self) -> Option<&'static str> {
        if self.phase != RoundPhase::Countdown {
            return None;
        }
        let step = (self.countdown / self.config.prompt_secs.max(f32::EPSILON)) as usize;
        COUNTDOWN_PROMPTS.get(step).copied()
    }

    fn countdown_secs(&self) -> f32 {
        self.config.prompt_secs * COUNTDOWN_PROMPTS.len() as f32
    }

    fn begin_round(&mut self) {
        self.phase = RoundPhase::Countdown;
        self.countdown = 0.0;
        self.player_move = None;
        self.computer_move = None;
        self.status = RpsStatus::GetReady;
    }

    /// Zero the scoreboard and return to idle
    pub fn new_match(&mut self) {
        self.player_score = 0;
        self.computer_score = 0;
        self.player_move = None;
        self.computer_move = None;
        self.countdown = 0.0;
        self.phase = RoundPhase::NotStarted;
        self.status = RpsStatus::Idle;
    }

    fn resolve(&mut self, gesture: Option<Gesture>) -> GameEvent {
        self.phase = RoundPhase::Ended;
        let Some(player) = gesture.and_then(Gesture::to_move) else {
            self.status = RpsStatus::NotDetected;
            return GameEvent::GestureMissed;
        };

        let computer = Move::ALL.choose(&mut self.rng).copied().unwrap_or(Move::Rock);
        let outcome = RoundOutcome::decide(player, computer);
        match outcome {
            RoundOutcome::PlayerWins => self.player_score += 1,
            RoundOutcome::ComputerWins => self.computer_score += 1,
            RoundOutcome::Tie => {}
        }
        self.player_move = Some(player);
        self.computer_move = Some(computer);
        self.status = RpsStatus::Resolved(outcome);
        GameEvent::RoundResolved { player, computer, outcome }
    }
}

/// Advance by one frame of `dt` seconds
pub fn tick(state: &mut RpsState, input: &RpsInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if input.new_match {
        state.new_match();
    }

    match state.phase {
        RoundPhase::NotStarted | RoundPhase::Ended | RoundPhase::Active => {
            if input.play {
                state.begin_round();
                events.push(GameEvent::RoundStarted);
            }
        }
        RoundPhase::Countdown => {
            state.countdown += dt;
            if state.countdown >= state.countdown_secs() {
                events.push(state.resolve(input.gesture));
            }
        }
    }

    events
}
