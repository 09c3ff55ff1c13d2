//! Finger-controlled snake
//!
//! The index fingertip is the snake's head. Every sighting appends a body
//! point; the body is a polyline whose total length is capped, so the tail is
//! trimmed from the front as the head moves. Touching the food grows the cap.
//! A round is a five second intro countdown followed by a timed run.

use std::collections::VecDeque;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::state::{GameEvent, PlayArea, RoundPhase};

/// Snake tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnakeConfig {
    pub width: f32,
    pub height: f32,
    pub intro_secs: f32,
    pub round_secs: f32,
    /// Body length cap at the start of a round (pixels)
    pub start_length: f32,
    /// Cap increase per food eaten
    pub growth: f32,
    /// Food sprite size; the hit box is centred on the food point
    pub food_size: Vec2,
    /// Food stays at least this far from the left/top edges
    pub food_margin_min: Vec2,
    /// ...and this far from the right/bottom edges
    pub food_margin_max: Vec2,
}

impl Default for SnakeConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
            intro_secs: 5.0,
            round_secs: 40.0,
            start_length: 150.0,
            growth: 50.0,
            food_size: Vec2::new(60.0, 60.0),
            food_margin_min: Vec2::new(100.0, 100.0),
            food_margin_max: Vec2::new(280.0, 120.0),
        }
    }
}

impl SnakeConfig {
    pub fn area(&self) -> PlayArea {
        PlayArea::new(self.width, self.height)
    }
}

/// Control input for one tick
#[derive(Debug, Clone, Default)]
pub struct SnakeInput {
    /// Index fingertip in play-area pixels, if a hand was found
    pub fingertip: Option<Vec2>,
    /// Abandon the current round and start the intro over
    pub restart: bool,
}

/// Snake body: a polyline, oldest point first. `segments[i]` is the length
/// between `points[i]` and `points[i + 1]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SnakeBody {
    pub points: VecDeque<Vec2>,
    segments: VecDeque<f32>,
    total: f32,
}

impl SnakeBody {
    pub fn head(&self) -> Option<Vec2> {
        self.points.back().copied()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Sum of all segment lengths
    pub fn total_length(&self) -> f32 {
        self.total
    }

    /// Append a new head, joined to the old head by a new segment
    pub fn push_head(&mut self, head: Vec2) {
        if let Some(prev) = self.head() {
            let seg = prev.distance(head);
            self.segments.push_back(seg);
            self.total += seg;
        }
        self.points.push_back(head);
    }

    /// Drop tail points, oldest first, until the length fits under `max`.
    /// The head is never dropped.
    pub fn trim_to(&mut self, max: f32) {
        while self.total > max {
            let Some(seg) = self.segments.pop_front() else {
                break;
            };
            self.points.pop_front();
            self.total -= seg;
        }
        if self.segments.is_empty() {
            self.total = 0.0;
        }
    }

    pub fn clear(&mut self) {
        self.points.clear();
        self.segments.clear();
        self.total = 0.0;
    }
}

/// Complete snake state
#[derive(Debug, Clone)]
pub struct SnakeState {
    pub config: SnakeConfig,
    pub body: SnakeBody,
    pub allowed_length: f32,
    /// Centre of the food sprite
    pub food: Vec2,
    pub score: u32,
    pub phase: RoundPhase,
    /// Seconds spent in the current phase
    pub phase_time: f32,
    rng: Pcg32,
}

impl SnakeState {
    pub fn new(config: SnakeConfig, seed: u64) -> Self {
        let allowed_length = config.start_length;
        let mut state = Self {
            config,
            body: SnakeBody::default(),
            allowed_length,
            food: Vec2::ZERO,
            score: 0,
            phase: RoundPhase::NotStarted,
            phase_time: 0.0,
            rng: Pcg32::seed_from_u64(seed),
        };
        state.relocate_food();
        state
    }

    pub fn food_rect(&self) -> Rect {
        Rect::centered(self.food, self.config.food_size)
    }

    /// Seconds left in the current countdown or run
    pub fn remaining_secs(&self) -> f32 {
        let total = match self.phase {
            RoundPhase::Countdown => self.config.intro_secs,
            RoundPhase::Active => self.config.round_secs,
            RoundPhase::NotStarted | RoundPhase::Ended => return 0.0,
        };
        (total - self.phase_time).max(0.0)
    }

    /// Move the food to a fresh random spot
    pub fn relocate_food(&mut self) {
        let lo = self.config.food_margin_min;
        let hi = (Vec2::new(self.config.width, self.config.height) - self.config.food_margin_max).max(lo);
        self.food = Vec2::new(
            self.rng.random_range(lo.x as i32..=hi.x as i32) as f32,
            self.rng.random_range(lo.y as i32..=hi.y as i32) as f32,
        );
    }

    fn reset_round(&mut self) {
        self.body.clear();
        self.allowed_length = self.config.start_length;
        self.score = 0;
        self.relocate_food();
    }

    fn enter(&mut self, phase: RoundPhase) {
        self.phase = phase;
        self.phase_time = 0.0;
    }
}

/// Advance the snake game by one frame of `dt` seconds
pub fn tick(state: &mut SnakeState, input: &SnakeInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if input.restart {
        state.enter(RoundPhase::NotStarted);
    }

    match state.phase {
        RoundPhase::NotStarted => {
            state.reset_round();
            state.enter(RoundPhase::Countdown);
        }
        RoundPhase::Countdown => {
            state.phase_time += dt;
            if state.phase_time >= state.config.intro_secs {
                state.enter(RoundPhase::Active);
                events.push(GameEvent::RoundStarted);
            }
        }
        RoundPhase::Active => {
            state.phase_time += dt;
            if state.phase_time >= state.config.round_secs {
                state.enter(RoundPhase::Ended);
                events.push(GameEvent::RoundEnded { score: state.score });
                return events;
            }
            if let Some(tip) = input.fingertip {
                advance_head(state, tip, &mut events);
            }
        }
        RoundPhase::Ended => {}
    }

    events
}

fn advance_head(state: &mut SnakeState, head: Vec2, events: &mut Vec<GameEvent>) {
    state.body.push_head(head);
    state.body.trim_to(state.allowed_length);

    if state.food_rect().contains_point(head) {
        state.relocate_food();
        state.allowed_length += state.config.growth;
        state.score += 1;
        events.push(GameEvent::FoodEaten { score: state.score });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// State already in its active run with food parked far away
    fn active_state() -> SnakeState {
        let mut state = SnakeState::new(SnakeConfig::default(), 3);
        tick(&mut state, &SnakeInput::default(), 0.0);
        assert_eq!(state.phase, RoundPhase::Countdown);
        let events = tick(&mut state, &SnakeInput::default(), 5.0);
        assert!(events.contains(&GameEvent::RoundStarted));
        assert_eq!(state.phase, RoundPhase::Active);
        state.food = Vec2::new(1100.0, 650.0);
        state
    }

    #[test]
    fn test_first_point_has_no_length() {
        let mut state = active_state();
        tick(&mut state, &SnakeInput { fingertip: Some(Vec2::new(500.0, 300.0)), restart: false }, 0.03);
        assert_eq!(state.body.len(), 1);
        assert_eq!(state.body.total_length(), 0.0);
    }

    #[test]
    fn test_tail_trimmed_to_allowed_length() {
        let mut state = active_state();
        for i in 0..40 {
            let tip = Vec2::new(200.0 + 10.0 * i as f32, 300.0);
            tick(&mut state, &SnakeInput { fingertip: Some(tip), restart: false }, 0.01);
        }
        assert!(state.body.total_length() <= state.allowed_length);
        // 150 px of 10 px segments: 15 segments, 16 points
        assert_eq!(state.body.len(), 16);
        assert_eq!(state.body.head(), Some(Vec2::new(590.0, 300.0)));
        assert_eq!(state.body.points.front().copied(), Some(Vec2::new(440.0, 300.0)));
    }

    #[test]
    fn test_trim_drops_every_needed_point() {
        let mut body = SnakeBody::default();
        for p in [Vec2::ZERO, Vec2::new(10.0, 0.0), Vec2::new(20.0, 0.0), Vec2::new(220.0, 0.0)] {
            body.push_head(p);
        }
        assert_eq!(body.total_length(), 220.0);
        body.trim_to(150.0);
        // The 200 px segment alone exceeds the cap, so only the head survives
        assert_eq!(body.len(), 1);
        assert_eq!(body.head(), Some(Vec2::new(220.0, 0.0)));
        assert_eq!(body.total_length(), 0.0);
    }

    #[test]
    fn test_eating_grows_and_scores() {
        let mut state = active_state();
        state.food = Vec2::new(600.0, 400.0);
        let events = tick(&mut state, &SnakeInput { fingertip: Some(Vec2::new(610.0, 390.0)), restart: false }, 0.03);

        assert_eq!(events, vec![GameEvent::FoodEaten { score: 1 }]);
        assert_eq!(state.score, 1);
        assert_eq!(state.allowed_length, 200.0);
        let r = state.food;
        assert!((100.0..=1000.0).contains(&r.x), "food x {}", r.x);
        assert!((100.0..=600.0).contains(&r.y), "food y {}", r.y);
    }

    #[test]
    fn test_food_edge_is_not_a_hit() {
        let mut state = active_state();
        state.food = Vec2::new(600.0, 400.0);
        let events = tick(&mut state, &SnakeInput { fingertip: Some(Vec2::new(630.0, 400.0)), restart: false }, 0.03);
        assert!(events.is_empty());
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_no_hand_keeps_body() {
        let mut state = active_state();
        tick(&mut state, &SnakeInput { fingertip: Some(Vec2::new(500.0, 300.0)), restart: false }, 0.03);
        let body = state.body.clone();
        tick(&mut state, &SnakeInput::default(), 0.03);
        assert_eq!(state.body, body);
    }

    #[test]
    fn test_restart_mid_round_clears_everything() {
        let mut state = active_state();
        state.food = Vec2::new(600.0, 400.0);
        tick(&mut state, &SnakeInput { fingertip: Some(Vec2::new(500.0, 300.0)), restart: false }, 0.03);
        let events = tick(&mut state, &SnakeInput { fingertip: Some(Vec2::new(600.0, 400.0)), restart: false }, 0.03);
        assert!(events.contains(&GameEvent::FoodEaten { score: 1 }));
        assert_eq!(state.allowed_length, 200.0);

        tick(&mut state, &SnakeInput { fingertip: Some(Vec2::new(300.0, 300.0)), restart: true }, 0.03);
        assert_eq!(state.phase, RoundPhase::Countdown);
        assert_eq!(state.score, 0);
        assert!(state.body.is_empty());
        assert_eq!(state.allowed_length, 150.0);
        assert_eq!(state.remaining_secs(), 5.0);
    }

    #[test]
    fn test_restart_during_intro_restarts_countdown() {
        let mut state = SnakeState::new(SnakeConfig::default(), 3);
        tick(&mut state, &SnakeInput::default(), 0.0);
        tick(&mut state, &SnakeInput::default(), 3.0);
        assert_eq!(state.remaining_secs(), 2.0);

        tick(&mut state, &SnakeInput { fingertip: None, restart: true }, 0.03);
        assert_eq!(state.phase, RoundPhase::Countdown);
        assert_eq!(state.remaining_secs(), 5.0);
    }

    #[test]
    fn test_round_ends_and_restart_starts_over() {
        let mut state = active_state();
        state.score = 4;

        let events = tick(&mut state, &SnakeInput::default(), 40.0);
        assert_eq!(state.phase, RoundPhase::Ended);
        assert!(events.contains(&GameEvent::RoundEnded { score: 4 }));

        // Input is frozen after the end
        tick(&mut state, &SnakeInput { fingertip: Some(Vec2::new(300.0, 300.0)), restart: false }, 0.03);
        assert_eq!(state.phase, RoundPhase::Ended);

        tick(&mut state, &SnakeInput { fingertip: None, restart: true }, 0.03);
        assert_eq!(state.phase, RoundPhase::Countdown);
        assert_eq!(state.score, 0);
        assert!(state.body.is_empty());
        assert_eq!(state.allowed_length, 150.0);
    }

    proptest! {
        #[test]
        fn prop_body_never_exceeds_cap(
            tips in proptest::collection::vec((0.0f32..1280.0, 0.0f32..720.0), 1..200),
        ) {
            let mut state = active_state();
            for (x, y) in tips {
                tick(&mut state, &SnakeInput { fingertip: Some(Vec2::new(x, y)), restart: false }, 0.01);
                prop_assert!(state.body.total_length() <= state.allowed_length + 1e-2);
            }
        }
    }
}
