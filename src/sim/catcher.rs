//! Mosquito catcher
//!
//! Mosquitoes spawn at random, drift and bounce around the play area, and
//! expire after a random number of ticks. The player swats them by moving a
//! hand box (centred on the palm) over them before the round clock runs out.

use glam::Vec2;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::state::{GameEvent, PlayArea, RoundPhase};

/// Velocity multipliers a fresh mosquito picks from (per axis)
const SPEED_STEPS: [f32; 6] = [-3.0, -2.0, -1.0, 1.0, 2.0, 3.0];

/// Catcher tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatcherConfig {
    pub width: f32,
    pub height: f32,
    /// Round length in seconds
    pub round_secs: u32,
    /// Spawn chance per tick at the reference width; scaled by `1366 / width`
    pub spawn_chance: f64,
    pub min_lifetime: u32,
    pub max_lifetime: u32,
    /// How far past the edge a mosquito may drift before it is dropped
    pub offscreen_margin: f32,
}

impl Default for CatcherConfig {
    fn default() -> Self {
        Self {
            width: 1366.0,
            height: 768.0,
            round_secs: 30,
            spawn_chance: 0.04,
            min_lifetime: 100,
            max_lifetime: 200,
            offscreen_margin: 100.0,
        }
    }
}

impl CatcherConfig {
    /// Width the spawn chance is calibrated against
    pub const REFERENCE_WIDTH: f32 = 1366.0;

    pub fn area(&self) -> PlayArea {
        PlayArea::new(self.width, self.height)
    }

    /// Mosquito sprite side, scaled with the screen
    pub fn mosquito_size(&self) -> f32 {
        (self.area().min_side() * 0.05).trunc().max(40.0)
    }

    /// Hand sprite side, scaled with the screen
    pub fn hand_size(&self) -> f32 {
        (self.area().min_side() * 0.1).trunc().max(80.0)
    }

    /// Speed unit for the velocity multipliers
    pub fn base_speed(&self) -> f32 {
        (self.area().min_side() * 0.005).trunc().max(1.0)
    }

    /// Per-tick spawn probability for this screen width
    pub fn effective_spawn_chance(&self) -> f64 {
        (self.spawn_chance * (Self::REFERENCE_WIDTH / self.width) as f64).clamp(0.0, 1.0)
    }
}

/// A moving, expiring target
#[derive(Debug, Clone, PartialEq)]
pub struct Mosquito {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub vel: Vec2,
    /// Ticks left before it flies away
    pub lifetime: i32,
}

impl Mosquito {
    pub fn rect(&self, size: f32) -> Rect {
        Rect::from_origin(self.pos, Vec2::splat(size))
    }
}

/// Control input for one catcher tick
#[derive(Debug, Clone, Default)]
pub struct CatcherInput {
    /// Palm centre in play-area pixels, if a hand was found
    pub hand_center: Option<Vec2>,
    pub restart: bool,
}

/// Complete catcher state
#[derive(Debug, Clone)]
pub struct CatcherState {
    pub config: CatcherConfig,
    /// Top-left of the hand box
    pub hand: Vec2,
    /// Active mosquitoes in spawn (id) order
    pub mosquitoes: Vec<Mosquito>,
    pub score: u32,
    pub phase: RoundPhase,
    /// Seconds since the round started
    pub elapsed: f32,
    rng: Pcg32,
    next_id: u32,
}

impl CatcherState {
    pub fn new(config: CatcherConfig, seed: u64) -> Self {
        let hand_size = config.hand_size();
        let hand = config.area().center() - Vec2::splat((hand_size / 2.0).floor());
        Self {
            config,
            hand: hand.floor(),
            mosquitoes: Vec::new(),
            score: 0,
            phase: RoundPhase::NotStarted,
            elapsed: 0.0,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Whole seconds left in the round
    pub fn remaining_secs(&self) -> u32 {
        self.config.round_secs.saturating_sub(self.elapsed.floor() as u32)
    }

    pub fn hand_rect(&self) -> Rect {
        Rect::from_origin(self.hand, Vec2::splat(self.config.hand_size()))
    }

    /// Clear score and mosquitoes; the next tick starts a new round
    pub fn restart(&mut self) {
        self.score = 0;
        self.mosquitoes.clear();
        self.elapsed = 0.0;
        self.phase = RoundPhase::NotStarted;
    }

    /// Add a mosquito at an explicit position
    pub fn spawn_at(&mut self, pos: Vec2, vel: Vec2, lifetime: i32) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.mosquitoes.push(Mosquito { id, pos, vel, lifetime });
        id
    }

    /// Add a mosquito at a random position with random velocity and lifetime
    pub fn spawn_random(&mut self) -> u32 {
        let size = self.config.mosquito_size();
        let max_x = (self.config.width - size).max(0.0) as i32;
        let max_y = (self.config.height - size).max(0.0) as i32;
        let pos = Vec2::new(
            self.rng.random_range(0..=max_x) as f32,
            self.rng.random_range(0..=max_y) as f32,
        );

        let base = self.config.base_speed();
        let sx = SPEED_STEPS.choose(&mut self.rng).copied().unwrap_or(1.0);
        let sy = SPEED_STEPS.choose(&mut self.rng).copied().unwrap_or(1.0);

        let lo = self.config.min_lifetime.min(self.config.max_lifetime);
        let hi = self.config.max_lifetime.max(lo);
        let lifetime = self.rng.random_range(lo..=hi) as i32;

        self.spawn_at(pos, Vec2::new(sx, sy) * base, lifetime)
    }
}

/// Advance the catcher by one frame of `dt` seconds
pub fn tick(state: &mut CatcherState, input: &CatcherInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if input.restart {
        state.restart();
    }

    // Hand follows the palm even after the round ends
    if let Some(center) = input.hand_center {
        state.hand = crate::control::box_origin_from_center(
            center,
            state.config.hand_size(),
            state.config.area(),
        );
    }

    match state.phase {
        RoundPhase::NotStarted => {
            state.phase = RoundPhase::Active;
            state.elapsed = 0.0;
            events.push(GameEvent::RoundStarted);
            return events;
        }
        RoundPhase::Active => {}
        RoundPhase::Countdown | RoundPhase::Ended => return events,
    }

    state.elapsed += dt;
    if state.remaining_secs() == 0 {
        state.phase = RoundPhase::Ended;
        events.push(GameEvent::RoundEnded { score: state.score });
        return events;
    }

    let chance = state.config.effective_spawn_chance();
    if chance > 0.0 && state.rng.random_bool(chance) {
        let id = state.spawn_random();
        events.push(GameEvent::MosquitoSpawned { id });
    }

    let size = state.config.mosquito_size();
    let margin = state.config.offscreen_margin;
    let (width, height) = (state.config.width, state.config.height);
    let hand = state.hand_rect();
    let mut swatted = 0;

    state.mosquitoes.retain_mut(|m| {
        m.pos += m.vel;
        m.lifetime -= 1;

        let gone = m.pos.x < -margin
            || m.pos.x > width + margin
            || m.pos.y < -margin
            || m.pos.y > height + margin;
        if m.lifetime <= 0 || gone {
            events.push(GameEvent::MosquitoExpired { id: m.id });
            return false;
        }

        if m.pos.x <= 0.0 || m.pos.x >= width - size {
            m.vel.x = -m.vel.x;
        }
        if m.pos.y <= 0.0 || m.pos.y >= height - size {
            m.vel.y = -m.vel.y;
        }

        if hand.intersects(&m.rect(size)) {
            swatted += 1;
            events.push(GameEvent::MosquitoSwatted { id: m.id });
            return false;
        }

        true
    });

    state.score += swatted;
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const DT: f32 = 1.0 / 30.0;

    fn quiet_config() -> CatcherConfig {
        CatcherConfig {
            spawn_chance: 0.0,
            ..CatcherConfig::default()
        }
    }

    /// Started round with the hand parked in the bottom-right corner
    fn started(config: CatcherConfig) -> CatcherState {
        let mut state = CatcherState::new(config, 7);
        let corner = Vec2::new(state.config.width, state.config.height);
        tick(&mut state, &CatcherInput { hand_center: Some(corner), restart: false }, 0.0);
        assert_eq!(state.phase, RoundPhase::Active);
        state
    }

    #[test]
    fn test_sizes_scale_with_screen() {
        let config = CatcherConfig::default();
        assert_eq!(config.mosquito_size(), 40.0);
        assert_eq!(config.hand_size(), 80.0);
        assert_eq!(config.base_speed(), 3.0);

        let big = CatcherConfig { width: 3840.0, height: 2160.0, ..CatcherConfig::default() };
        assert_eq!(big.mosquito_size(), 108.0);
        assert_eq!(big.hand_size(), 216.0);
    }

    #[test]
    fn test_one_step_lifetime_expires() {
        let mut state = started(quiet_config());
        state.spawn_at(Vec2::new(100.0, 100.0), Vec2::new(3.0, 3.0), 1);

        let events = tick(&mut state, &CatcherInput::default(), DT);
        assert!(state.mosquitoes.is_empty());
        assert_eq!(state.score, 0);
        assert!(events.iter().any(|e| matches!(e, GameEvent::MosquitoExpired { .. })));
    }

    #[test]
    fn test_swat_scores() {
        let mut state = started(quiet_config());
        let hand = state.hand;
        let id = state.spawn_at(hand + Vec2::splat(10.0), Vec2::ZERO, 150);

        let events = tick(&mut state, &CatcherInput::default(), DT);
        assert!(events.contains(&GameEvent::MosquitoSwatted { id }));
        assert_eq!(state.score, 1);
        assert!(state.mosquitoes.is_empty());
    }

    #[test]
    fn test_bounces_off_edges() {
        let mut state = started(quiet_config());
        state.spawn_at(Vec2::new(2.0, 300.0), Vec2::new(-3.0, 0.0), 150);

        tick(&mut state, &CatcherInput::default(), DT);
        let m = &state.mosquitoes[0];
        assert_eq!(m.pos, Vec2::new(-1.0, 300.0));
        assert_eq!(m.vel, Vec2::new(3.0, 0.0));
    }

    #[test]
    fn test_far_offscreen_removed() {
        let mut state = started(quiet_config());
        state.spawn_at(Vec2::new(-99.0, 300.0), Vec2::new(-3.0, 0.0), 150);

        tick(&mut state, &CatcherInput::default(), DT);
        assert!(state.mosquitoes.is_empty());
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_round_times_out() {
        let mut state = started(quiet_config());
        state.spawn_at(Vec2::new(300.0, 300.0), Vec2::ZERO, 10_000);

        for _ in 0..29 {
            tick(&mut state, &CatcherInput::default(), 1.0);
        }
        assert_eq!(state.phase, RoundPhase::Active);
        assert_eq!(state.remaining_secs(), 1);

        let events = tick(&mut state, &CatcherInput::default(), 1.0);
        assert_eq!(state.phase, RoundPhase::Ended);
        assert!(events.contains(&GameEvent::RoundEnded { score: 0 }));

        // Frozen once ended
        let before = state.mosquitoes.clone();
        tick(&mut state, &CatcherInput::default(), 1.0);
        assert_eq!(state.mosquitoes, before);
    }

    #[test]
    fn test_no_hand_keeps_position() {
        let mut state = started(quiet_config());
        let hand = state.hand;
        tick(&mut state, &CatcherInput::default(), DT);
        assert_eq!(state.hand, hand);
    }

    #[test]
    fn test_hand_clamped_inside_screen() {
        let state = started(quiet_config());
        let size = state.config.hand_size();
        assert_eq!(state.hand, Vec2::new(1366.0 - size, 768.0 - size));
    }

    #[test]
    fn test_restart_clears_round() {
        let mut state = started(CatcherConfig { spawn_chance: 1.0, ..CatcherConfig::default() });
        for _ in 0..20 {
            tick(&mut state, &CatcherInput::default(), DT);
        }
        assert!(!state.mosquitoes.is_empty());
        state.score = 5;

        let events = tick(&mut state, &CatcherInput { hand_center: None, restart: true }, DT);
        assert!(events.contains(&GameEvent::RoundStarted));
        assert_eq!(state.score, 0);
        assert_eq!(state.phase, RoundPhase::Active);
        assert!(state.mosquitoes.is_empty());
        assert_eq!(state.elapsed, 0.0);
    }

    #[test]
    fn test_seeded_spawns_are_deterministic() {
        let config = CatcherConfig { spawn_chance: 0.5, ..CatcherConfig::default() };
        let mut a = CatcherState::new(config.clone(), 42);
        let mut b = CatcherState::new(config, 42);
        for _ in 0..60 {
            tick(&mut a, &CatcherInput::default(), DT);
            tick(&mut b, &CatcherInput::default(), DT);
        }
        assert_eq!(a.mosquitoes, b.mosquitoes);
        assert_eq!(a.score, b.score);
    }

    proptest! {
        #[test]
        fn prop_expired_never_survive_a_tick(
            seed in any::<u64>(),
            lifetimes in proptest::collection::vec(-3i32..4, 1..20),
        ) {
            let mut state = CatcherState::new(quiet_config(), seed);
            tick(&mut state, &CatcherInput::default(), 0.0);
            for (i, lifetime) in lifetimes.iter().enumerate() {
                let pos = Vec2::new(200.0 + 50.0 * i as f32, 200.0);
                state.spawn_at(pos, Vec2::new(1.0, 1.0), *lifetime);
            }
            tick(&mut state, &CatcherInput::default(), DT);
            prop_assert!(state.mosquitoes.iter().all(|m| m.lifetime > 0));
            prop_assert_eq!(
                state.mosquitoes.len(),
                lifetimes.iter().filter(|&&l| l > 1).count()
            );
        }

        #[test]
        fn prop_restart_resets_score_and_entities(seed in any::<u64>(), ticks in 0usize..120) {
            let config = CatcherConfig { spawn_chance: 0.3, ..CatcherConfig::default() };
            let mut state = CatcherState::new(config, seed);
            for i in 0..ticks {
                let hand = Vec2::new((i * 37 % 1366) as f32, (i * 11 % 768) as f32);
                tick(&mut state, &CatcherInput { hand_center: Some(hand), restart: false }, DT);
            }
            tick(&mut state, &CatcherInput { hand_center: None, restart: true }, DT);
            prop_assert_eq!(state.score, 0);
            prop_assert!(state.mosquitoes.is_empty());
            prop_assert_eq!(state.phase, RoundPhase::Active);
        }
    }
}
