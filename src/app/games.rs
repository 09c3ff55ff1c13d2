//! Game adapters
//!
//! Each adapter turns an [`Observation`] into its simulation's input, steps
//! the simulation and draws its scene. Key commands are latched and consumed
//! by the next update, the same way one-shot inputs are cleared after a tick.

use glam::Vec2;

use super::{Game, GameKind};
use crate::assets::{SpriteSheet, SpriteSlot, placeholder};
use crate::control::{Gesture, map_to_area};
use crate::landmarks::{HandLandmarks, INDEX_TIP, MIDDLE_MCP, Observation};
use crate::platform::KeyCommand;
use crate::renderer::{DrawList, catcher_scene, maze_scene, rps_scene, snake_scene};
use crate::settings::AssetPaths;
use crate::sim::{
    CatcherConfig, CatcherInput, CatcherState, GameEvent, MazeConfig, MazeInput, MazeState, RpsConfig, RpsInput,
    RpsState, SnakeConfig, SnakeInput, SnakeState, catcher, maze, rps, snake,
};

/// Head-tilt maze
pub struct MazeGame {
    state: MazeState,
    restart: bool,
    sprites: SpriteSheet,
}

impl MazeGame {
    pub fn new(config: MazeConfig) -> Self {
        Self {
            state: MazeState::new(config),
            restart: false,
            sprites: SpriteSheet::new(),
        }
    }

    pub fn state(&self) -> &MazeState {
        &self.state
    }
}

impl Game for MazeGame {
    fn kind(&self) -> GameKind {
        GameKind::Maze
    }

    fn update(&mut self, observation: &Observation, _frame_size: (u32, u32), _dt: f32) -> Vec<GameEvent> {
        let area = self.state.config.area();
        let nose = observation
            .first_face()
            .and_then(|face| face.nose_tip())
            .map(|nose| map_to_area(nose, area));

        let input = MazeInput {
            nose,
            restart: std::mem::take(&mut self.restart),
        };
        maze::tick(&mut self.state, &input)
    }

    fn command(&mut self, command: KeyCommand) {
        if command == KeyCommand::Restart {
            self.restart = true;
        }
    }

    fn scene(&self) -> DrawList {
        maze_scene(&self.state)
    }

    fn sprites(&self) -> &SpriteSheet {
        &self.sprites
    }
}

/// Mosquito catcher
pub struct CatcherGame {
    state: CatcherState,
    restart: bool,
    sprites: SpriteSheet,
}

impl CatcherGame {
    pub fn new(config: CatcherConfig, assets: &AssetPaths, seed: u64) -> Self {
        let mut sprites = SpriteSheet::new();
        sprites.load(
            SpriteSlot::Background,
            &assets.background,
            Vec2::new(config.width, config.height),
            placeholder::BACKGROUND,
        );
        sprites.load(
            SpriteSlot::Mosquito,
            &assets.mosquito,
            Vec2::splat(config.mosquito_size()),
            placeholder::MOSQUITO,
        );
        sprites.load(SpriteSlot::Hand, &assets.hand, Vec2::splat(config.hand_size()), placeholder::HAND);

        Self {
            state: CatcherState::new(config, seed),
            restart: false,
            sprites,
        }
    }

    pub fn state(&self) -> &CatcherState {
        &self.state
    }
}

impl Game for CatcherGame {
    fn kind(&self) -> GameKind {
        GameKind::Catcher
    }

    fn update(&mut self, observation: &Observation, _frame_size: (u32, u32), dt: f32) -> Vec<GameEvent> {
        let area = self.state.config.area();
        let hand_center = observation
            .first_hand()
            .and_then(|hand| hand.point(MIDDLE_MCP))
            .map(|palm| map_to_area(palm, area));

        let input = CatcherInput {
            hand_center,
            restart: std::mem::take(&mut self.restart),
        };
        catcher::tick(&mut self.state, &input, dt)
    }

    fn command(&mut self, command: KeyCommand) {
        if command == KeyCommand::Restart {
            self.restart = true;
        }
    }

    fn scene(&self) -> DrawList {
        catcher_scene(&self.state)
    }

    fn sprites(&self) -> &SpriteSheet {
        &self.sprites
    }
}

/// Rock-paper-scissors against the computer
pub struct RpsGame {
    state: RpsState,
    play: bool,
    new_match: bool,
    /// Hand from the latest frame, for the skeleton overlay
    hand: Option<HandLandmarks>,
    frame_size: (u32, u32),
    sprites: SpriteSheet,
}

impl RpsGame {
    pub fn new(config: RpsConfig, seed: u64) -> Self {
        Self {
            state: RpsState::new(config, seed),
            play: false,
            new_match: false,
            hand: None,
            frame_size: (640, 480),
            sprites: SpriteSheet::new(),
        }
    }

    pub fn state(&self) -> &RpsState {
        &self.state
    }
}

impl Game for RpsGame {
    fn kind(&self) -> GameKind {
        GameKind::Rps
    }

    fn update(&mut self, observation: &Observation, frame_size: (u32, u32), dt: f32) -> Vec<GameEvent> {
        self.frame_size = frame_size;
        self.hand = observation.first_hand().cloned();

        let input = RpsInput {
            gesture: self.hand.as_ref().map(Gesture::from_hand),
            play: std::mem::take(&mut self.play),
            new_match: std::mem::take(&mut self.new_match),
        };
        rps::tick(&mut self.state, &input, dt)
    }

    fn command(&mut self, command: KeyCommand) {
        match command {
            KeyCommand::Restart => self.play = true,
            KeyCommand::NewMatch => self.new_match = true,
            KeyCommand::Quit => {}
        }
    }

    fn scene(&self) -> DrawList {
        let (w, h) = self.frame_size;
        rps_scene(&self.state, self.hand.as_ref(), w as f32, h as f32)
    }

    fn sprites(&self) -> &SpriteSheet {
        &self.sprites
    }
}

/// Finger-drawn snake
pub struct SnakeGame {
    state: SnakeState,
    restart: bool,
    sprites: SpriteSheet,
}

impl SnakeGame {
    pub fn new(config: SnakeConfig, assets: &AssetPaths, seed: u64) -> Self {
        let mut sprites = SpriteSheet::new();
        sprites.load(SpriteSlot::Food, &assets.food, config.food_size, placeholder::FOOD);

        Self {
            state: SnakeState::new(config, seed),
            restart: false,
            sprites,
        }
    }

    pub fn state(&self) -> &SnakeState {
        &self.state
    }
}

impl Game for SnakeGame {
    fn kind(&self) -> GameKind {
        GameKind::Snake
    }

    fn update(&mut self, observation: &Observation, _frame_size: (u32, u32), dt: f32) -> Vec<GameEvent> {
        let area = self.state.config.area();
        let fingertip = observation
            .first_hand()
            .and_then(|hand| hand.point(INDEX_TIP))
            .map(|tip| map_to_area(tip, area));

        let input = SnakeInput {
            fingertip,
            restart: std::mem::take(&mut self.restart),
        };
        snake::tick(&mut self.state, &input, dt)
    }

    fn command(&mut self, command: KeyCommand) {
        if command == KeyCommand::Restart {
            self.restart = true;
        }
    }

    fn scene(&self) -> DrawList {
        snake_scene(&self.state)
    }

    fn sprites(&self) -> &SpriteSheet {
        &self.sprites
    }
}
