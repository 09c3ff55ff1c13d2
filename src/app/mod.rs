//! Frame loop
//!
//! Each iteration: capture a frame, mirror it, run the landmark model, step
//! the selected game, route its events, present the scene and poll the
//! keyboard. Everything outside the game itself sits behind the platform and
//! renderer traits, so the same loop drives live capture and replays.

pub mod games;

pub use games::{CatcherGame, MazeGame, RpsGame, SnakeGame};

use crate::assets::SpriteSheet;
use crate::audio::{AudioManager, SoundEffect};
use crate::consts::{DEFAULT_FRAME_DT, MAX_FRAME_DT};
use crate::error::Result;
use crate::landmarks::Observation;
use crate::platform::{FrameSource, KeyCommand, KeySource, LandmarkModel};
use crate::renderer::{DrawList, FrameSink};
use crate::settings::Settings;
use crate::sim::GameEvent;

/// The four games
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameKind {
    Maze,
    Catcher,
    Rps,
    Snake,
}

impl GameKind {
    pub fn title(&self) -> &'static str {
        match self {
            GameKind::Maze => "Head Tilt Maze",
            GameKind::Catcher => "Mosquito Catcher",
            GameKind::Rps => "Rock Paper Scissors",
            GameKind::Snake => "Finger Snake",
        }
    }

    /// Build the game, loading whatever sprites it uses
    pub fn build(self, settings: &Settings, seed: u64) -> Box<dyn Game> {
        match self {
            GameKind::Maze => Box::new(MazeGame::new(settings.maze.clone())),
            GameKind::Catcher => Box::new(CatcherGame::new(settings.catcher.clone(), &settings.assets, seed)),
            GameKind::Rps => Box::new(RpsGame::new(settings.rps.clone(), seed)),
            GameKind::Snake => Box::new(SnakeGame::new(settings.snake.clone(), &settings.assets, seed)),
        }
    }
}

/// One playable game: input mapping, simulation and scene drawing
pub trait Game {
    fn kind(&self) -> GameKind;

    /// Step the game with this frame's landmarks
    fn update(&mut self, observation: &Observation, frame_size: (u32, u32), dt: f32) -> Vec<GameEvent>;

    /// Handle a keyboard command (quit is handled by the loop)
    fn command(&mut self, command: KeyCommand);

    fn scene(&self) -> DrawList;

    fn sprites(&self) -> &SpriteSheet;
}

/// Totals for one run of the loop
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub frames: u64,
    pub events: u64,
    pub sounds: u32,
    /// Loop ended on `q` rather than end of stream or frame limit
    pub quit: bool,
}

/// Per-frame time step from capture timestamps
fn frame_dt(last: Option<f64>, now: f64) -> f32 {
    match last {
        Some(last) => ((now - last) as f32).clamp(0.0, MAX_FRAME_DT),
        None => DEFAULT_FRAME_DT,
    }
}

fn log_event(kind: GameKind, event: &GameEvent) {
    match event {
        GameEvent::RoundStarted => log::info!("{}: round started", kind.title()),
        GameEvent::RoundEnded { score } => log::info!("{}: round over, score {}", kind.title(), score),
        GameEvent::FinishReached => log::info!("{}: finish reached", kind.title()),
        GameEvent::RoundResolved { player, computer, outcome } => log::info!(
            "{}: {} vs {} -> {:?}",
            kind.title(),
            player.as_str(),
            computer.as_str(),
            outcome
        ),
        other => log::debug!("{}: {:?}", kind.title(), other),
    }
}

/// Run the frame loop until the stream ends, `q` is pressed or `max_frames`
/// frames have been shown
pub fn run<C, S>(
    game: &mut dyn Game,
    capture: &mut C,
    sink: &mut S,
    audio: &mut AudioManager,
    max_frames: Option<u64>,
) -> Result<RunStats>
where
    C: FrameSource + LandmarkModel + KeySource,
    S: FrameSink + ?Sized,
{
    let kind = game.kind();
    let mut stats = RunStats::default();
    let mut last_time: Option<f64> = None;

    log::info!("{} starting", kind.title());

    while max_frames.is_none_or(|max| stats.frames < max) {
        let Some(mut frame) = capture.next_frame()? else {
            break;
        };
        frame.ensure_mirrored();

        let observation = capture.detect(&frame);
        let dt = frame_dt(last_time, frame.timestamp);
        last_time = Some(frame.timestamp);

        let events = game.update(&observation, (frame.width, frame.height), dt);
        for event in &events {
            if matches!(event, GameEvent::FoodEaten { .. }) && audio.play(SoundEffect::Pickup) {
                stats.sounds += 1;
            }
            log_event(kind, event);
        }
        stats.events += events.len() as u64;

        sink.present(&frame, &game.scene(), game.sprites())?;
        stats.frames += 1;

        match capture.poll_key() {
            Some(KeyCommand::Quit) => {
                log::info!("Quit requested");
                stats.quit = true;
                break;
            }
            Some(command) => game.command(command),
            None => {}
        }
    }

    log::info!("{} stopped after {} frames", kind.title(), stats.frames);
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_dt_is_clamped() {
        assert_eq!(frame_dt(None, 5.0), DEFAULT_FRAME_DT);
        assert!((frame_dt(Some(1.0), 1.05) - 0.05).abs() < 1e-6);
        assert_eq!(frame_dt(Some(1.0), 3.0), MAX_FRAME_DT);
        assert_eq!(frame_dt(Some(3.0), 1.0), 0.0);
    }

    #[test]
    fn test_titles() {
        assert_eq!(GameKind::Snake.title(), "Finger Snake");
        assert_eq!(GameKind::Rps.title(), "Rock Paper Scissors");
    }
}
