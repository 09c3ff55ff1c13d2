//! Gesture Arcade - command line entry point
//!
//! Plays one game on the webcam (built with the `camera` feature) or against a
//! recorded landmark stream:
//!
//! ```text
//! gesture-arcade maze --camera 0
//! gesture-arcade snake --replay session.jsonl --seed 42
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};

use gesture_arcade::Settings;
use gesture_arcade::app::{self, Game, GameKind, RunStats};
use gesture_arcade::audio::AudioManager;
use gesture_arcade::platform::Recording;
use gesture_arcade::renderer::HeadlessSink;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum GameArg {
    /// Head-tilt maze
    Maze,
    /// Mosquito catcher
    Catcher,
    /// Rock-paper-scissors
    Rps,
    /// Finger snake
    Snake,
}

impl From<GameArg> for GameKind {
    fn from(arg: GameArg) -> Self {
        match arg {
            GameArg::Maze => GameKind::Maze,
            GameArg::Catcher => GameKind::Catcher,
            GameArg::Rps => GameKind::Rps,
            GameArg::Snake => GameKind::Snake,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "gesture-arcade", version, about = "Webcam landmark mini-games")]
struct Cli {
    /// Game to play
    #[arg(value_enum)]
    game: GameArg,

    /// Landmark recording (JSON lines) to play instead of the camera
    #[arg(long, value_name = "PATH")]
    replay: Option<PathBuf>,

    /// Camera device index
    #[arg(long, value_name = "INDEX", default_value_t = 0)]
    camera: i32,

    /// Settings file (JSON)
    #[arg(long, value_name = "PATH")]
    settings: Option<PathBuf>,

    /// RNG seed; defaults to a random one
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many frames
    #[arg(long, value_name = "N")]
    max_frames: Option<u64>,
}

fn run_replay(
    path: &Path,
    game: &mut dyn Game,
    audio: &mut AudioManager,
    max_frames: Option<u64>,
) -> gesture_arcade::Result<RunStats> {
    let mut capture = Recording::open(path)?;
    let mut sink = HeadlessSink::new();
    app::run(game, &mut capture, &mut sink, audio, max_frames)
}

#[cfg(feature = "camera")]
fn run_live(
    index: i32,
    game: &mut dyn Game,
    audio: &mut AudioManager,
    max_frames: Option<u64>,
) -> gesture_arcade::Result<RunStats> {
    use gesture_arcade::platform::camera::{Camera, WindowKeys};
    use gesture_arcade::platform::{LiveCapture, NullModel};
    use gesture_arcade::renderer::WindowSink;

    let camera = Camera::open(index)?;
    let mut capture = LiveCapture::new(camera, NullModel::default(), WindowKeys);
    let mut sink = WindowSink::open(game.kind().title())?;
    app::run(game, &mut capture, &mut sink, audio, max_frames)
}

#[cfg(not(feature = "camera"))]
fn run_live(
    index: i32,
    _game: &mut dyn Game,
    _audio: &mut AudioManager,
    _max_frames: Option<u64>,
) -> gesture_arcade::Result<RunStats> {
    Err(gesture_arcade::ArcadeError::CaptureOpen {
        source_name: format!("camera {}", index),
        reason: "built without the `camera` feature; pass --replay".to_string(),
    })
}

fn run(cli: Cli) -> gesture_arcade::Result<()> {
    let settings = Settings::load(cli.settings.as_deref())?;
    let seed = cli.seed.unwrap_or_else(rand::random);
    log::info!("Seed {}", seed);

    let mut audio = AudioManager::load(&settings.assets.pickup_sound, &settings.audio);
    audio.open_default_output();

    let kind = GameKind::from(cli.game);
    let mut game = kind.build(&settings, seed);
    let stats = match &cli.replay {
        Some(path) => run_replay(path, game.as_mut(), &mut audio, cli.max_frames)?,
        None => run_live(cli.camera, game.as_mut(), &mut audio, cli.max_frames)?,
    };

    log::info!(
        "{} frames, {} events, {} sounds{}",
        stats.frames,
        stats.events,
        stats.sounds,
        if stats.quit { " (quit)" } else { "" }
    );
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Gesture Arcade starting...");

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => {
            log::info!("Camera released, goodbye");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
