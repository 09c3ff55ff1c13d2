//! End-to-end runs of the frame loop over in-memory landmark recordings

use std::cell::Cell;
use std::rc::Rc;

use glam::Vec2;

use gesture_arcade::app::{self, CatcherGame, Game, MazeGame, RpsGame, SnakeGame};
use gesture_arcade::audio::{AudioBackend, AudioManager, AudioSettings};
use gesture_arcade::landmarks::{FaceLandmarks, HAND_POINTS, HandLandmarks, INDEX_TIP, Landmark, Observation};
use gesture_arcade::platform::{RecordedFrame, Recording};
use gesture_arcade::renderer::HeadlessSink;
use gesture_arcade::settings::AssetPaths;
use gesture_arcade::sim::{CatcherConfig, MazeConfig, RoundPhase, RpsConfig, RpsStatus, SnakeConfig};

const FRAME_DT: f64 = 1.0 / 30.0;

fn frame(i: usize, observation: Observation, key: Option<char>) -> RecordedFrame {
    RecordedFrame {
        width: 640,
        height: 480,
        timestamp: i as f64 * FRAME_DT,
        observation,
        key,
    }
}

fn face(x: f32, y: f32) -> Observation {
    Observation {
        faces: vec![FaceLandmarks {
            points: vec![Landmark::new(0.5, 0.5), Landmark::new(x, y)],
        }],
        hands: Vec::new(),
    }
}

/// Full hand with every finger extended, optionally moving one landmark
fn open_hand(moved: Option<(usize, Landmark)>) -> Observation {
    let mut points: Vec<Landmark> = (0..HAND_POINTS)
        .map(|i| Landmark::new(0.5, 0.9 - i as f32 * 0.03))
        .collect();
    // Thumb tip left of its IP joint
    points[4] = Landmark::new(0.40, 0.78);
    points[3] = Landmark::new(0.45, 0.81);
    if let Some((i, p)) = moved {
        points[i] = p;
    }
    Observation {
        faces: Vec::new(),
        hands: vec![HandLandmarks { points }],
    }
}

/// Output device that accepts every clip
struct CountingOutput(Rc<Cell<u32>>);

impl AudioBackend for CountingOutput {
    fn play_clip(&mut self, clip: &[u8], _volume: f32) -> bool {
        assert!(!clip.is_empty());
        self.0.set(self.0.get() + 1);
        true
    }
}

fn missing_assets() -> AssetPaths {
    let mut assets = AssetPaths::default();
    assets.background = "/nonexistent/bg.jpg".into();
    assets.mosquito = "/nonexistent/mosquito.jpg".into();
    assets.hand = "/nonexistent/hand.jpg".into();
    assets.food = "/nonexistent/Donut.png".into();
    assets
}

#[test]
fn test_maze_calibrates_then_follows_tilt() {
    let mut frames = vec![frame(0, face(0.5, 0.5), None)];
    // Nose 64px right of the baseline: one step right per frame
    for i in 1..=10 {
        frames.push(frame(i, face(0.6, 0.5), None));
    }
    let mut capture = Recording::from_frames(&frames).unwrap();
    let mut game = MazeGame::new(MazeConfig::default());
    let mut sink = HeadlessSink::new();
    let mut audio = AudioManager::silent();

    let stats = app::run(&mut game, &mut capture, &mut sink, &mut audio, None).unwrap();

    assert_eq!(stats.frames, 11);
    assert!(!stats.quit);
    assert!(game.state().is_calibrated());
    assert_eq!(game.state().dot.pos, Vec2::new(80.0, 60.0));
    assert!(sink.last_scene().unwrap().has_text("Tilt your head"));
}

#[test]
fn test_quit_key_stops_loop() {
    let frames: Vec<_> = (0..10)
        .map(|i| frame(i, Observation::default(), if i == 2 { Some('q') } else { None }))
        .collect();
    let mut capture = Recording::from_frames(&frames).unwrap();
    let mut game = CatcherGame::new(CatcherConfig::default(), &missing_assets(), 5);
    let mut sink = HeadlessSink::new();
    let mut audio = AudioManager::silent();

    let stats = app::run(&mut game, &mut capture, &mut sink, &mut audio, None).unwrap();

    assert!(stats.quit);
    assert_eq!(stats.frames, 3);
    assert_eq!(sink.frames(), 3);
    assert_eq!(capture.frames_read(), 3);
    assert_eq!(game.state().phase, RoundPhase::Active);
}

#[test]
fn test_max_frames_limits_run() {
    let frames: Vec<_> = (0..10).map(|i| frame(i, Observation::default(), None)).collect();
    let mut capture = Recording::from_frames(&frames).unwrap();
    let mut game = MazeGame::new(MazeConfig::default());
    let mut sink = HeadlessSink::new();
    let mut audio = AudioManager::silent();

    let stats = app::run(&mut game, &mut capture, &mut sink, &mut audio, Some(4)).unwrap();
    assert_eq!(stats.frames, 4);
    assert_eq!(capture.frames_read(), 4);
}

#[test]
fn test_rps_round_over_replay() {
    // 'r' on the first frame starts the countdown, then an open hand is held
    let mut frames = vec![frame(0, Observation::default(), Some('r'))];
    for i in 1..=60 {
        frames.push(frame(i, open_hand(None), None));
    }
    let mut capture = Recording::from_frames(&frames).unwrap();
    // One second of countdown in total
    let mut game = RpsGame::new(RpsConfig { prompt_secs: 0.25 }, 9);
    let mut sink = HeadlessSink::new();
    let mut audio = AudioManager::silent();

    app::run(&mut game, &mut capture, &mut sink, &mut audio, None).unwrap();

    let state = game.state();
    assert_eq!(state.phase, RoundPhase::Ended);
    assert!(matches!(state.status, RpsStatus::Resolved(_)));
    assert_eq!(state.player_move.map(|m| m.as_str()), Some("Paper"));
    assert!(state.player_score + state.computer_score <= 1);
}

#[test]
fn test_snake_eats_food_and_plays_sound() {
    let clip = std::env::temp_dir().join(format!("gesture_arcade_pop_{}.wav", std::process::id()));
    std::fs::write(&clip, b"RIFF").unwrap();
    let mut audio = AudioManager::load(&clip, &AudioSettings::default());
    assert!(audio.has_clip());
    let heard = Rc::new(Cell::new(0));
    audio.set_backend(Box::new(CountingOutput(heard.clone())));

    let config = SnakeConfig {
        intro_secs: 0.0,
        ..SnakeConfig::default()
    };
    let (w, h) = (config.width, config.height);
    let mut game = SnakeGame::new(config, &missing_assets(), 21);
    let mut sink = HeadlessSink::new();

    // Two empty frames: intro, then the round starts
    let intro: Vec<_> = (0..2).map(|i| frame(i, Observation::default(), None)).collect();
    let mut capture = Recording::from_frames(&intro).unwrap();
    app::run(&mut game, &mut capture, &mut sink, &mut audio, None).unwrap();
    assert_eq!(game.state().phase, RoundPhase::Active);

    let food = game.state().food;
    let tip = Landmark::new(food.x / w, food.y / h);
    let frames = vec![frame(0, open_hand(Some((INDEX_TIP, tip))), None)];
    let mut capture = Recording::from_frames(&frames).unwrap();
    let stats = app::run(&mut game, &mut capture, &mut sink, &mut audio, None).unwrap();

    assert_eq!(game.state().score, 1);
    assert_eq!(stats.sounds, 1);
    assert_eq!(audio.played(), 1);
    assert_eq!(heard.get(), 1);
    assert_eq!(game.sprites().fallback_count(), 1);

    let _ = std::fs::remove_file(&clip);
}

#[test]
fn test_malformed_recording_is_error() {
    use std::io::Cursor;

    let text = "{\"width\":640,\"height\":480,\"timestamp\":0.0}\n{ broken\n";
    let mut capture = Recording::from_reader(Cursor::new(text.as_bytes().to_vec()));
    let mut game = MazeGame::new(MazeConfig::default());
    let mut sink = HeadlessSink::new();
    let mut audio = AudioManager::silent();

    let result = app::run(&mut game, &mut capture, &mut sink, &mut audio, None);
    assert!(result.is_err());
    assert_eq!(sink.frames(), 1);
}

#[test]
fn test_events_are_counted() {
    let frames = vec![frame(0, face(0.5, 0.5), None)];
    let mut capture = Recording::from_frames(&frames).unwrap();
    let mut game = MazeGame::new(MazeConfig::default());
    let mut sink = HeadlessSink::new();
    let mut audio = AudioManager::silent();

    let stats = app::run(&mut game, &mut capture, &mut sink, &mut audio, None).unwrap();
    // RoundStarted + Calibrated
    assert_eq!(stats.events, 2);
}

#[test]
fn test_sound_without_output_is_not_counted() {
    let clip = std::env::temp_dir().join(format!("gesture_arcade_mute_{}.wav", std::process::id()));
    std::fs::write(&clip, b"RIFF").unwrap();
    let mut audio = AudioManager::load(&clip, &AudioSettings::default());

    let config = SnakeConfig {
        intro_secs: 0.0,
        ..SnakeConfig::default()
    };
    let (w, h) = (config.width, config.height);
    let mut game = SnakeGame::new(config, &missing_assets(), 4);
    let mut sink = HeadlessSink::new();

    let intro: Vec<_> = (0..2).map(|i| frame(i, Observation::default(), None)).collect();
    let mut capture = Recording::from_frames(&intro).unwrap();
    app::run(&mut game, &mut capture, &mut sink, &mut audio, None).unwrap();

    let food = game.state().food;
    let frames = vec![frame(0, open_hand(Some((INDEX_TIP, Landmark::new(food.x / w, food.y / h)))), None)];
    let mut capture = Recording::from_frames(&frames).unwrap();
    let stats = app::run(&mut game, &mut capture, &mut sink, &mut audio, None).unwrap();

    assert_eq!(game.state().score, 1);
    assert_eq!(stats.sounds, 0);
    assert_eq!(audio.played(), 0);

    let _ = std::fs::remove_file(&clip);
}
