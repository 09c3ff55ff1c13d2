//! Per-game scene drawing
//!
//! Each function reads a game state and returns the frame's draw list. None
//! of them mutate anything.

use glam::Vec2;

use super::draw::{Color, DrawList};
use crate::assets::SpriteSlot;
use crate::landmarks::{HAND_CONNECTIONS, HandLandmarks};
use crate::sim::{CatcherState, MazeState, Rect, RoundPhase, RpsState, SnakeState};

/// Rough advance width of one glyph at scale 1.0
const GLYPH_WIDTH: f32 = 10.0;

fn centered_x(text: &str, scale: f32, width: f32) -> f32 {
    (width / 2.0 - text.chars().count() as f32 * GLYPH_WIDTH * scale / 2.0).max(0.0)
}

// Maze palette
const MAZE_WALL: Color = Color::rgb(100, 100, 255);
const MAZE_DOT: Color = Color::rgb(255, 50, 50);
const MAZE_FINISH: Color = Color::rgb(50, 200, 100);
const MAZE_WIN: Color = Color::rgb(0, 150, 0);

pub fn maze_scene(state: &MazeState) -> DrawList {
    let cfg = &state.config;
    let mut list = DrawList::new(cfg.width, cfg.height);

    list.clear(Color::WHITE);
    for wall in &cfg.walls {
        list.rect(*wall, MAZE_WALL);
    }
    list.circle(state.dot.pos, state.dot.radius, MAZE_DOT);
    list.rect(cfg.finish, MAZE_FINISH);

    let hint = if state.is_calibrated() {
        "Tilt your head to move. Press R to reset."
    } else {
        "Look straight to calibrate..."
    };
    list.text(hint, Vec2::new(centered_x(hint, 1.0, cfg.width), 30.0), 1.0, Color::BLACK);

    if let Some(msg) = state.message {
        list.text(msg, Vec2::new(cfg.width / 2.0 - 80.0, cfg.height - 20.0), 1.0, MAZE_WIN);
    }

    list
}

// Catcher palette
const CATCHER_SCORE: Color = Color::rgb(0, 255, 255);
const CATCHER_TIME: Color = Color::rgb(255, 255, 0);
const GAME_OVER: Color = Color::rgb(255, 0, 0);

pub fn catcher_scene(state: &CatcherState) -> DrawList {
    let cfg = &state.config;
    let (w, h) = (cfg.width, cfg.height);
    let mut list = DrawList::new(w, h);

    list.sprite(SpriteSlot::Background, Vec2::ZERO);

    if state.phase == RoundPhase::Active {
        let size = cfg.mosquito_size();
        let screen = list.full_rect();
        for m in &state.mosquitoes {
            // Entirely off-screen mosquitoes are skipped; the sink clips the rest
            if m.rect(size).intersects(&screen) {
                list.sprite(SpriteSlot::Mosquito, m.pos);
            }
        }
    }

    list.sprite(SpriteSlot::Hand, state.hand);

    let font = (cfg.area().min_side() / 1000.0).max(0.8);
    list.text(format!("Score: {}", state.score), Vec2::new(w * 0.02, h * 0.05), font, CATCHER_SCORE);
    list.text(
        format!("Time: {}s", state.remaining_secs()),
        Vec2::new(w * 0.02, h * 0.10),
        font,
        CATCHER_TIME,
    );

    if state.phase == RoundPhase::Ended {
        let big = (cfg.area().min_side() / 500.0).max(1.5);
        let left = w / 2.0 - 120.0 * big;
        list.shade(list.full_rect(), Color::BLACK, 0.7);
        list.text("GAME OVER", Vec2::new(left, h / 2.0 - 30.0 * big), big, GAME_OVER);
        list.text(
            format!("Final Score: {}", state.score),
            Vec2::new(left, h / 2.0 + 20.0 * big),
            big * 0.7,
            Color::WHITE,
        );
        list.text(
            "Press R to restart, Q to quit",
            Vec2::new(w / 2.0 - 150.0 * big, h / 2.0 + 70.0 * big),
            big * 0.5,
            Color::WHITE,
        );
    }

    list
}

// Rock-paper-scissors palette
const RPS_COUNTDOWN: Color = Color::rgb(255, 255, 0);
const RPS_RESULT: Color = Color::rgb(0, 255, 0);
const RPS_MOVES: Color = Color::rgb(200, 200, 200);
const RPS_HINT: Color = Color::rgb(150, 255, 150);
const SKELETON_BONE: Color = Color::rgb(255, 255, 255);
const SKELETON_JOINT: Color = Color::rgb(255, 0, 0);

/// Hand skeleton overlay in `width` x `height` pixels
pub fn draw_hand_skeleton(list: &mut DrawList, hand: &HandLandmarks) {
    let (w, h) = (list.width, list.height);
    for &(a, b) in HAND_CONNECTIONS.iter() {
        if let (Some(pa), Some(pb)) = (hand.point(a), hand.point(b)) {
            list.polyline(vec![pa.to_screen(w, h), pb.to_screen(w, h)], 2.0, SKELETON_BONE);
        }
    }
    for p in &hand.points {
        list.circle(p.to_screen(w, h), 4.0, SKELETON_JOINT);
    }
}

pub fn rps_scene(state: &RpsState, hand: Option<&HandLandmarks>, width: f32, height: f32) -> DrawList {
    let (w, h) = (width, height);
    let mut list = DrawList::new(w, h);
    list.camera();

    if let Some(hand) = hand {
        draw_hand_skeleton(&mut list, hand);
    }

    if let Some(prompt) = state.prompt() {
        list.text(prompt, Vec2::new(w / 2.0 - 150.0, h / 2.0), 1.5, RPS_COUNTDOWN);
    }

    // Scoreboard header
    list.shade(Rect::new(0.0, 0.0, w, 80.0), Color::BLACK, 0.4);
    list.text(format!("Player: {}", state.player_score), Vec2::new(10.0, 50.0), 1.0, Color::WHITE);
    list.text(
        format!("Computer: {}", state.computer_score),
        Vec2::new(w - 250.0, 50.0),
        1.0,
        Color::WHITE,
    );

    list.text(
        format!("Result: {}", state.status.as_str()),
        Vec2::new(w / 2.0 - 150.0, h - 120.0),
        1.0,
        RPS_RESULT,
    );

    let name = |m: Option<crate::control::Move>| m.map(|m| m.as_str()).unwrap_or("None");
    list.text(format!("Your Move: {}", name(state.player_move)), Vec2::new(10.0, h - 70.0), 0.8, RPS_MOVES);
    list.text(format!("Computer: {}", name(state.computer_move)), Vec2::new(10.0, h - 40.0), 0.8, RPS_MOVES);

    list.text(
        "Press R to play, N for new match, Q to quit",
        Vec2::new(w - 420.0, h - 20.0),
        0.7,
        RPS_HINT,
    );

    list
}

// Snake palette
const SNAKE_BODY: Color = Color::rgb(255, 0, 50);
const SNAKE_HEAD: Color = Color::rgb(100, 255, 0);
const SNAKE_TEXT: Color = Color::rgb(255, 255, 0);
const SNAKE_TITLE: Color = Color::rgb(0, 255, 255);
const SNAKE_HINT: Color = Color::rgb(200, 255, 200);
const SNAKE_COUNT: Color = Color::rgb(0, 255, 0);

fn snake_intro(list: &mut DrawList, seconds_left: f32) {
    list.text("SNAKE GAME - HAND TRACKING", Vec2::new(150.0, 150.0), 1.7, SNAKE_TITLE);
    list.text(
        "Raise your index finger to control the snake",
        Vec2::new(250.0, 250.0),
        1.0,
        SNAKE_HINT,
    );
    list.text("Collect the food to grow!", Vec2::new(420.0, 300.0), 1.0, Color::rgb(255, 255, 200));
    list.text("Game starts in...", Vec2::new(480.0, 400.0), 1.3, Color::rgb(100, 100, 255));
    let count = seconds_left.ceil().max(1.0) as u32;
    list.text(count.to_string(), Vec2::new(620.0, 500.0), 4.0, SNAKE_COUNT);
}

pub fn snake_scene(state: &SnakeState) -> DrawList {
    let cfg = &state.config;
    let mut list = DrawList::new(cfg.width, cfg.height);
    list.camera();

    match state.phase {
        RoundPhase::NotStarted | RoundPhase::Countdown => {
            snake_intro(&mut list, state.remaining_secs());
        }
        RoundPhase::Active => {
            list.polyline(state.body.points.iter().copied().collect(), 20.0, SNAKE_BODY);
            if let Some(head) = state.body.head() {
                list.circle(head, 22.0, SNAKE_HEAD);
            }
            list.sprite(SpriteSlot::Food, state.food_rect().origin());
            list.text(format!("Score: {}", state.score), Vec2::new(20.0, 70.0), 2.0, SNAKE_TEXT);
            list.text(
                format!("Time Left: {}s", state.remaining_secs() as u32),
                Vec2::new(cfg.width - 330.0, 60.0),
                1.5,
                SNAKE_TEXT,
            );
        }
        RoundPhase::Ended => {
            list.text("GAME OVER", Vec2::new(420.0, 300.0), 2.2, GAME_OVER);
            list.text(format!("Final Score: {}", state.score), Vec2::new(460.0, 370.0), 1.6, SNAKE_TEXT);
            list.text(
                "Press 'r' to Restart or 'q' to Quit",
                Vec2::new(300.0, 450.0),
                1.0,
                SNAKE_HINT,
            );
        }
    }

    list
}
