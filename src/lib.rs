//! Gesture Arcade - webcam landmark-driven mini-games
//!
//! Core modules:
//! - `sim`: Pure game state and tick functions (maze, catcher, rps, snake)
//! - `control`: Landmark -> control signal mapping
//! - `landmarks`: Normalized keypoint types produced by the landmark model
//! - `platform`: Capture device, landmark model and keyboard abstractions
//! - `renderer`: Draw lists and presentation sinks
//! - `app`: Frame loop tying the pieces together

pub mod app;
pub mod assets;
pub mod audio;
pub mod control;
pub mod error;
pub mod landmarks;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{ArcadeError, Result};
pub use settings::Settings;

/// Frame loop constants
pub mod consts {
    /// Largest frame delta fed to the simulation (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;
    /// Frame delta assumed for the very first frame (30 fps camera)
    pub const DEFAULT_FRAME_DT: f32 = 1.0 / 30.0;
}
