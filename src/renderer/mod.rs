//! Presentation
//!
//! Games describe each frame as a [`DrawList`]; a [`FrameSink`] puts it on
//! screen over the camera frame.

pub mod draw;
pub mod scenes;
pub mod sink;

pub use draw::{Color, DrawCmd, DrawList};
pub use scenes::{catcher_scene, maze_scene, rps_scene, snake_scene};
pub use sink::{FrameSink, HeadlessSink};

#[cfg(feature = "camera")]
pub mod window;
#[cfg(feature = "camera")]
pub use window::WindowSink;
