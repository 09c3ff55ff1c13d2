//! Platform abstraction layer
//!
//! The loop talks to the outside world through three seams:
//! - `FrameSource`: the capture device (one frame per iteration)
//! - `LandmarkModel`: the pretrained keypoint detector
//! - `KeySource`: keyboard commands
//!
//! `Recording` implements all three from a JSON-lines landmark recording.
//! `LiveCapture` bundles a camera, a model and a keyboard into one source;
//! with the `camera` feature, `camera::Camera` reads the default webcam.

#[cfg(feature = "camera")]
pub mod camera;
pub mod live;
pub mod recording;

pub use live::{LiveCapture, NullModel};
pub use recording::{RecordedFrame, Recording};

use crate::error::Result;
use crate::landmarks::Observation;

/// One captured RGB8 frame.
///
/// `pixels` is row-major, 3 bytes per pixel. Sources that only carry landmark
/// data leave it empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    /// Capture time in seconds (monotonic, source-defined origin)
    pub timestamp: f64,
    pub pixels: Vec<u8>,
    /// Already flipped left-right by the source
    pub mirrored: bool,
}

impl Frame {
    /// Frame without pixel data
    pub fn blank(width: u32, height: u32, timestamp: f64) -> Self {
        Self {
            width,
            height,
            timestamp,
            pixels: Vec::new(),
            mirrored: false,
        }
    }

    pub fn has_pixels(&self) -> bool {
        self.pixels.len() == self.width as usize * self.height as usize * 3 && !self.pixels.is_empty()
    }

    /// Selfie view: flip left-right unless the source already did
    pub fn ensure_mirrored(&mut self) {
        if !self.mirrored {
            self.mirror_horizontal();
        }
    }

    /// Flip left-right in place
    pub fn mirror_horizontal(&mut self) {
        self.mirrored = !self.mirrored;
        if !self.has_pixels() {
            return;
        }
        let w = self.width as usize;
        for row in self.pixels.chunks_exact_mut(w * 3) {
            for x in 0..w / 2 {
                let (a, b) = (x * 3, (w - 1 - x) * 3);
                for c in 0..3 {
                    row.swap(a + c, b + c);
                }
            }
        }
    }
}

/// Keyboard commands understood by every game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    /// `q`: close the window and release the camera
    Quit,
    /// `r`: restart the round (or play the next one)
    Restart,
    /// `n`: new match (scoreboard reset)
    NewMatch,
}

impl KeyCommand {
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'q' => Some(KeyCommand::Quit),
            'r' => Some(KeyCommand::Restart),
            'n' => Some(KeyCommand::NewMatch),
            _ => None,
        }
    }
}

/// Capture device
pub trait FrameSource {
    /// Block for the next frame. `Ok(None)` means the stream ended cleanly;
    /// an error means the device failed.
    fn next_frame(&mut self) -> Result<Option<Frame>>;
}

/// Pretrained landmark detector
pub trait LandmarkModel {
    /// Run inference on a (mirrored) frame. An empty observation means no
    /// subject was found, which is not an error.
    fn detect(&mut self, frame: &Frame) -> Observation;
}

/// Keyboard
pub trait KeySource {
    /// At most one pending command per frame
    fn poll_key(&mut self) -> Option<KeyCommand>;
}
