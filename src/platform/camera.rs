//! Webcam capture and window keyboard via OpenCV

use std::time::Instant;

use opencv::core::{self, Mat};
use opencv::prelude::*;
use opencv::{highgui, imgproc, videoio};

use super::{Frame, FrameSource, KeyCommand, KeySource};
use crate::error::{ArcadeError, Result};

/// Default webcam (or any OpenCV capture index)
pub struct Camera {
    capture: videoio::VideoCapture,
    index: i32,
    started: Instant,
}

impl Camera {
    /// Open capture device `index`. Failure is fatal for the caller.
    pub fn open(index: i32) -> Result<Self> {
        let open_err = |reason: String| ArcadeError::CaptureOpen {
            source_name: format!("camera {}", index),
            reason,
        };

        let capture = videoio::VideoCapture::new(index, videoio::CAP_ANY).map_err(|e| open_err(e.to_string()))?;
        if !capture.is_opened().map_err(|e| open_err(e.to_string()))? {
            return Err(open_err("device did not open".to_string()));
        }

        log::info!("Opened camera {}", index);
        Ok(Self {
            capture,
            index,
            started: Instant::now(),
        })
    }
}

fn read_err(e: opencv::Error) -> ArcadeError {
    ArcadeError::CaptureRead(e.to_string())
}

impl FrameSource for Camera {
    fn next_frame(&mut self) -> Result<Option<Frame>> {
        let mut raw = Mat::default();
        if !self.capture.read(&mut raw).map_err(read_err)? || raw.empty() {
            return Err(ArcadeError::CaptureRead(format!("camera {} returned no frame", self.index)));
        }
        let timestamp = self.started.elapsed().as_secs_f64();

        let mut flipped = Mat::default();
        core::flip(&raw, &mut flipped, 1).map_err(read_err)?;
        let mut rgb = Mat::default();
        imgproc::cvt_color_def(&flipped, &mut rgb, imgproc::COLOR_BGR2RGB).map_err(read_err)?;

        let pixels = rgb.data_bytes().map_err(read_err)?.to_vec();
        Ok(Some(Frame {
            width: rgb.cols() as u32,
            height: rgb.rows() as u32,
            timestamp,
            pixels,
            mirrored: true,
        }))
    }
}

/// Keys pressed in any OpenCV window
#[derive(Debug, Default)]
pub struct WindowKeys;

impl KeySource for WindowKeys {
    fn poll_key(&mut self) -> Option<KeyCommand> {
        match highgui::poll_key() {
            Ok(code) if code >= 0 => char::from_u32((code & 0xFF) as u32).and_then(KeyCommand::from_char),
            Ok(_) => None,
            Err(e) => {
                log::warn!("Keyboard poll failed: {}", e);
                None
            }
        }
    }
}
