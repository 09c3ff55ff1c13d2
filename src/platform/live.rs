//! Live capture
//!
//! The frame loop wants one value that is camera, model and keyboard at once.
//! `LiveCapture` glues three separate parts together.

use super::{Frame, FrameSource, KeyCommand, KeySource, LandmarkModel};
use crate::error::Result;
use crate::landmarks::Observation;

/// Camera, landmark model and keyboard driven as one capture source
pub struct LiveCapture<S, M, K> {
    pub frames: S,
    pub model: M,
    pub keys: K,
}

impl<S, M, K> LiveCapture<S, M, K>
where
    S: FrameSource,
    M: LandmarkModel,
    K: KeySource,
{
    pub fn new(frames: S, model: M, keys: K) -> Self {
        Self { frames, model, keys }
    }
}

impl<S: FrameSource, M, K> FrameSource for LiveCapture<S, M, K> {
    fn next_frame(&mut self) -> Result<Option<Frame>> {
        self.frames.next_frame()
    }
}

impl<S, M: LandmarkModel, K> LandmarkModel for LiveCapture<S, M, K> {
    fn detect(&mut self, frame: &Frame) -> Observation {
        self.model.detect(frame)
    }
}

impl<S, M, K: KeySource> KeySource for LiveCapture<S, M, K> {
    fn poll_key(&mut self) -> Option<KeyCommand> {
        self.keys.poll_key()
    }
}

/// Stand-in model that never finds anyone
///
/// No detector ships with the arcade; a real one implements
/// [`LandmarkModel`] and replaces this.
#[derive(Debug, Default)]
pub struct NullModel {
    warned: bool,
}

impl LandmarkModel for NullModel {
    fn detect(&mut self, _frame: &Frame) -> Observation {
        if !self.warned {
            self.warned = true;
            log::warn!("No landmark model attached; every frame is empty");
        }
        Observation::default()
    }
}
