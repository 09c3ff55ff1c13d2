//! Frame sinks

use super::draw::DrawList;
use crate::assets::SpriteSheet;
use crate::error::Result;
use crate::platform::Frame;

/// Consumes one composed frame per loop iteration
pub trait FrameSink {
    fn present(&mut self, frame: &Frame, scene: &DrawList, sprites: &SpriteSheet) -> Result<()>;
}

/// Sink without a window: keeps the latest scene and logs status changes
#[derive(Debug, Default)]
pub struct HeadlessSink {
    frames: u64,
    last: Option<DrawList>,
    last_texts: Vec<String>,
}

impl HeadlessSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn last_scene(&self) -> Option<&DrawList> {
        self.last.as_ref()
    }
}

impl FrameSink for HeadlessSink {
    fn present(&mut self, _frame: &Frame, scene: &DrawList, _sprites: &SpriteSheet) -> Result<()> {
        self.frames += 1;

        let texts: Vec<String> = scene.texts().into_iter().map(str::to_owned).collect();
        if texts != self.last_texts {
            log::debug!("frame {}: {}", self.frames, texts.join(" | "));
            self.last_texts = texts;
        }

        self.last = Some(scene.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::Color;
    use glam::Vec2;

    #[test]
    fn test_keeps_last_scene() {
        let mut sink = HeadlessSink::new();
        let frame = Frame::blank(640, 480, 0.0);
        let sprites = SpriteSheet::new();

        let mut scene = DrawList::new(640.0, 480.0);
        scene.text("Score: 1", Vec2::ZERO, 1.0, Color::WHITE);
        sink.present(&frame, &scene, &sprites).unwrap();
        sink.present(&frame, &scene, &sprites).unwrap();

        assert_eq!(sink.frames(), 2);
        assert!(sink.last_scene().unwrap().has_text("Score: 1"));
    }
}
