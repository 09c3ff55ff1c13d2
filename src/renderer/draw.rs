//! Immediate-mode draw lists
//!
//! Scenes are described as a flat list of primitives in play-area pixels; a
//! sink turns them into pixels on screen.

use glam::Vec2;

use crate::assets::SpriteSlot;
use crate::sim::Rect;

/// 8-bit RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// A single drawing primitive
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    /// The (mirrored) camera frame, stretched over the play area
    CameraFrame,
    FillRect { rect: Rect, color: Color },
    Circle { center: Vec2, radius: f32, color: Color },
    Polyline { points: Vec<Vec2>, width: f32, color: Color },
    /// `pos` is the text baseline origin
    Text { text: String, pos: Vec2, scale: f32, color: Color },
    Sprite { slot: SpriteSlot, origin: Vec2 },
    /// Translucent fill; `alpha` is the weight of `color`
    Shade { rect: Rect, color: Color, alpha: f32 },
}

/// Ordered primitives for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct DrawList {
    pub width: f32,
    pub height: f32,
    pub cmds: Vec<DrawCmd>,
}

impl DrawList {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            cmds: Vec::new(),
        }
    }

    pub fn full_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    pub fn camera(&mut self) {
        self.cmds.push(DrawCmd::CameraFrame);
    }

    pub fn clear(&mut self, color: Color) {
        let rect = self.full_rect();
        self.cmds.push(DrawCmd::FillRect { rect, color });
    }

    pub fn rect(&mut self, rect: Rect, color: Color) {
        self.cmds.push(DrawCmd::FillRect { rect, color });
    }

    pub fn circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.cmds.push(DrawCmd::Circle { center, radius, color });
    }

    pub fn polyline(&mut self, points: Vec<Vec2>, width: f32, color: Color) {
        if points.len() >= 2 {
            self.cmds.push(DrawCmd::Polyline { points, width, color });
        }
    }

    pub fn text(&mut self, text: impl Into<String>, pos: Vec2, scale: f32, color: Color) {
        self.cmds.push(DrawCmd::Text {
            text: text.into(),
            pos,
            scale,
            color,
        });
    }

    pub fn sprite(&mut self, slot: SpriteSlot, origin: Vec2) {
        self.cmds.push(DrawCmd::Sprite { slot, origin });
    }

    pub fn shade(&mut self, rect: Rect, color: Color, alpha: f32) {
        self.cmds.push(DrawCmd::Shade {
            rect,
            color,
            alpha: alpha.clamp(0.0, 1.0),
        });
    }

    /// All text strings, in draw order
    pub fn texts(&self) -> Vec<&str> {
        self.cmds
            .iter()
            .filter_map(|c| match c {
                DrawCmd::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn has_text(&self, needle: &str) -> bool {
        self.texts().iter().any(|t| t.contains(needle))
    }
}
