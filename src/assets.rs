//! Static asset loading with placeholder fallback
//!
//! Sprites are optional: a missing or unreadable file is replaced by a solid
//! colour block of the size the scene expects, so drawing code never has to
//! care which one it got. Decoding the file bytes is left to the sink.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use glam::Vec2;

use crate::renderer::Color;

/// Result of loading an optional resource
#[derive(Debug, Clone, PartialEq)]
pub enum AssetLoad<T> {
    /// The resource was read from disk
    Loaded(T),
    /// The resource was missing; a stand-in was produced instead
    Fallback(T),
}

impl<T> AssetLoad<T> {
    pub fn is_fallback(&self) -> bool {
        matches!(self, AssetLoad::Fallback(_))
    }

    pub fn into_inner(self) -> T {
        match self {
            AssetLoad::Loaded(v) | AssetLoad::Fallback(v) => v,
        }
    }

    pub fn inner(&self) -> &T {
        match self {
            AssetLoad::Loaded(v) | AssetLoad::Fallback(v) => v,
        }
    }
}

/// Where a sprite's pixels come from
#[derive(Debug, Clone, PartialEq)]
pub enum SpriteSource {
    /// Encoded image file contents
    Encoded { path: PathBuf, bytes: Vec<u8> },
    /// Solid colour block
    Solid(Color),
}

/// An image drawn at a fixed size
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    pub size: Vec2,
    pub source: SpriteSource,
}

impl Sprite {
    pub fn solid(size: Vec2, color: Color) -> Self {
        Self {
            size,
            source: SpriteSource::Solid(color),
        }
    }
}

/// Placeholder colours used when a sprite file is missing
pub mod placeholder {
    use crate::renderer::Color;

    pub const MOSQUITO: Color = Color::rgb(255, 0, 0);
    pub const HAND: Color = Color::rgb(0, 255, 0);
    pub const BACKGROUND: Color = Color::rgb(135, 206, 235);
    pub const FOOD: Color = Color::rgb(255, 165, 0);
}

/// Load a sprite drawn at `size`, or a solid `placeholder` block of that size
pub fn load_sprite(path: &Path, size: Vec2, placeholder: Color) -> AssetLoad<Sprite> {
    match std::fs::read(path) {
        Ok(bytes) if !bytes.is_empty() => {
            log::debug!("Loaded sprite {:?} ({} bytes)", path, bytes.len());
            AssetLoad::Loaded(Sprite {
                size,
                source: SpriteSource::Encoded {
                    path: path.to_path_buf(),
                    bytes,
                },
            })
        }
        Ok(_) => {
            log::warn!("Sprite {:?} is empty, using placeholder", path);
            AssetLoad::Fallback(Sprite::solid(size, placeholder))
        }
        Err(e) => {
            log::warn!("Could not load sprite {:?}: {}, using placeholder", path, e);
            AssetLoad::Fallback(Sprite::solid(size, placeholder))
        }
    }
}

/// Named sprite slots a scene can refer to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteSlot {
    Background,
    Mosquito,
    Hand,
    Food,
}

/// Sprites loaded for one game
#[derive(Debug, Clone, Default)]
pub struct SpriteSheet {
    sprites: HashMap<SpriteSlot, Sprite>,
    fallbacks: usize,
}

impl SpriteSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `path` into `slot`, falling back to a placeholder block
    pub fn load(&mut self, slot: SpriteSlot, path: &Path, size: Vec2, placeholder: Color) {
        let load = load_sprite(path, size, placeholder);
        if load.is_fallback() {
            self.fallbacks += 1;
        }
        self.sprites.insert(slot, load.into_inner());
    }

    pub fn get(&self, slot: SpriteSlot) -> Option<&Sprite> {
        self.sprites.get(&slot)
    }

    /// How many slots hold a placeholder
    pub fn fallback_count(&self) -> usize {
        self.fallbacks
    }
}
