//! Sound effects
//!
//! The only sound is the food pickup "pop". The clip is optional: when it is
//! missing or unreadable, or audio is muted, `play` quietly does nothing.
//! Actual output goes through an [`AudioBackend`]; with the `sound` feature
//! the default output device is driven through `rodio`. Without a backend
//! nothing is played and `play` reports so.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Snake ate the food
    Pickup,
}

/// Volume settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }
}

/// Something that can actually make noise
pub trait AudioBackend {
    /// Start playing an encoded clip. Returns false if the device refused it.
    fn play_clip(&mut self, clip: &[u8], volume: f32) -> bool;
}

#[cfg(feature = "sound")]
pub use output::RodioBackend;

#[cfg(feature = "sound")]
mod output {
    use std::io::Cursor;

    use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};

    use super::AudioBackend;

    /// Default output device via rodio
    pub struct RodioBackend {
        _stream: OutputStream,
        handle: OutputStreamHandle,
    }

    impl RodioBackend {
        pub fn try_default() -> Result<Self, rodio::StreamError> {
            let (stream, handle) = OutputStream::try_default()?;
            Ok(Self {
                _stream: stream,
                handle,
            })
        }
    }

    impl AudioBackend for RodioBackend {
        fn play_clip(&mut self, clip: &[u8], volume: f32) -> bool {
            let source = match Decoder::new(Cursor::new(clip.to_vec())) {
                Ok(source) => source,
                Err(e) => {
                    log::warn!("Could not decode sound clip: {}", e);
                    return false;
                }
            };
            match Sink::try_new(&self.handle) {
                Ok(sink) => {
                    sink.set_volume(volume);
                    sink.append(source);
                    sink.detach();
                    true
                }
                Err(e) => {
                    log::warn!("Could not open audio sink: {}", e);
                    false
                }
            }
        }
    }
}

#[cfg(feature = "sound")]
fn default_output() -> Option<Box<dyn AudioBackend>> {
    match RodioBackend::try_default() {
        Ok(backend) => Some(Box::new(backend)),
        Err(e) => {
            log::warn!("No audio output ({}) - audio disabled", e);
            None
        }
    }
}

#[cfg(not(feature = "sound"))]
fn default_output() -> Option<Box<dyn AudioBackend>> {
    log::warn!("Built without the `sound` feature - audio disabled");
    None
}

/// Audio manager for the game
pub struct AudioManager {
    clip: Option<Vec<u8>>,
    backend: Option<Box<dyn AudioBackend>>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
    played: u32,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::silent()
    }
}

impl AudioManager {
    /// Manager with no clip; every `play` is a no-op
    pub fn silent() -> Self {
        Self::with_clip(None, &AudioSettings::default())
    }

    fn with_clip(clip: Option<Vec<u8>>, settings: &AudioSettings) -> Self {
        Self {
            clip,
            backend: None,
            master_volume: settings.master_volume.clamp(0.0, 1.0),
            sfx_volume: settings.sfx_volume.clamp(0.0, 1.0),
            muted: settings.muted,
            played: 0,
        }
    }

    /// Load the pickup clip. A missing file disables sound, it is not an error.
    pub fn load(path: &Path, settings: &AudioSettings) -> Self {
        let clip = match std::fs::read(path) {
            Ok(bytes) if !bytes.is_empty() => Some(bytes),
            Ok(_) => {
                log::warn!("Sound {:?} is empty - audio disabled", path);
                None
            }
            Err(e) => {
                log::warn!("Failed to load sound {:?}: {} - audio disabled", path, e);
                None
            }
        };
        Self::with_clip(clip, settings)
    }

    pub fn set_backend(&mut self, backend: Box<dyn AudioBackend>) {
        self.backend = Some(backend);
    }

    /// Attach the default output device. Failure leaves the manager silent.
    pub fn open_default_output(&mut self) {
        if !self.has_clip() {
            return;
        }
        if let Some(backend) = default_output() {
            log::info!("Audio output opened");
            self.backend = Some(backend);
        }
    }

    pub fn has_backend(&self) -> bool {
        self.backend.is_some()
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn has_clip(&self) -> bool {
        self.clip.is_some()
    }

    /// Sounds issued so far
    pub fn played(&self) -> u32 {
        self.played
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect. Returns true if an output device took the clip.
    pub fn play(&mut self, effect: SoundEffect) -> bool {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return false;
        }
        let Some(clip) = &self.clip else {
            return false;
        };
        let Some(backend) = self.backend.as_mut() else {
            log::debug!("{:?} dropped: no audio output", effect);
            return false;
        };

        let issued = match effect {
            SoundEffect::Pickup => backend.play_clip(clip, vol),
        };
        if issued {
            self.played += 1;
        }
        issued
    }
}
