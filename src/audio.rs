//! Fire-and-forget audio triggers
//!
//! The simulation only ever talks to [`AudioSink`]. [`AudioManager`] applies
//! user volume settings and hands effects to a pluggable [`SoundBackend`].

use crate::settings::Settings;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Player bullet fired, boss volley, flap
    Shoot,
    /// Enemy, bomber, boss or asteroid destroyed
    Explosion,
    /// Pickup collected
    Powerup,
}

impl SoundEffect {
    pub fn name(&self) -> &'static str {
        match self {
            SoundEffect::Shoot => "shoot",
            SoundEffect::Explosion => "explosion",
            SoundEffect::Powerup => "powerup",
        }
    }
}

/// Audio trigger interface consumed by the simulation
pub trait AudioSink {
    fn play_shoot(&mut self);
    fn play_explosion(&mut self);
    fn play_powerup(&mut self);
}

/// Silent sink for headless runs and tests
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play_shoot(&mut self) {}
    fn play_explosion(&mut self) {}
    fn play_powerup(&mut self) {}
}

/// Whatever actually makes noise
pub trait SoundBackend {
    fn play(&mut self, effect: SoundEffect, volume: f32);
    fn set_music_playing(&mut self, _playing: bool, _volume: f32) {}
}

/// Backend that only records effects in the log
#[derive(Debug, Default)]
pub struct LogBackend;

impl SoundBackend for LogBackend {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        log::trace!("sfx {} @ {:.2}", effect.name(), volume);
    }

    fn set_music_playing(&mut self, playing: bool, volume: f32) {
        log::debug!("music {} @ {:.2}", if playing { "on" } else { "off" }, volume);
    }
}

/// Audio manager for the game
pub struct AudioManager<B: SoundBackend = LogBackend> {
    backend: B,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    sound_enabled: bool,
    music_enabled: bool,
}

impl Default for AudioManager<LogBackend> {
    fn default() -> Self {
        Self::new(LogBackend)
    }
}

impl<B: SoundBackend> AudioManager<B> {
    pub fn new(backend: B) -> Self {
        Self::with_settings(backend, &Settings::default())
    }

    pub fn with_settings(backend: B, settings: &Settings) -> Self {
        let mut manager = Self {
            backend,
            master_volume: 1.0,
            sfx_volume: 1.0,
            music_volume: 1.0,
            sound_enabled: true,
            music_enabled: true,
        };
        manager.apply_settings(settings);
        manager
    }

    /// Re-read volumes and toggles from settings
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.set_master_volume(settings.master_volume);
        self.set_sfx_volume(settings.sfx_volume);
        self.set_music_volume(settings.music_volume);
        self.sound_enabled = settings.sound_enabled;
        self.set_music_enabled(settings.music_enabled);
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_sound_enabled(&mut self, enabled: bool) {
        self.sound_enabled = enabled;
    }

    pub fn set_music_enabled(&mut self, enabled: bool) {
        self.music_enabled = enabled;
        let volume = self.master_volume * self.music_volume;
        self.backend.set_music_playing(enabled, volume);
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.sound_enabled {
            self.master_volume * self.sfx_volume
        } else {
            0.0
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        self.backend.play(effect, vol);
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: SoundBackend> AudioSink for AudioManager<B> {
    fn play_shoot(&mut self) {
        self.play(SoundEffect::Shoot);
    }

    fn play_explosion(&mut self) {
        self.play(SoundEffect::Explosion);
    }

    fn play_powerup(&mut self) {
        self.play(SoundEffect::Powerup);
    }
}

/// Counts triggers so tests can assert on them
#[cfg(test)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CountingAudio {
    pub shoot: u32,
    pub explosion: u32,
    pub powerup: u32,
}

#[cfg(test)]
impl AudioSink for CountingAudio {
    fn play_shoot(&mut self) {
        self.shoot += 1;
    }

    fn play_explosion(&mut self) {
        self.explosion += 1;
    }

    fn play_powerup(&mut self) {
        self.powerup += 1;
    }
}
