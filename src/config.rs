//! Engine configuration.
//!
//! Everything here is fixed for the lifetime of an engine except the envelope
//! values, which are only the starting point for later control changes.

#[cfg(feature = "serde")]
use std::path::Path;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "serde")]
use tracing::debug;

use crate::{
    dsp::{envelope::EnvelopeParams, oscillator::Waveform},
    error::ConfigError,
    synth::control::{duration_from_control, ControlMap, MAX_CONTROL_VALUE},
    MAX_BLOCK_SIZE,
};

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub sample_rate: f32,
    /// Number of voice slots; also sets master gain to `0.8 / polyphony`.
    pub polyphony: usize,
    pub block_size: usize,
    pub waveform: Waveform,
    pub controls: ControlMap,
    /// Initial attack as a 0..=127 control value.
    pub attack: u8,
    /// Initial decay as a 0..=127 control value.
    pub decay: u8,
    /// Initial sustain level in [0, 1].
    pub sustain_level: f32,
    /// Initial release as a 0..=127 control value.
    pub release: u8,
    /// MIDI channel to listen on (0-15); `None` listens on all.
    pub midi_channel: Option<u8>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48_000.0,
            polyphony: 8,
            block_size: 128,
            waveform: Waveform::Sine,
            controls: ControlMap::default(),
            attack: 16,
            decay: 16,
            sustain_level: 0.5,
            release: 16,
            midi_channel: None,
        }
    }
}

impl EngineConfig {
    /// Envelope shape derived from the control-value fields.
    pub fn envelope_params(&self) -> EnvelopeParams {
        EnvelopeParams::new(
            duration_from_control(self.attack, self.sample_rate),
            duration_from_control(self.decay, self.sample_rate),
            self.sustain_level,
            duration_from_control(self.release, self.sample_rate),
        )
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.sample_rate.is_finite() && self.sample_rate > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "sample_rate must be positive, got {}",
                self.sample_rate
            )));
        }
        if self.polyphony == 0 {
            return Err(ConfigError::Invalid("polyphony must be at least 1".into()));
        }
        if self.block_size == 0 || self.block_size > MAX_BLOCK_SIZE {
            return Err(ConfigError::Invalid(format!(
                "block_size must be in 1..={MAX_BLOCK_SIZE}, got {}",
                self.block_size
            )));
        }
        if !(0.0..=1.0).contains(&self.sustain_level) {
            return Err(ConfigError::Invalid(format!(
                "sustain_level must be in [0, 1], got {}",
                self.sustain_level
            )));
        }
        for (name, value) in [("attack", self.attack), ("decay", self.decay), ("release", self.release)] {
            if value > MAX_CONTROL_VALUE {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be a control value in 0..=127, got {value}"
                )));
            }
        }
        if let Some(&id) = self.controls.ids().iter().find(|&&id| id > MAX_CONTROL_VALUE) {
            return Err(ConfigError::Invalid(format!("control id {id} is out of range")));
        }
        let ids = self.controls.ids();
        for (i, id) in ids.iter().enumerate() {
            if ids[i + 1..].contains(id) {
                return Err(ConfigError::Invalid(format!("control id {id} is mapped twice")));
            }
        }
        if let Some(channel) = self.midi_channel.filter(|&c| c > 15) {
            return Err(ConfigError::Invalid(format!("midi_channel {channel} is out of range")));
        }
        Ok(())
    }

    #[cfg(feature = "serde")]
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    #[cfg(feature = "serde")]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&source)?;
        debug!(path = %path.display(), ?config, "loaded engine config");
        Ok(config)
    }
}
