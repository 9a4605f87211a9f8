//! Control-change mapping for the envelope parameters.
//!
//! Controls arrive as 7-bit values. Durations use a nonlinear curve so the
//! low end of the knob gets fine resolution:
//!
//! ```text
//!   duration = (sample_rate / 127) * v * 1.02^v      (in samples)
//!
//!   v = 0    → 0        (instant)
//!   v = 1    → ~1/127 s
//!   v = 16   → ~1/6 s
//!   v = 64   → ~1.8 s
//!   v = 127  → ~12.4 s
//! ```
//!
//! Sustain is a level, so it maps linearly: `v / 127`.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dsp::envelope::EnvelopeParams;

pub const MAX_CONTROL_VALUE: u8 = 127;

const NONLINEAR_FACTOR: f32 = 1.02;

/// Envelope parameters addressable by a control change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeParam {
    Attack,
    Decay,
    Sustain,
    Release,
}

impl EnvelopeParam {
    /// Write a raw control value into `params`. Out-of-range values are clamped.
    pub fn apply(self, params: &mut EnvelopeParams, value: u8, sample_rate: f32) {
        match self {
            EnvelopeParam::Attack => params.attack_samples = duration_from_control(value, sample_rate),
            EnvelopeParam::Decay => params.decay_samples = duration_from_control(value, sample_rate),
            EnvelopeParam::Sustain => params.sustain_level = sustain_from_control(value),
            EnvelopeParam::Release => params.release_samples = duration_from_control(value, sample_rate),
        }
    }
}

/// Control numbers bound to each envelope parameter.
///
/// Defaults are the General MIDI sound-controller numbers for release (72),
/// attack (73), decay (75) and sound controller 10 (79) for sustain.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlMap {
    pub attack: u8,
    pub decay: u8,
    pub sustain: u8,
    pub release: u8,
}

impl ControlMap {
    pub fn lookup(&self, control: u8) -> Option<EnvelopeParam> {
        if control == self.attack {
            Some(EnvelopeParam::Attack)
        } else if control == self.decay {
            Some(EnvelopeParam::Decay)
        } else if control == self.sustain {
            Some(EnvelopeParam::Sustain)
        } else if control == self.release {
            Some(EnvelopeParam::Release)
        } else {
            None
        }
    }

    pub(crate) fn ids(&self) -> [u8; 4] {
        [self.attack, self.decay, self.sustain, self.release]
    }
}

impl Default for ControlMap {
    fn default() -> Self {
        Self {
            attack: 73,
            decay: 75,
            sustain: 79,
            release: 72,
        }
    }
}

/// Map a 0..=127 control value to a stage duration in samples.
pub fn duration_from_control(value: u8, sample_rate: f32) -> f32 {
    let v = value.min(MAX_CONTROL_VALUE) as f32;
    (sample_rate / MAX_CONTROL_VALUE as f32) * v * NONLINEAR_FACTOR.powf(v)
}

/// Map a 0..=127 control value to a sustain level in [0, 1].
pub fn sustain_from_control(value: u8) -> f32 {
    value.min(MAX_CONTROL_VALUE) as f32 / MAX_CONTROL_VALUE as f32
}
