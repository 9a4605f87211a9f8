/*
Phase-Accumulator Oscillator
============================

Each voice owns one oscillator: a phase (radians) plus a per-sample phase
increment derived from the note frequency.

    phase_increment = 2π · frequency / sample_rate

Every sample we evaluate the waveform at the current phase, then step:

    out    = waveform(phase)
    phase += phase_increment

Example: A4 (440 Hz) at 48 kHz
  - phase_increment = 2π · 440 / 48000 ≈ 0.0576 rad/sample
  - one full cycle every 48000 / 440 ≈ 109.1 samples

Phase is wrapped back into [0, 2π) after each step. Leaving it unbounded works
for short notes, but f32 precision falls apart on long sustained ones and the
pitch audibly drifts.

The sine evaluates cos(phase), so a freshly started note begins at its peak.
The other waveforms are naive (non band-limited) shapes built from the same
phase; they alias at high pitches but cost almost nothing.
*/

use std::f32::consts::{PI, TAU};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Waveform {
    #[default]
    Sine,
    Triangle,
    Sawtooth,
    Square,
}

impl Waveform {
    /// Evaluate the waveform at `phase` radians, which must be in [0, 2π).
    #[inline]
    pub fn sample(self, phase: f32) -> f32 {
        match self {
            Waveform::Sine => phase.cos(),
            // Peaks at phase 0 like the cosine: 1 → -1 → 1
            Waveform::Triangle => (2.0 * (phase - PI).abs() / PI) - 1.0,
            Waveform::Sawtooth => (phase / PI) - 1.0,
            Waveform::Square => {
                if phase < PI {
                    1.0
                } else {
                    -1.0
                }
            }
        }
    }
}

/// Radians per sample for a given frequency.
#[inline]
pub fn frequency_to_phase_increment(frequency: f32, sample_rate: f32) -> f32 {
    TAU * frequency / sample_rate
}

#[derive(Debug, Clone, Default)]
pub struct Oscillator {
    phase: f32,
    phase_increment: f32,
}

impl Oscillator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restart at phase 0 with a new pitch.
    pub fn start(&mut self, phase_increment: f32) {
        self.phase = 0.0;
        self.phase_increment = phase_increment;
    }

    /// Produce one sample and step the phase.
    #[inline]
    pub fn advance(&mut self, waveform: Waveform) -> f32 {
        let out = waveform.sample(self.phase);
        self.phase += self.phase_increment;
        if self.phase >= TAU {
            // Increments above 2π (pitch above the sample rate) need more than one wrap
            self.phase = self.phase.rem_euclid(TAU);
        }
        out
    }

    pub fn reset(&mut self) {
        self.phase = 0.0;
        self.phase_increment = 0.0;
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    pub fn phase_increment(&self) -> f32 {
        self.phase_increment
    }
}
