//! Low-level DSP primitives owned by each voice.
//!
//! These components are allocation-free and realtime-safe, making them safe to
//! embed directly inside voice structs. They stay focused on the
//! signal-processing math; note bookkeeping lives in `synth`.

/// Attack/decay/sustain/release envelope state machine.
pub mod envelope;
/// Phase-accumulator oscillator and waveform shapes.
pub mod oscillator;

pub use envelope::{Envelope, EnvelopeParams, EnvelopeStage};
pub use oscillator::{Oscillator, Waveform};
