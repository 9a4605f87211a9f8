pub mod config;
pub mod dsp; // Envelope and oscillator primitives
pub mod error;
pub mod io;
pub mod synth; // Voice management and polyphony

pub use config::EngineConfig;
pub use synth::SynthEngine;

pub const MAX_BLOCK_SIZE: usize = 2048;
