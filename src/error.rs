//! Errors raised at the crate's boundaries.
//!
//! The render path never fails: bad control values are clamped, unknown
//! controls are ignored and notes without a free voice are dropped. Errors
//! only exist where raw input enters the crate.

use std::path::PathBuf;

use thiserror::Error;

/// A raw MIDI message that could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MidiError {
    #[error("empty MIDI message")]
    Empty,
    #[error("MIDI status {status:#04x} expects {expected} bytes, got {got}")]
    BadLength { status: u8, expected: usize, got: usize },
    #[error("MIDI message starts with data byte {0:#04x}")]
    MissingStatus(u8),
}

/// An engine configuration that could not be loaded or is out of range.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[cfg(feature = "serde")]
    #[error("failed to parse config")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// The control → audio event queue had no room for a message.
#[cfg(feature = "rtrb")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SendError {
    #[error("synth event queue is full, dropped {0:?}")]
    QueueFull(crate::synth::message::SynthMessage),
}
