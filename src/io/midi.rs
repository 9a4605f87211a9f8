//! Raw MIDI byte decoding.

use tracing::trace;

use crate::error::MidiError;

/// Controller number that means "all sound off" when sent with value 0.
pub const ALL_SOUND_OFF_CC: u8 = 0x78;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MidiEvent {
    NoteOn { channel: u8, key: u8, velocity: u8 },
    NoteOff { channel: u8, key: u8, velocity: u8 },
    ControlChange { channel: u8, controller: u8, value: u8 },
    /// Any status the synth has no use for (pitch bend, program change,
    /// aftertouch, system). Channel messages are still length-checked.
    Other { status: u8 },
}

impl MidiEvent {
    /// Decode one channel-voice message.
    ///
    /// Running status and system exclusive messages are not supported; the
    /// status byte must lead every message.
    pub fn parse(bytes: &[u8]) -> Result<Self, MidiError> {
        let (&status, data) = bytes.split_first().ok_or(MidiError::Empty)?;
        if status & 0x80 == 0 {
            return Err(MidiError::MissingStatus(status));
        }

        let channel = status & 0x0f;
        let kind = status & 0xf0;

        let expected = match kind {
            0x80 | 0x90 | 0xa0 | 0xb0 | 0xe0 => 3,
            0xc0 | 0xd0 => 2,
            _ => {
                trace!(status, "skipping system message");
                return Ok(MidiEvent::Other { status });
            }
        };
        if bytes.len() != expected {
            return Err(MidiError::BadLength {
                status,
                expected,
                got: bytes.len(),
            });
        }

        let event = match kind {
            0x90 => MidiEvent::NoteOn {
                channel,
                key: data[0] & 0x7f,
                velocity: data[1] & 0x7f,
            },
            0x80 => MidiEvent::NoteOff {
                channel,
                key: data[0] & 0x7f,
                velocity: data[1] & 0x7f,
            },
            0xb0 => MidiEvent::ControlChange {
                channel,
                controller: data[0] & 0x7f,
                value: data[1] & 0x7f,
            },
            _ => MidiEvent::Other { status },
        };

        Ok(event)
    }

    pub fn channel(&self) -> Option<u8> {
        match *self {
            MidiEvent::NoteOn { channel, .. }
            | MidiEvent::NoteOff { channel, .. }
            | MidiEvent::ControlChange { channel, .. } => Some(channel),
            MidiEvent::Other { .. } => None,
        }
    }
}
