#[cfg(feature = "rtrb")]
use rtrb::{Consumer, Producer, RingBuffer};
#[cfg(feature = "rtrb")]
use tracing::warn;

#[cfg(feature = "rtrb")]
use crate::error::SendError;

/// Decoded, well-typed events the engine understands.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SynthMessage {
    /// Velocity 0 is treated as a note-off.
    NoteOn { note: u8, velocity: u8 },
    NoteOff { note: u8 },
    ControlChange { control: u8, value: u8 },
    AllSoundOff,
}

pub trait MessageReceiver {
    fn pop(&mut self) -> Option<SynthMessage>;
}

#[cfg(feature = "rtrb")]
impl MessageReceiver for Consumer<SynthMessage> {
    fn pop(&mut self) -> Option<SynthMessage> {
        Consumer::pop(self).ok()
    }
}

/// Default depth of the control → audio event queue.
pub const MESSAGE_QUEUE_SIZE: usize = 256;

/// Control-thread side of the event queue.
///
/// Lives on the UI or MIDI thread; the matching `Consumer` is drained by the
/// engine at the start of every block.
#[cfg(feature = "rtrb")]
pub struct SynthHandle {
    tx: Producer<SynthMessage>,
}

#[cfg(feature = "rtrb")]
impl SynthHandle {
    pub fn channel(capacity: usize) -> (Self, Consumer<SynthMessage>) {
        let (tx, rx) = RingBuffer::<SynthMessage>::new(capacity);
        (Self { tx }, rx)
    }

    pub fn send(&mut self, msg: SynthMessage) -> Result<(), SendError> {
        match self.tx.push(msg) {
            Ok(()) => Ok(()),
            Err(_) => {
                warn!(?msg, "synth event queue full, dropping event");
                Err(SendError::QueueFull(msg))
            }
        }
    }

    pub fn note_on(&mut self, note: u8, velocity: u8) -> Result<(), SendError> {
        self.send(SynthMessage::NoteOn { note, velocity })
    }

    pub fn note_off(&mut self, note: u8) -> Result<(), SendError> {
        self.send(SynthMessage::NoteOff { note })
    }

    pub fn control_change(&mut self, control: u8, value: u8) -> Result<(), SendError> {
        self.send(SynthMessage::ControlChange { control, value })
    }

    pub fn all_sound_off(&mut self) -> Result<(), SendError> {
        self.send(SynthMessage::AllSoundOff)
    }
}
