// Purpose: Voice management, polyphony, event handling
// This layer sits above the DSP primitives and manages multiple voices

pub mod control;
pub mod engine;
pub mod message;
pub mod pool;
pub mod voice;

pub use engine::SynthEngine;
#[cfg(feature = "rtrb")]
pub use message::SynthHandle;
pub use message::{MessageReceiver, SynthMessage};
pub use pool::VoicePool;
pub use voice::Voice;
