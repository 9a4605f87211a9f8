use crate::{
    io::midi::{MidiEvent, ALL_SOUND_OFF_CC},
    synth::message::SynthMessage,
};

/// Translate a decoded MIDI event into a synth message.
///
/// `channel_filter` of `None` listens on every channel (omni mode).
pub fn midi_to_synth(midi: MidiEvent, channel_filter: Option<u8>) -> Option<SynthMessage> {
    if let (Some(filter), Some(channel)) = (channel_filter, midi.channel()) {
        if filter != channel {
            return None;
        }
    }

    match midi {
        MidiEvent::NoteOn { key, velocity, .. } => Some(SynthMessage::NoteOn {
            note: key,
            velocity,
        }),
        MidiEvent::NoteOff { key, .. } => Some(SynthMessage::NoteOff { note: key }),
        MidiEvent::ControlChange {
            controller: ALL_SOUND_OFF_CC,
            value: 0,
            ..
        } => Some(SynthMessage::AllSoundOff),
        MidiEvent::ControlChange {
            controller, value, ..
        } => Some(SynthMessage::ControlChange {
            control: controller,
            value,
        }),
        MidiEvent::Other { .. } => None,
    }
}

/// Convert MIDI note number to frequency in Hz.
/// A4 = 440 Hz = MIDI note 69
#[inline]
pub fn midi_note_to_freq(note: u8) -> f32 {
    440.0 * 2.0_f32.powf((note as f32 - 69.0) / 12.0)
}
