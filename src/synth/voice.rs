use crate::dsp::{
    envelope::{Envelope, EnvelopeParams},
    oscillator::{Oscillator, Waveform},
};

/// One sounding note: an oscillator shaped by an envelope.
///
/// Voices live in a fixed pool slot and are reused for every note the slot
/// plays, so starting a note never allocates.
#[derive(Debug, Clone, Default)]
pub struct Voice {
    note: Option<u8>,
    velocity: u8,
    oscillator: Oscillator,
    envelope: Envelope,
}

impl Voice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind the voice to `note` and restart both oscillator and envelope.
    pub fn start(&mut self, note: u8, velocity: u8, phase_increment: f32, params: &EnvelopeParams) {
        self.note = Some(note);
        self.velocity = velocity;
        self.oscillator.start(phase_increment);
        self.envelope.trigger(params);
    }

    pub fn release(&mut self, params: &EnvelopeParams) {
        if self.note.is_some() {
            self.envelope.release(params);
        }
    }

    /// Envelope gain times oscillator output for the next sample.
    #[inline]
    pub fn next_sample(&mut self, params: &EnvelopeParams, waveform: Waveform) -> f32 {
        let gain = self.envelope.advance(params);
        gain * self.oscillator.advance(waveform)
    }

    /// Unbind the note and clear all per-note state.
    pub fn reclaim(&mut self) {
        self.note = None;
        self.velocity = 0;
        self.oscillator.reset();
        self.envelope.reset();
    }

    pub fn is_done(&self) -> bool {
        self.envelope.is_done()
    }

    pub fn is_active(&self) -> bool {
        self.note.is_some()
    }

    pub fn is_free(&self) -> bool {
        self.note.is_none()
    }

    pub fn note(&self) -> Option<u8> {
        self.note
    }

    pub fn velocity(&self) -> u8 {
        self.velocity
    }

    pub fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    pub fn oscillator(&self) -> &Oscillator {
        &self.oscillator
    }
}
