use tracing::info;

use crate::{
    config::EngineConfig,
    dsp::{
        envelope::EnvelopeParams,
        oscillator::{frequency_to_phase_increment, Waveform},
    },
    io::converter::midi_note_to_freq,
    synth::{
        control::{ControlMap, MAX_CONTROL_VALUE},
        message::{MessageReceiver, SynthMessage},
        pool::VoicePool,
    },
};

/// Total output headroom shared across all voice slots.
const OUTPUT_HEADROOM: f32 = 0.8;

/// Polyphonic synthesizer: event handling plus block rendering.
///
/// Event handlers and `render` take `&mut self`, so the engine belongs to a
/// single thread. In a live setup that is the audio callback; the control
/// thread talks to it through a `SynthHandle` and `process_block` applies
/// queued events at the start of each block.
pub struct SynthEngine {
    sample_rate: f32,
    params: EnvelopeParams,
    controls: ControlMap,
    waveform: Waveform,
    master_gain: f32,
    pool: VoicePool,
    dropped_notes: u64,
}

impl SynthEngine {
    pub fn new(config: &EngineConfig) -> Self {
        let polyphony = config.polyphony.max(1);
        let params = config.envelope_params();

        info!(
            sample_rate = config.sample_rate,
            polyphony,
            waveform = ?config.waveform,
            ?params,
            "synth engine created"
        );

        Self {
            sample_rate: config.sample_rate,
            params,
            controls: config.controls,
            waveform: config.waveform,
            master_gain: OUTPUT_HEADROOM / polyphony as f32,
            pool: VoicePool::new(polyphony),
            dropped_notes: 0,
        }
    }

    /// Engine with default envelope and controls.
    pub fn with_polyphony(sample_rate: f32, polyphony: usize) -> Self {
        Self::new(&EngineConfig {
            sample_rate,
            polyphony,
            ..EngineConfig::default()
        })
    }

    /// Start (or retrigger) `key`. Velocity 0 is a note-off.
    pub fn note_on(&mut self, key: u8, velocity: u8) {
        if velocity == 0 {
            self.note_off(key);
            return;
        }

        let phase_increment = frequency_to_phase_increment(midi_note_to_freq(key), self.sample_rate);
        match self.pool.allocate(key) {
            Some(voice) => voice.start(key, velocity, phase_increment, &self.params),
            None => self.dropped_notes += 1,
        }
    }

    pub fn note_off(&mut self, key: u8) {
        if let Some(voice) = self.pool.find(key) {
            voice.release(&self.params);
        }
    }

    /// Update an envelope parameter. Unmapped controls are ignored.
    pub fn control_change(&mut self, control: u8, value: u8) {
        let value = value.min(MAX_CONTROL_VALUE);
        if let Some(param) = self.controls.lookup(control) {
            param.apply(&mut self.params, value, self.sample_rate);
        }
    }

    pub fn all_sound_off(&mut self) {
        self.pool.release_all(&self.params);
    }

    pub fn handle_message(&mut self, msg: SynthMessage) {
        match msg {
            SynthMessage::NoteOn { note, velocity } => self.note_on(note, velocity),
            SynthMessage::NoteOff { note } => self.note_off(note),
            SynthMessage::ControlChange { control, value } => self.control_change(control, value),
            SynthMessage::AllSoundOff => self.all_sound_off(),
        }
    }

    /// Mix every active voice into `outputs`.
    ///
    /// Each channel receives the same mono signal, added on top of whatever
    /// the caller already has in the buffer. Voices whose release finishes
    /// are reclaimed on the spot and contribute nothing for the rest of the
    /// block.
    pub fn render(&mut self, outputs: &mut [&mut [f32]]) {
        let frames = outputs.iter().map(|ch| ch.len()).min().unwrap_or(0);
        debug_assert!(
            outputs.iter().all(|ch| ch.len() == frames),
            "asymmetrical channels"
        );

        let params = &self.params;
        let master_gain = self.master_gain;
        let waveform = self.waveform;

        self.pool.for_each_active(|voice| {
            if voice.is_done() {
                voice.reclaim();
                return;
            }

            for i in 0..frames {
                let sample = master_gain * voice.next_sample(params, waveform);
                for channel in outputs.iter_mut() {
                    channel[i] += sample;
                }

                if voice.is_done() {
                    voice.reclaim();
                    break;
                }
            }
        });
    }

    /// Apply all pending events, then render one block.
    pub fn process_block<R: MessageReceiver>(&mut self, rx: &mut R, outputs: &mut [&mut [f32]]) {
        while let Some(msg) = rx.pop() {
            self.handle_message(msg);
        }
        self.render(outputs);
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn params(&self) -> &EnvelopeParams {
        &self.params
    }

    pub fn master_gain(&self) -> f32 {
        self.master_gain
    }

    pub fn pool(&self) -> &VoicePool {
        &self.pool
    }

    pub fn active_voices(&self) -> usize {
        self.pool.active_count()
    }

    /// Notes dropped because every voice was busy.
    pub fn dropped_notes(&self) -> u64 {
        self.dropped_notes
    }
}
