use crate::{dsp::envelope::EnvelopeParams, synth::voice::Voice};

/// Fixed-capacity arena of voices, searched by note number.
///
/// The slot vector is sized once at construction; note-on and note-off only
/// scan it. When every slot is busy a new note is dropped rather than
/// stealing a voice that is still sounding.
pub struct VoicePool {
    voices: Vec<Voice>,
}

impl VoicePool {
    pub fn new(capacity: usize) -> Self {
        Self {
            voices: (0..capacity).map(|_| Voice::new()).collect(),
        }
    }

    /// Find a slot for `note`.
    ///
    /// Order of preference: the voice already playing `note` (retrigger), a
    /// free slot, then a slot whose release has finished but which the render
    /// loop has not reclaimed yet. Returns `None` when all slots are sounding.
    pub fn allocate(&mut self, note: u8) -> Option<&mut Voice> {
        if let Some(idx) = self.position(note) {
            return Some(&mut self.voices[idx]);
        }

        let idx = self
            .voices
            .iter()
            .position(|v| v.is_free())
            .or_else(|| self.voices.iter().position(|v| v.is_done()))?;

        let voice = &mut self.voices[idx];
        voice.reclaim();
        Some(voice)
    }

    pub fn find(&mut self, note: u8) -> Option<&mut Voice> {
        let idx = self.position(note)?;
        Some(&mut self.voices[idx])
    }

    pub fn for_each_active<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut Voice),
    {
        for voice in self.voices.iter_mut().filter(|v| v.is_active()) {
            f(voice);
        }
    }

    pub fn reclaim(&mut self, index: usize) {
        if let Some(voice) = self.voices.get_mut(index) {
            voice.reclaim();
        }
    }

    /// Push every sounding voice into release from its current gain.
    pub fn release_all(&mut self, params: &EnvelopeParams) {
        self.for_each_active(|voice| voice.release(params));
    }

    pub fn capacity(&self) -> usize {
        self.voices.len()
    }

    pub fn active_count(&self) -> usize {
        self.voices.iter().filter(|v| v.is_active()).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Voice> {
        self.voices.iter()
    }

    fn position(&self, note: u8) -> Option<usize> {
        self.voices.iter().position(|v| v.note() == Some(note))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::{envelope::EnvelopeStage, oscillator::Waveform};

    fn params() -> EnvelopeParams {
        EnvelopeParams::new(10.0, 10.0, 0.5, 10.0)
    }

    fn start(pool: &mut VoicePool, note: u8) -> bool {
        let p = params();
        match pool.allocate(note) {
            Some(voice) => {
                voice.start(note, 100, 0.05, &p);
                true
            }
            None => false,
        }
    }

    #[test]
    fn retrigger_reuses_slot() {
        let mut pool = VoicePool::new(4);
        assert!(start(&mut pool, 60));
        assert!(start(&mut pool, 64));
        assert!(start(&mut pool, 60));

        assert_eq!(pool.active_count(), 2);
        let notes: Vec<_> = pool.iter().filter_map(|v| v.note()).collect();
        assert_eq!(notes, vec![60, 64]);
    }

    #[test]
    fn full_pool_drops_new_notes() {
        let mut pool = VoicePool::new(2);
        assert!(start(&mut pool, 60));
        assert!(start(&mut pool, 62));
        assert!(!start(&mut pool, 64));

        let notes: Vec<_> = pool.iter().filter_map(|v| v.note()).collect();
        assert_eq!(notes, vec![60, 62], "no sounding voice is stolen");

        // retrigger still works when full
        assert!(start(&mut pool, 62));
    }

    #[test]
    fn releasing_voice_is_not_stolen() {
        let p = params();
        let mut pool = VoicePool::new(1);
        assert!(start(&mut pool, 60));
        for _ in 0..5 {
            pool.for_each_active(|v| {
                v.next_sample(&p, Waveform::Sine);
            });
        }
        pool.find(60).unwrap().release(&p);
        pool.for_each_active(|v| {
            v.next_sample(&p, Waveform::Sine);
        });
        assert!(!pool.find(60).unwrap().is_done());
        assert!(!start(&mut pool, 61));
    }

    #[test]
    fn finished_voice_is_reusable_before_reclaim() {
        let p = EnvelopeParams::new(10.0, 10.0, 0.5, 0.0);
        let mut pool = VoicePool::new(1);
        assert!(start(&mut pool, 60));
        pool.find(60).unwrap().release(&p);
        assert!(pool.find(60).unwrap().is_done());

        assert!(start(&mut pool, 61));
        assert!(pool.find(60).is_none());
        assert_eq!(pool.find(61).unwrap().envelope().stage(), EnvelopeStage::Attack);
    }

    #[test]
    fn release_all_moves_every_active_voice_to_release() {
        let p = params();
        let mut pool = VoicePool::new(3);
        start(&mut pool, 60);
        start(&mut pool, 64);
        for _ in 0..5 {
            pool.for_each_active(|v| {
                v.next_sample(&p, Waveform::Sine);
            });
        }

        pool.release_all(&p);

        for voice in pool.iter().filter(|v| v.is_active()) {
            assert_eq!(voice.envelope().stage(), EnvelopeStage::Release);
            assert_eq!(voice.envelope().level_at_stage_start(), voice.envelope().gain());
            assert!(voice.envelope().gain() > 0.0);
        }
        assert!(pool.iter().any(|v| v.is_free()));
    }

    #[test]
    fn reclaim_by_index() {
        let mut pool = VoicePool::new(2);
        start(&mut pool, 60);
        pool.reclaim(0);
        pool.reclaim(7);
        assert_eq!(pool.active_count(), 0);
    }
}
