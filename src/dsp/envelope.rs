/*
ADSR Envelope Implementation
============================

This module implements the per-voice ADSR envelope: a small state machine that
turns "samples since the note started" into a gain multiplier in [0, 1].

Vocabulary
----------

  gain        The envelope's current output value (0.0 to 1.0). This multiplies
              the oscillator output to control loudness over time.

  stage       Which phase of the envelope we're in: Idle, Attack, Decay,
              Sustain, or Release.

  elapsed     Samples spent in the current stage. Reset on every transition.

  duration    Length of a stage in samples. Fractional values are allowed
              because control values map to durations nonlinearly.

  fraction    elapsed / duration, saturating at 1.0. Drives the linear ramp.


The Shape: Linear Ramps Between Level Pairs
-------------------------------------------

Every stage is a straight line between a start level and an end level:

    stage     start                  end
    Attack    0.0                    1.0
    Decay     1.0                    sustain_level
    Sustain   sustain_level          sustain_level
    Release   level_at_stage_start   0.0

  Level
    1.0 ┐     ╱╲
        │    ╱  ╲___________
    S   │   ╱               ╲
        │  ╱                 ╲
    0.0 └─╱───────────────────╲──→ Time
        Attack Decay  Sustain  Release

Release is the odd one out: it ramps from whatever gain was present at the
moment of release, not from 1.0 or the sustain level. A note released during
Attack therefore fades out from where it was instead of jumping.


Zero Durations
--------------

A duration of 0 means "instant". Attack and Decay stages with zero length are
skipped entirely when a note starts (see `initial_stage`), so they never
produce a one-sample glitch. A zero-length Release snaps the gain straight to
0 at note-off, which makes the voice reclaimable on the same call.


The State Machine
-----------------

    Idle ──note_on──→ Attack ──→ Decay ──→ Sustain
                        │          │         │
                        └──────────┴─────────┴──note_off──→ Release ──gain=0──→ Idle

Attack goes straight to Sustain when the decay duration is 0. Sustain and
Release loop onto themselves: Sustain holds until note-off, Release holds at
0 until the owning pool reclaims the voice.


Per-sample Update
-----------------

    fraction = elapsed >= duration ? 1 : elapsed / duration
    if fraction >= 1 and next_stage != stage:
        enter next_stage (elapsed = 0, level_at_stage_start = gain)
        fraction = 0
    gain = fraction >= 1 ? end : start + (end - start) * fraction
    elapsed += 1

So for a stage of D samples the first D calls ramp, and the call after that
enters the next stage. Saturating to exactly `end` avoids rounding drift.
*/

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The current stage of the envelope state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeStage {
    Idle,    // Voice unassigned, gain = 0
    Attack,  // Ramping 0 → 1
    Decay,   // Ramping 1 → sustain level
    Sustain, // Holding sustain level until note-off
    Release, // Ramping from the release-time gain down to 0
}

/// Shape of the envelope shared by every voice of an engine.
///
/// Durations are measured in samples. The engine owns one instance and hands
/// it to voices by reference; voice processing never mutates it.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvelopeParams {
    pub attack_samples: f32,
    pub decay_samples: f32,
    pub sustain_level: f32,
    pub release_samples: f32,
}

impl EnvelopeParams {
    pub fn new(attack_samples: f32, decay_samples: f32, sustain_level: f32, release_samples: f32) -> Self {
        Self {
            attack_samples: attack_samples.max(0.0),
            decay_samples: decay_samples.max(0.0),
            sustain_level: sustain_level.clamp(0.0, 1.0),
            release_samples: release_samples.max(0.0),
        }
    }

    /// Stage a freshly triggered note starts in. Zero-length stages are skipped.
    pub fn initial_stage(&self) -> EnvelopeStage {
        if self.attack_samples != 0.0 {
            EnvelopeStage::Attack
        } else if self.decay_samples != 0.0 {
            EnvelopeStage::Decay
        } else {
            EnvelopeStage::Sustain
        }
    }

    fn duration(&self, stage: EnvelopeStage) -> f32 {
        match stage {
            EnvelopeStage::Attack => self.attack_samples,
            EnvelopeStage::Decay => self.decay_samples,
            EnvelopeStage::Sustain => 0.0,
            EnvelopeStage::Release => self.release_samples,
            EnvelopeStage::Idle => unreachable!("idle envelope has no duration"),
        }
    }
}

/// Per-voice envelope state.
#[derive(Debug, Clone)]
pub struct Envelope {
    stage: EnvelopeStage,
    elapsed: u32,              // samples since stage entry
    level_at_stage_start: f32, // gain at the last transition
    gain: f32,                 // last value returned by `advance`
}

impl Envelope {
    pub fn new() -> Self {
        Self {
            stage: EnvelopeStage::Idle,
            elapsed: 0,
            level_at_stage_start: 0.0,
            gain: 0.0,
        }
    }

    /// Gate high: restart from silence in the first non-empty stage.
    pub fn trigger(&mut self, params: &EnvelopeParams) {
        self.gain = 0.0;
        self.enter(params.initial_stage());
    }

    /// Advance the envelope by one sample and return the new gain.
    ///
    /// Must only be called on a triggered envelope; an idle envelope here
    /// means the owning voice's bookkeeping is corrupt.
    pub fn advance(&mut self, params: &EnvelopeParams) -> f32 {
        let duration = params.duration(self.stage);

        let mut fraction = if self.elapsed as f32 >= duration {
            1.0
        } else {
            self.elapsed as f32 / duration
        };

        if fraction >= 1.0 {
            let next = self.next_stage(params);
            if next != self.stage {
                self.enter(next);
                fraction = 0.0;
            }
        }

        let (start, end) = self.level_pair(params);
        self.gain = if fraction >= 1.0 {
            end
        } else {
            start + (end - start) * fraction
        };

        self.elapsed = self.elapsed.saturating_add(1);

        debug_assert!((0.0..=1.0).contains(&self.gain));
        self.gain
    }

    /// Gate low: ramp from the current gain down to zero.
    pub fn release(&mut self, params: &EnvelopeParams) {
        self.enter(EnvelopeStage::Release);
        if params.release_samples == 0.0 {
            self.gain = 0.0;
        }
    }

    /// True once a released note has fully decayed.
    pub fn is_done(&self) -> bool {
        self.gain == 0.0 && self.stage == EnvelopeStage::Release
    }

    /// Back to idle, ready for the next note.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn stage(&self) -> EnvelopeStage {
        self.stage
    }

    pub fn gain(&self) -> f32 {
        self.gain
    }

    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    pub fn level_at_stage_start(&self) -> f32 {
        self.level_at_stage_start
    }

    fn enter(&mut self, stage: EnvelopeStage) {
        self.stage = stage;
        self.level_at_stage_start = self.gain;
        self.elapsed = 0;
    }

    fn next_stage(&self, params: &EnvelopeParams) -> EnvelopeStage {
        match self.stage {
            EnvelopeStage::Attack if params.decay_samples == 0.0 => EnvelopeStage::Sustain,
            EnvelopeStage::Attack => EnvelopeStage::Decay,
            EnvelopeStage::Decay => EnvelopeStage::Sustain,
            EnvelopeStage::Sustain => EnvelopeStage::Sustain,
            EnvelopeStage::Release => EnvelopeStage::Release,
            EnvelopeStage::Idle => unreachable!("idle envelope has no next stage"),
        }
    }

    fn level_pair(&self, params: &EnvelopeParams) -> (f32, f32) {
        match self.stage {
            EnvelopeStage::Attack => (0.0, 1.0),
            EnvelopeStage::Decay => (1.0, params.sustain_level),
            EnvelopeStage::Sustain => (params.sustain_level, params.sustain_level),
            EnvelopeStage::Release => (self.level_at_stage_start, 0.0),
            EnvelopeStage::Idle => unreachable!("idle envelope has no level pair"),
        }
    }
}

impl Default for Envelope {
    fn default() -> Self {
        Self::new()
    }
}
