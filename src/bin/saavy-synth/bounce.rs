//! Offline rendering to a WAV file.

use std::path::Path;

use color_eyre::eyre::{ensure, Result as EyreResult, WrapErr};
use tracing::info;

use saavy_synth::{synth::SynthMessage, EngineConfig, SynthEngine};

/// Longest tail rendered after the chord is released.
const MAX_TAIL_SECONDS: f32 = 30.0;

pub fn bounce(config: &EngineConfig, out: &Path, notes: &[u8], seconds: f32) -> EyreResult<()> {
    ensure!(
        seconds.is_finite() && seconds >= 0.0,
        "seconds must be a finite, non-negative number, got {seconds}"
    );

    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: config.sample_rate as u32,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    let mut writer = hound::WavWriter::create(out, spec)
        .wrap_err_with(|| format!("failed to create {}", out.display()))?;

    let mut engine = SynthEngine::new(config);
    let mut block = vec![0.0f32; config.block_size];
    let mut peak = 0.0f32;
    let mut written = 0usize;

    let hold_samples = (seconds * config.sample_rate) as usize;
    let max_samples = hold_samples + (MAX_TAIL_SECONDS * config.sample_rate) as usize;

    for &note in notes {
        engine.handle_message(SynthMessage::NoteOn { note, velocity: 100 });
    }

    let mut released = false;
    while written < max_samples {
        // Events land on block boundaries, like the live engine
        if !released && written >= hold_samples {
            for &note in notes {
                engine.handle_message(SynthMessage::NoteOff { note });
            }
            released = true;
        }
        if released && engine.active_voices() == 0 {
            break;
        }

        block.fill(0.0);
        engine.render(&mut [block.as_mut_slice()]);
        for &sample in &block {
            peak = peak.max(sample.abs());
            writer.write_sample(sample)?;
        }
        written += block.len();
    }

    writer.finalize().wrap_err("failed to finalise WAV file")?;

    info!(
        path = %out.display(),
        seconds = written as f32 / config.sample_rate,
        peak,
        dropped_notes = engine.dropped_notes(),
        "bounce complete"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_finite_or_negative_length() {
        let config = EngineConfig::default();
        let out = std::env::temp_dir().join("saavy-synth-never-written.wav");
        for seconds in [f32::INFINITY, f32::NAN, -1.0] {
            assert!(bounce(&config, &out, &[60], seconds).is_err(), "{seconds} should be rejected");
        }
        assert!(!out.exists());
    }
}
