//! Benchmarks for oscillator waveform generation.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_synth::dsp::oscillator::{frequency_to_phase_increment, Oscillator, Waveform};

use crate::BLOCK_SIZES;

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");
    let increment = frequency_to_phase_increment(440.0, 48_000.0);

    let waveforms = [
        ("sine", Waveform::Sine),         // cos() transcendental
        ("sawtooth", Waveform::Sawtooth), // linear ramp
        ("square", Waveform::Square),     // branch per sample
        ("triangle", Waveform::Triangle), // absolute value
    ];

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        for (name, waveform) in waveforms {
            let mut osc = Oscillator::new();
            osc.start(increment);
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| {
                    for sample in buffer.iter_mut() {
                        *sample = osc.advance(black_box(waveform));
                    }
                    black_box(&buffer);
                })
            });
        }
    }

    group.finish();
}
