//! Benchmarks for the ADSR envelope state machine.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_synth::dsp::envelope::{Envelope, EnvelopeParams};

use crate::BLOCK_SIZES;

fn run(env: &mut Envelope, params: &EnvelopeParams, buffer: &mut [f32]) {
    for sample in buffer.iter_mut() {
        *sample = env.advance(params);
    }
}

pub fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/envelope");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Attack phase (ramping up), long enough to never finish
        let params = EnvelopeParams::new(f32::MAX, 4_800.0, 0.7, 14_400.0);
        let mut env = Envelope::new();
        env.trigger(&params);
        group.bench_with_input(BenchmarkId::new("attack", size), &size, |b, _| {
            b.iter(|| run(&mut env, black_box(&params), black_box(&mut buffer)))
        });

        // Sustain phase (holding steady)
        let params = EnvelopeParams::new(48.0, 48.0, 0.7, 14_400.0);
        let mut env = Envelope::new();
        env.trigger(&params);
        for _ in 0..200 {
            env.advance(&params);
        }
        group.bench_with_input(BenchmarkId::new("sustain", size), &size, |b, _| {
            b.iter(|| run(&mut env, black_box(&params), black_box(&mut buffer)))
        });

        // Release phase (ramping down)
        let params = EnvelopeParams::new(48.0, 48.0, 0.7, f32::MAX);
        let mut env = Envelope::new();
        env.trigger(&params);
        for _ in 0..200 {
            env.advance(&params);
        }
        env.release(&params);
        group.bench_with_input(BenchmarkId::new("release", size), &size, |b, _| {
            b.iter(|| run(&mut env, black_box(&params), black_box(&mut buffer)))
        });
    }

    group.finish();
}
