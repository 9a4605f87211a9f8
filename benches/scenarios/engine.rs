//! Benchmarks for full engine blocks.
//!
//! These render the whole voice pool the way the audio callback does, from
//! a single note up to every slot busy.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_synth::{EngineConfig, SynthEngine};

use crate::BLOCK_SIZES;

const CHORD: [u8; 8] = [48, 52, 55, 60, 64, 67, 72, 76];

fn engine_with_notes(notes: &[u8]) -> SynthEngine {
    // Notes are never released, so every voice sounds for the whole run
    let mut engine = SynthEngine::new(&EngineConfig::default());
    for &note in notes {
        engine.note_on(note, 100);
    }
    engine
}

pub fn bench_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/engine");

    for &size in BLOCK_SIZES {
        let mut left = vec![0.0f32; size];
        let mut right = vec![0.0f32; size];

        for voices in [1, 4, 8] {
            let mut engine = engine_with_notes(&CHORD[..voices]);
            group.bench_with_input(
                BenchmarkId::new(format!("{voices}_voices_stereo"), size),
                &size,
                |b, _| {
                    b.iter(|| {
                        left.fill(0.0);
                        right.fill(0.0);
                        engine.render(black_box(&mut [left.as_mut_slice(), right.as_mut_slice()]));
                    })
                },
            );
        }

        // Idle engine: the cost of scanning an empty pool
        let mut engine = engine_with_notes(&[]);
        group.bench_with_input(BenchmarkId::new("idle", size), &size, |b, _| {
            b.iter(|| engine.render(black_box(&mut [left.as_mut_slice()])))
        });
    }

    group.finish();
}
