//! Benchmarks for real-world engine usage.

mod engine;

pub use engine::bench_engine;
