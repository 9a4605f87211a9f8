//! saavy-synth - polyphonic ADSR synthesizer
//!
//! Run with: cargo run -- play --port <name>

mod app;
mod bounce;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result as EyreResult, WrapErr};
use saavy_synth::EngineConfig;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "saavy-synth", version, about = "Polyphonic ADSR synthesizer")]
struct Cli {
    /// Engine configuration (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List MIDI input ports
    Ports,
    /// Play live from a MIDI input through the default audio device
    Play {
        /// Substring of the MIDI input port name (defaults to the first port)
        #[arg(short, long)]
        port: Option<String>,
    },
    /// Render a chord offline into a WAV file
    Bounce {
        #[arg(short, long)]
        out: PathBuf,
        /// MIDI notes to hold
        #[arg(short, long, value_delimiter = ',', default_value = "60,64,67")]
        notes: Vec<u8>,
        /// Seconds to hold the chord before releasing it
        #[arg(short, long, default_value_t = 2.0)]
        seconds: f32,
    },
}

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => EngineConfig::load(path)
            .wrap_err_with(|| format!("failed to load config from {}", path.display()))?,
        None => EngineConfig::default(),
    };

    match cli.command {
        Command::Ports => app::list_ports(),
        Command::Play { port } => app::play(config, port.as_deref()),
        Command::Bounce { out, notes, seconds } => bounce::bounce(&config, &out, &notes, seconds),
    }
}
