//! Live playback: MIDI input → event queue → audio callback.

use std::sync::mpsc;
use std::time::Duration;

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use midir::{MidiInput, MidiInputPort};
use tracing::{debug, error, info};

use saavy_synth::{
    io::{midi_to_synth, MidiEvent},
    synth::{message::MESSAGE_QUEUE_SIZE, SynthHandle},
    EngineConfig, SynthEngine, MAX_BLOCK_SIZE,
};

const CLIENT_NAME: &str = "saavy-synth";

pub fn list_ports() -> EyreResult<()> {
    let midi_in = MidiInput::new(CLIENT_NAME).wrap_err("failed to initialise MIDI input")?;
    let ports = midi_in.ports();
    if ports.is_empty() {
        println!("No MIDI input ports available");
    }
    for (i, port) in ports.iter().enumerate() {
        let name = midi_in.port_name(port).unwrap_or_else(|_| "<unknown>".into());
        println!("{i}: {name}");
    }
    Ok(())
}

fn select_port(midi_in: &MidiInput, wanted: Option<&str>) -> EyreResult<(MidiInputPort, String)> {
    let ports = midi_in.ports();
    let port = match wanted {
        Some(wanted) => ports
            .into_iter()
            .find(|p| {
                midi_in
                    .port_name(p)
                    .map(|n| n.contains(wanted))
                    .unwrap_or(false)
            })
            .ok_or_else(|| eyre!("MIDI port '{wanted}' not found"))?,
        None => ports
            .into_iter()
            .next()
            .ok_or_else(|| eyre!("no MIDI input ports available"))?,
    };
    let name = midi_in.port_name(&port).wrap_err("failed to read MIDI port name")?;
    Ok((port, name))
}

/// Run until Ctrl-C.
pub fn play(mut config: EngineConfig, port: Option<&str>) -> EyreResult<()> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| eyre!("no default output device available"))?;
    let stream_config = device
        .default_output_config()
        .wrap_err("failed to fetch default output config")?;

    config.sample_rate = stream_config.sample_rate().0 as f32;
    let channels = stream_config.channels() as usize;
    let block_size = config.block_size.min(MAX_BLOCK_SIZE);
    let channel_filter = config.midi_channel;

    let (handle, mut rx) = SynthHandle::channel(MESSAGE_QUEUE_SIZE);
    let mut engine = SynthEngine::new(&config);
    let mut render_buf = vec![0.0f32; MAX_BLOCK_SIZE];

    let stream = device.build_output_stream(
        &stream_config.into(),
        move |data: &mut [f32], _| {
            let total_frames = data.len() / channels;
            let mut frames_written = 0;

            while frames_written < total_frames {
                let frames_to_render = (total_frames - frames_written).min(block_size);

                let block = &mut render_buf[..frames_to_render];
                block.fill(0.0);
                engine.process_block(&mut rx, &mut [&mut *block]);

                // Copy to output (mono to all channels)
                let out_off = frames_written * channels;
                for (i, &s) in block.iter().enumerate() {
                    for ch in 0..channels {
                        data[out_off + i * channels + ch] = s;
                    }
                }

                frames_written += frames_to_render;
            }
        },
        |err| error!(%err, "audio stream error"),
        None,
    )?;
    stream.play()?;

    let midi_in = MidiInput::new(CLIENT_NAME).wrap_err("failed to initialise MIDI input")?;
    let (midi_port, port_name) = select_port(&midi_in, port)?;
    let connection = midi_in
        .connect(
            &midi_port,
            "saavy-synth-in",
            move |_stamp, bytes, handle: &mut SynthHandle| match MidiEvent::parse(bytes) {
                Ok(event) => {
                    if let Some(msg) = midi_to_synth(event, channel_filter) {
                        // A full queue is already logged by the handle
                        let _ = handle.send(msg);
                    }
                }
                Err(err) => debug!(%err, ?bytes, "ignoring malformed MIDI message"),
            },
            handle,
        )
        .map_err(|err| eyre!("failed to connect to MIDI port '{port_name}': {err}"))?;

    info!(
        port = %port_name,
        sample_rate = config.sample_rate,
        channels,
        polyphony = config.polyphony,
        "playing, press Ctrl+C to stop"
    );

    let (stop_tx, stop_rx) = mpsc::channel();
    ctrlc::set_handler(move || {
        let _ = stop_tx.send(());
    })
    .wrap_err("failed to install Ctrl+C handler")?;
    let _ = stop_rx.recv();

    let (_midi_in, mut handle) = connection.close();
    let _ = handle.all_sound_off();
    // Let the release tails play out before the stream is dropped
    std::thread::sleep(Duration::from_millis(250));
    info!("stopped");
    Ok(())
}
