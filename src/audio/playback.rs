use std::sync::{Arc, Condvar, Mutex};
use std::time::{Duration, Instant};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use tracing::{debug, error, info, warn};

use crate::audio::AudioBuffer;
use crate::error::{Error, Result};

/// Shared between the cpal callback and the thread waiting for playback to end.
struct Progress {
    position: Mutex<usize>,
    finished: Mutex<bool>,
    signal: Condvar,
}

/// Plays `buffer` on the default output device, blocking until the last frame
/// has been handed to the device. There is no pause or partial playback.
pub fn play(buffer: &AudioBuffer) -> Result<()> {
    if buffer.is_empty() {
        info!("buffer is empty, nothing to play");
        return Ok(());
    }

    let host = cpal::default_host();
    debug!(audio_host = ?host.id(), "using audio host");
    let device = host.default_output_device().ok_or(Error::NoOutputDevice)?;
    let (config, sample_format) = output_config(&device, buffer.sample_rate())?;
    debug!(?config, ?sample_format, "opening output stream");

    let channels = config.channels as usize;
    if channels == 0 {
        return Err(Error::NoOutputDevice);
    }

    let progress = Arc::new(Progress {
        position: Mutex::new(0),
        finished: Mutex::new(false),
        signal: Condvar::new(),
    });

    let audio = Arc::new(buffer.clone());
    let shared_progress = Arc::clone(&progress);
    let stream = match sample_format {
        cpal::SampleFormat::F32 => device.build_output_stream(
            &config,
            move |output: &mut [f32], _| {
                fill_output(&shared_progress, &audio, output, channels);
            },
            |err| {
                error!("output stream error: {err}");
            },
            None,
        )?,
        other => {
            return Err(Error::UnsupportedSampleFormat {
                format: format!("{other:?}"),
            });
        }
    };
    stream.play()?;

    // Block until the callback has consumed every frame. The deadline guards
    // against a stalled device, with margin for startup latency.
    let deadline = Instant::now() + Duration::from_secs_f64(buffer.duration_secs() + 5.0);
    let mut finished = progress.finished.lock().unwrap();
    while !*finished {
        let now = Instant::now();
        if now >= deadline {
            warn!("playback did not finish before the deadline, giving up the wait");
            break;
        }
        let (guard, _) = progress
            .signal
            .wait_timeout(finished, deadline - now)
            .unwrap();
        finished = guard;
    }
    drop(finished);

    // Let the device drain its final buffer before the stream is dropped.
    std::thread::sleep(Duration::from_millis(200));
    Ok(())
}

/// Picks an f32 output config at the buffer's sample rate when the device
/// offers one, otherwise falls back to the device default. Without a matching
/// rate the audio plays at the wrong speed, so the fallback warns.
fn output_config(
    device: &cpal::Device,
    sample_rate: u32,
) -> Result<(cpal::StreamConfig, cpal::SampleFormat)> {
    let desired: cpal::SampleRate = sample_rate;
    if let Ok(mut ranges) = device.supported_output_configs() {
        if let Some(range) = ranges.find(|r| {
            r.sample_format() == cpal::SampleFormat::F32
                && r.min_sample_rate() <= desired
                && desired <= r.max_sample_rate()
        }) {
            let config = range.with_sample_rate(desired);
            let sample_format = config.sample_format();
            return Ok((config.config(), sample_format));
        }
    }

    let default = device.default_output_config()?;
    warn!(
        device_rate = default.sample_rate(),
        buffer_rate = sample_rate,
        "output device does not support the buffer's sample rate; pitch and speed will be off"
    );
    let sample_format = default.sample_format();
    Ok((default.config(), sample_format))
}

/// Writes the next chunk of frames into the device buffer and flags completion
/// once the read cursor passes the end. Called from the cpal audio callback.
fn fill_output(progress: &Progress, audio: &AudioBuffer, output: &mut [f32], channels: usize) {
    // Always start from silence.
    for sample in output.iter_mut() {
        *sample = 0.0;
    }

    // Panicking out of the audio callback is bad, so a poisoned lock just
    // leaves silence in the buffer.
    let mut pos = match progress.position.lock() {
        Ok(guard) => guard,
        Err(e) => {
            error!("position mutex poisoned: {e}");
            return;
        }
    };

    let left = audio.left();
    let right = audio.right();
    let frames_total = audio.frames();
    let frames_out = output.len() / channels;
    let remaining = frames_total.saturating_sub(*pos);
    let frames_to_write = frames_out.min(remaining);

    for i in 0..frames_to_write {
        let frame = &mut output[i * channels..(i + 1) * channels];
        if channels == 1 {
            frame[0] = 0.5 * (left[*pos + i] + right[*pos + i]);
        } else {
            frame[0] = left[*pos + i];
            frame[1] = right[*pos + i];
        }
    }
    *pos += frames_to_write;

    if *pos >= frames_total {
        match progress.finished.lock() {
            Ok(mut finished) => {
                *finished = true;
                progress.signal.notify_all();
            }
            Err(e) => error!("finished mutex poisoned: {e}"),
        }
    }
}
