//! Shared fixtures for the integration tests. WAV fixtures are generated
//! with `hound` on the fly instead of being committed to the repo.

// Each test binary uses a subset of these helpers.
#![allow(dead_code)]

use std::io::Cursor;
use std::path::Path;

/// Writes a mono 16-bit PCM sine wave to `path`.
pub fn write_sine_wav(path: &Path, sample_rate: u32, freq: f32, seconds: f32) {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).expect("create wav fixture");
    write_sine_samples(&mut writer, sample_rate, freq, seconds);
    writer.finalize().expect("finalize wav fixture");
}

/// Same sine wave, rendered into memory for the HTTP tests.
pub fn sine_wav_bytes(sample_rate: u32, freq: f32, seconds: f32) -> Vec<u8> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut cursor = Cursor::new(Vec::new());
    let mut writer = hound::WavWriter::new(&mut cursor, spec).expect("create wav writer");
    write_sine_samples(&mut writer, sample_rate, freq, seconds);
    writer.finalize().expect("finalize wav writer");
    cursor.into_inner()
}

fn write_sine_samples<W: std::io::Write + std::io::Seek>(
    writer: &mut hound::WavWriter<W>,
    sample_rate: u32,
    freq: f32,
    seconds: f32,
) {
    let n_samples = (seconds * sample_rate as f32).round() as usize;
    for n in 0..n_samples {
        let t = n as f32 / sample_rate as f32;
        let sample = (std::f32::consts::TAU * freq * t).sin() * 0.8;
        writer
            .write_sample((sample * i16::MAX as f32) as i16)
            .expect("write wav sample");
    }
}
