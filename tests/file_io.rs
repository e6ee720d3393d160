//! Integration tests for audio file loading:
//! - valid mono and stereo WAV files
//! - missing files
//! - files that are not audio at all

mod common;

use std::fs;
use std::io::Write;

use pitchplay::Error;
use pitchplay::audio::file;

#[test]
fn load_valid_mono_wav() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("tone.wav");
    common::write_sine_wav(&path, 22050, 440.0, 0.25);

    let audio = file::load(&path)?;

    assert_eq!(audio.sample_rate(), 22050);
    assert!(!audio.is_empty());
    assert_eq!(audio.left().len(), audio.right().len());
    // Mono input lands in both channels.
    assert_eq!(audio.left(), audio.right());
    assert_eq!(audio.frames(), (22050.0f32 * 0.25).round() as usize);
    Ok(())
}

#[test]
fn load_stereo_wav_keeps_channels_apart() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("stereo.wav");

    let spec = hound::WavSpec {
        channels: 2,
        sample_rate: 8000,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(&path, spec)?;
    for _ in 0..800 {
        writer.write_sample(i16::MAX / 2)?; // left
        writer.write_sample(i16::MIN / 2)?; // right
    }
    writer.finalize()?;

    let audio = file::load(&path)?;
    assert_eq!(audio.frames(), 800);
    assert!(audio.left().iter().all(|&s| s > 0.0));
    assert!(audio.right().iter().all(|&s| s < 0.0));
    Ok(())
}

#[test]
fn missing_file_is_an_open_error() {
    let dir = tempfile::tempdir().unwrap();
    let bogus = dir.path().join("does_not_exist.wav");

    let err = file::load(&bogus).unwrap_err();
    assert!(
        matches!(err, Error::Open { .. }),
        "expected Open error, got: {err:?}"
    );
}

#[test]
fn non_audio_file_is_a_decode_error() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("not_audio.wav");
    {
        let mut f = fs::File::create(&path)?;
        writeln!(f, "this is not an audio file")?;
    }

    let err = file::load(&path).unwrap_err();
    assert!(
        matches!(err, Error::Decode { .. }),
        "expected Decode error, got: {err:?}"
    );
    Ok(())
}
