use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use cpal::Sample;
use rodio::{Decoder, Source};

use crate::audio::AudioBuffer;
use crate::error::{Error, Result};

/// Decodes a local audio file into an [`AudioBuffer`].
///
/// Uses `rodio::Decoder`, which yields interleaved samples for multichannel
/// audio and sniffs the container format from the stream, so anything rodio's
/// default backends understand (wav, flac, vorbis, mp3) works here.
pub fn load<P: AsRef<Path>>(path: P) -> Result<AudioBuffer> {
    let path = path.as_ref();

    let file = File::open(path).map_err(|source| Error::Open {
        path: path.to_owned(),
        source,
    })?;
    let source = Decoder::new(BufReader::new(file)).map_err(|source| Error::Decode {
        path: path.to_owned(),
        source,
    })?;

    let sample_rate = source.sample_rate();
    let channels = source.channels() as usize;
    let samples: Vec<f32> = source.map(Sample::to_sample::<f32>).collect();

    if channels == 0 {
        return Err(Error::NoChannels {
            path: path.to_owned(),
        });
    }
    if samples.len() % channels != 0 {
        return Err(Error::RaggedFrames {
            path: path.to_owned(),
            count: samples.len(),
            channels,
        });
    }

    Ok(AudioBuffer::from_interleaved(sample_rate, &samples, channels))
}
