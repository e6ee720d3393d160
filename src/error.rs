//! Error taxonomy for the fetch → decode → shift → play pipeline.
//!
//! Everything here is fatal and propagates up to `main`, which converts it
//! into a log line and a non-zero exit status. The one non-fatal failure in
//! the program, temp file removal, is logged in `fetch` and never surfaces
//! as an `Error`.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// The server answered, but not with a success status.
    #[error("GET {url} returned HTTP {status}")]
    Download { url: String, status: u16 },

    /// The request never produced a usable response.
    #[error("request for {url} failed")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to open {path}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode audio from {path}")]
    Decode {
        path: PathBuf,
        #[source]
        source: rodio::decoder::DecoderError,
    },

    #[error("decoder reported zero channels for {path}")]
    NoChannels { path: PathBuf },

    #[error("decoded {count} samples from {path}, not divisible by {channels} channels")]
    RaggedFrames {
        path: PathBuf,
        count: usize,
        channels: usize,
    },

    #[error("no audio output device available")]
    NoOutputDevice,

    #[error("unsupported output sample format: {format}")]
    UnsupportedSampleFormat { format: String },

    #[error("failed to query output device config")]
    DeviceConfig(#[from] cpal::DefaultStreamConfigError),

    #[error("failed to open output stream")]
    BuildStream(#[from] cpal::BuildStreamError),

    #[error("failed to start playback")]
    PlayStream(#[from] cpal::PlayStreamError),

    #[error("I/O error")]
    Io(#[from] std::io::Error),
}
