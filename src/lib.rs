//! Download or load an audio file, shift its pitch by a number of semitone
//! steps, and play the result on the default output device.

pub mod audio;
pub mod cli;
pub mod dsp;
pub mod error;
pub mod fetch;

pub use error::{Error, Result};
