use std::path::PathBuf;

use clap::{ArgGroup, Parser};

/// Play a pitch-shifted rendition of an audio file.
#[derive(Parser, Debug)]
#[command(name = "pitchplay", version, about)]
#[command(group(ArgGroup::new("source").required(true).args(["file", "url"])))]
pub struct Cli {
    /// Semitone steps to shift the pitch (positive = up, negative = down).
    #[arg(allow_negative_numbers = true)]
    pub steps: f32,

    /// Path of a local audio file to play.
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// URL of an audio file to download and play.
    #[arg(short, long, value_name = "URL")]
    pub url: Option<String>,
}
