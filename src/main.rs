use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use pitchplay::audio::{file, playback};
use pitchplay::cli::Cli;
use pitchplay::{dsp, fetch};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // `{:#}` renders the whole source chain on one line.
            error!("fatal: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    if let Some(path) = &cli.file {
        return shift_and_play(path, cli.steps);
    }

    let Some(url) = cli.url.as_deref() else {
        // clap's ArgGroup guarantees one source, this is unreachable in practice
        anyhow::bail!("no input source given");
    };
    let downloaded = fetch::download(url)?;

    // Clean up on both outcomes; only the processing result decides the exit
    // status.
    let result = shift_and_play(downloaded.path(), cli.steps);
    downloaded.cleanup();
    result
}

fn shift_and_play(path: &Path, steps: f32) -> anyhow::Result<()> {
    info!(path = %path.display(), "loading audio");
    let audio = file::load(path)?;
    info!(
        sample_rate = audio.sample_rate(),
        frames = audio.frames(),
        duration_secs = audio.duration_secs(),
        "decoded"
    );

    info!(steps, "applying pitch shift");
    let shifted = dsp::pitch_shift(&audio, steps);

    info!("playing pitch-shifted audio");
    playback::play(&shifted)?;
    Ok(())
}
