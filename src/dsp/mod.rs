pub mod fft;
pub mod shifter;

use rayon::join;

use crate::audio::AudioBuffer;
use crate::dsp::shifter::PitchShifter;

// Vocoder frame geometry. A 2048 window resolves pitch down to bass range at
// common sample rates; the quarter-window hop gives the Hann overlap-add its
// constant gain.
pub const WINDOW_SIZE: usize = 2048;
pub const HOP_SIZE: usize = WINDOW_SIZE / 4;

/// Frequency ratio for a shift of `steps` semitones.
pub fn semitone_ratio(steps: f32) -> f32 {
    2f32.powf(steps / 12.0)
}

/// Pitch-shifts the buffer by `steps` semitones, preserving sample rate and
/// frame count. Zero steps is an exact no-op.
pub fn pitch_shift(audio: &AudioBuffer, steps: f32) -> AudioBuffer {
    if steps == 0.0 {
        return audio.clone();
    }

    let ratio = semitone_ratio(steps);
    // Each channel gets its own shifter: the vocoder carries phase state
    // between frames that must not leak across channels.
    let (left, right) = join(
        || PitchShifter::new(WINDOW_SIZE, HOP_SIZE).shift(audio.left(), ratio),
        || PitchShifter::new(WINDOW_SIZE, HOP_SIZE).shift(audio.right(), ratio),
    );
    AudioBuffer::new(audio.sample_rate(), left, right)
}
