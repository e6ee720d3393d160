pub mod file;
pub mod playback;

/// Planar stereo audio plus its sample rate.
///
/// Mono sources are duplicated into both channels at load time; sources with
/// more than two channels keep the first two. The buffer is never mutated
/// after construction, the pitch shift produces a fresh one.
#[derive(Clone, Debug)]
pub struct AudioBuffer {
    sample_rate: u32,
    left: Vec<f32>,
    right: Vec<f32>,
}

impl AudioBuffer {
    pub fn new(sample_rate: u32, left: Vec<f32>, right: Vec<f32>) -> Self {
        assert_eq!(
            left.len(),
            right.len(),
            "left and right channel lengths must match"
        );
        Self {
            sample_rate,
            left,
            right,
        }
    }

    /// Build a buffer from interleaved samples as produced by a decoder:
    /// layout = [ch0_f0, ch1_f0, ..., ch{n-1}_f0, ch0_f1, ...].
    ///
    /// `samples.len()` must be divisible by `channels` and `channels` must be
    /// nonzero; callers validate both before getting here.
    pub fn from_interleaved(sample_rate: u32, samples: &[f32], channels: usize) -> Self {
        if channels == 1 {
            return Self::new(sample_rate, samples.to_vec(), samples.to_vec());
        }
        let frames = samples.len() / channels;
        let mut left = Vec::with_capacity(frames);
        let mut right = Vec::with_capacity(frames);
        for frame in 0..frames {
            left.push(samples[frame * channels]);
            right.push(samples[frame * channels + 1]);
        }
        Self::new(sample_rate, left, right)
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of frames (per-channel sample count).
    pub fn frames(&self) -> usize {
        self.left.len()
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }

    pub fn duration_secs(&self) -> f64 {
        self.frames() as f64 / self.sample_rate as f64
    }

    pub fn left(&self) -> &[f32] {
        &self.left
    }

    pub fn right(&self) -> &[f32] {
        &self.right
    }

    /// Returns interleaved stereo samples as a Vec<f32>.
    pub fn interleaved(&self) -> Vec<f32> {
        let mut out = vec![0.0; self.frames() * 2];
        interleave_stereo(&self.left, &self.right, &mut out);
        out
    }
}

/// Interleaves two channels into `out`, which must hold `2 * frames` values.
pub(crate) fn interleave_stereo(left: &[f32], right: &[f32], out: &mut [f32]) {
    for (i, frame) in out.chunks_exact_mut(2).enumerate() {
        frame[0] = left.get(i).copied().unwrap_or(0.0);
        frame[1] = right.get(i).copied().unwrap_or(0.0);
    }
}
