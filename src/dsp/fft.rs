use std::sync::Arc;

use rustfft::FftPlanner;
use rustfft::num_complex::Complex32;

/// Forward/inverse FFT pair of a fixed size, planned once per shifter.
pub struct Fft {
    forward: Arc<dyn rustfft::Fft<f32>>,
    inverse: Arc<dyn rustfft::Fft<f32>>,
    size: usize,
}

impl Fft {
    pub fn new(size: usize) -> Self {
        let mut planner = FftPlanner::new();
        Self {
            forward: planner.plan_fft_forward(size),
            inverse: planner.plan_fft_inverse(size),
            size,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Real frame → complex spectrum. `frame` must be `size` samples long.
    pub fn analyze(&self, frame: &[f32]) -> Vec<Complex32> {
        debug_assert_eq!(frame.len(), self.size);
        let mut spectrum: Vec<Complex32> =
            frame.iter().map(|&x| Complex32::new(x, 0.0)).collect();
        self.forward.process(&mut spectrum);
        spectrum
    }

    /// Complex spectrum → real frame, with the 1/N inverse scaling applied.
    pub fn synthesize(&self, mut spectrum: Vec<Complex32>) -> Vec<f32> {
        debug_assert_eq!(spectrum.len(), self.size);
        self.inverse.process(&mut spectrum);
        let scale = 1.0 / self.size as f32;
        spectrum.iter().map(|x| x.re * scale).collect()
    }
}
