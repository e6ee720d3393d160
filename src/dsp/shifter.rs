//! Phase-vocoder pitch shifter.
//!
//! Classic analysis/synthesis vocoder: Hann-windowed frames on a fixed hop,
//! per-bin instantaneous frequency from the phase delta against the previous
//! frame, magnitudes moved to their shifted bins, phases re-accumulated on the
//! synthesis side, overlap-add back into the time domain. Output length always
//! equals input length, so duration and sample rate are preserved.

use std::f32::consts::{PI, TAU};

use rustfft::num_complex::Complex32;

use crate::dsp::fft::Fft;

pub struct PitchShifter {
    fft: Fft,
    window: Vec<f32>,
    hop: usize,
    prev_input_phases: Vec<f32>,
    prev_output_phases: Vec<f32>,
}

impl PitchShifter {
    /// `hop` must divide the overlap evenly; window_size / 4 gives the 75%
    /// overlap the Hann window wants.
    pub fn new(window_size: usize, hop: usize) -> Self {
        assert!(window_size > 0 && hop > 0 && hop <= window_size);
        Self {
            fft: Fft::new(window_size),
            window: hann_window(window_size),
            hop,
            prev_input_phases: vec![0.0; window_size],
            prev_output_phases: vec![0.0; window_size],
        }
    }

    /// Shifts `samples` by the frequency `ratio` (2.0 = up an octave),
    /// returning a buffer of exactly the same length.
    pub fn shift(&mut self, samples: &[f32], ratio: f32) -> Vec<f32> {
        let size = self.fft.size();
        let mut output = vec![0.0; samples.len()];
        if samples.is_empty() {
            return output;
        }

        // The window is applied on both the analysis and synthesis side, so
        // overlap-add accumulates w^2; this scale makes that sum come out at
        // unit gain for the 75%-overlap Hann.
        let window_sq_sum: f32 = self.window.iter().map(|w| w * w).sum();
        let scale = self.hop as f32 / window_sq_sum;

        let mut frame = vec![0.0f32; size];
        for start in (0..samples.len()).step_by(self.hop) {
            // Windowed analysis frame, zero-padded past the end of the input.
            frame.fill(0.0);
            let available = (samples.len() - start).min(size);
            for i in 0..available {
                frame[i] = samples[start + i] * self.window[i];
            }

            let mut spectrum = self.fft.analyze(&frame);
            self.shift_spectrum(&mut spectrum, ratio);
            let resynthesized = self.fft.synthesize(spectrum);

            for (i, &x) in resynthesized.iter().enumerate() {
                if start + i >= output.len() {
                    break;
                }
                output[start + i] += x * self.window[i] * scale;
            }
        }
        output
    }

    fn shift_spectrum(&mut self, spectrum: &mut [Complex32], ratio: f32) {
        let len = spectrum.len();
        let half = len / 2;
        let hop = self.hop as f32;

        // Analysis: magnitude plus fractional bin index per bin, recovered
        // from the phase advance since the previous frame.
        let mut analyzed = vec![[0.0f32; 2]; half + 1];
        for i in 0..=half {
            let (norm, phase) = spectrum[i].to_polar();
            let bin_center_freq = TAU * i as f32 / len as f32;

            let phase_diff =
                wrap_phase(phase - self.prev_input_phases[i] - bin_center_freq * hop);
            self.prev_input_phases[i] = phase;

            let bin_deviation = phase_diff * len as f32 / (hop * TAU);
            analyzed[i] = [norm, i as f32 + bin_deviation];
        }

        // Shift: bin i of the output draws from bin i/ratio of the analysis,
        // with its fractional frequency scaled by the ratio.
        let mut shifted = vec![[0.0f32; 2]; half + 1];
        for i in 0..=half {
            let source_bin = (i as f32 / ratio).round() as usize;
            if source_bin > half {
                break;
            }
            shifted[i] = [analyzed[source_bin][0], analyzed[source_bin][1] * ratio];
        }

        // Synthesis: re-accumulate phases and rebuild the half spectrum.
        for i in 0..=half {
            let bin_deviation = shifted[i][1] - i as f32;
            let mut phase_diff = bin_deviation * TAU * hop / len as f32;
            phase_diff += (TAU * i as f32 / len as f32) * hop;

            let phase = wrap_phase(self.prev_output_phases[i] + phase_diff);
            spectrum[i] = Complex32::from_polar(shifted[i][0], phase);
            self.prev_output_phases[i] = phase;
        }

        // Downward shifts fold content over the new Nyquist; zero it out.
        if ratio < 1.0 {
            let nyquist = ((half as f32) * ratio).round() as usize;
            for bin in spectrum.iter_mut().take(half).skip(nyquist) {
                *bin = Complex32::new(0.0, 0.0);
            }
        }

        // Mirror into the upper half so the inverse FFT stays real.
        for i in 1..half {
            spectrum[len - i] = spectrum[i].conj();
        }
    }
}

fn hann_window(size: usize) -> Vec<f32> {
    (0..size)
        .map(|i| 0.5 * (1.0 - (TAU * i as f32 / size as f32).cos()))
        .collect()
}

/// Wraps a phase into (-PI, PI].
fn wrap_phase(phase: f32) -> f32 {
    if phase >= 0.0 {
        (phase + PI) % TAU - PI
    } else {
        (phase - PI) % TAU + PI
    }
}

#[cfg(test)]
mod tests {
    use super::{PitchShifter, hann_window, wrap_phase};
    use std::f32::consts::PI;

    #[test]
    fn wrap_phase_stays_in_range() {
        for raw in [-25.0f32, -PI, -0.1, 0.0, 0.1, PI, 7.5, 100.0] {
            let wrapped = wrap_phase(raw);
            assert!(
                (-PI..=PI).contains(&wrapped),
                "{raw} wrapped to {wrapped}"
            );
        }
    }

    #[test]
    fn wrap_phase_preserves_small_angles() {
        for raw in [-3.0f32, -1.0, 0.0, 1.0, 3.0] {
            assert!((wrap_phase(raw) - raw).abs() < 1e-6);
        }
    }

    #[test]
    fn hann_window_shape() {
        let window = hann_window(8);
        assert_eq!(window.len(), 8);
        assert!(window[0].abs() < 1e-6, "Hann window starts at zero");
        assert!((window[4] - 1.0).abs() < 1e-6, "Hann window peaks mid-frame");
        // Periodic window: w[i] == w[size - i] for interior points.
        for i in 1..8 {
            assert!((window[i] - window[8 - i]).abs() < 1e-6);
        }
    }

    #[test]
    fn shift_preserves_length() {
        let samples = vec![0.25f32; 3000];
        let out = PitchShifter::new(1024, 256).shift(&samples, 1.5);
        assert_eq!(out.len(), samples.len());
    }

    #[test]
    fn shift_of_empty_input_is_empty() {
        let out = PitchShifter::new(1024, 256).shift(&[], 2.0);
        assert!(out.is_empty());
    }

    #[test]
    fn unit_ratio_roughly_reconstructs_a_sine() {
        let sample_rate = 8000.0f32;
        let samples: Vec<f32> = (0..8000)
            .map(|n| (std::f32::consts::TAU * 440.0 * n as f32 / sample_rate).sin())
            .collect();

        let out = PitchShifter::new(1024, 256).shift(&samples, 1.0);

        // Compare energy away from the windowed edges.
        let mid = 2048..6144;
        let input_power: f32 =
            samples[mid.clone()].iter().map(|x| x * x).sum::<f32>() / mid.len() as f32;
        let output_power: f32 =
            out[mid.clone()].iter().map(|x| x * x).sum::<f32>() / mid.len() as f32;
        assert!(
            (input_power - output_power).abs() < 0.2 * input_power,
            "power drifted: in={input_power}, out={output_power}"
        );
    }
}
