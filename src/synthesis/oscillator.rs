//! Sine wave oscillator implementation.

use crate::Signal;
use std::f64::consts::PI;

/// A sine wave oscillator.
///
/// Sample `n` is `sin(2π × frequency × n / sample_rate)`. Phase is tracked in
/// cycles and wrapped to `[0.0, 1.0)` so long renders do not lose precision.
pub struct SineOscillator {
    sample_rate: u32,
    /// Current phase of the oscillator (0.0 to 1.0)
    phase: f64,
    /// Phase increment per sample (frequency / sample_rate)
    phase_increment: f64,
}

impl SineOscillator {
    /// Creates a new sine oscillator starting at phase zero.
    ///
    /// `sample_rate` must be non-zero; the synthesizer validates it before
    /// building any oscillators.
    ///
    /// # Examples
    ///
    /// ```
    /// use foley::{Signal, SineOscillator};
    ///
    /// let mut osc = SineOscillator::new(440.0, 44100);
    /// assert_eq!(osc.next_sample(), 0.0);
    /// ```
    pub fn new(frequency: f64, sample_rate: u32) -> Self {
        Self {
            sample_rate,
            phase: 0.0,
            phase_increment: frequency / sample_rate as f64,
        }
    }

    pub fn frequency(&self) -> f64 {
        self.phase_increment * self.sample_rate as f64
    }
}

impl Signal for SineOscillator {
    fn next_sample(&mut self) -> f64 {
        let sample = (self.phase * 2.0 * PI).sin();

        self.phase = (self.phase + self.phase_increment).fract();

        sample
    }
}
