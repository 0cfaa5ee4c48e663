//! Signal combinators for composing and transforming audio signals.
//!
//! The synthesizer only needs two shapes: scaling a source by a fixed gain and
//! summing any number of sources into one stream.

use crate::Signal;

/// Scales a signal by a fixed gain.
///
/// # Examples
///
/// ```
/// use foley::{Signal, SignalExt};
///
/// let mut scaled = 2.0_f64.gain(0.25);
/// assert_eq!(scaled.next_sample(), 0.5);
/// ```
pub struct Gain<S: Signal> {
    pub source: S,
    pub gain: f64,
}

impl<S: Signal> Signal for Gain<S> {
    fn next_sample(&mut self) -> f64 {
        self.source.next_sample() * self.gain
    }
}

/// Sums any number of signals sample by sample.
///
/// Unlike fixed-arity mixers, `Mix` owns a list of boxed sources so a profile
/// with an arbitrary number of harmonics can be assembled at runtime. No
/// headroom is applied; the normalizer deals with the result.
#[derive(Default)]
pub struct Mix {
    sources: Vec<Box<dyn Signal + Send>>,
}

impl Mix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a source to the mix.
    pub fn push(&mut self, source: impl Signal + Send + 'static) {
        self.sources.push(Box::new(source));
    }

    /// Builder-style variant of [`Mix::push`].
    pub fn with(mut self, source: impl Signal + Send + 'static) -> Self {
        self.push(source);
        self
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl Signal for Mix {
    fn next_sample(&mut self) -> f64 {
        self.sources.iter_mut().map(|s| s.next_sample()).sum()
    }
}

/// Extension methods for chaining combinators onto any signal.
pub trait SignalExt: Signal + Sized {
    /// Scales this signal by `gain`.
    fn gain(self, gain: f64) -> Gain<Self> {
        Gain { source: self, gain }
    }
}

impl<S: Signal> SignalExt for S {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gain() {
        let mut gain = Gain {
            source: 2.0_f64,
            gain: 0.5,
        };
        assert_eq!(gain.next_sample(), 1.0);
    }

    #[test]
    fn test_empty_mix_is_silent() {
        let mut mix = Mix::new();
        assert!(mix.is_empty());
        assert_eq!(mix.next_sample(), 0.0);
    }

    #[test]
    fn test_mix_sums_sources() {
        let mut mix = Mix::new()
            .with(0.25_f64)
            .with(0.5_f64.gain(2.0))
            .with(-0.5_f64);
        assert_eq!(mix.len(), 3);
        assert_eq!(mix.next_sample(), 0.75);
    }

    #[test]
    fn test_mix_process_fills_buffer() {
        let mut mix = Mix::new().with(1.0_f64).with(1.0_f64);
        let mut buffer = vec![0.0; 8];
        mix.process(&mut buffer);
        assert!(buffer.iter().all(|&s| s == 2.0));
    }
}
