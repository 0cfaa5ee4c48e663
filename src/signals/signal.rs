//! Core signal trait.
//!
//! This module provides the fundamental `Signal` trait that represents
//! any audio signal source or processor that can generate samples.

/// Common interface for all signal sources and processors.
///
/// Noise generators, oscillators and combinators all implement this trait,
/// which lets the synthesizer compose a profile out of small streaming pieces
/// and then render it into a buffer in one pass.
///
/// The trait provides two fundamental operations:
/// - Single sample generation via `next_sample()`
/// - Batch processing via `process()`
pub trait Signal {
    /// Generates the next sample from the signal.
    fn next_sample(&mut self) -> f64;

    /// Generates multiple samples into a buffer.
    ///
    /// Default implementation calls `next_sample()` for each element.
    fn process(&mut self, buffer: &mut [f64]) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample();
        }
    }
}

/// A constant value is a signal that never changes (DC offset).
///
/// # Examples
///
/// ```
/// use foley::Signal;
///
/// let mut constant = 0.5_f64;
/// let mut buffer = vec![0.0; 4];
/// constant.process(&mut buffer);
/// assert_eq!(buffer, vec![0.5, 0.5, 0.5, 0.5]);
/// ```
impl Signal for f64 {
    fn next_sample(&mut self) -> f64 {
        *self
    }

    fn process(&mut self, buffer: &mut [f64]) {
        buffer.fill(*self);
    }
}

impl<S: Signal + ?Sized> Signal for Box<S> {
    fn next_sample(&mut self) -> f64 {
        (**self).next_sample()
    }

    fn process(&mut self, buffer: &mut [f64]) {
        (**self).process(buffer)
    }
}
