//! Gaussian noise generator implementation.

use crate::{Error, Result, Signal};
use rand::Rng;
use rand_distr::{Distribution, Normal};

/// A Gaussian white noise generator.
///
/// Each sample is drawn independently from a normal distribution with mean
/// zero and the configured standard deviation. Unlike uniform white noise the
/// output is unbounded, so anything downstream that needs a hard range has to
/// clip it. Samples are independent of each other, so the generator has no
/// notion of sample rate.
pub struct GaussianNoise<R: Rng = rand::rngs::ThreadRng> {
    std_dev: f64,
    distribution: Normal<f64>,
    rng: R,
}

impl GaussianNoise<rand::rngs::ThreadRng> {
    /// Creates a noise generator backed by the thread-local RNG.
    ///
    /// Output from this constructor is not reproducible between runs.
    ///
    /// # Examples
    ///
    /// ```
    /// use foley::{GaussianNoise, Signal};
    ///
    /// let mut noise = GaussianNoise::new(0.3).unwrap();
    /// let sample = noise.next_sample();
    /// assert!(sample.is_finite());
    /// ```
    pub fn new(std_dev: f64) -> Result<Self> {
        Self::with_rng(std_dev, rand::thread_rng())
    }
}

impl<R: Rng> GaussianNoise<R> {
    /// Creates a noise generator with a caller-supplied RNG.
    ///
    /// Pass a seeded generator to get a repeatable noise track.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if `std_dev` is negative or not finite.
    ///
    /// # Examples
    ///
    /// ```
    /// use foley::{GaussianNoise, Signal};
    /// use rand::SeedableRng;
    ///
    /// let rng = rand::rngs::StdRng::seed_from_u64(42);
    /// let mut noise = GaussianNoise::with_rng(0.2, rng).unwrap();
    /// let sample = noise.next_sample();
    /// ```
    pub fn with_rng(std_dev: f64, rng: R) -> Result<Self> {
        if !std_dev.is_finite() || std_dev < 0.0 {
            return Err(Error::InvalidParameter(format!(
                "noise standard deviation must be finite and >= 0, got {std_dev}"
            )));
        }
        let distribution = Normal::new(0.0, std_dev)
            .map_err(|e| Error::InvalidParameter(format!("noise distribution: {e}")))?;
        Ok(Self {
            std_dev,
            distribution,
            rng,
        })
    }

    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }
}

impl<R: Rng> Signal for GaussianNoise<R> {
    fn next_sample(&mut self) -> f64 {
        self.distribution.sample(&mut self.rng)
    }
}
