//! Waveform synthesis.
//!
//! A raw signal is a Gaussian noise floor with a handful of sine partials
//! superposed on it:
//! - `GaussianNoise` supplies the broadband texture
//! - `SineOscillator` partials, scaled and summed through a `Mix`, supply the
//!   tonal character of each sound class
//! - `SynthesisProfile` / `SoundClass` hold the declarative parameters
//!
//! The result is deliberately unbounded; clipping belongs to
//! [`normalize`](crate::normalize).

mod noise;
mod oscillator;
pub mod profile;

pub use noise::GaussianNoise;
pub use oscillator::SineOscillator;
pub use profile::{BUILTIN_CLASSES, CAR, Harmonic, RAIN, SoundClass, SynthesisProfile};

use crate::{Error, Result, Signal};
use rand::Rng;

/// Largest clip a mono 16-bit WAV can hold: the RIFF size field is a `u32`
/// and covers 36 header bytes plus two bytes per sample.
pub const MAX_SAMPLES: usize = ((u32::MAX - 36) / 2) as usize;

/// Number of samples for a clip: `round(duration × sample_rate)`.
///
/// # Errors
///
/// `InvalidParameter` if the duration is not a positive finite number, the
/// sample rate is zero, or the product rounds to zero samples or to more than
/// [`MAX_SAMPLES`].
pub fn sample_count(duration: f64, sample_rate: u32) -> Result<usize> {
    if !duration.is_finite() || duration <= 0.0 {
        return Err(Error::InvalidParameter(format!(
            "duration must be a positive number of seconds, got {duration}"
        )));
    }
    if sample_rate == 0 {
        return Err(Error::InvalidParameter(
            "sample rate must be greater than zero".to_string(),
        ));
    }
    let count = (duration * sample_rate as f64).round();
    if count < 1.0 {
        return Err(Error::InvalidParameter(format!(
            "{duration}s at {sample_rate} Hz rounds to zero samples"
        )));
    }
    if count > MAX_SAMPLES as f64 {
        return Err(Error::InvalidParameter(format!(
            "{duration}s at {sample_rate} Hz is {count} samples, more than a WAV file \
             can hold ({MAX_SAMPLES})"
        )));
    }
    Ok(count as usize)
}

/// Synthesizes the raw signal for `profile`.
///
/// The noise track is drawn from `rng`, so a seeded generator gives a
/// bit-identical signal; the thread RNG gives a different one on every run.
/// Sample values are not bounded.
///
/// # Examples
///
/// ```
/// use foley::{RAIN, synthesize};
/// use rand::SeedableRng;
///
/// let mut rng = rand::rngs::StdRng::seed_from_u64(3);
/// let signal = synthesize(0.5, 8000, &RAIN.profile(), &mut rng).unwrap();
/// assert_eq!(signal.len(), 4000);
/// ```
pub fn synthesize<R: Rng + ?Sized>(
    duration: f64,
    sample_rate: u32,
    profile: &SynthesisProfile,
    rng: &mut R,
) -> Result<Vec<f64>> {
    let len = sample_count(duration, sample_rate)?;
    tracing::debug!(
        samples = len,
        sample_rate,
        harmonics = profile.harmonics().len(),
        "synthesizing signal"
    );

    let mut signal = vec![0.0; len];
    GaussianNoise::with_rng(profile.noise_std_dev(), &mut *rng)?.process(&mut signal);

    let mut tones = profile.harmonic_mix(sample_rate);
    for sample in signal.iter_mut() {
        *sample += tones.next_sample();
    }

    Ok(signal)
}
