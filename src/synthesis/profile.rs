//! Declarative synthesis profiles and the built-in sound class registry.
//!
//! A profile is plain data: a noise level, a list of sine partials and an
//! output gain. Adding a sound class means adding a table entry (or a config
//! file entry), never a new code path in the synthesizer.

use crate::{Error, Mix, Result, SignalExt, SineOscillator};
use serde::{Deserialize, Serialize};

/// One sine partial layered over the noise floor.
///
/// Deserializes from either `{ frequency = .., amplitude = .. }` or the
/// compact `[frequency, amplitude]` form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Harmonic {
    /// Frequency in Hz
    pub frequency: f64,
    /// Peak amplitude before the profile gain is applied
    pub amplitude: f64,
}

impl Harmonic {
    pub const fn new(frequency: f64, amplitude: f64) -> Self {
        Self {
            frequency,
            amplitude,
        }
    }
}

/// Parameters for one synthesized sound class.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisProfile {
    noise_std_dev: f64,
    harmonics: Vec<Harmonic>,
    gain: f64,
}

impl SynthesisProfile {
    /// Builds a validated profile.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if the noise level is negative, the gain or any
    /// harmonic value is not finite, or a harmonic frequency is negative.
    ///
    /// # Examples
    ///
    /// ```
    /// use foley::{Harmonic, SynthesisProfile};
    ///
    /// let hum = SynthesisProfile::new(0.05, vec![Harmonic::new(60.0, 0.2)], 0.8).unwrap();
    /// assert_eq!(hum.harmonics().len(), 1);
    /// ```
    pub fn new(noise_std_dev: f64, harmonics: Vec<Harmonic>, gain: f64) -> Result<Self> {
        if !noise_std_dev.is_finite() || noise_std_dev < 0.0 {
            return Err(Error::InvalidParameter(format!(
                "noise_std_dev must be finite and >= 0, got {noise_std_dev}"
            )));
        }
        if !gain.is_finite() {
            return Err(Error::InvalidParameter(format!("gain must be finite, got {gain}")));
        }
        if let Some(bad) = harmonics.iter().find(|h| {
            !h.frequency.is_finite() || h.frequency < 0.0 || !h.amplitude.is_finite()
        }) {
            return Err(Error::InvalidParameter(format!(
                "harmonic {} Hz / {} is out of range",
                bad.frequency, bad.amplitude
            )));
        }
        Ok(Self {
            noise_std_dev,
            harmonics,
            gain,
        })
    }

    pub fn noise_std_dev(&self) -> f64 {
        self.noise_std_dev
    }

    pub fn harmonics(&self) -> &[Harmonic] {
        &self.harmonics
    }

    pub fn gain(&self) -> f64 {
        self.gain
    }

    /// Builds the deterministic tonal layer: one scaled sine per harmonic.
    pub(crate) fn harmonic_mix(&self, sample_rate: u32) -> Mix {
        self.harmonics.iter().fold(Mix::new(), |mix, h| {
            mix.with(SineOscillator::new(h.frequency, sample_rate).gain(h.amplitude))
        })
    }
}

/// A named, built-in sound class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoundClass {
    pub name: &'static str,
    pub noise_std_dev: f64,
    pub harmonics: &'static [Harmonic],
    pub gain: f64,
    /// Duration in seconds used when a batch does not specify one
    pub default_duration: f64,
}

impl SoundClass {
    pub fn profile(&self) -> SynthesisProfile {
        SynthesisProfile {
            noise_std_dev: self.noise_std_dev,
            harmonics: self.harmonics.to_vec(),
            gain: self.gain,
        }
    }
}

/// Mid-range patter.
pub const RAIN: SoundClass = SoundClass {
    name: "rain",
    noise_std_dev: 0.3,
    harmonics: &[
        Harmonic::new(500.0, 0.1),
        Harmonic::new(1000.0, 0.1),
        Harmonic::new(1500.0, 0.1),
        Harmonic::new(2000.0, 0.1),
    ],
    gain: 0.5,
    default_duration: 3.0,
};

/// Low engine rumble.
pub const CAR: SoundClass = SoundClass {
    name: "car",
    noise_std_dev: 0.2,
    harmonics: &[
        Harmonic::new(200.0, 0.15),
        Harmonic::new(400.0, 0.15),
        Harmonic::new(600.0, 0.15),
    ],
    gain: 0.6,
    default_duration: 2.0,
};

/// All built-in classes, in the order the default batch renders them.
pub const BUILTIN_CLASSES: &[SoundClass] = &[RAIN, CAR];

/// Finds a built-in class by name.
pub fn lookup(name: &str) -> Option<&'static SoundClass> {
    BUILTIN_CLASSES.iter().find(|class| class.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Signal;

    #[test]
    fn test_builtin_rain() {
        let rain = lookup("rain").unwrap().profile();
        assert_eq!(rain.noise_std_dev(), 0.3);
        assert_eq!(rain.gain(), 0.5);
        let freqs: Vec<f64> = rain.harmonics().iter().map(|h| h.frequency).collect();
        assert_eq!(freqs, vec![500.0, 1000.0, 1500.0, 2000.0]);
    }

    #[test]
    fn test_builtin_car() {
        let car = lookup("car").unwrap();
        assert_eq!(car.default_duration, 2.0);
        let profile = car.profile();
        assert_eq!(profile.gain(), 0.6);
        assert!(profile.harmonics().iter().all(|h| h.amplitude == 0.15));
        assert_eq!(profile.harmonics().len(), 3);
    }

    #[test]
    fn test_lookup_unknown() {
        assert!(lookup("thunder").is_none());
    }

    #[test]
    fn test_new_rejects_bad_values() {
        assert!(SynthesisProfile::new(-1.0, vec![], 0.5).is_err());
        assert!(SynthesisProfile::new(0.1, vec![], f64::INFINITY).is_err());
        assert!(SynthesisProfile::new(0.1, vec![Harmonic::new(-5.0, 0.1)], 0.5).is_err());
        assert!(SynthesisProfile::new(0.1, vec![Harmonic::new(50.0, f64::NAN)], 0.5).is_err());
    }

    #[test]
    fn test_harmonic_mix_sums_partials() {
        // Quarter period of 11025 Hz at 44100 Hz: every partial peaks at n = 1
        let profile = SynthesisProfile::new(
            0.0,
            vec![Harmonic::new(11025.0, 0.25), Harmonic::new(11025.0, 0.5)],
            1.0,
        )
        .unwrap();
        let mut mix = profile.harmonic_mix(44100);
        assert_eq!(mix.next_sample(), 0.0);
        assert!((mix.next_sample() - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_harmonic_deserializes_from_pair() {
        #[derive(Deserialize)]
        struct Wrapper {
            harmonics: Vec<Harmonic>,
        }
        let parsed: Wrapper = toml::from_str("harmonics = [[120.0, 0.1], [240, 0.05]]").unwrap();
        assert_eq!(parsed.harmonics[1], Harmonic::new(240.0, 0.05));
    }
}
