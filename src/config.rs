//! Batch configuration.
//!
//! A batch is a sample rate, an output root and a list of assets. It can be
//! built in code, taken from [`BatchConfig::default`] (rain + car), or loaded
//! from a TOML file:
//!
//! ```toml
//! sample_rate = 44100
//! assets_root = "assets"
//!
//! [[asset]]
//! name = "rain"
//!
//! [[asset]]
//! name = "wind"
//! duration = 4.0
//! noise_std_dev = 0.25
//! gain = 0.5
//! harmonics = [[120.0, 0.1], [240.0, 0.05]]
//! ```

use crate::synthesis::profile::{self, BUILTIN_CLASSES, Harmonic, SoundClass, SynthesisProfile};
use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_SAMPLE_RATE: u32 = 44100;
pub const DEFAULT_ASSETS_ROOT: &str = "assets";
pub const DEFAULT_COMPRESSED_EXTENSION: &str = "mp3";

/// Environment clips land in `<assets_root>/audio/environment/`.
pub fn environment_dir(assets_root: &Path) -> PathBuf {
    assets_root.join("audio").join("environment")
}

/// One entry of the `[[asset]]` array.
///
/// Any profile field left out is taken from the built-in class of the same
/// name; a name that is not built in must provide `duration`, `noise_std_dev`
/// and `gain`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AssetEntry {
    pub name: String,
    pub duration: Option<f64>,
    pub noise_std_dev: Option<f64>,
    pub gain: Option<f64>,
    pub harmonics: Option<Vec<Harmonic>>,
}

impl AssetEntry {
    pub fn builtin(class: &SoundClass) -> Self {
        Self {
            name: class.name.to_string(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct BatchConfig {
    pub sample_rate: u32,
    pub assets_root: PathBuf,
    pub compressed_extension: String,
    #[serde(rename = "asset")]
    pub assets: Vec<AssetEntry>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            assets_root: PathBuf::from(DEFAULT_ASSETS_ROOT),
            compressed_extension: DEFAULT_COMPRESSED_EXTENSION.to_string(),
            assets: BUILTIN_CLASSES.iter().map(AssetEntry::builtin).collect(),
        }
    }
}

/// A fully resolved asset ready for synthesis.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetRequest {
    pub name: String,
    pub duration: f64,
    pub profile: SynthesisProfile,
}

impl AssetRequest {
    pub fn from_class(class: &SoundClass) -> Self {
        Self {
            name: class.name.to_string(),
            duration: class.default_duration,
            profile: class.profile(),
        }
    }
}

impl BatchConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::Config(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_toml_str(&text)
    }

    pub fn environment_dir(&self) -> PathBuf {
        environment_dir(&self.assets_root)
    }

    /// Resolves every entry against the built-in registry.
    ///
    /// Structural problems (unknown class without a profile, unsafe names,
    /// duplicate names, bad extension) are reported here, before anything is
    /// synthesized. Numeric ranges are left to the pipeline so that one bad
    /// asset does not stop the rest of the batch.
    pub fn requests(&self) -> Result<Vec<AssetRequest>> {
        if self.compressed_extension.is_empty()
            || !self
                .compressed_extension
                .chars()
                .all(|c| c.is_ascii_alphanumeric())
        {
            return Err(Error::Config(format!(
                "compressed_extension {:?} is not a plain file extension",
                self.compressed_extension
            )));
        }
        if self.compressed_extension.eq_ignore_ascii_case("wav") {
            return Err(Error::Config(
                "compressed_extension must differ from the wav intermediate".to_string(),
            ));
        }

        let mut requests: Vec<AssetRequest> = Vec::with_capacity(self.assets.len());
        for entry in &self.assets {
            validate_name(&entry.name)?;
            if requests.iter().any(|r| r.name == entry.name) {
                return Err(Error::Config(format!(
                    "asset {:?} is listed twice",
                    entry.name
                )));
            }
            requests.push(resolve(entry)?);
        }
        Ok(requests)
    }
}

fn validate_name(name: &str) -> Result<()> {
    let ok = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if ok {
        Ok(())
    } else {
        Err(Error::Config(format!(
            "asset name {name:?} must be non-empty and use only letters, digits, '_' or '-'"
        )))
    }
}

fn resolve(entry: &AssetEntry) -> Result<AssetRequest> {
    let base = profile::lookup(&entry.name);

    let missing = |field: &str| {
        Error::Config(format!(
            "asset {:?} is not a built-in class and has no {field}",
            entry.name
        ))
    };

    let duration = entry
        .duration
        .or(base.map(|c| c.default_duration))
        .ok_or_else(|| missing("duration"))?;
    let noise_std_dev = entry
        .noise_std_dev
        .or(base.map(|c| c.noise_std_dev))
        .ok_or_else(|| missing("noise_std_dev"))?;
    let gain = entry
        .gain
        .or(base.map(|c| c.gain))
        .ok_or_else(|| missing("gain"))?;
    let harmonics = entry
        .harmonics
        .clone()
        .or_else(|| base.map(|c| c.harmonics.to_vec()))
        .unwrap_or_default();

    let profile = SynthesisProfile::new(noise_std_dev, harmonics, gain)
        .map_err(|e| Error::Config(format!("asset {:?}: {e}", entry.name)))?;

    Ok(AssetRequest {
        name: entry.name.clone(),
        duration,
        profile,
    })
}
