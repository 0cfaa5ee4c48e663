//! Normalization and 16-bit PCM quantization.

/// Full-scale value used for quantization. `-1.0` maps to `-32767`, so
/// `i16::MIN` is only ever reached by saturation.
pub const PCM_FULL_SCALE: f64 = i16::MAX as f64;

/// Applies `gain` and clamps every sample into `[-1.0, 1.0]`.
///
/// Loud transients are flattened rather than the whole signal being
/// attenuated. NaN samples become silence so the output range holds for any
/// input.
///
/// # Examples
///
/// ```
/// use foley::normalize;
///
/// let out = normalize(vec![0.5, 3.0, -4.0], 0.5);
/// assert_eq!(out, vec![0.25, 1.0, -1.0]);
/// ```
pub fn normalize(mut signal: Vec<f64>, gain: f64) -> Vec<f64> {
    for sample in signal.iter_mut() {
        let scaled = *sample * gain;
        *sample = if scaled.is_nan() {
            0.0
        } else {
            scaled.clamp(-1.0, 1.0)
        };
    }
    signal
}

/// Converts one sample to 16-bit PCM: `round(s × 32767)`, saturating at the
/// `i16` bounds.
#[inline]
pub fn quantize_sample(sample: f64) -> i16 {
    // `as` saturates out-of-range floats and maps NaN to 0
    (sample * PCM_FULL_SCALE).round() as i16
}

/// Converts a normalized signal into a PCM buffer.
pub fn quantize(signal: &[f64]) -> Vec<i16> {
    signal.iter().map(|&s| quantize_sample(s)).collect()
}
