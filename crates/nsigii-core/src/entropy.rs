//! Shannon-style entropy estimators over random byte samples.
//!
//! Two estimators are available:
//! - `Normalized`: one byte per symbol, each read as a probability
//!   `p = byte / 255`, summing `-p * log2(p)`.
//! - `Histogram`: a fixed block of [`HISTOGRAM_SAMPLES`] bytes binned into a
//!   256-slot frequency table, summing `-p * log2(p)` over non-empty bins.

use crate::error::Result;
use crate::noise::NoiseSource;
use serde::{Deserialize, Serialize};

/// Block size drawn by the histogram estimator.
pub const HISTOGRAM_SAMPLES: usize = 64;

/// Which estimator to use when measuring entropy for an indeterminate symbol.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Estimator {
    #[default]
    Normalized,
    Histogram,
}

impl Estimator {
    /// Draw fresh noise and measure it. `symbol_count` sizes the normalized
    /// sample; the histogram estimator always draws a fixed block.
    pub fn measure<N: NoiseSource + ?Sized>(&self, symbol_count: usize, source: &mut N) -> Result<f64> {
        match self {
            Estimator::Normalized => {
                let mut samples = vec![0u8; symbol_count];
                source.fill(&mut samples)?;
                Ok(normalized_entropy(&samples))
            }
            Estimator::Histogram => histogram_entropy(source, HISTOGRAM_SAMPLES),
        }
    }
}

impl std::fmt::Display for Estimator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Estimator::Normalized => write!(f, "normalized"),
            Estimator::Histogram => write!(f, "histogram"),
        }
    }
}

/// Sum of `-p * log2(p)` with `p = byte / 255`. Zero bytes contribute nothing.
pub fn normalized_entropy(samples: &[u8]) -> f64 {
    samples
        .iter()
        .map(|&byte| f64::from(byte) / 255.0)
        .filter(|&p| p > 0.0)
        .map(|p| -p * p.log2())
        .fold(0.0, |acc, h| acc + h)
}

/// Draw `samples` bytes from `source` and return the Shannon entropy of their
/// byte histogram, in bits. Bounded by `log2(min(samples, 256))`.
pub fn histogram_entropy<N: NoiseSource + ?Sized>(source: &mut N, samples: usize) -> Result<f64> {
    let mut buffer = vec![0u8; samples];
    source.fill(&mut buffer)?;
    Ok(histogram_entropy_of(&buffer))
}

/// Shannon entropy of the byte histogram of `bytes`.
pub fn histogram_entropy_of(bytes: &[u8]) -> f64 {
    if bytes.is_empty() {
        return 0.0;
    }
    let mut freq = [0usize; 256];
    for &b in bytes {
        freq[b as usize] += 1;
    }
    let total = bytes.len() as f64;
    freq.iter()
        .filter(|&&count| count > 0)
        .map(|&count| {
            let p = count as f64 / total;
            -p * p.log2()
        })
        .fold(0.0, |acc, h| acc + h)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::ScriptedNoise;

    #[test]
    fn test_normalized_skips_zero_and_full_scale() {
        // p = 0 is skipped, p = 1 gives -1 * log2(1) = 0
        assert_eq!(normalized_entropy(&[0, 255]), 0.0);
        assert_eq!(normalized_entropy(&[]), 0.0);
    }

    #[test]
    fn test_zero_entropy_is_positive_zero() {
        assert!(normalized_entropy(&[]).is_sign_positive());
        assert!(normalized_entropy(&[0, 0, 255]).is_sign_positive());
        assert!(histogram_entropy_of(&[]).is_sign_positive());
        assert!(histogram_entropy_of(&[7u8; 64]).is_sign_positive());
        assert_eq!(format!("{:.4}", normalized_entropy(&[0, 255])), "0.0000");
    }

    #[test]
    fn test_normalized_half_scale() {
        // 0.5 is not representable exactly; 127/255 is close enough for the check
        let p = 127.0_f64 / 255.0;
        let expected = -p * p.log2();
        assert!((normalized_entropy(&[127]) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_histogram_uniform_block() {
        let bytes: Vec<u8> = (0..64).collect();
        assert!((histogram_entropy_of(&bytes) - 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_histogram_constant_block() {
        assert_eq!(histogram_entropy_of(&[7u8; 64]), 0.0);
        assert_eq!(histogram_entropy_of(&[]), 0.0);
    }

    #[test]
    fn test_histogram_two_symbols() {
        let mut noise = ScriptedNoise::new([1u8, 2].repeat(32));
        let h = histogram_entropy(&mut noise, HISTOGRAM_SAMPLES).unwrap();
        assert!((h - 1.0).abs() < 1e-12);
        assert_eq!(noise.remaining(), 0);
    }

    #[test]
    fn test_estimator_draw_sizes() {
        let mut noise = ScriptedNoise::new(vec![0u8; 100]);
        Estimator::Normalized.measure(4, &mut noise).unwrap();
        assert_eq!(noise.remaining(), 96);
        Estimator::Histogram.measure(4, &mut noise).unwrap();
        assert_eq!(noise.remaining(), 32);
    }

    #[test]
    fn test_estimator_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Estimator::Histogram).unwrap(), r#""histogram""#);
        let back: Estimator = serde_json::from_str(r#""normalized""#).unwrap();
        assert_eq!(back, Estimator::Normalized);
    }
}
