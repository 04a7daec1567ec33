//! Echo server configuration
//!
//! The physical constants behind the work formula, plus the verifier
//! tolerance. Loaded from TOML, falls back to defaults if no file exists.

use nsigii_core::{Error, Estimator, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EchoConfig {
    /// Applied force in newtons.
    pub force_newtons: f64,
    /// Displacement in meters.
    pub distance_meters: f64,
    /// Angle between force and displacement, in radians.
    pub theta_radians: f64,
    /// Multiplier applied to the summed entropy costs.
    pub entropy_scale: f64,
    /// Max work difference (joules) between a message and its echo.
    pub work_tolerance: f64,
    /// Estimator used for MAYBE symbols during sparse encoding.
    pub estimator: Estimator,
}

impl Default for EchoConfig {
    fn default() -> Self {
        Self {
            force_newtons: 1.25,
            distance_meters: 15.0,
            theta_radians: 30f64.to_radians(),
            entropy_scale: 0.1,
            work_tolerance: 0.5,
            estimator: Estimator::Normalized,
        }
    }
}

impl EchoConfig {
    /// Load config from a TOML file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&content)?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Like [`EchoConfig::load`], but any failure yields the defaults.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(Error::Io(_)) => {
                tracing::info!("No config at {}, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                tracing::warn!("Failed to parse {}: {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| Error::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Write the current config as TOML (for generating a default config file).
    pub fn to_toml(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_default()
    }

    fn validate(&self) -> Result<()> {
        let fields = [
            ("force_newtons", self.force_newtons),
            ("distance_meters", self.distance_meters),
            ("theta_radians", self.theta_radians),
            ("entropy_scale", self.entropy_scale),
            ("work_tolerance", self.work_tolerance),
        ];
        if let Some((name, _)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(Error::config(format!("{name} must be finite")));
        }
        if self.work_tolerance < 0.0 {
            return Err(Error::config("work_tolerance must not be negative"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EchoConfig::default();
        assert_eq!(config.force_newtons, 1.25);
        assert_eq!(config.distance_meters, 15.0);
        assert!((config.theta_radians.cos() - 0.866_025_403_784_438_6).abs() < 1e-12);
        assert_eq!(config.entropy_scale, 0.1);
        assert_eq!(config.work_tolerance, 0.5);
        assert_eq!(config.estimator, Estimator::Normalized);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = EchoConfig::from_toml("force_newtons = 2.0\nestimator = \"histogram\"\n").unwrap();
        assert_eq!(config.force_newtons, 2.0);
        assert_eq!(config.distance_meters, 15.0);
        assert_eq!(config.estimator, Estimator::Histogram);
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = EchoConfig {
            work_tolerance: 1.5,
            ..EchoConfig::default()
        };
        let back = EchoConfig::from_toml(&config.to_toml()).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_rejects_negative_tolerance() {
        let err = EchoConfig::from_toml("work_tolerance = -1.0").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_rejects_bad_toml() {
        assert!(matches!(EchoConfig::from_toml("force_newtons = \"heavy\""), Err(Error::Config(_))));
    }
}
