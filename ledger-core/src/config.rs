//! Configuration for the ledger

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Largest scale a `Decimal` can carry
const MAX_SCALE: u32 = 28;

/// Ledger configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Digits after the decimal point in the minor currency unit (2 = cents)
    pub currency_scale: u32,

    /// Absolute tolerance for split-sum and zero-sum checks
    pub tolerance: Decimal,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency_scale: 2,
            tolerance: Decimal::new(1, 2), // one cent
        }
    }
}

impl Config {
    /// Config whose tolerance is one minor unit at `currency_scale`
    pub fn with_scale(currency_scale: u32) -> crate::Result<Self> {
        let config = Self {
            currency_scale,
            tolerance: Decimal::new(1, currency_scale.min(MAX_SCALE)),
        };
        config.validate()?;
        Ok(config)
    }

    /// Load from file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| crate::Error::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from environment variables
    pub fn from_env() -> crate::Result<Self> {
        let mut config = Config::default();

        if let Ok(scale) = std::env::var("LEDGER_CURRENCY_SCALE") {
            config.currency_scale = scale
                .parse()
                .map_err(|e| crate::Error::Config(format!("Invalid LEDGER_CURRENCY_SCALE: {}", e)))?;
            config.tolerance = Decimal::new(1, config.currency_scale.min(MAX_SCALE));
        }

        if let Ok(tolerance) = std::env::var("LEDGER_TOLERANCE") {
            config.tolerance = Decimal::from_str(&tolerance)
                .map_err(|e| crate::Error::Config(format!("Invalid LEDGER_TOLERANCE: {}", e)))?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject values the ledger cannot work with
    pub fn validate(&self) -> crate::Result<()> {
        if self.currency_scale > MAX_SCALE {
            return Err(crate::Error::Config(format!(
                "currency_scale {} exceeds maximum {}",
                self.currency_scale,
                MAX_SCALE
            )));
        }

        if self.tolerance < Decimal::ZERO {
            return Err(crate::Error::Config(format!(
                "tolerance must not be negative, got {}",
                self.tolerance
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.currency_scale, 2);
        assert_eq!(config.tolerance, Decimal::new(1, 2));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_with_scale() {
        let config = Config::with_scale(3).unwrap();
        assert_eq!(config.tolerance, Decimal::new(1, 3));
        assert!(Config::with_scale(40).is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "currency_scale = 0").unwrap();
        writeln!(file, "tolerance = \"1\"").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.currency_scale, 0);
        assert_eq!(config.tolerance, Decimal::ONE);
    }

    #[test]
    fn test_negative_tolerance_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "tolerance = \"-0.01\"").unwrap();

        assert!(matches!(
            Config::from_file(file.path()),
            Err(crate::Error::Config(_))
        ));
    }
}
