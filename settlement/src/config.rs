//! Configuration for settlement engine

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Largest participant count the exact solver will accept
pub const EXACT_PARTICIPANT_CAP: usize = 12;

/// Settlement engine configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Aggregation configuration (scale and tolerance)
    pub ledger: ledger_core::Config,

    /// Netting configuration
    pub netting: NettingConfig,
}

/// Netting configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NettingConfig {
    /// Transfer-minimization strategy
    pub strategy: NettingStrategy,

    /// Above this many non-zero participants the exact solver falls back to greedy
    pub exact_max_participants: usize,
}

impl Default for NettingConfig {
    fn default() -> Self {
        Self {
            strategy: NettingStrategy::Greedy,
            exact_max_participants: 8,
        }
    }
}

/// How the optimizer pairs debtors with creditors
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NettingStrategy {
    /// Largest debtor pays largest creditor until everyone is square
    #[default]
    Greedy,
    /// Subset search for the fewest transfers, small groups only
    Exact,
}

impl FromStr for NettingStrategy {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "greedy" => Ok(NettingStrategy::Greedy),
            "exact" => Ok(NettingStrategy::Exact),
            other => Err(crate::Error::Config(format!(
                "Unknown netting strategy: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for NettingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NettingStrategy::Greedy => write!(f, "greedy"),
            NettingStrategy::Exact => write!(f, "exact"),
        }
    }
}

impl Config {
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
        let mut config = Config {
            ledger: ledger_core::Config::from_env()?,
            ..Default::default()
        };

        if let Ok(strategy) = std::env::var("SETTLEMENT_STRATEGY") {
            config.netting.strategy = strategy.parse()?;
        }

        if let Ok(limit) = std::env::var("SETTLEMENT_EXACT_MAX_PARTICIPANTS") {
            config.netting.exact_max_participants = limit.parse().map_err(|e| {
                crate::Error::Config(format!("Invalid SETTLEMENT_EXACT_MAX_PARTICIPANTS: {}", e))
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject values the engine cannot work with
    pub fn validate(&self) -> crate::Result<()> {
        self.ledger.validate()?;

        if self.netting.exact_max_participants > EXACT_PARTICIPANT_CAP {
            return Err(crate::Error::Config(format!(
                "exact_max_participants {} exceeds cap {}",
                self.netting.exact_max_participants, EXACT_PARTICIPANT_CAP
            )));
        }

        Ok(())
    }
}
