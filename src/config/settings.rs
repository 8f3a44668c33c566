//! User settings for the policy CLI
//!
//! Defaults applied when a scenario or the command line leaves a choice open:
//! which allocation rule and strategy to use, the rebalance threshold and the
//! cost assumptions behind impact estimates.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::paths::PolicyPaths;
use crate::error::{PolicyError, PolicyResult};
use crate::file_io::write_atomic;
use crate::models::{AllocationRuleKind, CostAssumptions, RebalanceStrategyKind, RebalanceThreshold};
use crate::services::RebalanceConfig;

/// User settings, persisted as `config.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used in terminal output
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    #[serde(default)]
    pub default_rule: AllocationRuleKind,

    #[serde(default)]
    pub default_strategy: RebalanceStrategyKind,

    /// Whole percent, 1 to 15
    #[serde(default = "default_threshold")]
    pub rebalance_threshold: u8,

    #[serde(default = "default_true")]
    pub consider_taxes: bool,

    #[serde(default = "default_true")]
    pub consider_fees: bool,

    #[serde(default)]
    pub cost_assumptions: CostAssumptions,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_threshold() -> u8 {
    RebalanceThreshold::DEFAULT
}

fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            default_rule: AllocationRuleKind::default(),
            default_strategy: RebalanceStrategyKind::default(),
            rebalance_threshold: default_threshold(),
            consider_taxes: true,
            consider_fees: true,
            cost_assumptions: CostAssumptions::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_create(paths: &PolicyPaths) -> PolicyResult<Self> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            debug!(path = %settings_path.display(), "no settings file, using defaults");
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| PolicyError::Io(format!("Failed to read settings file: {}", e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| PolicyError::Config(format!("Failed to parse settings file: {}", e)))
    }

    /// Save settings to disk
    pub fn save(&self, paths: &PolicyPaths) -> PolicyResult<()> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| PolicyError::Config(format!("Failed to serialize settings: {}", e)))?;

        write_atomic(paths.settings_file(), contents.as_bytes())
    }

    /// Rebalance knobs from these settings
    ///
    /// Fails if the stored threshold is outside 1..=15.
    pub fn rebalance_config(&self) -> PolicyResult<RebalanceConfig> {
        Ok(RebalanceConfig {
            threshold: RebalanceThreshold::new(self.rebalance_threshold)?,
            consider_taxes: self.consider_taxes,
            consider_fees: self.consider_fees,
            assumptions: self.cost_assumptions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Percentage;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.default_rule, AllocationRuleKind::SeventyFifteenTen);
        assert_eq!(settings.default_strategy, RebalanceStrategyKind::Moderate);
        assert_eq!(settings.rebalance_threshold, 5);
        assert!(settings.consider_taxes);
        assert!(settings.consider_fees);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PolicyPaths::with_base_dir(temp_dir.path().to_path_buf());

        let settings = Settings::load_or_create(&paths).unwrap();
        assert_eq!(settings, Settings::default());
        assert!(!paths.is_initialized());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PolicyPaths::with_base_dir(temp_dir.path().to_path_buf());

        let settings = Settings {
            default_rule: AllocationRuleKind::FiftyThirtyTwenty,
            default_strategy: RebalanceStrategyKind::ThreeFund,
            rebalance_threshold: 8,
            consider_taxes: false,
            ..Settings::default()
        };
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PolicyPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(
            paths.settings_file(),
            r#"{ "default_rule": "50_30_20", "cost_assumptions": { "fee_rate": 0.25 } }"#,
        )
        .unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.default_rule, AllocationRuleKind::FiftyThirtyTwenty);
        assert_eq!(loaded.currency_symbol, "$");
        assert_eq!(loaded.cost_assumptions.fee_rate, Percentage::from_bps(25));
        assert_eq!(loaded.cost_assumptions.tax_rate, Percentage::from_percent(15));
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PolicyPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), "{ not json").unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, PolicyError::Config(_)));
    }

    #[test]
    fn test_rebalance_config() {
        let settings = Settings {
            rebalance_threshold: 7,
            consider_fees: false,
            ..Settings::default()
        };
        let config = settings.rebalance_config().unwrap();
        assert_eq!(config.threshold.percent(), 7);
        assert!(config.consider_taxes);
        assert!(!config.consider_fees);

        let bad = Settings {
            rebalance_threshold: 20,
            ..Settings::default()
        };
        assert!(bad.rebalance_config().unwrap_err().is_validation());
    }
}
