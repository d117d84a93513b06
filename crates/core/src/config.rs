use serde::Deserialize;

/// Root configuration for embedding applications. Loaded from environment
/// variables with the prefix `CAMPAIGN_DQ__`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub validation: ValidationConfig,
}

/// Thresholds for the data-quality rules that are tunable per deployment.
#[derive(Debug, Clone, Deserialize)]
pub struct ValidationConfig {
    /// Single-day spend above this amount is flagged as a warning.
    #[serde(default = "default_high_spend_threshold")]
    pub high_spend_threshold: f64,
    /// Click-through rate (as a ratio) strictly above this is treated as a
    /// data-quality error.
    #[serde(default = "default_max_ctr")]
    pub max_ctr: f64,
    /// Records dated more than this many days ago are flagged as stale.
    #[serde(default = "default_stale_after_days")]
    pub stale_after_days: i64,
}

fn default_high_spend_threshold() -> f64 {
    100_000.0
}
fn default_max_ctr() -> f64 {
    0.5
}
fn default_stale_after_days() -> i64 {
    90
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            high_spend_threshold: default_high_spend_threshold(),
            max_ctr: default_max_ctr(),
            stale_after_days: default_stale_after_days(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder().add_source(
            config::Environment::with_prefix("CAMPAIGN_DQ")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ValidationConfig::default();
        assert_eq!(config.high_spend_threshold, 100_000.0);
        assert_eq!(config.max_ctr, 0.5);
        assert_eq!(config.stale_after_days, 90);
    }

    #[test]
    fn test_app_config_default_nests_validation() {
        let config = AppConfig::default();
        assert_eq!(config.validation.stale_after_days, 90);
    }
}
