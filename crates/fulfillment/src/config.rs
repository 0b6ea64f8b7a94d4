use crate::error::{FulfillmentError, Result};
use serde::Deserialize;
use std::path::Path;

pub const CONFIG_SCHEMA_VERSION: u32 = 1;
pub const DEFAULT_SAMPLE_LIMIT: usize = 15;
pub const SAMPLE_LIMIT_ENV: &str = "NL_FULFILLMENT_SAMPLE_LIMIT";

/// Tunables for correlation fulfillment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FulfillmentConfig {
    /// Upper bound on child places sent to one existence check
    pub sample_limit: usize,

    /// How many history turns context lookups may walk (`None` = all)
    pub max_history_turns: Option<usize>,

    /// Reject charts that repeat an already registered visualization
    pub dedupe_charts: bool,
}

impl Default for FulfillmentConfig {
    fn default() -> Self {
        Self {
            sample_limit: DEFAULT_SAMPLE_LIMIT,
            max_history_turns: None,
            dedupe_charts: true,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    schema_version: Option<u32>,
    sample_limit: Option<usize>,
    max_history_turns: Option<usize>,
    dedupe_charts: Option<bool>,
}

impl FulfillmentConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let raw: RawConfig = toml::from_str(raw)?;
        Self::from_raw(raw)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    /// Applies `NL_FULFILLMENT_SAMPLE_LIMIT` on top of this config.
    pub fn with_env_overrides(self) -> Result<Self> {
        match std::env::var(SAMPLE_LIMIT_ENV) {
            Ok(value) => self.with_sample_limit_str(&value),
            Err(_) => Ok(self),
        }
    }

    fn with_sample_limit_str(mut self, value: &str) -> Result<Self> {
        let parsed = value.trim().parse::<usize>().map_err(|e| {
            FulfillmentError::InvalidConfig(format!("{SAMPLE_LIMIT_ENV}={value:?}: {e}"))
        })?;
        self.sample_limit = parsed;
        self.validate()?;
        Ok(self)
    }

    fn from_raw(raw: RawConfig) -> Result<Self> {
        if let Some(schema_version) = raw.schema_version {
            if schema_version != CONFIG_SCHEMA_VERSION {
                return Err(FulfillmentError::InvalidConfig(format!(
                    "schema_version {schema_version} is not supported (expected {CONFIG_SCHEMA_VERSION})"
                )));
            }
        }

        let defaults = Self::default();
        let cfg = Self {
            sample_limit: raw.sample_limit.unwrap_or(defaults.sample_limit),
            max_history_turns: raw.max_history_turns.or(defaults.max_history_turns),
            dedupe_charts: raw.dedupe_charts.unwrap_or(defaults.dedupe_charts),
        };
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.sample_limit == 0 {
            return Err(FulfillmentError::InvalidConfig(
                "sample_limit must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
