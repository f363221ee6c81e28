//! Engine configuration.
//!
//! Loaded from TOML; every key is optional:
//!
//! ```toml
//! boundary = "half-open"   # or "inclusive" (default)
//! missing-owner = "unknown" # or "free" (default)
//! timezone = "Europe/Berlin" # default "UTC", used for day/week windows
//! ```

use std::path::Path;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::availability::BoundaryPolicy;
use crate::error::{Result, ScheduleError};
use crate::timestamp::parse_timezone;

/// What a status query reports for an owner the store does not know.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MissingOwnerPolicy {
    #[default]
    Free,
    Unknown,
}

fn default_timezone() -> String {
    "UTC".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct EngineConfig {
    pub boundary: BoundaryPolicy,
    pub missing_owner: MissingOwnerPolicy,
    pub timezone: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            boundary: BoundaryPolicy::default(),
            missing_owner: MissingOwnerPolicy::default(),
            timezone: default_timezone(),
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(contents).map_err(|e| ScheduleError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ScheduleError::Config(format!("failed to read '{}': {}", path.display(), e))
        })?;
        Self::from_toml_str(&contents)
    }

    /// Check that `timezone` names a real IANA zone.
    pub fn validate(&self) -> Result<()> {
        self.tz().map(|_| ())
    }

    pub fn tz(&self) -> Result<Tz> {
        parse_timezone(&self.timezone)
    }
}
