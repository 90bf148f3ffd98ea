//! plancal configuration.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{PlanCalError, PlanCalResult};

static DEFAULT_OPERATING_YEAR_START: &str = "2025-08-01";
static DEFAULT_OPERATING_YEAR_END: &str = "2026-07-31";

const ENV_PREFIX: &str = "PLANCAL";

fn default_operating_year_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 8, 1).expect("default operating year start is a valid date")
}

fn default_operating_year_end() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 7, 31).expect("default operating year end is a valid date")
}

/// Inclusive date window that bulk imports are clipped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatingWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl OperatingWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> PlanCalResult<Self> {
        if end < start {
            return Err(PlanCalError::Config(format!(
                "operating year ends ({end}) before it starts ({start})"
            )));
        }
        Ok(OperatingWindow { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl Default for OperatingWindow {
    fn default() -> Self {
        OperatingWindow {
            start: default_operating_year_start(),
            end: default_operating_year_end(),
        }
    }
}

/// Configuration at ~/.config/plancal/config.toml
///
/// Every key can be overridden from the environment with a `PLANCAL_`
/// prefix, e.g. `PLANCAL_OPERATING_YEAR_START=2026-08-01`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PlanCalConfig {
    #[serde(default = "default_operating_year_start")]
    pub operating_year_start: NaiveDate,

    #[serde(default = "default_operating_year_end")]
    pub operating_year_end: NaiveDate,
}

impl Default for PlanCalConfig {
    fn default() -> Self {
        PlanCalConfig {
            operating_year_start: default_operating_year_start(),
            operating_year_end: default_operating_year_end(),
        }
    }
}

impl PlanCalConfig {
    pub fn config_path() -> PlanCalResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| PlanCalError::Config("Could not determine config directory".into()))?
            .join("plancal");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location, creating a commented config file on first use.
    pub fn load() -> PlanCalResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load from an explicit file, with `PLANCAL_*` variables taking
    /// precedence. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> PlanCalResult<Self> {
        Self::load_with_env(path, Environment::with_prefix(ENV_PREFIX))
    }

    fn load_with_env(path: &Path, env: Environment) -> PlanCalResult<Self> {
        let config: PlanCalConfig = Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .add_source(env)
            .build()
            .map_err(|e| PlanCalError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| PlanCalError::Config(e.to_string()))?;

        config.window()?;
        Ok(config)
    }

    /// The configured operating year as a validated window.
    pub fn window(&self) -> PlanCalResult<OperatingWindow> {
        OperatingWindow::new(self.operating_year_start, self.operating_year_end)
    }

    /// Save the current config to `path`.
    pub fn save(&self, path: &Path) -> PlanCalResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| PlanCalError::Serialization(e.to_string()))?;

        std::fs::write(path, content)
            .map_err(|e| PlanCalError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> PlanCalResult<()> {
        let contents = format!(
            "\
# plancal configuration

# Imported events outside this window are dropped unless --all is given.
# operating_year_start = \"{DEFAULT_OPERATING_YEAR_START}\"
# operating_year_end = \"{DEFAULT_OPERATING_YEAR_END}\"
"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                PlanCalError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| PlanCalError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
