// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::errors::{self, ValidationError};
use crate::ledger::HistoryOrder;
use crate::models::{VestEvent, require_fraction};
use crate::valuation::{DEFAULT_STEPS, default_band_width};

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Vestplan", "vestplan"));

/// Overrides the data directory (fixture and settings).
pub const HOME_ENV: &str = "VESTPLAN_HOME";
/// Overrides the vest fixture path.
pub const DATA_ENV: &str = "VESTPLAN_DATA";

pub const FIXTURE_FILE: &str = "vest-event.json";
pub const SETTINGS_FILE: &str = "settings.json";

pub const SAMPLE_FIXTURE: &str = include_str!("../fixtures/vest-event.json");

pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os(HOME_ENV) {
        Some(home) => PathBuf::from(home),
        None => {
            let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
                .context("Could not determine platform-specific data dir")?;
            proj.data_dir().to_path_buf()
        }
    };
    fs::create_dir_all(&dir).context("Failed to create data dir")?;
    Ok(dir)
}

/// `--file` wins over `VESTPLAN_DATA`, which wins over the data dir default.
pub fn fixture_path(explicit: Option<&str>) -> Result<PathBuf> {
    if let Some(p) = explicit.map(str::trim).filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(p));
    }
    if let Some(p) = std::env::var_os(DATA_ENV) {
        return Ok(PathBuf::from(p));
    }
    Ok(data_dir()?.join(FIXTURE_FILE))
}

pub fn settings_path() -> Result<PathBuf> {
    Ok(data_dir()?.join(SETTINGS_FILE))
}

pub fn parse_vest_event(raw: &str) -> errors::Result<VestEvent> {
    Ok(serde_json::from_str(raw)?)
}

pub fn read_vest_event(path: &Path) -> errors::Result<VestEvent> {
    let raw = fs::read_to_string(path)?;
    let vest = parse_vest_event(&raw)?;
    debug!(
        path = %path.display(),
        ticker = vest.ticker(),
        lots = vest.vest_history().len(),
        "loaded vest event"
    );
    Ok(vest)
}

pub fn load_vest_event(path: &Path) -> Result<VestEvent> {
    read_vest_event(path).with_context(|| {
        format!(
            "Load vest data from {} (run `vestplan init` to create a sample)",
            path.display()
        )
    })
}

/// Writes the bundled sample fixture unless a file already exists.
/// Returns whether anything was written.
pub fn init_fixture(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Create directory {}", parent.display()))?;
    }
    fs::write(path, SAMPLE_FIXTURE).with_context(|| format!("Write {}", path.display()))?;
    Ok(true)
}

/// Projection and display defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub band_width: Decimal,
    pub steps: u32,
    pub history_order: HistoryOrder,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            band_width: default_band_width(),
            steps: DEFAULT_STEPS,
            history_order: HistoryOrder::default(),
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_fraction("bandWidth", self.band_width)?;
        if self.steps == 0 {
            return Err(ValidationError::invalid("steps", "must be at least 1"));
        }
        Ok(())
    }
}

/// Missing file means defaults.
pub fn load_settings(path: &Path) -> Result<Settings> {
    if !path.exists() {
        return Ok(Settings::default());
    }
    let raw = fs::read_to_string(path).with_context(|| format!("Read {}", path.display()))?;
    let settings: Settings = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid settings in {}", path.display()))?;
    settings
        .validate()
        .with_context(|| format!("Invalid settings in {}", path.display()))?;
    Ok(settings)
}

pub fn save_settings(path: &Path, settings: &Settings) -> Result<()> {
    settings.validate()?;
    fs::write(path, serde_json::to_string_pretty(settings)?)
        .with_context(|| format!("Write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_fixture_is_valid() {
        let vest = parse_vest_event(SAMPLE_FIXTURE).unwrap();
        assert_eq!(vest.ticker(), "MNV");
        assert_eq!(vest.shares_vesting(), 3430);
        assert_eq!(vest.vest_history().len(), 3);
        assert!(vest.advisor_recommendation().is_some());
    }

    #[test]
    fn explicit_fixture_path_is_trimmed() {
        let p = fixture_path(Some("  /tmp/vest.json  ")).unwrap();
        assert_eq!(p, PathBuf::from("/tmp/vest.json"));
    }

    #[test]
    fn settings_default_and_reject_bad_values() {
        let s = Settings::default();
        assert_eq!(s.steps, 10);
        assert_eq!(s.band_width, Decimal::new(10, 2));
        assert!(s.validate().is_ok());

        let bad = Settings {
            steps: 0,
            ..Settings::default()
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn partial_settings_fill_defaults() {
        let s: Settings = serde_json::from_str(r#"{"steps": 4}"#).unwrap();
        assert_eq!(s.steps, 4);
        assert_eq!(s.history_order, HistoryOrder::Newest);
        assert_eq!(s.band_width, default_band_width());
    }
}
