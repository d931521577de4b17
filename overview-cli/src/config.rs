use anyhow::{Context, Result, bail};
use overview_finance::{BillEntry, BillSchedule, CategoryPatterns, ReportRules, TransportPatterns};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::state::default_config_path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub paths: PathsSection,
    /// Top-level pattern lists; an omitted list keeps its default
    pub rules: CategoryPatterns,
    pub transport_rules: TransportPatterns,
    /// Replaces the built-in schedule when present, even if empty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bills: Option<Vec<BillEntry>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsSection {
    pub statements: PathBuf,
    pub output: PathBuf,
}

impl Default for PathsSection {
    fn default() -> Self {
        Self {
            statements: PathBuf::from("statements/CreditCard"),
            output: PathBuf::from("overview.html"),
        }
    }
}

impl Config {
    pub fn bill_schedule(&self) -> BillSchedule {
        match &self.bills {
            Some(entries) => BillSchedule::new(entries.clone()),
            None => BillSchedule::default(),
        }
    }

    /// Compile pattern tables and pick the bill schedule.
    pub fn report_rules(&self) -> Result<ReportRules> {
        ReportRules::compile(&self.rules, &self.transport_rules, self.bill_schedule())
    }
}

pub fn parse_config(text: &str) -> Result<Config> {
    Ok(toml::from_str(text)?)
}

fn read_config(path: &Path) -> Result<Config> {
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    parse_config(&s).with_context(|| format!("parse {}", path.display()))
}

/// `explicit` must exist; otherwise `~/.overview/config.toml` is used when
/// present, else the built-in defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    if let Some(p) = explicit {
        if !p.exists() {
            bail!("config file not found: {}", p.display());
        }
        info!(path = %p.display(), "using config");
        return read_config(p);
    }

    // no HOME is not fatal, there is just no user config to find
    match default_config_path() {
        Ok(p) if p.exists() => {
            info!(path = %p.display(), "using config");
            read_config(&p)
        }
        _ => {
            debug!("no config file, using defaults");
            Ok(Config::default())
        }
    }
}
