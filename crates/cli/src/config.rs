//! Run configuration loaded from TOML.
//!
//! Loaded once at startup and treated as immutable for the run. Class names
//! in severity rules are written in full; they are resolved against the
//! registry (and its abbreviations) once, in [`Config::rules`].

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use lccqa_algorithms::change::AggregateParams;
use lccqa_algorithms::severity::{RuleTable, SeverityRule};
use lccqa_core::{ClassRegistry, Period, Severity, TransitionCodes};
use lccqa_report::{Palette, Rgb};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Area of one attribute-table count unit in square meters
    #[serde(default = "default_unit_area")]
    pub unit_area: f64,
    pub folders: Folders,
    #[serde(default)]
    pub logging: LoggingConfig,
    pub classes: Vec<ClassEntry>,
    pub codes: Vec<CodeEntry>,
    /// Survey years per region
    pub regions: HashMap<String, Vec<u16>>,
    pub versions: Vec<VersionConfig>,
    pub compare: Option<CompareConfig>,
    #[serde(default)]
    pub severity: Vec<SeverityConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Folders {
    /// Output folder for review reports
    pub qaqc: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Folder for the log file; console only when absent
    pub folder: Option<PathBuf>,
    #[serde(default = "default_log_name")]
    pub name: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            folder: None,
            name: default_log_name(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClassEntry {
    pub name: String,
    pub abbrev: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CodeEntry {
    pub value: i64,
    /// `"Early to Late"`, or a bare class for stable pixels
    pub class: String,
}

/// One data edition.
#[derive(Debug, Clone, Deserialize)]
pub struct VersionConfig {
    pub name: String,
    pub data_folder: PathBuf,
    /// Attribute-table path below `data_folder`, with `{region}`, `{early}`
    /// and `{late}` placeholders
    pub file_pattern: String,
    /// Number of leading survey years this edition covers
    pub max_years: Option<usize>,
}

impl VersionConfig {
    pub fn source_path(&self, region: &str, period: Period) -> PathBuf {
        let relative = self
            .file_pattern
            .replace("{region}", region)
            .replace("{early}", &period.early.to_string())
            .replace("{late}", &period.late.to_string());
        self.data_folder.join(relative)
    }

    /// Periods this edition covers for the given survey years.
    pub fn periods(&self, years: &[u16]) -> lccqa_core::Result<Vec<Period>> {
        let n = self.max_years.unwrap_or(years.len()).min(years.len());
        Period::consecutive(&years[..n])
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompareConfig {
    pub newer: String,
    pub older: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeverityConfig {
    pub tier: Severity,
    /// Fill color as 6-digit hex
    pub color: String,
    pub transitions: Vec<[String; 2]>,
}

fn default_unit_area() -> f64 {
    AggregateParams::default().unit_area
}

fn default_log_name() -> String {
    "progress.log".to_string()
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("Invalid config {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        let config: Config = toml::from_str(text).context("Failed to parse TOML")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.versions.is_empty() {
            bail!("At least one [[versions]] entry is required");
        }
        for (i, v) in self.versions.iter().enumerate() {
            if self.versions[..i].iter().any(|o| o.name == v.name) {
                bail!("Version '{}' is defined twice", v.name);
            }
        }
        if let Some(compare) = &self.compare {
            for name in [&compare.newer, &compare.older] {
                if self.version(name).is_none() {
                    bail!("[compare] names unknown version '{}'", name);
                }
            }
            if compare.newer == compare.older {
                bail!("[compare] needs two different versions");
            }
        }
        Ok(())
    }

    pub fn version(&self, name: &str) -> Option<&VersionConfig> {
        self.versions.iter().find(|v| v.name == name)
    }

    /// Build the class registry, with abbreviations when any are configured.
    pub fn registry(&self) -> Result<ClassRegistry> {
        let registry = ClassRegistry::new(self.classes.iter().map(|c| c.name.clone()))?;
        if self.classes.iter().all(|c| c.abbrev.is_none()) {
            return Ok(registry);
        }
        let pairs = self
            .classes
            .iter()
            .filter_map(|c| c.abbrev.as_ref().map(|a| (c.name.as_str(), a.clone())));
        Ok(registry.with_abbreviations(pairs)?)
    }

    pub fn codes(&self) -> Result<TransitionCodes> {
        Ok(TransitionCodes::from_entries(
            self.codes.iter().map(|c| (c.value, c.class.as_str())),
        )?)
    }

    /// Resolve severity rules against the registry.
    pub fn rules(&self, registry: &ClassRegistry) -> Result<RuleTable> {
        let rules = self.severity.iter().map(|s| {
            SeverityRule::new(
                s.tier,
                s.transitions.iter().map(|[a, b]| (a.clone(), b.clone())),
            )
        });
        Ok(RuleTable::new(registry, rules)?)
    }

    pub fn palette(&self) -> Result<Palette> {
        let mut palette = Palette::empty();
        for s in &self.severity {
            palette = palette.with_fill(s.tier, Rgb::from_hex(&s.color)?);
        }
        Ok(palette)
    }

    pub fn aggregate_params(&self) -> AggregateParams {
        AggregateParams {
            unit_area: self.unit_area,
        }
    }
}
