//! Render configuration: CLI values, TOML batch files and per-task snapshots

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use thiserror::Error;

use crate::calendar::Mode;
use crate::palette::{self, Palette};
use crate::provider::{self, Provider};

/// Earliest year accepted for fixed-year mode
pub const MIN_YEAR: i32 = 2000;

const MODE_YEAR: &str = "year";
const MODE_TILL_NOW: &str = "till-now";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("{0} is not a valid mode (expected year or till-now)")]
    InvalidMode(String),

    #[error("--mode year requires a year")]
    MissingYear,

    #[error("A year can only be used with --mode year")]
    YearWithoutYearMode,

    #[error("{year} is not a valid year (expected {min}..={max})")]
    YearOutOfRange { year: i32, min: i32, max: i32 },

    #[error("{0} is not a supported file type (expected png or svg)")]
    InvalidFormat(String),

    #[error("{0} is not a valid color")]
    UnknownPalette(String),

    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    #[error("No providers configured")]
    NoProviders,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Svg,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Svg => "svg",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(OutputFormat::Png),
            "svg" => Ok(OutputFormat::Svg),
            _ => Err(ConfigError::InvalidFormat(s.to_string())),
        }
    }
}

/// Fully resolved settings for one render; never mutated after construction
#[derive(Clone, Debug, PartialEq)]
pub struct RenderConfig {
    pub mode: Mode,
    pub palette: Option<&'static Palette>,
    pub format: OutputFormat,
    pub output_dir: PathBuf,
    pub data_dir: PathBuf,
    pub today: NaiveDate,
    pub quiet: bool,
    pub debug: bool,
}

impl RenderConfig {
    pub fn output_path(&self, provider: &Provider) -> PathBuf {
        self.output_dir
            .join(format!("{}.{}", provider.id, self.format.extension()))
    }

    /// A new snapshot with `overrides` applied on top of this one
    pub fn with_overrides(&self, overrides: &Overrides) -> Result<RenderConfig, ConfigError> {
        let mode = if overrides.mode.is_some() || overrides.year.is_some() {
            let name = overrides
                .mode
                .as_deref()
                .unwrap_or_else(|| mode_name(self.mode));
            let inherited_year = if name == MODE_YEAR {
                self.mode.year()
            } else {
                None
            };
            resolve_mode(name, overrides.year.or(inherited_year), self.today)?
        } else {
            self.mode
        };

        let palette = match overrides.color.as_deref() {
            Some(name) => Some(lookup_palette(name)?),
            None => self.palette,
        };

        let format = match overrides.format.as_deref() {
            Some(name) => name.parse()?,
            None => self.format,
        };

        Ok(RenderConfig {
            mode,
            palette,
            format,
            ..self.clone()
        })
    }
}

pub fn mode_name(mode: Mode) -> &'static str {
    match mode {
        Mode::FixedYear(_) => MODE_YEAR,
        Mode::TillNow => MODE_TILL_NOW,
    }
}

/// Combine a mode name and optional year into a validated mode
pub fn resolve_mode(name: &str, year: Option<i32>, today: NaiveDate) -> Result<Mode, ConfigError> {
    match (name, year) {
        (MODE_YEAR, Some(year)) => Ok(Mode::FixedYear(validate_year(year, today)?)),
        (MODE_YEAR, None) => Err(ConfigError::MissingYear),
        (MODE_TILL_NOW | "till_now", None) => Ok(Mode::TillNow),
        (MODE_TILL_NOW | "till_now", Some(_)) => Err(ConfigError::YearWithoutYearMode),
        (other, _) => Err(ConfigError::InvalidMode(other.to_string())),
    }
}

pub fn validate_year(year: i32, today: NaiveDate) -> Result<i32, ConfigError> {
    let max = today.year();
    if (MIN_YEAR..=max).contains(&year) {
        Ok(year)
    } else {
        Err(ConfigError::YearOutOfRange {
            year,
            min: MIN_YEAR,
            max,
        })
    }
}

pub fn lookup_palette(name: &str) -> Result<&'static Palette, ConfigError> {
    palette::palette_by_name(name).ok_or_else(|| ConfigError::UnknownPalette(name.to_string()))
}

/// Per-provider overrides of the global settings
#[derive(Deserialize, Default, Clone, Debug, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Overrides {
    pub mode: Option<String>,
    pub year: Option<i32>,
    pub color: Option<String>,
    pub format: Option<String>,
}

#[derive(Deserialize, Default, Debug)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ProviderSection {
    pub input: Option<PathBuf>,
    #[serde(default)]
    pub global: Overrides,
}

/// TOML batch file listing providers to render
#[derive(Deserialize, Default, Debug)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct BatchFile {
    pub mode: Option<String>,
    pub year: Option<i32>,
    pub color: Option<String>,
    pub format: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
    #[serde(default)]
    pub debug: bool,
    #[serde(default)]
    pub providers: BTreeMap<String, ProviderSection>,
}

/// One provider render with its own configuration snapshot
#[derive(Clone, Debug)]
pub struct RenderTask {
    pub provider: Provider,
    pub config: RenderConfig,
    pub input: Option<PathBuf>,
}

impl BatchFile {
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&text)
    }

    /// Build every task, validating all of them before any runs.
    ///
    /// Relative paths are resolved against `base_dir`.
    pub fn tasks(&self, cli: &RenderConfig, base_dir: &Path) -> Result<Vec<RenderTask>, ConfigError> {
        if self.providers.is_empty() {
            return Err(ConfigError::NoProviders);
        }

        let globals = Overrides {
            mode: self.mode.clone(),
            year: self.year,
            color: self.color.clone(),
            format: self.format.clone(),
        };
        let resolve = |p: &Path| {
            if p.is_absolute() {
                p.to_path_buf()
            } else {
                base_dir.join(p)
            }
        };
        let base = RenderConfig {
            output_dir: self
                .output_dir
                .as_deref()
                .map(resolve)
                .unwrap_or_else(|| cli.output_dir.clone()),
            data_dir: self
                .data_dir
                .as_deref()
                .map(resolve)
                .unwrap_or_else(|| cli.data_dir.clone()),
            debug: cli.debug || self.debug,
            ..cli.with_overrides(&globals)?
        };

        self.providers
            .iter()
            .map(|(id, section)| {
                let provider = provider::find_provider(id)
                    .map_err(|_| ConfigError::UnknownProvider(id.clone()))?;
                Ok(RenderTask {
                    provider,
                    config: base.with_overrides(&section.global)?,
                    input: section.input.as_deref().map(resolve),
                })
            })
            .collect()
    }
}
