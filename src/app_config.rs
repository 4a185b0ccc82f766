//! Application configuration: loading, validating and merging settings
//! from a JSON file and the command line.

use anyhow::{Context, Result};
use serde::{de, Deserialize, Deserializer, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::errors::ConfigError;
use crate::file_utils::FilePattern;
use crate::icu::ErrorKind;

/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Glob that catalog file names must match
    #[serde(default = "default_pattern")]
    pub pattern: String,

    /// ICU error kinds that are never reported
    #[serde(default, deserialize_with = "deserialize_error_kinds")]
    pub ignore: Vec<ErrorKind>,

    /// Skip entries flagged fuzzy
    #[serde(default)]
    pub skip_fuzzy: bool,

    /// Report format
    #[serde(default)]
    pub output_format: OutputFormat,

    /// When to use ANSI colors
    #[serde(default)]
    pub color: ColorChoice,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// How findings are printed
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    // @format: Human readable, optionally colored
    #[default]
    Text,
    // @format: One JSON document on stdout
    Json,
}

/// Color policy for text output
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    // @color: Only when stdout is a terminal and NO_COLOR is unset
    #[default]
    Auto,
    Always,
    Never,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_pattern() -> String {
    "*.po".to_string()
}

// Same spellings as the command line: MISSING_OTHER_CLAUSE, missing-other-clause, ...
fn deserialize_error_kinds<'de, D>(deserializer: D) -> Result<Vec<ErrorKind>, D::Error>
where
    D: Deserializer<'de>,
{
    Vec::<String>::deserialize(deserializer)?
        .iter()
        .map(|name| {
            name.parse::<ErrorKind>()
                .map_err(|e| <D::Error as de::Error>::custom(ConfigError::from(e)))
        })
        .collect()
}

/// Values given on the command line; `None` keeps the file or default value
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub pattern: Option<String>,
    /// Added to the ignore list of the file
    pub ignore: Vec<ErrorKind>,
    /// Only ever switches fuzzy skipping on
    pub skip_fuzzy: bool,
    pub output_format: Option<OutputFormat>,
    pub color: Option<ColorChoice>,
    pub log_level: Option<LogLevel>,
}

impl Config {
    /// Load a configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {:?}", path))?;

        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }

    /// Build the effective configuration from an optional file and overrides
    pub fn resolve(config_path: Option<&Path>, overrides: ConfigOverrides) -> Result<Self> {
        let mut config = match config_path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };

        config.apply_overrides(overrides);
        config.validate().context("Configuration validation failed")?;
        Ok(config)
    }

    /// Apply command line values on top of this configuration
    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(pattern) = overrides.pattern {
            self.pattern = pattern;
        }

        self.add_ignored(overrides.ignore);

        if overrides.skip_fuzzy {
            self.skip_fuzzy = true;
        }

        if let Some(format) = overrides.output_format {
            self.output_format = format;
        }

        if let Some(color) = overrides.color {
            self.color = color;
        }

        if let Some(log_level) = overrides.log_level {
            self.log_level = log_level;
        }
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<(), ConfigError> {
        FilePattern::new(&self.pattern)?;
        Ok(())
    }

    /// Add ignore-list entries, keeping the list free of duplicates
    pub fn add_ignored<I: IntoIterator<Item = ErrorKind>>(&mut self, kinds: I) {
        for kind in kinds {
            if !self.ignore.contains(&kind) {
                self.ignore.push(kind);
            }
        }
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            pattern: default_pattern(),
            ignore: Vec::new(),
            skip_fuzzy: false,
            output_format: OutputFormat::default(),
            color: ColorChoice::default(),
            log_level: LogLevel::default(),
        }
    }
}
