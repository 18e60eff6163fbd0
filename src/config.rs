//! YAML configuration for plot options and logging.
//!
//! ```yaml
//! columns_per_row: 4
//! target: price
//! show: false
//! dpi: 80
//! logging:
//!   console: true
//!   file: true
//!   file_path: eda.log
//! ```
//!
//! Every key is optional.

use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::explore::{PlotOptions, RelationOptions, DEFAULT_TARGET};
use crate::figure::DEFAULT_DPI;
use crate::layout::DEFAULT_COLUMNS_PER_ROW;
use crate::logger::LoggerConfig;

/// Top-level configuration file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EdaConfig {
    /// Panels per grid row.
    #[serde(default = "default_columns_per_row")]
    pub columns_per_row: usize,

    /// Target column for relation plots.
    #[serde(default = "default_target")]
    pub target: String,

    /// Display figures after plotting.
    #[serde(default = "default_show")]
    pub show: bool,

    /// Pixels per figure unit for saved images.
    #[serde(default = "default_dpi")]
    pub dpi: f32,

    /// Logger sinks.
    #[serde(default)]
    pub logging: LoggerConfig,
}

fn default_columns_per_row() -> usize {
    DEFAULT_COLUMNS_PER_ROW
}

fn default_target() -> String {
    DEFAULT_TARGET.to_string()
}

fn default_show() -> bool {
    true
}

fn default_dpi() -> f32 {
    DEFAULT_DPI
}

impl Default for EdaConfig {
    fn default() -> Self {
        Self {
            columns_per_row: default_columns_per_row(),
            target: default_target(),
            show: default_show(),
            dpi: default_dpi(),
            logging: LoggerConfig::default(),
        }
    }
}

impl EdaConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read, or
    /// [`Error::ConfigParse`] if it is not valid configuration.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigParse`] with the offending line (0 if unknown).
    pub fn parse(yaml: &str) -> Result<Self> {
        // An empty document deserialises as unit, not as an empty mapping
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml_ng::from_str(yaml).map_err(|e| {
            let line = e.location().map_or(0, |l| l.line());
            Error::ConfigParse {
                line,
                message: e.to_string(),
            }
        })
    }

    /// Options for [`plot_distributions`](crate::explore::plot_distributions).
    #[must_use]
    pub fn plot_options(&self) -> PlotOptions {
        PlotOptions {
            max_columns_per_row: self.columns_per_row,
            show: self.show,
        }
    }

    /// Options for [`plot_vs_target`](crate::explore::plot_vs_target).
    #[must_use]
    pub fn relation_options(&self) -> RelationOptions {
        RelationOptions {
            target: self.target.clone(),
            max_columns_per_row: self.columns_per_row,
            show: self.show,
        }
    }
}
