//! # Trueno-EDA
//!
//! Exploratory data analysis plots for tabular data, built on the
//! [trueno](https://crates.io/crates/trueno) SIMD core.
//!
//! Given a [`Dataset`](dataset::Dataset) of typed columns, trueno-eda lays out
//! one chart per column on a shared grid and returns the resulting
//! [`Figure`](figure::Figure):
//!
//! - **Distributions**: 20-bin histograms for numeric columns, count bars for
//!   everything else
//! - **Feature vs. target**: scatter plots for numeric columns, violins for
//!   categorical ones
//! - **Logging**: console + file `tracing` sinks via [`logger::create_logger`]
//!
//! Figures render to a framebuffer, PNG, SVG or a terminal preview.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use trueno_eda::prelude::*;
//!
//! # fn main() -> trueno_eda::Result<()> {
//! let mut data = Dataset::new();
//! data.add_numeric("age", &[23.0, 35.0, 41.0, 29.0])?;
//! data.add_categorical("city", &["Oslo", "Lima", "Oslo", "Pune"])?;
//! data.add_numeric("Target", &[1.0, 0.0, 1.0, 1.0])?;
//!
//! let options = PlotOptions { show: false, ..PlotOptions::default() };
//! let figure = plot_distributions(&data, &options)?;
//! figure.save("distributions.png")?;
//!
//! let relations = plot_vs_target(&data, &RelationOptions { show: false, ..Default::default() })?;
//! relations.save("relations.svg")?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! - `cli`: the `trueno-eda` command line binary

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code
#![cfg_attr(test, allow(clippy::unwrap_used))]
// Allow common patterns in graphics/visualization code
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// RGBA colors and the category palette.
pub mod color;

/// Core framebuffer for pixel rendering.
pub mod framebuffer;

/// Geometric primitives (rectangles).
pub mod geometry;

/// Scale functions for data-to-pixel mappings.
pub mod scale;

// ============================================================================
// Data Modules
// ============================================================================

/// Typed columns, datasets and CSV loading.
pub mod dataset;

/// Subplot grid planning.
pub mod layout;

// ============================================================================
// Visualization Modules
// ============================================================================

/// Chart panels (histogram, count bar, scatter, violin).
pub mod plots;

/// Multi-panel figures.
pub mod figure;

/// Distribution and feature-vs-target plotters.
pub mod explore;

// ============================================================================
// Rendering Modules
// ============================================================================

/// Rasterization primitives.
pub mod render;

/// Output encoders (PNG, SVG, terminal).
pub mod output;

/// Figure display backends.
pub mod display;

// ============================================================================
// Configuration & Logging
// ============================================================================

/// YAML configuration.
pub mod config;

/// Console + file logger construction.
pub mod logger;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for trueno-eda operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and functions for convenient imports.
///
/// ```rust
/// use trueno_eda::prelude::*;
/// ```
pub mod prelude {
    pub use crate::color::Rgba;
    pub use crate::config::EdaConfig;
    pub use crate::dataset::{Column, ColumnKind, DataValue, Dataset};
    pub use crate::display::{FigureDisplay, TerminalDisplay};
    pub use crate::error::{Error, Result};
    pub use crate::explore::{
        plot_distributions, plot_distributions_with, plot_vs_target, plot_vs_target_with,
        PlotOptions, RelationOptions,
    };
    pub use crate::figure::Figure;
    pub use crate::layout::{GridLayout, GridSlot};
    pub use crate::logger::{create_logger, Logger, LoggerConfig};
    pub use crate::plots::{Chart, Panel};
}

// ============================================================================
// Re-exports
// ============================================================================

/// Re-export trueno for direct access to SIMD operations.
pub use trueno;
