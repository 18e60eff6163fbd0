//! trueno-eda - distribution and feature-vs-target plots for a CSV file.
//!
//! Run: `trueno-eda distributions data.csv --output dist.png`
//!      `trueno-eda relations data.csv --target price --categorical city`

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing::info;
use trueno_eda::prelude::*;

/// Exploratory data analysis plots in the terminal or on disk
#[derive(Parser, Debug)]
#[command(name = "trueno-eda")]
#[command(author = "PAIML Team")]
#[command(version)]
#[command(about = "Exploratory data analysis plots for CSV data", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Histogram or count bar chart per column
    Distributions(CommonArgs),

    /// Every column but the last plotted against the target
    Relations {
        #[command(flatten)]
        common: CommonArgs,

        /// Target column name (overrides the config file)
        #[arg(short, long)]
        target: Option<String>,
    },
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Input CSV file with a header row
    csv: PathBuf,

    /// Panels per grid row (overrides the config file)
    #[arg(long)]
    cols: Option<usize>,

    /// Columns to treat as categorical
    #[arg(long, value_delimiter = ',')]
    categorical: Vec<String>,

    /// Save the figure (.png or .svg)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Do not print the terminal preview
    #[arg(long)]
    no_show: bool,

    /// YAML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log file path (overrides the config file)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let common = match &cli.command {
        Command::Distributions(common) | Command::Relations { common, .. } => common,
    };

    let mut config = match &common.config {
        Some(path) => EdaConfig::load(path)?,
        None => EdaConfig::default(),
    };
    if let Some(cols) = common.cols {
        config.columns_per_row = cols;
    }
    if common.no_show {
        config.show = false;
    }
    if let Some(path) = &common.log_file {
        config.logging.file_path.clone_from(path);
    }
    if let Command::Relations {
        target: Some(target),
        ..
    } = &cli.command
    {
        config.target.clone_from(target);
    }

    let logger = create_logger(&config.logging)?;
    logger.install()?;

    let mut data = Dataset::from_csv_path(&common.csv)?;
    let categorical: Vec<&str> = common.categorical.iter().map(String::as_str).collect();
    data.mark_categorical(&categorical)?;
    info!(
        path = %common.csv.display(),
        columns = data.ncol(),
        rows = data.nrow(),
        "loaded dataset"
    );

    let figure = match &cli.command {
        Command::Distributions(_) => plot_distributions(&data, &config.plot_options())?,
        Command::Relations { .. } => plot_vs_target(&data, &config.relation_options())?,
    };
    let figure = figure.with_dpi(config.dpi);

    if let Some(path) = &common.output {
        figure.save(path)?;
        info!(path = %path.display(), "saved figure");
    }

    Ok(())
}
