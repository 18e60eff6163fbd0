//! Exploratory plots over a whole [`Dataset`].
//!
//! Both plotters lay their panels out on a [`GridLayout`] and pick the chart
//! for each column from its declared [`ColumnKind`]:
//!
//! | Plotter              | Numeric   | Categorical | Other        |
//! |----------------------|-----------|-------------|--------------|
//! | [`plot_distributions`] | histogram | count bar   | count bar    |
//! | [`plot_vs_target`]     | scatter   | violin      | empty slot   |
//!
//! When `show` is set the finished figure is handed to a [`FigureDisplay`]
//! before it is returned.

use tracing::{debug, info};

use crate::dataset::{ColumnKind, DataValue, Dataset};
use crate::display::{FigureDisplay, TerminalDisplay};
use crate::error::Result;
use crate::figure::Figure;
use crate::layout::{GridLayout, DEFAULT_COLUMNS_PER_ROW};
use crate::plots::{Chart, CountBar, Histogram, Panel, Scatter, Violin, DISTRIBUTION_BINS};

/// Y axis label of every distribution panel.
pub const FREQUENCY_LABEL: &str = "Frequency";

/// Rotation applied to category tick labels.
pub const CATEGORY_TICK_ROTATION: f32 = 90.0;

/// Default target column name.
pub const DEFAULT_TARGET: &str = "Target";

/// Options for [`plot_distributions`].
#[derive(Debug, Clone, PartialEq)]
pub struct PlotOptions {
    /// Panels per grid row.
    pub max_columns_per_row: usize,
    /// Display the figure before returning it.
    pub show: bool,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            max_columns_per_row: DEFAULT_COLUMNS_PER_ROW,
            show: true,
        }
    }
}

/// Options for [`plot_vs_target`].
#[derive(Debug, Clone, PartialEq)]
pub struct RelationOptions {
    /// Name of the target column.
    pub target: String,
    /// Panels per grid row.
    pub max_columns_per_row: usize,
    /// Display the figure before returning it.
    pub show: bool,
}

impl Default for RelationOptions {
    fn default() -> Self {
        Self {
            target: DEFAULT_TARGET.to_string(),
            max_columns_per_row: DEFAULT_COLUMNS_PER_ROW,
            show: true,
        }
    }
}

impl RelationOptions {
    /// Default options with a different target column.
    #[must_use]
    pub fn with_target(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            ..Self::default()
        }
    }
}

/// Plot the distribution of every column, showing it in the terminal if
/// `options.show` is set.
///
/// # Errors
///
/// See [`plot_distributions_with`].
pub fn plot_distributions(dataset: &Dataset, options: &PlotOptions) -> Result<Figure> {
    plot_distributions_with(dataset, options, &mut TerminalDisplay::stdout())
}

/// Plot the distribution of every column, presenting the figure through
/// `display` if `options.show` is set.
///
/// Numeric columns get a 20-bin histogram labelled with the column name;
/// everything else gets a count bar chart with vertical tick labels.
///
/// # Errors
///
/// - [`Error::DivisionByZero`](crate::Error::DivisionByZero) when
///   `max_columns_per_row` is 0
/// - [`Error::TypeInspection`](crate::Error::TypeInspection) when a numeric
///   column holds text
/// - any error from `display`
pub fn plot_distributions_with<D: FigureDisplay + ?Sized>(
    dataset: &Dataset,
    options: &PlotOptions,
    display: &mut D,
) -> Result<Figure> {
    let layout = GridLayout::plan(dataset.ncol(), options.max_columns_per_row)?;
    debug!(
        columns = dataset.ncol(),
        rows = layout.rows(),
        cols = layout.cols(),
        "planned distribution grid"
    );

    let mut figure = Figure::new(layout);
    for (i, column) in dataset.columns().iter().enumerate() {
        let slot = layout.slot(i);
        let title = format!("{} distribution", column.name());

        let panel = if column.kind() == ColumnKind::Numeric {
            let values = column.numeric_values()?;
            let hist = Histogram::from_values(&values, DISTRIBUTION_BINS);
            Panel::new(slot, title, Chart::Histogram(hist)).x_label(column.name())
        } else {
            Panel::new(slot, title, Chart::CountBar(CountBar::new(column.value_counts())))
                .x_tick_rotation(CATEGORY_TICK_ROTATION)
        };

        debug!(
            column = column.name(),
            chart = panel.chart().name(),
            row = slot.row,
            col = slot.col,
            "added panel"
        );
        figure.push_panel(panel.y_label(FREQUENCY_LABEL));
    }

    info!(panels = figure.panel_count(), "distribution figure ready");
    finish(figure, options.show, display)
}

/// Plot every column except the last against `options.target`, showing the
/// figure in the terminal if `options.show` is set.
///
/// # Errors
///
/// See [`plot_vs_target_with`].
pub fn plot_vs_target(dataset: &Dataset, options: &RelationOptions) -> Result<Figure> {
    plot_vs_target_with(dataset, options, &mut TerminalDisplay::stdout())
}

/// Plot every column except the positionally last one against the target,
/// presenting the figure through `display` if `options.show` is set.
///
/// The grid is sized for all columns, target included. Numeric columns get a
/// scatter plot with the target on the y axis, categorical columns a violin
/// of the target per category, and other columns leave their slot empty.
///
/// The target name is not validated: if no column has that name, the target
/// is treated as having no values and the panels come out empty.
///
/// # Errors
///
/// - [`Error::DivisionByZero`](crate::Error::DivisionByZero) when
///   `max_columns_per_row` is 0
/// - any error from `display`
pub fn plot_vs_target_with<D: FigureDisplay + ?Sized>(
    dataset: &Dataset,
    options: &RelationOptions,
    display: &mut D,
) -> Result<Figure> {
    let layout = GridLayout::plan(dataset.ncol(), options.max_columns_per_row)?;
    let target = options.target.as_str();
    let target_values = dataset
        .column(target)
        .map(|c| c.numbers_by_row())
        .unwrap_or_default();
    debug!(
        target_column = target,
        target_rows = target_values.len(),
        rows = layout.rows(),
        cols = layout.cols(),
        "planned relation grid"
    );

    let features = dataset.columns().split_last().map_or(&[][..], |(_, rest)| rest);

    let mut figure = Figure::new(layout);
    for (i, column) in features.iter().enumerate() {
        let slot = layout.slot(i);
        let title = format!("{target} vs. {}", column.name());

        let panel = match column.kind() {
            ColumnKind::Numeric => {
                let scatter = Scatter::from_rows(&column.numbers_by_row(), &target_values);
                Panel::new(slot, title, Chart::Scatter(scatter)).x_label(column.name())
            }
            ColumnKind::Categorical => {
                let labels: Vec<Option<String>> =
                    column.values().iter().map(DataValue::label).collect();
                let violin = Violin::from_rows(column.categories(), &labels, &target_values);
                Panel::new(slot, title, Chart::Violin(violin))
                    .x_tick_rotation(CATEGORY_TICK_ROTATION)
            }
            ColumnKind::Other => {
                debug!(column = column.name(), "skipping column of kind other");
                continue;
            }
        };

        debug!(
            column = column.name(),
            chart = panel.chart().name(),
            row = slot.row,
            col = slot.col,
            "added panel"
        );
        figure.push_panel(panel.y_label(target));
    }

    info!(panels = figure.panel_count(), target_column = target, "relation figure ready");
    finish(figure, options.show, display)
}

fn finish<D: FigureDisplay + ?Sized>(figure: Figure, show: bool, display: &mut D) -> Result<Figure> {
    if show {
        debug!("showing figure");
        display.show(&figure)?;
    }
    Ok(figure)
}
