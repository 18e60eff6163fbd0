//! Property tests for grid planning and figure shape.
//!
//! Run: cargo test --test layout_properties

#![allow(clippy::unwrap_used)]

use proptest::prelude::*;
use trueno_eda::layout::{GridLayout, GridSlot};
use trueno_eda::prelude::*;
use trueno_eda::Error;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Rows are always floor(n / cols) + 1, even when cols divides n.
    #[test]
    fn prop_rows_floor_plus_one(n in 0usize..500, cols in 1usize..20) {
        let grid = GridLayout::plan(n, cols).unwrap();
        prop_assert_eq!(grid.rows(), n / cols + 1);
        prop_assert_eq!(grid.cols(), cols);
    }

    /// Every column gets a slot inside the grid.
    #[test]
    fn prop_capacity_exceeds_columns(n in 0usize..500, cols in 1usize..20) {
        let grid = GridLayout::plan(n, cols).unwrap();
        prop_assert!(grid.capacity() > n);
        for i in 0..n {
            let slot = grid.slot(i);
            prop_assert!(slot.row < grid.rows());
            prop_assert!(slot.col < grid.cols());
        }
    }

    /// Slots are row-major and distinct.
    #[test]
    fn prop_slots_row_major(n in 1usize..200, cols in 1usize..20) {
        let grid = GridLayout::plan(n, cols).unwrap();
        let slots: Vec<GridSlot> = (0..n).map(|i| grid.slot(i)).collect();
        prop_assert!(slots.windows(2).all(|w| w[0] < w[1]));
    }

    /// Figure size is 20 wide and 5 per row tall.
    #[test]
    fn prop_figure_size(n in 0usize..500, cols in 1usize..20) {
        let grid = GridLayout::plan(n, cols).unwrap();
        prop_assert!((grid.width() - 20.0).abs() < f32::EPSILON);
        prop_assert!((grid.height() - 5.0 * grid.rows() as f32).abs() < 1e-3);
    }

    /// A zero column budget is always a division error.
    #[test]
    fn prop_zero_cols_errors(n in 0usize..500) {
        prop_assert!(matches!(GridLayout::plan(n, 0), Err(Error::DivisionByZero)));
    }

    /// Distribution figures draw exactly one panel per column.
    #[test]
    fn prop_one_distribution_panel_per_column(
        columns in prop::collection::vec(prop::collection::vec(-1e3f32..1e3, 1..30), 0..12),
        cols in 1usize..6,
    ) {
        let mut data = Dataset::new();
        for (i, values) in columns.iter().enumerate() {
            data.add_numeric(&format!("c{i}"), values).unwrap();
        }
        let options = PlotOptions { max_columns_per_row: cols, show: false };
        let figure = plot_distributions(&data, &options).unwrap();

        prop_assert_eq!(figure.panel_count(), columns.len());
        prop_assert_eq!(figure.layout().rows(), columns.len() / cols + 1);
        for (i, panel) in figure.panels().iter().enumerate() {
            prop_assert_eq!(panel.slot(), figure.layout().slot(i));
        }
    }
}
