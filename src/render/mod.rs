//! Rasterisation of the shapes figure panels are made of.
//!
//! # Algorithms
//!
//! - **Bresenham's Line**: axis frames, violin outlines, tick marks
//! - **Scanline disc**: alpha-blended scatter markers
//!
//! # References
//!
//! - Bresenham, J. E. (1965). "Algorithm for computer control of a digital plotter."

mod primitives;

pub use primitives::{draw_disc, draw_line, draw_rect, draw_rect_outline, Drawable};
