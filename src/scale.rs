//! Scale functions mapping data values to pixel positions.
//!
//! Continuous axes use [`LinearScale`]; categorical axes use [`BandScale`].

use crate::error::{Error, Result};

/// Trait for scale functions that map domain values to range values.
pub trait Scale<D, R> {
    /// Transform a domain value to a range value.
    fn scale(&self, value: D) -> R;

    /// Get the range extent.
    fn range(&self) -> (R, R);
}

/// Linear scale for continuous-to-continuous mapping.
#[derive(Debug, Clone, Copy)]
pub struct LinearScale {
    domain_min: f32,
    domain_max: f32,
    range_min: f32,
    range_max: f32,
}

impl LinearScale {
    /// Create a new linear scale.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ScaleDomain`] if the domain is empty or not finite.
    pub fn new(domain: (f32, f32), range: (f32, f32)) -> Result<Self> {
        let span = domain.1 - domain.0;
        if !span.is_finite() || span.abs() < f32::EPSILON {
            return Err(Error::ScaleDomain(format!(
                "domain ({}, {}) has no usable width",
                domain.0, domain.1
            )));
        }

        Ok(Self {
            domain_min: domain.0,
            domain_max: domain.1,
            range_min: range.0,
            range_max: range.1,
        })
    }

    /// Scale covering the extent of `data`, padded by `pad` (fraction of span).
    ///
    /// A single distinct value gets a unit-wide domain around it so points
    /// still land in the middle of the plot. Returns `None` for empty input.
    #[must_use]
    pub fn from_data(data: &[f32], range: (f32, f32), pad: f32) -> Option<Self> {
        let (min, max) = extent(data)?;
        let span = max - min;
        let (lo, hi) = if span.abs() < f32::EPSILON {
            (min - 0.5, max + 0.5)
        } else {
            (min - span * pad, max + span * pad)
        };
        Self::new((lo, hi), range).ok()
    }

    /// Domain extent.
    #[must_use]
    pub fn domain(&self) -> (f32, f32) {
        (self.domain_min, self.domain_max)
    }
}

impl Scale<f32, f32> for LinearScale {
    fn scale(&self, value: f32) -> f32 {
        let t = (value - self.domain_min) / (self.domain_max - self.domain_min);
        self.range_min + t * (self.range_max - self.range_min)
    }

    fn range(&self) -> (f32, f32) {
        (self.range_min, self.range_max)
    }
}

/// Evenly spaced bands for categorical positions.
#[derive(Debug, Clone, Copy)]
pub struct BandScale {
    count: usize,
    range_min: f32,
    range_max: f32,
}

impl BandScale {
    /// Create a band scale with `count` bands across `range`.
    #[must_use]
    pub fn new(count: usize, range: (f32, f32)) -> Self {
        Self {
            count: count.max(1),
            range_min: range.0,
            range_max: range.1,
        }
    }

    /// Width of one band.
    #[must_use]
    pub fn bandwidth(&self) -> f32 {
        (self.range_max - self.range_min) / self.count as f32
    }

    /// Left edge of band `index`.
    #[must_use]
    pub fn start(&self, index: usize) -> f32 {
        self.range_min + index as f32 * self.bandwidth()
    }
}

impl Scale<usize, f32> for BandScale {
    /// Center of band `value`.
    fn scale(&self, value: usize) -> f32 {
        self.start(value) + self.bandwidth() / 2.0
    }

    fn range(&self) -> (f32, f32) {
        (self.range_min, self.range_max)
    }
}

/// Finite (min, max) of `data`, `None` if there are no finite values.
#[must_use]
pub fn extent(data: &[f32]) -> Option<(f32, f32)> {
    data.iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}
