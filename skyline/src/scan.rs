//! Directional sampling of rectangular map regions.

use crate::{math::steps, quantizer::Rank, SkylineError};
use geo::geometry::Coord;

/// Axis walked by the outer loop of a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOrder {
    /// Rows follow `y`, columns follow `x`. Used for north/south views.
    VerticalMajor,

    /// Rows follow `x`, columns follow `y`. Used for east/west views.
    HorizontalMajor,
}

/// A rectangular region between two corners, both inclusive.
///
/// Each axis is walked from `from` toward `to`, so the corner order
/// decides which samples land in row `0` and column `0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub from: Coord<i64>,
    pub to: Coord<i64>,
}

impl Region {
    pub fn new(from: Coord<i64>, to: Coord<i64>) -> Self {
        Self { from, to }
    }
}

/// A rectangular grid of ranks, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AreaGrid {
    rows: usize,
    cols: usize,
    ranks: Vec<Rank>,
}

impl AreaGrid {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Rank> {
        if row < self.rows && col < self.cols {
            Some(self.ranks[row * self.cols + col])
        } else {
            None
        }
    }

    pub fn row(&self, row: usize) -> Option<&[Rank]> {
        let start = row.checked_mul(self.cols)?;
        (row < self.rows).then(|| &self.ranks[start..start + self.cols])
    }

    /// Returns an iterator over rows, nearest first.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[Rank]> + '_ {
        (0..self.rows).map(|row| &self.ranks[row * self.cols..(row + 1) * self.cols])
    }
}

impl TryFrom<Vec<Vec<Rank>>> for AreaGrid {
    type Error = SkylineError;

    fn try_from(nested: Vec<Vec<Rank>>) -> Result<Self, SkylineError> {
        let rows = nested.len();
        let cols = nested.first().map_or(0, Vec::len);
        let mut ranks = Vec::with_capacity(rows * cols);
        for (row, ranks_in_row) in nested.into_iter().enumerate() {
            if ranks_in_row.len() != cols {
                return Err(SkylineError::RaggedGrid {
                    row,
                    expected: cols,
                    actual: ranks_in_row.len(),
                });
            }
            ranks.extend(ranks_in_row);
        }
        Ok(Self { rows, cols, ranks })
    }
}

impl From<&AreaGrid> for Vec<Vec<Rank>> {
    fn from(grid: &AreaGrid) -> Self {
        grid.iter_rows().map(<[Rank]>::to_vec).collect()
    }
}

/// Walks `region` in `order`, calling `sample` once per cell.
///
/// Fails with [`SkylineError::DegenerateRegion`] when a side of the
/// region can't be walked, otherwise with the first error `sample`
/// returns.
pub(crate) fn scan<F>(
    order: ScanOrder,
    region: Region,
    mut sample: F,
) -> Result<AreaGrid, SkylineError>
where
    F: FnMut(Coord<i64>) -> Result<Rank, SkylineError>,
{
    let Region { from, to } = region;
    let degenerate = || SkylineError::DegenerateRegion { from, to };

    let ((outer_from, outer_to), (inner_from, inner_to)) = match order {
        ScanOrder::VerticalMajor => ((from.y, to.y), (from.x, to.x)),
        ScanOrder::HorizontalMajor => ((from.x, to.x), (from.y, to.y)),
    };
    let outer = steps(outer_from, outer_to).ok_or_else(degenerate)?;
    let inner = steps(inner_from, inner_to).ok_or_else(degenerate)?;
    let (rows, cols) = (outer.len(), inner.len());
    rows.checked_mul(cols).ok_or_else(degenerate)?;

    let inner: Vec<i64> = inner.collect();
    let mut ranks = Vec::new();
    for o in outer {
        for &i in &inner {
            let at = match order {
                ScanOrder::VerticalMajor => Coord { x: i, y: o },
                ScanOrder::HorizontalMajor => Coord { x: o, y: i },
            };
            ranks.push(sample(at)?);
        }
    }

    Ok(AreaGrid { rows, cols, ranks })
}
