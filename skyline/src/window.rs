//! Occlusion-aware compositing of rank grids into banded windows.

use crate::{
    quantizer::{Rank, MAX_RESOLUTION, MIN_RESOLUTION},
    scan::AreaGrid,
    SkylineError,
};
use std::fmt;

/// `resolution` rows (bands) by `width` columns of visibility marks.
///
/// Row `0` is the most prominent band.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowMatrix {
    resolution: usize,
    width: usize,
    marks: Vec<bool>,
}

impl WindowMatrix {
    fn new(resolution: usize, width: usize) -> Self {
        Self {
            resolution,
            width,
            marks: vec![false; resolution * width],
        }
    }

    /// Number of bands (rows).
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn is_marked(&self, band: usize, col: usize) -> bool {
        band < self.resolution && col < self.width && self.marks[band * self.width + col]
    }

    pub fn row(&self, band: usize) -> Option<&[bool]> {
        (band < self.resolution)
            .then(|| &self.marks[band * self.width..(band + 1) * self.width])
    }

    /// Returns an iterator over bands, most prominent first.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> + '_ {
        (0..self.resolution).map(|band| &self.marks[band * self.width..(band + 1) * self.width])
    }

    /// Returns the marks as rows of `0`/`1`.
    pub fn to_bits(&self) -> Vec<Vec<u8>> {
        self.rows()
            .map(|row| row.iter().map(|&mark| u8::from(mark)).collect())
            .collect()
    }

    fn mark(&mut self, band: usize, col: usize) {
        self.marks[band * self.width + col] = true;
    }
}

impl fmt::Display for WindowMatrix {
    /// One line of `0`/`1` per band.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (band, row) in self.rows().enumerate() {
            if band > 0 {
                writeln!(f)?;
            }
            for &mark in row {
                f.write_str(if mark { "1" } else { "0" })?;
            }
        }
        Ok(())
    }
}

/// Composites `grid` into a window of `resolution` bands.
///
/// Row `0` of the grid is the nearest to the observer and is always
/// visible. Afterwards a sample only adds a mark when it is strictly
/// more prominent (lower rank) than every nearer sample in its column;
/// anything else is hidden behind what is already there.
///
/// `resolution` is clamped to `[MIN_RESOLUTION, MAX_RESOLUTION]`, as
/// the quantizer clamps it. Fails with [`SkylineError::RankRange`] if
/// any rank lies outside `[0, resolution)`.
pub fn render(resolution: usize, grid: &AreaGrid) -> Result<WindowMatrix, SkylineError> {
    let resolution = resolution.clamp(MIN_RESOLUTION, MAX_RESOLUTION);
    let mut window = WindowMatrix::new(resolution, grid.cols());
    let mut best: Vec<Option<usize>> = vec![None; grid.cols()];

    for (row, ranks) in grid.iter_rows().enumerate() {
        for (col, (&rank, seen)) in ranks.iter().zip(best.iter_mut()).enumerate() {
            let band = band(rank, resolution).ok_or(SkylineError::RankRange {
                row,
                col,
                rank,
                resolution,
            })?;
            match *seen {
                Some(nearer) if band >= nearer => {}
                _ => {
                    window.mark(band, col);
                    *seen = Some(band);
                }
            }
        }
    }

    Ok(window)
}

fn band(rank: Rank, resolution: usize) -> Option<usize> {
    usize::try_from(rank).ok().filter(|&band| band < resolution)
}
