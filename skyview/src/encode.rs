//! Text encodings of rendered windows.

use itertools::Itertools;
use serde::Serialize;
use skyline::{Bounds, WindowMatrix};
use std::fmt;

/// Braille dot bits, indexed by `[row][col]` within a 4 x 2 cell.
const BRAILLE_DOTS: [[u32; 2]; 4] = [[0x01, 0x08], [0x02, 0x10], [0x04, 0x20], [0x40, 0x80]];

/// Unicode Braille block, blank pattern.
const BRAILLE_BLANK: u32 = 0x2800;

/// One or more windows placed side by side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Panorama {
    /// Bands, most prominent first.
    rows: Vec<Vec<bool>>,
}

impl Panorama {
    /// Joins `windows` left to right. They are expected to share a
    /// resolution; shorter windows leave their missing bands blank.
    pub fn new(windows: &[WindowMatrix]) -> Self {
        let bands = windows.iter().map(WindowMatrix::resolution).max().unwrap_or(0);
        let rows = (0..bands)
            .map(|band| {
                windows
                    .iter()
                    .flat_map(|window| match window.row(band) {
                        Some(row) => row.to_vec(),
                        None => vec![false; window.width()],
                    })
                    .collect()
            })
            .collect();
        Self { rows }
    }

    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn bits(&self) -> Vec<Vec<u8>> {
        self.rows
            .iter()
            .map(|row| row.iter().map(|&mark| u8::from(mark)).collect())
            .collect()
    }

    /// Returns one line per band, marks joined by commas.
    pub fn csv(&self) -> String {
        self.rows
            .iter()
            .map(|row| row.iter().map(|&mark| u8::from(mark)).join(","))
            .join("\n")
    }

    /// Returns the bands as a Tcl list, one braced word of `0`/`1` per
    /// band.
    pub fn tcl(&self) -> String {
        self.rows
            .iter()
            .map(|row| format!("{{{}}}", row.iter().map(|&mark| u8::from(mark)).join("")))
            .join(" ")
    }

    /// Returns the bands drawn in Braille, each glyph covering four
    /// bands by two columns.
    pub fn braille(&self) -> String {
        let width = self.width();
        (0..self.rows.len())
            .step_by(4)
            .map(|top| {
                (0..width)
                    .step_by(2)
                    .map(|left| {
                        let mut bits = 0;
                        for (dy, dots) in BRAILLE_DOTS.iter().enumerate() {
                            for (dx, dot) in dots.iter().enumerate() {
                                if self.is_marked(top + dy, left + dx) {
                                    bits |= dot;
                                }
                            }
                        }
                        char::from_u32(BRAILLE_BLANK + bits).unwrap_or(' ')
                    })
                    .collect::<String>()
            })
            .join("\n")
    }

    fn is_marked(&self, band: usize, col: usize) -> bool {
        self.rows
            .get(band)
            .and_then(|row| row.get(col))
            .copied()
            .unwrap_or(false)
    }
}

impl fmt::Display for Panorama {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (band, row) in self.rows.iter().enumerate() {
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

#[derive(Serialize)]
pub struct JsonView<'a> {
    pub bounds: &'a Bounds,
    pub resolution: usize,
    pub window: Vec<Vec<u8>>,
}
