//! Elevation-angle bands.
//!
//! The half turn `[0, π]` of possible viewing angles is split into
//! `resolution` equal bands. Bands are ranked in reverse: rank `0` holds
//! the steepest angles (closest to `π`), rank `resolution - 1` the
//! lowest (closest to `0`).

use log::trace;
use std::f64::consts::PI;

/// Index of an elevation-angle band.
///
/// Signed so that corrupted grids can be represented, and rejected, by
/// the window renderer.
pub type Rank = i32;

pub const MIN_RESOLUTION: usize = 3;
pub const MAX_RESOLUTION: usize = 10_000;

#[derive(Debug, Clone, PartialEq)]
pub struct Quantizer {
    /// Number of bands.
    resolution: usize,

    /// `resolution + 1` band edges, strictly decreasing from `π` to
    /// `0`.
    thresholds: Box<[f64]>,
}

impl Quantizer {
    /// Returns a quantizer with `resolution` bands, clamped to
    /// `[MIN_RESOLUTION, MAX_RESOLUTION]`.
    pub fn new(resolution: usize) -> Self {
        let resolution = resolution.clamp(MIN_RESOLUTION, MAX_RESOLUTION);
        Self {
            resolution,
            thresholds: thresholds(resolution),
        }
    }

    /// Rebuilds the band table for `resolution` bands and returns the
    /// effective (clamped) resolution.
    ///
    /// Ranks computed before the change are not comparable with ranks
    /// computed after.
    pub fn set_resolution(&mut self, resolution: usize) -> usize {
        *self = Self::new(resolution);
        trace!("set_resolution; requested: {resolution}, effective: {}", self.resolution);
        self.resolution
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Returns the band edges, `thresholds()[j] == (res - j) * π / res`.
    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    /// Returns the rank of `angle` (radians).
    ///
    /// An angle lying exactly on a band edge belongs to the band below
    /// it. Angles above `π` rank `0`; angles at or below the lowest
    /// positive edge, and NaN, rank `resolution - 1`.
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn rank(&self, angle: f64) -> Rank {
        let lowest = self.resolution - 1;
        let band = if angle.is_nan() {
            lowest
        } else {
            // Edges strictly between π and 0, highest first.
            self.thresholds[1..self.resolution].partition_point(|&edge| angle <= edge)
        };
        band as Rank
    }
}

#[allow(clippy::cast_precision_loss)]
fn thresholds(resolution: usize) -> Box<[f64]> {
    let res = resolution as f64;
    (0..=resolution)
        .map(|j| (resolution - j) as f64 * PI / res)
        .collect()
}
