//! # Skyline
//!
//! `skyline` renders the silhouette of a 2-D elevation map as seen
//! from an observer, looking across a rectangular region, quantized
//! into a fixed number of elevation-angle bands.
//!
//! 1. [`MapStore`] holds the elevation grid.
//! 1. [`View::angle`] measures the viewing angle to each sample and
//!    [`Quantizer`] ranks it into a band.
//! 1. [`View::scan_vertical`] / [`View::scan_horizontal`] rank a whole
//!    [`Region`] into an [`AreaGrid`].
//! 1. [`render`] composites the grid, nearest row first, into a
//!    [`WindowMatrix`] of visible marks.

mod error;
pub mod map;
pub mod math;
pub mod quantizer;
pub mod scan;
mod view;
pub mod window;

pub use {
    crate::{
        error::SkylineError,
        map::{Bounds, MapStore},
        quantizer::{Quantizer, Rank},
        scan::{AreaGrid, Region, ScanOrder},
        view::{View, ViewBuilder},
        window::{render, WindowMatrix},
    },
    geo,
};
