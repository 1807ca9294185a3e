//! Flat, row-major elevation grid.

use crate::SkylineError;
use geo::geometry::Coord;
use log::trace;

/// Smallest accepted map width. Narrower widths are clamped up.
pub const MIN_WIDTH: usize = 2;

/// Value substituted for void or out-of-range cells when the caller
/// doesn't provide one.
pub const DEFAULT_VOID: f64 = 0.0;

/// Summary of a loaded map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Bounds {
    /// Number of cells, including void ones.
    pub length: usize,
    pub width: usize,
    pub height: usize,
    pub x_min: i64,
    pub x_max: i64,
    pub y_min: i64,
    /// `-1` for an empty map.
    pub y_max: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapStore {
    /// Elevation samples, `None` marking a void cell.
    cells: Box<[Option<f64>]>,

    /// Number of columns.
    width: usize,

    /// Number of (possibly partial) rows.
    height: usize,
}

impl Default for MapStore {
    fn default() -> Self {
        Self {
            cells: Box::new([]),
            width: MIN_WIDTH,
            height: 0,
        }
    }
}

impl MapStore {
    /// Returns a store holding `cells` laid out in rows of `width`.
    pub fn new<I, V>(cells: I, width: usize) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Option<f64>>,
    {
        let mut store = Self::default();
        store.load(cells, width);
        store
    }

    /// Replaces the current map with `cells`, laid out in rows of
    /// `width` (clamped to at least [`MIN_WIDTH`]).
    ///
    /// Cells may be plain numbers or `Option`s, where `None` is void.
    pub fn load<I, V>(&mut self, cells: I, width: usize) -> Bounds
    where
        I: IntoIterator<Item = V>,
        V: Into<Option<f64>>,
    {
        self.cells = cells.into_iter().map(Into::into).collect();
        self.width = width.max(MIN_WIDTH);
        self.height = self.cells.len().div_ceil(self.width);
        let bounds = self.bounds();
        trace!("load; {bounds:?}");
        bounds
    }

    #[allow(clippy::cast_possible_wrap)]
    pub fn bounds(&self) -> Bounds {
        Bounds {
            length: self.cells.len(),
            width: self.width,
            height: self.height,
            x_min: 0,
            x_max: self.width as i64 - 1,
            y_min: 0,
            y_max: self.height as i64 - 1,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the number of cells, void ones included.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns the elevation at `at`.
    ///
    /// Cells are addressed by their flat index `x + width * y`, so any
    /// index falling outside the map (negative, overflowing, or past
    /// the end) reads as `void`, as does a void cell. `void` defaults to
    /// [`DEFAULT_VOID`].
    pub fn get(&self, at: Coord<i64>, void: Option<f64>) -> Result<f64, SkylineError> {
        if self.cells.is_empty() {
            return Err(SkylineError::EmptyMap);
        }
        let void = void.unwrap_or(DEFAULT_VOID);
        let index = i64::try_from(self.width)
            .ok()
            .and_then(|width| width.checked_mul(at.y))
            .and_then(|row| row.checked_add(at.x))
            .and_then(|index| usize::try_from(index).ok());
        Ok(index
            .and_then(|index| self.cells.get(index).copied().flatten())
            .unwrap_or(void))
    }
}
