//! Compass views around an observer.
//!
//! The map's `y` axis grows downward, so north is `-y`. Around an
//! observer `o` and radius `r` the view square has corners
//! `a = o + (-r, -r)`, `b = o + (r, -r)`, `c = o + (r, r)` and
//! `d = o + (-r, r)`; north looks across `ab`, east across `bc`, south
//! across `cd` and west across `da`. Rows always start next to the
//! observer and columns run left to right as seen facing that way.

use anyhow::{anyhow, Error as AnyError};
use geo::geometry::Coord;
use skyline::{Region, ScanOrder, SkylineError, View, WindowMatrix};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl TryFrom<char> for Direction {
    type Error = AnyError;
    fn try_from(c: char) -> Result<Self, AnyError> {
        match c.to_ascii_uppercase() {
            'N' => Ok(Self::North),
            'E' => Ok(Self::East),
            'S' => Ok(Self::South),
            'W' => Ok(Self::West),
            _ => Err(anyhow!("invalid direction '{c}', expected one of NESW")),
        }
    }
}

impl Direction {
    pub fn order(self) -> ScanOrder {
        match self {
            Self::North | Self::South => ScanOrder::VerticalMajor,
            Self::East | Self::West => ScanOrder::HorizontalMajor,
        }
    }

    /// Returns the region seen looking `self` from `observer`, `radius`
    /// cells out and to either side.
    pub fn region(self, observer: Coord<i64>, radius: u32) -> Region {
        let r = i64::from(radius);
        let Coord { x, y } = observer;
        // (near, far) along the line of sight, (left, right) across it.
        let ((near, far), (left, right)) = match self {
            Self::North => (toward(y, -1, r), (x.saturating_sub(r), x.saturating_add(r))),
            Self::East => (toward(x, 1, r), (y.saturating_sub(r), y.saturating_add(r))),
            Self::South => (toward(y, 1, r), (x.saturating_add(r), x.saturating_sub(r))),
            Self::West => (toward(x, -1, r), (y.saturating_add(r), y.saturating_sub(r))),
        };
        match self.order() {
            ScanOrder::VerticalMajor => Region::new(
                Coord { x: left, y: near },
                Coord { x: right, y: far },
            ),
            ScanOrder::HorizontalMajor => Region::new(
                Coord { x: near, y: left },
                Coord { x: far, y: right },
            ),
        }
    }

    /// Scans and renders the view looking `self`.
    pub fn window(
        self,
        view: &View,
        observer: Coord<i64>,
        radius: u32,
        void: Option<f64>,
        z0: Option<f64>,
    ) -> Result<WindowMatrix, SkylineError> {
        let grid = view.scan(self.order(), observer, self.region(observer, radius), void, z0)?;
        view.render(&grid)
    }
}

/// Returns the first and last coordinate `radius` steps from `origin`
/// in direction `sign`.
fn toward(origin: i64, sign: i64, radius: i64) -> (i64, i64) {
    (
        origin.saturating_add(sign),
        origin.saturating_add(sign * radius),
    )
}
