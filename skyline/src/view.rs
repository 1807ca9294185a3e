use crate::{
    map::{Bounds, MapStore},
    math::normalized_elevation_angle,
    quantizer::{Quantizer, Rank},
    scan::{self, AreaGrid, Region, ScanOrder},
    window::{self, WindowMatrix},
    SkylineError,
};
use geo::geometry::Coord;
use log::debug;

/// A map plus the band quantizer used to look at it.
///
/// Everything needed to compute a window lives here, so independent
/// views never share state. Queries borrow `self`; only [`View::load`]
/// and [`View::set_resolution`] need it mutably.
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    map: MapStore,
    quantizer: Quantizer,
}

impl View {
    /// Returns a view with no map loaded.
    pub fn new(resolution: usize) -> Self {
        Self {
            map: MapStore::default(),
            quantizer: Quantizer::new(resolution),
        }
    }

    pub fn builder() -> ViewBuilder {
        ViewBuilder {
            map: None,
            resolution: None,
        }
    }

    /// Replaces the map. See [`MapStore::load`].
    pub fn load<I, V>(&mut self, cells: I, width: usize) -> Bounds
    where
        I: IntoIterator<Item = V>,
        V: Into<Option<f64>>,
    {
        self.map.load(cells, width)
    }

    /// Changes the number of bands. See [`Quantizer::set_resolution`].
    pub fn set_resolution(&mut self, resolution: usize) -> usize {
        self.quantizer.set_resolution(resolution)
    }

    pub fn map(&self) -> &MapStore {
        &self.map
    }

    pub fn quantizer(&self) -> &Quantizer {
        &self.quantizer
    }

    pub fn resolution(&self) -> usize {
        self.quantizer.resolution()
    }

    /// Returns the elevation at `at`, or `void` (default `0.0`) when
    /// there is none.
    pub fn map_point(&self, at: Coord<i64>, void: Option<f64>) -> Result<f64, SkylineError> {
        self.map.get(at, void)
    }

    /// Returns the viewing angle, in `[0, π]` radians, from `from` to
    /// `to`.
    ///
    /// The observer stands at elevation `z0`, or at the map's
    /// elevation under `from` when `z0` is `None`.
    pub fn angle(
        &self,
        from: Coord<i64>,
        to: Coord<i64>,
        void: Option<f64>,
        z0: Option<f64>,
    ) -> Result<f64, SkylineError> {
        let start_elev = match z0 {
            Some(z0) => z0,
            None => self.map.get(from, void)?,
        };
        let end_elev = self.map.get(to, void)?;

        #[allow(clippy::cast_precision_loss)]
        let (dx, dy) = (to.x as f64 - from.x as f64, to.y as f64 - from.y as f64);
        let distance = (dx * dx + dy * dy).sqrt();
        if distance == 0.0 {
            return Err(SkylineError::DegenerateGeometry {
                x: from.x,
                y: from.y,
            });
        }

        Ok(normalized_elevation_angle(start_elev, distance, end_elev))
    }

    /// Returns the band rank of the viewing angle from `from` to `to`.
    pub fn rank(
        &self,
        from: Coord<i64>,
        to: Coord<i64>,
        void: Option<f64>,
        z0: Option<f64>,
    ) -> Result<Rank, SkylineError> {
        self.angle(from, to, void, z0)
            .map(|angle| self.quantizer.rank(angle))
    }

    /// Ranks every cell of `region` as seen from `observer`, rows
    /// following `y`.
    pub fn scan_vertical(
        &self,
        observer: Coord<i64>,
        region: Region,
        void: Option<f64>,
        z0: Option<f64>,
    ) -> Result<AreaGrid, SkylineError> {
        self.scan(ScanOrder::VerticalMajor, observer, region, void, z0)
    }

    /// Ranks every cell of `region` as seen from `observer`, rows
    /// following `x`.
    pub fn scan_horizontal(
        &self,
        observer: Coord<i64>,
        region: Region,
        void: Option<f64>,
        z0: Option<f64>,
    ) -> Result<AreaGrid, SkylineError> {
        self.scan(ScanOrder::HorizontalMajor, observer, region, void, z0)
    }

    pub fn scan(
        &self,
        order: ScanOrder,
        observer: Coord<i64>,
        region: Region,
        void: Option<f64>,
        z0: Option<f64>,
    ) -> Result<AreaGrid, SkylineError> {
        let now = std::time::Instant::now();
        let grid = scan::scan(order, region, |at| self.rank(observer, at, void, z0))?;
        debug!(
            "scan; order: {order:?}, rows: {}, cols: {}, exec: {:?}",
            grid.rows(),
            grid.cols(),
            now.elapsed()
        );
        Ok(grid)
    }

    /// Composites `grid` into a window with this view's resolution.
    pub fn render(&self, grid: &AreaGrid) -> Result<WindowMatrix, SkylineError> {
        let now = std::time::Instant::now();
        let window = window::render(self.resolution(), grid)?;
        debug!(
            "render; bands: {}, cols: {}, exec: {:?}",
            window.resolution(),
            window.width(),
            now.elapsed()
        );
        Ok(window)
    }
}

pub struct ViewBuilder {
    /// Cells and width.
    map: Option<(Vec<Option<f64>>, usize)>,

    /// Number of elevation-angle bands.
    resolution: Option<usize>,
}

impl ViewBuilder {
    pub fn map<I, V>(mut self, cells: I, width: usize) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Option<f64>>,
    {
        self.map = Some((cells.into_iter().map(Into::into).collect(), width));
        self
    }

    pub fn resolution(mut self, resolution: usize) -> Self {
        self.resolution = Some(resolution);
        self
    }

    /// Returns the view. A map is optional; lookups fail with
    /// [`SkylineError::EmptyMap`] until one is loaded.
    pub fn build(self) -> Result<View, SkylineError> {
        let resolution = self.resolution.ok_or(SkylineError::Builder("resolution"))?;
        let mut view = View::new(resolution);
        if let Some((cells, width)) = self.map {
            view.load(cells, width);
        }
        Ok(view)
    }
}

#[cfg(test)]
mod tests {
    use super::View;
    use crate::{math::normalized_elevation_angle, scan::Region, SkylineError};
    use approx::assert_relative_eq;
    use geo::coord;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    #[rustfmt::skip]
    const HILLS: [f64; 30] = [
        0.0, 5.0, 5.0, 5.0, 0.0, 9.0,
        5.0, 5.0, 4.0, 2.0, 8.0, 9.0,
        4.0, 4.0, 3.0, 1.0, 9.0, 8.0,
        3.0, 8.0, 2.0, 9.0, 3.0, 9.0,
        2.0, 6.0, 1.0, 3.0, 2.0, 0.0,
    ];

    fn hills() -> View {
        View::builder().map(HILLS, 6).resolution(10).build().unwrap()
    }

    #[test]
    fn test_builder() {
        assert_eq!(
            View::builder().map(HILLS, 6).build(),
            Err(SkylineError::Builder("resolution"))
        );
        let view = View::builder().resolution(1).build().unwrap();
        assert_eq!(view.resolution(), 3);
        assert_eq!(
            view.map_point(coord! {x: 0, y: 0}, None),
            Err(SkylineError::EmptyMap)
        );
    }

    #[test]
    fn test_map_point() {
        let view = hills();
        assert_eq!(view.map_point(coord! {x: 0, y: 0}, None), Ok(0.0));
        assert_eq!(view.map_point(coord! {x: 5, y: 4}, None), Ok(0.0));
        assert_eq!(view.map_point(coord! {x: 1, y: 1}, None), Ok(5.0));
    }

    #[test]
    fn test_angle() {
        let view = hills();
        // (1, 0) and (2, 0) are both at 5.
        assert_eq!(
            view.angle(coord! {x: 1, y: 0}, coord! {x: 2, y: 0}, None, None),
            Ok(FRAC_PI_2)
        );
        // Up 5 over 1.
        assert_relative_eq!(
            view.angle(coord! {x: 0, y: 0}, coord! {x: 1, y: 0}, None, None).unwrap(),
            FRAC_PI_2 + 5.0_f64.atan(),
            epsilon = f64::EPSILON
        );
        // Down 5 over 1 from an observer raised to 5, then level.
        assert_relative_eq!(
            view.angle(coord! {x: 3, y: 0}, coord! {x: 4, y: 0}, None, None).unwrap(),
            FRAC_PI_2 - 5.0_f64.atan(),
            epsilon = f64::EPSILON
        );
        assert_eq!(
            view.angle(coord! {x: 3, y: 0}, coord! {x: 4, y: 0}, None, Some(0.0)),
            Ok(FRAC_PI_2)
        );
        // Diagonal: 5 - 0 over √2.
        assert_relative_eq!(
            view.angle(coord! {x: 0, y: 0}, coord! {x: 1, y: 1}, None, None).unwrap(),
            FRAC_PI_2 + (5.0 / 2.0_f64.sqrt()).atan(),
            epsilon = f64::EPSILON
        );
    }

    #[test]
    #[allow(clippy::cast_precision_loss)]
    fn test_distance_is_root_of_squares() {
        let view = View::builder()
            .map(vec![0.0; 40_000], 200)
            .resolution(10)
            .build()
            .unwrap();
        let from = coord! {x: 0, y: 0};
        for (x, y) in [(3, 4), (1, 1), (7, 13), (150, 199), (199, 1), (37, 181)] {
            let to = coord! {x: x, y: y};
            let expected = normalized_elevation_angle(
                0.0,
                ((x * x + y * y) as f64).sqrt(),
                view.map_point(to, None).unwrap() + 1.0,
            );
            assert_eq!(view.angle(from, to, None, Some(-1.0)), Ok(expected), "({x}, {y})");
        }
    }

    #[test]
    fn test_angle_void() {
        let view = hills();
        let outside = coord! {x: 0, y: 9};
        assert_eq!(
            view.angle(coord! {x: 0, y: 0}, outside, None, None),
            Ok(FRAC_PI_2)
        );
        assert_relative_eq!(
            view.angle(coord! {x: 0, y: 0}, coord! {x: 0, y: 1}, Some(4.0), Some(4.0)).unwrap(),
            FRAC_PI_4 + FRAC_PI_2,
            epsilon = f64::EPSILON
        );
    }

    #[test]
    fn test_angle_range() {
        let view = hills();
        for y0 in 0..5 {
            for x0 in 0..6 {
                for y1 in -1..6 {
                    for x1 in -1..7 {
                        if (x0, y0) == (x1, y1) {
                            continue;
                        }
                        let angle = view
                            .angle(coord! {x: x0, y: y0}, coord! {x: x1, y: y1}, None, None)
                            .unwrap();
                        assert!((0.0..=PI).contains(&angle));
                    }
                }
            }
        }
    }

    #[test]
    fn test_coincident_points() {
        let view = hills();
        let at = coord! {x: 2, y: 3};
        assert_eq!(
            view.angle(at, at, None, Some(100.0)),
            Err(SkylineError::DegenerateGeometry { x: 2, y: 3 })
        );
        assert_eq!(
            view.rank(at, at, None, None),
            Err(SkylineError::DegenerateGeometry { x: 2, y: 3 })
        );
    }

    #[test]
    fn test_rank() {
        let view = hills();
        // Level sits exactly on the π/2 edge, so it falls to band 5.
        assert_eq!(view.rank(coord! {x: 1, y: 0}, coord! {x: 2, y: 0}, None, None), Ok(5));
        // π/2 + atan(5) ≈ 2.944 is above 9π/10 ≈ 2.827.
        assert_eq!(view.rank(coord! {x: 0, y: 0}, coord! {x: 1, y: 0}, None, None), Ok(0));
        // π/2 - atan(5) ≈ 0.197 is at or below π/10 ≈ 0.314.
        assert_eq!(view.rank(coord! {x: 3, y: 0}, coord! {x: 4, y: 0}, None, None), Ok(9));
    }

    #[test]
    fn test_scan_single_cell() {
        let view = hills();
        let observer = coord! {x: 0, y: 0};
        let cell = coord! {x: 1, y: 1};
        let grid = view
            .scan_vertical(observer, Region::new(cell, cell), None, None)
            .unwrap();
        assert_eq!((grid.rows(), grid.cols()), (1, 1));
        assert_eq!(grid.get(0, 0), view.rank(observer, cell, None, None).ok());
    }

    #[test]
    fn test_scan_orders_transpose() {
        let view = hills();
        let observer = coord! {x: 0, y: 0};
        let region = Region::new(coord! {x: 5, y: 1}, coord! {x: 1, y: 4});
        let vertical = view.scan_vertical(observer, region, None, None).unwrap();
        let horizontal = view.scan_horizontal(observer, region, None, None).unwrap();
        assert_eq!((vertical.rows(), vertical.cols()), (4, 5));
        assert_eq!((horizontal.rows(), horizontal.cols()), (5, 4));
        for row in 0..4 {
            for col in 0..5 {
                assert_eq!(vertical.get(row, col), horizontal.get(col, row));
            }
        }
        // Row 0 follows the first corner.
        let first = vertical.row(0).unwrap();
        for (col, x) in (1..=5).rev().enumerate() {
            assert_eq!(
                Ok(first[col]),
                view.rank(observer, coord! {x: x, y: 1}, None, None)
            );
        }
    }

    #[test]
    fn test_scan_through_observer() {
        let view = hills();
        let region = Region::new(coord! {x: 0, y: 0}, coord! {x: 2, y: 2});
        assert_eq!(
            view.scan_horizontal(coord! {x: 1, y: 1}, region, None, None),
            Err(SkylineError::DegenerateGeometry { x: 1, y: 1 })
        );
    }

    #[test]
    fn test_resolution_change() {
        let mut view = hills();
        let (from, to) = (coord! {x: 0, y: 0}, coord! {x: 1, y: 0});
        assert_eq!(view.rank(from, to, None, None), Ok(0));
        assert_eq!(view.set_resolution(100_000), 10_000);
        let angle = view.angle(from, to, None, None).unwrap();
        let rank = view.rank(from, to, None, None).unwrap();
        assert_eq!(rank, view.quantizer().rank(angle));
        assert!(rank > 0 && rank < 10_000);
        assert_eq!(view.set_resolution(3), 3);
        assert_eq!(view.rank(coord! {x: 1, y: 0}, coord! {x: 2, y: 0}, None, None), Ok(1));
    }
}
