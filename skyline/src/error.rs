use geo::geometry::Coord;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SkylineError {
    #[error("missing required parameter '{0}'")]
    Builder(&'static str),

    #[error("no map loaded")]
    EmptyMap,

    #[error("angle undefined between ({x}, {y}) and itself")]
    DegenerateGeometry { x: i64, y: i64 },

    #[error("can not walk scan region {from:?} to {to:?}")]
    DegenerateRegion { from: Coord<i64>, to: Coord<i64> },

    #[error("rank {rank} at row {row}, col {col} outside of [0, {resolution})")]
    RankRange {
        row: usize,
        col: usize,
        rank: i32,
        resolution: usize,
    },

    #[error("row {row} has {actual} ranks, expected {expected}")]
    RaggedGrid {
        row: usize,
        expected: usize,
        actual: usize,
    },
}
