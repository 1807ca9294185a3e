mod compensated_sum;
mod elevation_angle;
mod steps;

pub(crate) use steps::steps;
pub use {compensated_sum::neumaier_sum, elevation_angle::normalized_elevation_angle};
