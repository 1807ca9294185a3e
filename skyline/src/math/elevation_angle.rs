use super::neumaier_sum;
use num_traits::{Float, FloatConst};

/// Returns the viewing angle (in radians) from an observer at
/// `start_elev` to a target at `end_elev`, `distance` away.
///
/// The usual up/down angle is shifted into `[0, π]`: `0` looks
/// straight down, `π/2` is level, and `π` looks straight up.
pub fn normalized_elevation_angle<T>(start_elev: T, distance: T, end_elev: T) -> T
where
    T: Float + FloatConst,
{
    let delta = end_elev - start_elev;
    neumaier_sum([T::FRAC_PI_2(), (delta / distance).atan()])
}
