use num_traits::Float;

/// Returns the sum of `values` using Neumaier's variant of Kahan
/// summation.
///
/// The low-order bits lost by each addition are collected in a
/// separate compensation term which is added back at the end, so
/// terms of very different magnitude, or terms which cancel, don't
/// wipe each other out. Empty input sums to zero.
pub fn neumaier_sum<T, I>(values: I) -> T
where
    T: Float,
    I: IntoIterator<Item = T>,
{
    let mut sum = T::zero();
    let mut compensation = T::zero();
    for value in values {
        let t = sum + value;
        compensation = compensation
            + if sum.abs() >= value.abs() {
                (sum - t) + value
            } else {
                (value - t) + sum
            };
        sum = t;
    }
    sum + compensation
}
