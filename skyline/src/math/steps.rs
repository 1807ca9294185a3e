/// Returns every integer from `start` to `end`, inclusive, stepping by
/// `sign(end - start)`.
///
/// Equal endpoints yield just `start`. Returns `None` when the length
/// of the walk is not representable.
#[allow(clippy::cast_possible_wrap)]
pub fn steps(start: i64, end: i64) -> Option<impl ExactSizeIterator<Item = i64>> {
    let span = end.checked_sub(start)?;
    let len = usize::try_from(span.unsigned_abs()).ok()?.checked_add(1)?;
    let step = if span < 0 { -1 } else { 1 };
    Some((0..len).map(move |n| start + step * n as i64))
}
