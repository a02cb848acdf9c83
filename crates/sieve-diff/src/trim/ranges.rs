//! Inclusive index windows and their merging.

/// The inclusive window `[center - radius, center + radius]`, clamped to `0..len`.
///
/// `len` must be non-zero.
pub fn window(center: usize, radius: usize, len: usize) -> (usize, usize) {
    let last = len.saturating_sub(1);
    (
        center.saturating_sub(radius).min(last),
        center.saturating_add(radius).min(last),
    )
}

/// Merge inclusive `(start, end)` ranges.
///
/// A range is folded into its predecessor when it starts at most `gap` past
/// the predecessor's end, so `gap = 1` joins touching ranges and `gap = 0`
/// only joins overlapping ones. Output is sorted by start and non-overlapping.
pub fn merge_ranges(
    ranges: impl IntoIterator<Item = (usize, usize)>,
    gap: usize,
) -> Vec<(usize, usize)> {
    let mut sorted: Vec<(usize, usize)> = ranges.into_iter().collect();
    sorted.sort_unstable();

    let mut merged: Vec<(usize, usize)> = Vec::with_capacity(sorted.len());
    for (start, end) in sorted {
        match merged.last_mut() {
            Some(prev) if start <= prev.1.saturating_add(gap) => prev.1 = prev.1.max(end),
            _ => merged.push((start, end)),
        }
    }
    merged
}
