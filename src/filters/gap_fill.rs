//! Missing sample resolution.
//!
//! Leading gaps take the first valid value, trailing gaps the last valid
//! value, interior gaps are linearly interpolated between their neighbours.

/// Resolve every missing sample, `None` if no sample is valid
///
/// NaN samples count as missing.
#[must_use]
pub fn fill_gaps(values: &[Option<f64>]) -> Option<Vec<f64>> {
    let valid: Vec<(usize, f64)> = values
        .iter()
        .enumerate()
        .filter_map(|(i, v)| v.filter(|x| !x.is_nan()).map(|x| (i, x)))
        .collect();

    let &(_, first) = valid.first()?;
    let &(last_index, last) = valid.last()?;

    let mut filled = vec![first; values.len()];
    filled[last_index..].fill(last);

    for pair in valid.windows(2) {
        let (start, from) = pair[0];
        let (end, to) = pair[1];
        filled[start] = from;

        let span = (end - start) as f64;
        for (offset, slot) in filled[start + 1..end].iter_mut().enumerate() {
            let t = (offset + 1) as f64 / span;
            *slot = t.mul_add(to - from, from);
        }
    }

    Some(filled)
}
