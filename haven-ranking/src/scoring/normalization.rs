//! Batch-relative similarity scaling.

/// Map raw similarities to [0, 1] by rank within the batch: the lowest
/// scores 0, the highest 1, ties share their average rank. A lone value
/// maps to 1.0. NaN sorts lowest.
pub fn quantile_normalize(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    match n {
        0 => return Vec::new(),
        1 => return vec![1.0],
        _ => {}
    }

    let key = |v: f64| if v.is_nan() { f64::MIN } else { v };
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| key(values[a]).total_cmp(&key(values[b])));

    let denom = (n - 1) as f64;
    let mut out = vec![0.0; n];
    let mut start = 0;
    while start < n {
        let value = key(values[order[start]]);
        let mut end = start + 1;
        while end < n && key(values[order[end]]) == value {
            end += 1;
        }
        let average_rank = (start + end - 1) as f64 / 2.0;
        for &idx in &order[start..end] {
            out[idx] = average_rank / denom;
        }
        start = end;
    }
    out
}
