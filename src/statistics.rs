// A simple statistics module with weighting helpers used by the building aggregation.

use crate::compare_floats::{clamp_between, max_of_2, min_of_2};

/// Weighted arithmetic mean of `(value, weight)` pairs.
///
/// Pairs whose weight is not strictly positive are left out. The result is clamped to
/// the range of the values that carry weight, so rounding in the sums can never move it
/// outside that range. Returns None when no pair carries weight.
pub fn weighted_mean(pairs: impl IntoIterator<Item = (f64, f64)>) -> Option<f64> {
    let (weighted_sum, weight_sum, range) = pairs
        .into_iter()
        .filter(|(_, weight)| *weight > 0.)
        .fold(
            (0., 0., None::<(f64, f64)>),
            |(weighted_sum, weight_sum, range), (value, weight)| {
                let range = match range {
                    Some((lowest, highest)) => {
                        Some((min_of_2(lowest, value), max_of_2(highest, value)))
                    }
                    None => Some((value, value)),
                };
                (weighted_sum + value * weight, weight_sum + weight, range)
            },
        );

    match range {
        Some((lowest, highest)) if weight_sum > 0. => {
            Some(clamp_between(weighted_sum / weight_sum, lowest, highest))
        }
        _ => None,
    }
}
