pub fn min_of_2<T: PartialOrd + Copy>(first: T, second: T) -> T {
    if first < second {
        first
    } else {
        second
    }
}

pub fn max_of_2<T: PartialOrd + Copy>(first: T, second: T) -> T {
    if first > second {
        first
    } else {
        second
    }
}

/// Restrict a value to the closed interval `[lower, upper]`.
///
/// Unlike `f64::clamp` this does not panic when the bounds are inverted; the lower
/// bound wins in that case.
pub(crate) fn clamp_between<T: PartialOrd + Copy>(value: T, lower: T, upper: T) -> T {
    max_of_2(lower, min_of_2(value, upper))
}
