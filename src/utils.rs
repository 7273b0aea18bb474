/// Rounds `value` to `decimals` decimal places, halves away from zero.
pub(crate) fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

pub(crate) fn round1(value: f64) -> f64 {
    round_to(value, 1)
}

/// Arithmetic mean, `None` for an empty input.
pub(crate) fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(12.34, 1), 12.3);
        assert_eq!(round_to(12.35, 0), 12.0);
        assert_eq!(round_to(1012.5, 0), 1013.0);
        assert_eq!(round1(-0.04), -0.0);
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(Vec::<f64>::new()), None);
        assert_eq!(mean([1.0, 2.0, 6.0]), Some(3.0));
    }
}
