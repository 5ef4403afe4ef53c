//! Descriptive statistics over columns with missing values.

use statrs::statistics::{Data, Median};

/// Median of the present values; `None` when nothing is present.
///
/// Even counts average the two middle values.
pub fn median<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = Option<f64>>,
{
    let present: Vec<f64> = values
        .into_iter()
        .flatten()
        .filter(|v| v.is_finite())
        .collect();
    if present.is_empty() {
        return None;
    }
    Some(Data::new(present).median())
}

/// Mean of `values` weighted by `weights`; `None` when the weights sum to zero.
pub fn weighted_mean(values: &[f64], weights: &[f64]) -> Option<f64> {
    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return None;
    }
    let sum: f64 = values.iter().zip(weights).map(|(v, w)| v * w).sum();
    Some(sum / total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_median_odd() {
        assert_eq!(median([Some(3.0), Some(1.0), Some(2.0)]), Some(2.0));
    }

    #[test]
    fn test_median_even_averages_middle() {
        assert_eq!(median([Some(4.0), Some(1.0), Some(3.0), Some(2.0)]), Some(2.5));
    }

    #[test]
    fn test_median_skips_missing() {
        assert_eq!(median([None, Some(10.0), None, Some(30.0), Some(20.0)]), Some(20.0));
    }

    #[test]
    fn test_median_single_value() {
        assert_eq!(median([Some(7.5)]), Some(7.5));
    }

    #[test]
    fn test_median_empty_or_all_missing() {
        assert_eq!(median(std::iter::empty()), None);
        assert_eq!(median([None, None]), None);
    }

    #[test]
    fn test_weighted_mean() {
        assert_eq!(weighted_mean(&[10.0, 20.0], &[1.0, 3.0]), Some(17.5));
        assert_eq!(weighted_mean(&[], &[]), None);
    }
}
