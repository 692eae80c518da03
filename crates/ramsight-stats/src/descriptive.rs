use serde::{Deserialize, Serialize};

/// Spread of a per-frame score over a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Distribution {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
}

impl Distribution {
    /// Summarizes `values`, `None` if there are none.
    ///
    /// ```
    /// # use ramsight_stats::descriptive::Distribution;
    /// let d = Distribution::new([1.0, 0.0, 0.5, 0.5]).unwrap();
    /// assert_eq!(d.min, 0.0);
    /// assert_eq!(d.max, 1.0);
    /// assert_eq!(d.mean, 0.5);
    /// assert_eq!(d.median, 0.5);
    /// ```
    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut values = values.into_iter().collect::<Vec<_>>();
        values.sort_by(f64::total_cmp);
        let (&min, &max) = (values.first()?, values.last()?);
        let n = values.len();
        let mean = values.iter().sum::<f64>() / n as f64;
        let median = if n % 2 == 0 {
            f64::midpoint(values[n / 2 - 1], values[n / 2])
        } else {
            values[n / 2]
        };
        Some(Self {
            min,
            max,
            mean,
            median,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        assert!(Distribution::new([]).is_none());
    }

    #[test]
    fn test_odd_count() {
        let d = Distribution::new([0.9, 0.1, 0.2]).unwrap();
        assert!((d.median - 0.2).abs() < f64::EPSILON);
        assert!((d.mean - 0.4).abs() < 1e-12);
    }
}
