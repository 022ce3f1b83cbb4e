/// Quantile of ascending-sorted data with linear interpolation between
/// closest ranks (position `p * (n - 1)`)
pub fn quantile_sorted(sorted: &[f64], p: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let p = p.clamp(0.0, 1.0);
    let pos = p * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let weight = pos - lower as f64;
    let (a, b) = (sorted[lower], sorted[upper]);
    if a == b {
        return Some(a);
    }
    // Weighted sum stays finite for operands near f64::MAX, unlike b - a
    Some(a * (1.0 - weight) + b * weight)
}

/// Sort a copy of the values, ignoring NaN
pub fn sorted(values: &[f64]) -> Vec<f64> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Median of the values, `None` when there are none
pub fn median(values: &[f64]) -> Option<f64> {
    quantile_sorted(&sorted(values), 0.5)
}

/// First and third quartiles of a sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quartiles {
    pub q1: f64,
    pub q3: f64,
}

impl Quartiles {
    pub fn of(values: &[f64]) -> Option<Self> {
        let sorted = sorted(values);
        Some(Self {
            q1: quantile_sorted(&sorted, 0.25)?,
            q3: quantile_sorted(&sorted, 0.75)?,
        })
    }

    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }

    /// Tukey fences `[Q1 - k*IQR, Q3 + k*IQR]`
    pub fn fences(&self, multiplier: f64) -> (f64, f64) {
        let spread = multiplier * self.iqr();
        (self.q1 - spread, self.q3 + spread)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantile_interpolates() {
        let data = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile_sorted(&data, 0.0), Some(1.0));
        assert_eq!(quantile_sorted(&data, 1.0), Some(4.0));
        assert!((quantile_sorted(&data, 0.25).unwrap() - 1.75).abs() < 1e-12);
        assert!((quantile_sorted(&data, 0.5).unwrap() - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_quantile_empty() {
        assert_eq!(quantile_sorted(&[], 0.5), None);
        assert_eq!(median(&[]), None);
    }

    #[test]
    fn test_median_unsorted() {
        assert_eq!(median(&[5.0, 1.0, 3.0]), Some(3.0));
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
        assert_eq!(median(&[7.0]), Some(7.0));
    }

    #[test]
    fn test_quartiles_and_fences() {
        let q = Quartiles::of(&[1.0, 2.0, 3.0, 4.0, 100.0]).unwrap();
        assert_eq!(q.q1, 2.0);
        assert_eq!(q.q3, 4.0);
        assert_eq!(q.iqr(), 2.0);
        assert_eq!(q.fences(1.5), (-1.0, 7.0));
    }

    #[test]
    fn test_quantile_extreme_magnitudes() {
        let data = [-1.7e308, 1.7e308];
        let q = Quartiles::of(&data).unwrap();
        assert!(q.q1.is_finite() && q.q3.is_finite());
        assert!(q.q1 < 0.0 && q.q3 > 0.0);
        assert_eq!(median(&data), Some(0.0));
    }

    #[test]
    fn test_zero_spread() {
        let q = Quartiles::of(&[5.0, 5.0, 5.0]).unwrap();
        assert_eq!(q.iqr(), 0.0);
        assert_eq!(q.fences(1.5), (5.0, 5.0));
    }
}
