/// Revenue as a percentage of a quota target.
///
/// Returns `None` when the quota is zero or either input is not a finite
/// number, so callers never see `NaN` or infinities.
pub fn attainment_ratio(revenue: f64, quota: f64) -> Option<f64> {
    if quota == 0.0 || !quota.is_finite() || !revenue.is_finite() {
        return None;
    }
    Some((revenue / quota) * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio() {
        assert_eq!(attainment_ratio(50_000.0, 100_000.0), Some(50.0));
        assert_eq!(attainment_ratio(150.0, 100.0), Some(150.0));
        assert_eq!(attainment_ratio(0.0, 100.0), Some(0.0));
    }

    #[test]
    fn test_zero_quota_not_computed() {
        assert_eq!(attainment_ratio(50_000.0, 0.0), None);
        assert_eq!(attainment_ratio(0.0, 0.0), None);
        assert_eq!(attainment_ratio(f64::NAN, 10.0), None);
        assert_eq!(attainment_ratio(10.0, f64::INFINITY), None);
    }
}
