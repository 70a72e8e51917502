//! Right-tail chi-square probability via `statrs`.

use statrs::distribution::{ChiSquared, ContinuousCDF};

/// Probability of observing a chi-square at least this extreme under the
/// good-fit hypothesis, for the given degrees of freedom.
///
/// Conventions for degenerate inputs:
/// - `dof == 0`: returns 1.0 — no fit evidence, nothing to reject.
/// - `chi2 <= 0.0`: returns 1.0, the survival probability at the lower
///   edge of the distribution's support.
pub fn chi_squared_probability(chi2: f64, dof: u32) -> f64 {
    if dof == 0 || chi2 <= 0.0 {
        return 1.0;
    }

    // ChiSquared::new only rejects non-positive freedom; dof >= 1 here.
    ChiSquared::new(f64::from(dof))
        .map(|dist| dist.sf(chi2).clamp(0.0, 1.0))
        .unwrap_or(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_dof_convention() {
        assert_eq!(chi_squared_probability(5.0, 0), 1.0);
        assert_eq!(chi_squared_probability(0.0, 0), 1.0);
    }

    #[test]
    fn test_non_positive_chi2() {
        assert_eq!(chi_squared_probability(0.0, 4), 1.0);
        assert_eq!(chi_squared_probability(-3.0, 4), 1.0);
    }

    #[test]
    fn test_known_values_two_dof() {
        // For dof = 2 the survival function is exp(-x / 2).
        let p = chi_squared_probability(2.0, 2);
        assert!((p - (-1.0f64).exp()).abs() < 1e-12);

        let p = chi_squared_probability(4.0, 2);
        assert!((p - (-2.0f64).exp()).abs() < 1e-12);
    }

    #[test]
    fn test_in_unit_interval() {
        for dof in 1..12 {
            for i in 0..40 {
                let chi2 = f64::from(i) * 2.5;
                let p = chi_squared_probability(chi2, dof);
                assert!((0.0..=1.0).contains(&p), "p = {} out of range", p);
            }
        }
    }

    #[test]
    fn test_monotonically_non_increasing() {
        for dof in [1, 2, 5, 6, 10] {
            let mut prev = chi_squared_probability(0.0, dof);
            for i in 1..100 {
                let p = chi_squared_probability(f64::from(i) * 0.5, dof);
                assert!(p <= prev, "probability increased at chi2 = {}", i);
                prev = p;
            }
        }
    }

    #[test]
    fn test_large_chi2_vanishes() {
        let p = chi_squared_probability(500.0, 6);
        assert!(p < 1e-12);
    }
}
