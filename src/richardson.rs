extern crate nalgebra as na;

use crate::error::VerificationError;

// Estimate the mesh-converged value from two samples assuming the error
// scales as h^(p+1).
pub fn richardson_extrapolation(
    f1: f64,
    f2: f64,
    h1: f64,
    h2: f64,
    order: u32,
) -> Result<f64, VerificationError> {
    let ratio = h1 / h2;
    let factor = ratio.powi(order as i32 + 1);
    // equal resolutions collapse the denominator
    if factor == 1.0 || !factor.is_finite() {
        return Err(VerificationError::DegenerateExtrapolation { ratio, order });
    }
    Ok((f1 - f2 * factor) / (1.0 - factor))
}

// Local observed convergence rate between consecutive samples, one fewer
// entry than the input series.
pub fn observed_rates(error: &na::DVector<f64>, resolution: &na::DVector<f64>) -> na::DVector<f64> {
    let n = error.len().min(resolution.len());
    if n < 2 {
        return na::DVector::zeros(0);
    }
    na::DVector::from_fn(n - 1, |i, _| {
        (error[i + 1] / error[i]).ln() / (resolution[i + 1] / resolution[i]).ln()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn power_law(c: f64, d: f64, h: f64, order: u32) -> f64 {
        c + d * h.powi(order as i32 + 1)
    }

    #[test]
    fn recovers_the_limit_of_a_power_law() {
        let (c, d) = (0.287, 3.4);
        for order in 0..5 {
            let (h1, h2) = (4.0e-3, 2.0e-3);
            let f1 = power_law(c, d, h1, order);
            let f2 = power_law(c, d, h2, order);
            let value = richardson_extrapolation(f1, f2, h1, h2, order).unwrap();
            assert_relative_eq!(value, c, max_relative = 1e-12);
        }
    }

    #[test]
    fn symmetric_under_relabeling_the_samples() {
        let (f1, f2, h1, h2) = (1.25, 1.05, 8.0e-3, 4.0e-3);
        let a = richardson_extrapolation(f1, f2, h1, h2, 2).unwrap();
        let b = richardson_extrapolation(f2, f1, h2, h1, 2).unwrap();
        assert_relative_eq!(a, b, max_relative = 1e-14);
    }

    #[test]
    fn equal_resolutions_are_degenerate() {
        let err = richardson_extrapolation(1.0, 1.1, 2.0e-3, 2.0e-3, 3).unwrap_err();
        assert!(matches!(
            err,
            VerificationError::DegenerateExtrapolation { order: 3, .. }
        ));
    }

    #[test]
    fn overflowing_ratio_power_is_degenerate() {
        let err = richardson_extrapolation(1.0, 1.1, 1.0e200, 1.0e-200, 3).unwrap_err();
        assert!(matches!(
            err,
            VerificationError::DegenerateExtrapolation { .. }
        ));
    }

    #[test]
    fn rates_recover_the_exact_order() {
        let resolution = na::DVector::from_vec(vec![8.0e-3, 4.0e-3, 2.0e-3, 1.0e-3]);
        for k in 1..5 {
            let error = resolution.map(|h: f64| 2.5 * h.powi(k));
            let rates = observed_rates(&error, &resolution);
            assert_eq!(rates.len(), 3);
            for rate in rates.iter() {
                assert_relative_eq!(*rate, k as f64, max_relative = 1e-12);
            }
        }
    }

    #[test]
    fn rates_are_empty_below_two_samples() {
        let one = na::DVector::from_vec(vec![1.0]);
        assert_eq!(observed_rates(&one, &one).len(), 0);
    }
}
