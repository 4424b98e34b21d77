use crate::shared::error::BlurError;

/// A normalized, symmetric 1D Gaussian kernel of odd length `2r + 1`.
#[derive(Clone, Debug, PartialEq)]
pub struct Kernel {
    weights: Vec<f32>,
}

/// Builds the 1D Gaussian kernel for a blur strength.
///
/// Radius is `max(1, strength)` and sigma is `strength / 2.0`, so the kernel
/// is truncated at two standard deviations. Strength 0 yields the identity
/// kernel `[1.0]`.
///
/// # Errors
///
/// [`BlurError::InvalidParameter`] for a negative strength and
/// [`BlurError::Allocation`] if the weights cannot be allocated.
pub fn build_kernel(strength: i32) -> Result<Kernel, BlurError> {
    build_kernel_capped(strength, usize::MAX)
}

/// Like [`build_kernel`], but computes at most `max_radius` taps either side
/// of the centre.
///
/// Sigma still follows `strength`, so the result equals
/// `build_kernel(strength)?.truncated(max_radius)` without ever allocating
/// the full-width kernel.
pub fn build_kernel_capped(strength: i32, max_radius: usize) -> Result<Kernel, BlurError> {
    if strength < 0 {
        return Err(BlurError::negative_strength(strength));
    }
    let radius = (strength.max(1) as usize).min(max_radius);
    if strength == 0 || radius == 0 {
        return Ok(Kernel::identity());
    }

    let sigma = strength as f64 / 2.0;
    let len = 2 * radius + 1;
    let tap = |i: usize| {
        let x = i as f64 - radius as f64;
        (-x * x / (2.0 * sigma * sigma)).exp()
    };

    let mut weights = Vec::new();
    weights
        .try_reserve_exact(len)
        .map_err(|_| BlurError::Allocation {
            bytes: len.saturating_mul(std::mem::size_of::<f32>()),
        })?;
    let sum: f64 = (0..len).map(tap).sum();
    weights.extend((0..len).map(|i| (tap(i) / sum) as f32));
    Ok(Kernel { weights })
}

impl Kernel {
    pub fn identity() -> Self {
        Self { weights: vec![1.0] }
    }

    fn normalized(weights: &[f64]) -> Self {
        let sum: f64 = weights.iter().sum();
        Self {
            weights: weights.iter().map(|&w| (w / sum) as f32).collect(),
        }
    }

    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    pub fn radius(&self) -> usize {
        self.weights.len() / 2
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn is_identity(&self) -> bool {
        self.weights.len() == 1
    }

    /// Keeps the centre `2 * min(radius, max_radius) + 1` taps, renormalized
    /// so they still sum to one.
    pub fn truncated(&self, max_radius: usize) -> Kernel {
        let radius = self.radius();
        if max_radius >= radius {
            return self.clone();
        }
        let centre = &self.weights[radius - max_radius..=radius + max_radius];
        let widened: Vec<f64> = centre.iter().map(|&w| w as f64).collect();
        Kernel::normalized(&widened)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rstest::rstest;

    fn sum(kernel: &Kernel) -> f64 {
        kernel.weights().iter().map(|&w| w as f64).sum()
    }

    #[test]
    fn test_zero_strength_is_identity() {
        let k = build_kernel(0).unwrap();
        assert_eq!(k.weights(), &[1.0]);
        assert!(k.is_identity());
        assert_eq!(k.radius(), 0);
    }

    #[test]
    fn test_negative_strength_is_rejected() {
        let err = build_kernel(-1).unwrap_err();
        assert!(matches!(
            err,
            BlurError::InvalidParameter {
                name: "strength",
                value: -1,
                ..
            }
        ));
    }

    #[rstest]
    #[case(1)]
    #[case(2)]
    #[case(3)]
    #[case(10)]
    #[case(40)]
    #[case(250)]
    fn test_kernel_sums_to_one(#[case] strength: i32) {
        let k = build_kernel(strength).unwrap();
        assert_abs_diff_eq!(sum(&k), 1.0, epsilon = 1e-6);
    }

    #[rstest]
    #[case(1, 3)]
    #[case(3, 7)]
    #[case(40, 81)]
    fn test_kernel_length_is_odd(#[case] strength: i32, #[case] expected_len: usize) {
        let k = build_kernel(strength).unwrap();
        assert_eq!(k.len(), expected_len);
        assert_eq!(k.radius(), strength as usize);
    }

    #[test]
    fn test_kernel_is_symmetric() {
        let k = build_kernel(7).unwrap();
        let w = k.weights();
        for i in 0..w.len() / 2 {
            assert_eq!(w[i], w[w.len() - 1 - i]);
        }
    }

    #[test]
    fn test_kernel_centre_is_largest() {
        let k = build_kernel(5).unwrap();
        let w = k.weights();
        let centre = w[k.radius()];
        for (i, &v) in w.iter().enumerate() {
            if i != k.radius() {
                assert!(centre > v);
            }
        }
    }

    #[test]
    fn test_strength_one_weights() {
        // sigma = 0.5, taps at -1, 0, 1: exp(-2), 1, exp(-2)
        let k = build_kernel(1).unwrap();
        let edge = (-2.0f64).exp();
        let total = 1.0 + 2.0 * edge;
        assert_abs_diff_eq!(k.weights()[0] as f64, edge / total, epsilon = 1e-7);
        assert_abs_diff_eq!(k.weights()[1] as f64, 1.0 / total, epsilon = 1e-7);
    }

    #[test]
    fn test_truncated_keeps_centre_and_renormalizes() {
        let k = build_kernel(5).unwrap();
        let t = k.truncated(2);
        assert_eq!(t.len(), 5);
        assert_abs_diff_eq!(sum(&t), 1.0, epsilon = 1e-6);
        // Relative shape is preserved.
        let ratio_full = k.weights()[4] / k.weights()[5];
        let ratio_cut = t.weights()[1] / t.weights()[2];
        assert_abs_diff_eq!(ratio_full, ratio_cut, epsilon = 1e-5);
    }

    #[test]
    fn test_truncated_to_zero_is_identity() {
        let t = build_kernel(4).unwrap().truncated(0);
        assert!(t.is_identity());
        assert_eq!(t.weights(), &[1.0]);
    }

    #[rstest]
    #[case(5, 2)]
    #[case(40, 3)]
    #[case(9, 9)]
    #[case(3, 0)]
    fn test_capped_matches_truncated(#[case] strength: i32, #[case] max_radius: usize) {
        let capped = build_kernel_capped(strength, max_radius).unwrap();
        let truncated = build_kernel(strength).unwrap().truncated(max_radius);
        assert_eq!(capped.len(), truncated.len());
        for (a, b) in capped.weights().iter().zip(truncated.weights()) {
            assert_abs_diff_eq!(*a, *b, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_capped_huge_strength_stays_small() {
        let k = build_kernel_capped(i32::MAX, 4).unwrap();
        assert_eq!(k.len(), 9);
        assert_abs_diff_eq!(sum(&k), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_capped_rejects_negative_strength() {
        assert!(matches!(
            build_kernel_capped(-5, 10),
            Err(BlurError::InvalidParameter { value: -5, .. })
        ));
    }

    #[test]
    fn test_truncated_beyond_radius_is_unchanged() {
        let k = build_kernel(3).unwrap();
        assert_eq!(k.truncated(3), k);
        assert_eq!(k.truncated(100), k);
    }
}
