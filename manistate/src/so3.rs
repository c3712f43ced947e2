//! SO(3) helpers shared by manifold states and their estimator consumers.
//!
//! The quaternion exponential and logarithm themselves come from `nalgebra`
//! (`UnitQuaternion::from_scaled_axis` / `scaled_axis`, both stable at small
//! angles); this module adds the pieces estimators need around them: the
//! skew (hat) matrix, the closed-form Jacobian of the exponential map used
//! for first-order covariance propagation through a retraction, and the
//! double-cover sign canonicalization.

use nalgebra::{Matrix3, RealField, UnitQuaternion, Vector3};

// Below this rotation angle the closed-form Jacobian factors degenerate to
// 0/0 and are replaced by their series limits.
const SMALL_ANGLE: f64 = 1e-10;

/// Skew-symmetric cross-product matrix of `v` (the hat map), such that
/// `skew(a) * b == a × b`.
#[inline]
pub fn skew<T: RealField + Copy>(v: &Vector3<T>) -> Matrix3<T> {
    Matrix3::new(
        T::zero(),
        -v.z,
        v.y,
        v.z,
        T::zero(),
        -v.x,
        -v.y,
        v.x,
        T::zero(),
    )
}

/// Closed-form Jacobian of the SO(3) exponential map at the axis-angle
/// vector `a`, for increments expressed in the body frame.
///
/// Returns `I − f1·[a]× + f2·[a]×²` with `f1 = (1 − cos‖a‖)/‖a‖²` and
/// `f2 = (‖a‖ − sin‖a‖)/‖a‖³`; below the small-angle threshold the factors
/// switch to their Taylor limits `1/2` and `1/6`, so the function is defined
/// and continuous for all finite inputs, including the zero vector. Pure, no
/// side effects.
///
/// Estimators use this matrix to transport a tangent-space covariance block
/// through a quaternion retraction step.
pub fn left_jacobian<T: RealField + Copy>(a: &Vector3<T>) -> Matrix3<T> {
    let ak = skew(a);
    let ak2 = ak * ak;
    let norm = a.norm();

    let (factor1, factor2) = if norm >= T::from_subset(&SMALL_ANGLE) {
        let norm_sq = norm * norm;
        (
            (T::one() - norm.cos()) / norm_sq,
            (norm - norm.sin()) / (norm_sq * norm),
        )
    } else {
        (T::from_subset(&0.5), T::from_subset(&(1.0 / 6.0)))
    };

    Matrix3::identity() - ak * factor1 + ak2 * factor2
}

/// Canonical representative of `q` on the double cover: the antipode with a
/// non-negative real part.
///
/// Two antipodal unit quaternions describe the same rotation; this picks one
/// half consistently so that representations compare and store predictably.
/// Idempotent.
#[inline]
pub fn canonicalize<T: RealField + Copy>(q: &UnitQuaternion<T>) -> UnitQuaternion<T> {
    if q.quaternion().w < T::zero() {
        UnitQuaternion::new_unchecked(-*q.quaternion())
    } else {
        *q
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Matrix3, Vector3};

    #[test]
    fn skew_matches_cross_product() {
        let a = Vector3::new(0.3, -1.2, 2.5);
        let b = Vector3::new(-0.7, 0.4, 1.1);
        assert!((skew(&a) * b - a.cross(&b)).norm() < 1e-15);
        assert_eq!(skew(&a).transpose(), -skew(&a));
    }

    #[test]
    fn zero_angle_gives_identity() {
        assert_eq!(
            left_jacobian(&Vector3::<f64>::zeros()),
            Matrix3::identity()
        );
    }

    #[test]
    fn continuous_across_series_threshold() {
        let axis = Vector3::new(1.0, -2.0, 2.0).normalize();
        let below = left_jacobian(&(axis * 0.99e-10));
        let above = left_jacobian(&(axis * 1.01e-10));
        assert!((below - above).norm() < 1e-6);
    }

    #[test]
    fn small_angle_matches_series() {
        let a = Vector3::new(1.0e-5, 2.0e-5, -3.0e-5);
        let ak = skew(&a);
        let series = Matrix3::identity() - ak * 0.5 + ak * ak * (1.0 / 6.0);
        assert!((left_jacobian(&a) - series).norm() < 1e-9);
    }

    #[test]
    fn matches_finite_difference_of_exponential() {
        // Exp(a + h·e_k) ≈ Exp(a) ⊗ Exp(h · J(a) · e_k), so each column of
        // the Jacobian shows up as a one-sided difference quotient.
        let a = Vector3::new(0.3, -0.2, 0.5);
        let jacobian = left_jacobian(&a);
        let base = UnitQuaternion::from_scaled_axis(a);
        let h = 1.0e-6;

        for k in 0..3 {
            let mut perturbed = a;
            perturbed[k] += h;
            let step = (base.inverse() * UnitQuaternion::from_scaled_axis(perturbed)).scaled_axis();
            let numeric = step / h;
            assert!(
                (numeric - jacobian.column(k)).norm() < 1e-4,
                "column {} off by {:e}",
                k,
                (numeric - jacobian.column(k)).norm()
            );
        }
    }

    #[test]
    fn canonicalize_flips_negative_hemisphere() {
        let q = UnitQuaternion::from_euler_angles(0.4, -0.1, 1.2);
        let flipped = UnitQuaternion::new_unchecked(-q.into_inner());
        assert!(flipped.quaternion().w < 0.0);

        let fixed = canonicalize(&flipped);
        assert!(fixed.quaternion().w > 0.0);
        assert!((q.inverse() * fixed).angle() < 1e-12);
        assert_eq!(canonicalize(&fixed), fixed);

        let upright = UnitQuaternion::<f64>::identity();
        assert_eq!(canonicalize(&upright), upright);
    }
}
