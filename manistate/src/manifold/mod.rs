//! Manifold-based state representation support.
//!
//! This module provides the state containers and the trait for states that
//! live on manifolds. A manifold is a space that locally resembles Euclidean
//! space but may have different global properties (e.g., rotations on SO(3)).
//! Perturbations and covariances of such states are expressed in the flat
//! tangent space around the current state, and the [`Manifold`] trait defines
//! the two maps connecting the spaces.

use nalgebra::{RealField, SMatrix, SVector};

pub mod composite;
pub mod euclidean;

/// Tangent-space vector of a state with tangent dimension `D`.
pub type TangentVec<T, const D: usize> = SVector<T, D>;

/// Covariance over the tangent space of a state with tangent dimension `D`.
pub type CovMat<T, const D: usize> = SMatrix<T, D, D>;

/// A state type that lives on a manifold with a tangent space of dimension `D`.
///
/// The manifold trait provides operations for mapping between the manifold
/// and its tangent space:
/// - `retract`: Maps from tangent space to manifold (manifold-aware `+`)
/// - `local`: Maps from manifold to tangent space (manifold-aware `-`)
///
/// Both operations are pure: they return new values and never mutate their
/// inputs.
///
/// # Properties
///
/// Implementations must satisfy:
/// 1. `retract(x, local(x, y)) ≈ y` for all `x`, `y` on the manifold
/// 2. `local(x, retract(x, delta)) ≈ delta` for all `x` on the manifold and
///    all `delta` within the injectivity radius of the retraction (for
///    rotations, rotation-angle magnitude below `π`)
/// 3. `local(x, x) = 0` for all `x` on the manifold
/// 4. `retract(x, 0) = x` for all `x` on the manifold
pub trait Manifold<const D: usize, T: RealField + Copy>: Clone + Sized {
    /// Apply a tangent vector to this manifold point to get a new point.
    ///
    /// # Arguments
    /// * `delta` - A tangent vector to apply
    ///
    /// # Returns
    /// A new point on the manifold
    fn retract(&self, delta: &TangentVec<T, D>) -> Self;

    /// Compute the tangent vector from this point to another point.
    ///
    /// # Arguments
    /// * `other` - The target point on the manifold
    ///
    /// # Returns
    /// The tangent vector that maps from `self` to `other` via `retract`
    fn local(&self, other: &Self) -> TangentVec<T, D>;
}

#[cfg(test)]
mod tests {
    use super::composite::CompositeState;
    use super::euclidean::EuclideanState;
    use super::{Manifold, TangentVec};
    use nalgebra::SVector;

    fn check_retraction_laws<const D: usize, M>(
        a: &M,
        b: &M,
        delta: &TangentVec<f64, D>,
        tol: f64,
    ) where
        M: Manifold<D, f64>,
    {
        let zero = TangentVec::<f64, D>::zeros();
        assert!(
            a.local(&a.retract(&zero)).norm() <= tol,
            "retract by zero moved the point"
        );
        assert!(a.local(a).norm() == 0.0, "local of a point with itself");

        let recovered = a.local(&a.retract(delta));
        assert!(
            (recovered - delta).norm() <= tol,
            "local did not invert retract: residual {:e}",
            (recovered - delta).norm()
        );

        let reached = a.retract(&a.local(b));
        assert!(
            b.local(&reached).norm() <= tol,
            "retract did not invert local: residual {:e}",
            b.local(&reached).norm()
        );
    }

    #[test]
    fn composite_satisfies_retraction_laws() {
        type State = CompositeState<f64, 1, 1, 1, 7>;

        let mut seed = TangentVec::<f64, 7>::zeros();
        seed.copy_from_slice(&[0.4, 1.0, -2.0, 0.5, 0.3, -0.2, 0.1]);
        let a = State::identity().retract(&seed);

        seed.copy_from_slice(&[-0.1, 0.2, 0.7, -1.5, -0.4, 0.6, 0.2]);
        let b = State::identity().retract(&seed);

        let mut delta = TangentVec::<f64, 7>::zeros();
        delta.copy_from_slice(&[0.25, -0.5, 0.1, 0.0, 0.3, 0.1, -0.4]);

        check_retraction_laws(&a, &b, &delta, 1e-9);
    }

    #[test]
    fn euclidean_satisfies_retraction_laws() {
        let a = EuclideanState::from(SVector::<f64, 4>::new(1.0, -2.0, 0.5, 3.0));
        let b = EuclideanState::from(SVector::<f64, 4>::new(0.0, 4.0, -1.5, 2.0));
        let delta = SVector::<f64, 4>::new(0.1, 0.2, -0.3, 0.4);

        check_retraction_laws(&a, &b, &delta, 1e-12);
    }
}
