//! Composite manifold state for heterogeneous estimator states.
//!
//! This container combines a fixed number of scalar, 3-vector, and unit
//! quaternion fields into one state (e.g., attitude + velocity + biases).
//! The tangent space is flat and ordered: all scalar slots first, then all
//! vector slots, then all quaternion slots. Scalars and vectors retract by
//! plain addition; quaternions retract through the exponential map with the
//! increment expressed in the base orientation's body frame.

use core::fmt;

use nalgebra::{RealField, UnitQuaternion, Vector3};

use super::{Manifold, TangentVec};
use crate::so3;

/// Typed handle naming one field of a [`CompositeState`].
///
/// Keys decouple estimator bookkeeping from the flat tangent layout: a
/// consumer keeps the key of a logical quantity and asks
/// [`CompositeState::offset_of`] which tangent (and covariance) rows belong
/// to it, instead of hardcoding offsets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldKey {
    /// Scalar field by ordinal.
    Scalar(usize),
    /// 3-vector field by ordinal.
    Vector(usize),
    /// Unit-quaternion field by ordinal.
    Quaternion(usize),
}

/// Composite manifold state with `S` scalars, `V` 3-vectors, and `Q` unit
/// quaternions.
///
/// The tangent space has dimension `D = S + 3 * (V + Q)`: each scalar
/// contributes one slot, each vector and each quaternion three (a unit
/// quaternion is 3-dimensional on the manifold despite its 4-parameter
/// representation). `D` is passed explicitly because stable Rust cannot
/// derive it from the other parameters at the type level; the equality is
/// checked when a state is constructed.
///
/// Every quaternion field is unit-norm after any operation of this type.
#[derive(Clone, Debug, PartialEq)]
pub struct CompositeState<T, const S: usize, const V: usize, const Q: usize, const D: usize>
where
    T: RealField + Copy,
{
    scalars: [T; S],
    vectors: [Vector3<T>; V],
    quaternions: [UnitQuaternion<T>; Q],
}

impl<T, const S: usize, const V: usize, const Q: usize, const D: usize>
    CompositeState<T, S, V, Q, D>
where
    T: RealField + Copy,
{
    /// Tangent-space dimension of this state shape.
    pub const TANGENT_DIM: usize = S + 3 * (V + Q);

    // Evaluated on construction; rejects shapes where `D` does not match the
    // field counts.
    const SHAPE_OK: () = assert!(
        D == S + 3 * (V + Q),
        "tangent dimension D must equal S + 3 * (V + Q)"
    );

    /// Identity state: scalars zero, vectors zero, quaternions identity
    /// rotation.
    pub fn identity() -> Self {
        let _ = Self::SHAPE_OK;
        Self {
            scalars: [T::zero(); S],
            vectors: [Vector3::zeros(); V],
            quaternions: [UnitQuaternion::identity(); Q],
        }
    }

    /// Reset to the identity state in place.
    pub fn set_identity(&mut self) {
        *self = Self::identity();
    }

    /// Scalar field `i`.
    ///
    /// # Panics
    /// Panics if `i >= S`.
    #[inline]
    pub fn scalar(&self, i: usize) -> T {
        self.scalars[i]
    }

    /// Mutable scalar field `i`.
    ///
    /// # Panics
    /// Panics if `i >= S`.
    #[inline]
    pub fn scalar_mut(&mut self, i: usize) -> &mut T {
        &mut self.scalars[i]
    }

    /// Vector field `i`.
    ///
    /// # Panics
    /// Panics if `i >= V`.
    #[inline]
    pub fn vector(&self, i: usize) -> &Vector3<T> {
        &self.vectors[i]
    }

    /// Mutable vector field `i`.
    ///
    /// # Panics
    /// Panics if `i >= V`.
    #[inline]
    pub fn vector_mut(&mut self, i: usize) -> &mut Vector3<T> {
        &mut self.vectors[i]
    }

    /// Quaternion field `i`.
    ///
    /// # Panics
    /// Panics if `i >= Q`.
    #[inline]
    pub fn quaternion(&self, i: usize) -> &UnitQuaternion<T> {
        &self.quaternions[i]
    }

    /// Mutable quaternion field `i`.
    ///
    /// # Panics
    /// Panics if `i >= Q`.
    #[inline]
    pub fn quaternion_mut(&mut self, i: usize) -> &mut UnitQuaternion<T> {
        &mut self.quaternions[i]
    }

    /// Flat tangent offset of the field named by `key`.
    ///
    /// The returned offset is the first tangent row (and covariance
    /// row/column) belonging to the field; a scalar spans one row, a vector
    /// or quaternion three.
    ///
    /// # Panics
    /// Panics if the ordinal in `key` is out of range for this state shape.
    pub fn offset_of(&self, key: FieldKey) -> usize {
        match key {
            FieldKey::Scalar(i) => {
                assert!(i < S, "scalar ordinal out of range");
                i
            }
            FieldKey::Vector(i) => {
                assert!(i < V, "vector ordinal out of range");
                S + 3 * i
            }
            FieldKey::Quaternion(i) => {
                assert!(i < Q, "quaternion ordinal out of range");
                S + 3 * V + 3 * i
            }
        }
    }

    /// Re-canonicalize every quaternion field to the non-negative real
    /// hemisphere of the double cover.
    ///
    /// Idempotent; the represented rotations do not change. Canonicalization
    /// is on demand only: [`Manifold::retract`] renormalizes but leaves the
    /// sign of the representation alone, and [`Manifold::local`] is
    /// insensitive to it.
    pub fn fix(&mut self) {
        for q in &mut self.quaternions {
            *q = so3::canonicalize(q);
        }
    }
}

impl<T, const S: usize, const V: usize, const Q: usize, const D: usize> Default
    for CompositeState<T, S, V, Q, D>
where
    T: RealField + Copy,
{
    fn default() -> Self {
        Self::identity()
    }
}

impl<T, const S: usize, const V: usize, const Q: usize, const D: usize> Manifold<D, T>
    for CompositeState<T, S, V, Q, D>
where
    T: RealField + Copy,
{
    fn retract(&self, delta: &TangentVec<T, D>) -> Self {
        let mut out = self.clone();
        let mut index = 0;
        for i in 0..S {
            out.scalars[i] = self.scalars[i] + delta[index];
            index += 1;
        }
        for i in 0..V {
            out.vectors[i] = self.vectors[i] + delta.fixed_rows::<3>(index).into_owned();
            index += 3;
        }
        for i in 0..Q {
            let step: Vector3<T> = delta.fixed_rows::<3>(index).into_owned();
            if step.norm() >= T::default_epsilon() {
                let mut q = self.quaternions[i] * UnitQuaternion::from_scaled_axis(step);
                q.renormalize(); // Ensure unit length for low-precision types
                out.quaternions[i] = q;
            }
            index += 3;
        }
        out
    }

    fn local(&self, other: &Self) -> TangentVec<T, D> {
        let mut out: TangentVec<T, D> = TangentVec::zeros();
        let mut index = 0;
        for i in 0..S {
            out[index] = other.scalars[i] - self.scalars[i];
            index += 1;
        }
        for i in 0..V {
            out.fixed_rows_mut::<3>(index)
                .copy_from(&(other.vectors[i] - self.vectors[i]));
            index += 3;
        }
        for i in 0..Q {
            // Minimal-rotation logarithm of the relative rotation; the
            // double cover is resolved inside `scaled_axis`.
            let relative = self.quaternions[i].inverse() * other.quaternions[i];
            out.fixed_rows_mut::<3>(index)
                .copy_from(&relative.scaled_axis());
            index += 3;
        }
        out
    }
}

impl<T, const S: usize, const V: usize, const Q: usize, const D: usize> fmt::Display
    for CompositeState<T, S, V, Q, D>
where
    T: RealField + Copy + fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "scalars:")?;
        for s in &self.scalars {
            writeln!(f, "  {}", s)?;
        }
        writeln!(f, "vectors:")?;
        for v in &self.vectors {
            writeln!(f, "  [{}, {}, {}]", v.x, v.y, v.z)?;
        }
        writeln!(f, "quaternions:")?;
        for q in &self.quaternions {
            let q = q.quaternion();
            writeln!(f, "  [w: {}, x: {}, y: {}, z: {}]", q.w, q.i, q.j, q.k)?;
        }
        Ok(())
    }
}
