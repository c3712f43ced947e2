//! Manifold state representations for recursive estimators.
//!
//! State vectors that embed orientations do not form a vector space: adding
//! an increment to a unit quaternion breaks the unit norm, and two antipodal
//! quaternions describe the same rotation. This crate provides composite
//! states over scalars, 3-vectors, and unit quaternions together with the
//! retraction pair mapping them to and from flat tangent-space coordinates,
//! plus the SO(3) Jacobian helper estimators use to propagate covariance
//! through a retraction step.
//!
//! The filtering algorithms consuming these states (prediction/update
//! recursions, noise models, measurement models) live outside this crate and
//! interact with it only through [`manifold::Manifold`], the field accessors,
//! and [`manifold::composite::CompositeState::offset_of`].

pub mod manifold;
pub mod so3;
