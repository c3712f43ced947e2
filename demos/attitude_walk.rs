//! Random-walk of an attitude + gyro-bias state.
//!
//! Demonstrates the consumer pattern the reverse lookup exists for: the
//! estimator finds the attitude block of the tangent covariance through
//! `offset_of` and transports it through the exponential-map Jacobian on
//! every retraction step.

use core::f64::consts::PI;

use manistate::manifold::composite::{CompositeState, FieldKey};
use manistate::manifold::{CovMat, Manifold, TangentVec};
use manistate::so3;
use nalgebra::Vector3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

type WalkState = CompositeState<f64, 0, 1, 1, 6>;

fn main() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut state = WalkState::identity();

    let bias_offset = state.offset_of(FieldKey::Vector(0));
    let attitude_offset = state.offset_of(FieldKey::Quaternion(0));

    let mut covariance = CovMat::<f64, 6>::identity() * 1e-4;
    let step_noise = 1e-5;

    for _ in 0..200 {
        let mut delta = TangentVec::<f64, 6>::zeros();
        for k in 0..6 {
            delta[k] = rng.gen_range(-0.02..0.02);
        }
        let rotation_step: Vector3<f64> = delta.fixed_rows::<3>(attitude_offset).into_owned();

        // First-order transport: the attitude block rides through the
        // exponential-map Jacobian, the bias block is flat.
        let jacobian = so3::left_jacobian(&rotation_step);
        let attitude_cov = covariance
            .fixed_view::<3, 3>(attitude_offset, attitude_offset)
            .into_owned();
        covariance
            .fixed_view_mut::<3, 3>(attitude_offset, attitude_offset)
            .copy_from(&(jacobian * attitude_cov * jacobian.transpose()));
        covariance += CovMat::<f64, 6>::identity() * step_noise;

        state = state.retract(&delta);
    }

    state.fix();

    println!("final state:\n{}", state);
    println!("bias tangent rows start at {}", bias_offset);
    println!("attitude tangent rows start at {}", attitude_offset);
    println!("covariance trace: {:.6e}", covariance.trace());

    let total = WalkState::identity().local(&state);
    let total_rotation = total.fixed_rows::<3>(attitude_offset).norm();
    assert!(total_rotation < PI, "walk left the injectivity radius");
    println!("total rotation from identity: {:.4} rad", total_rotation);
}
