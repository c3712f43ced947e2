//! Named field keys over a composite state via `state_layout!`.

use manimacros::state_layout;
use manistate::manifold::composite::CompositeState;
use manistate::manifold::{Manifold, TangentVec};
use nalgebra::Vector3;

state_layout! {
    pub mod pose {
        type State = CompositeState<f64, 0, 2, 1, 9>;
        scalars {}
        vectors { POSITION = 0, VELOCITY = 1 }
        quaternions { ATTITUDE = 0 }
    }
}

fn main() {
    let mut state = pose::State::identity();
    *state.vector_mut(0) = Vector3::new(1.0, 0.0, 0.0);

    println!("position rows start at {}", state.offset_of(pose::POSITION));
    println!("velocity rows start at {}", state.offset_of(pose::VELOCITY));
    println!("attitude rows start at {}", state.offset_of(pose::ATTITUDE));

    let mut delta = TangentVec::<f64, 9>::zeros();
    delta[state.offset_of(pose::VELOCITY) + 1] = 0.5;

    let moved = state.retract(&delta);
    println!("{}", moved);
}
