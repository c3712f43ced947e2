//! Declarative helpers for naming the fields of a composite manifold state.

#[doc(hidden)]
pub use manistate::manifold::composite::FieldKey as __FieldKey;

/// Declares a module of named field keys for one composite state type.
///
/// The generated module exposes a `State` alias plus one
/// [`FieldKey`](manistate::manifold::composite::FieldKey) constant per field,
/// so estimator code resolves tangent offsets by name instead of hardcoded
/// ordinals. All three sections must be present; leave a section's braces
/// empty when the state has no fields of that kind.
///
/// ```rust,ignore
/// state_layout! {
///     pub mod pose {
///         type State = CompositeState<f64, 0, 2, 1, 9>;
///         scalars {}
///         vectors { POSITION = 0, VELOCITY = 1 }
///         quaternions { ATTITUDE = 0 }
///     }
/// }
///
/// let state = pose::State::identity();
/// assert_eq!(state.offset_of(pose::VELOCITY), 3);
/// ```
#[macro_export]
macro_rules! state_layout {
    (
        $vis:vis mod $name:ident {
            type State = $state:ty;
            scalars { $($sname:ident = $sidx:expr),* $(,)? }
            vectors { $($vname:ident = $vidx:expr),* $(,)? }
            quaternions { $($qname:ident = $qidx:expr),* $(,)? }
        }
    ) => {
        $vis mod $name {
            #[allow(unused_imports)]
            use super::*;

            /// The composite state type this layout names.
            pub type State = $state;

            $(pub const $sname: $crate::__FieldKey = $crate::__FieldKey::Scalar($sidx);)*
            $(pub const $vname: $crate::__FieldKey = $crate::__FieldKey::Vector($vidx);)*
            $(pub const $qname: $crate::__FieldKey = $crate::__FieldKey::Quaternion($qidx);)*
        }
    };
}

#[cfg(test)]
mod tests {
    use manistate::manifold::composite::CompositeState;

    state_layout! {
        mod imu {
            type State = CompositeState<f64, 2, 1, 1, 8>;
            scalars { TIME_OFFSET = 0, SCALE_ERROR = 1 }
            vectors { GYRO_BIAS = 0 }
            quaternions { ATTITUDE = 0 }
        }
    }

    #[test]
    fn keys_resolve_to_flat_offsets() {
        let state = imu::State::identity();
        assert_eq!(state.offset_of(imu::TIME_OFFSET), 0);
        assert_eq!(state.offset_of(imu::SCALE_ERROR), 1);
        assert_eq!(state.offset_of(imu::GYRO_BIAS), 2);
        assert_eq!(state.offset_of(imu::ATTITUDE), 5);
    }

    state_layout! {
        mod bias_only {
            type State = CompositeState<f64, 0, 1, 0, 3>;
            scalars {}
            vectors { ACCEL_BIAS = 0 }
            quaternions {}
        }
    }

    #[test]
    fn empty_sections_are_accepted() {
        let state = bias_only::State::identity();
        assert_eq!(state.offset_of(bias_only::ACCEL_BIAS), 0);
    }
}
