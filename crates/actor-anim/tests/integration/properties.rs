//! Property tests for interpolation and solving

use actor_anim::animation::nlerp;
use actor_anim::{JointPose, SkeletonInstance};
use glam::{Quat, Vec3};
use proptest::prelude::*;

use crate::support::chain;

/// Sample component: mostly ordinary values, sometimes garbage
fn component() -> impl Strategy<Value = f32> {
    prop_oneof![
        8 => -100.0f32..100.0,
        1 => Just(f32::NAN),
        1 => Just(f32::INFINITY),
        1 => Just(f32::NEG_INFINITY),
    ]
}

fn pose() -> impl Strategy<Value = Option<JointPose>> {
    proptest::option::of(
        (component(), component(), component(), component(), component(), component(), component())
            .prop_map(|(qx, qy, qz, qw, tx, ty, tz)| {
                JointPose::new(Quat::from_xyzw(qx, qy, qz, qw), Vec3::new(tx, ty, tz))
            }),
    )
}

fn unit_quat() -> impl Strategy<Value = Quat> {
    (-1.0f32..1.0, -1.0f32..1.0, -1.0f32..1.0, 0.1f32..1.0)
        .prop_map(|(x, y, z, w)| Quat::from_xyzw(x, y, z, w).normalize())
}

proptest! {
    #[test]
    fn test_nlerp_is_unit_length(a in unit_quat(), b in unit_quat(), t in 0.0f32..=1.0) {
        let q = nlerp(a, b, t);
        prop_assert!((q.length() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_nlerp_hits_endpoints(a in unit_quat(), b in unit_quat()) {
        let start = nlerp(a, b, 0.0);
        prop_assert!(start.abs_diff_eq(a, 1e-5));
        let end = nlerp(a, b, 1.0);
        prop_assert!(end.abs_diff_eq(b, 1e-5) || end.abs_diff_eq(-b, 1e-5));
    }

    #[test]
    fn test_solver_output_is_always_finite(poses in proptest::collection::vec(pose(), 5)) {
        let mut instance = SkeletonInstance::new(chain(5));
        instance.solve(&poses[..]);

        for state in instance.states() {
            prop_assert!(state.world_position.is_finite());
            prop_assert!((state.world_rotation.length() - 1.0).abs() < 1e-4);
        }
    }
}
