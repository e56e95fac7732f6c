//! Skeleton hierarchy and pose solving

mod hierarchy;
mod solver;

pub use hierarchy::{Joint, JointHierarchy};
pub use solver::{BindPose, JointRuntimeState, PoseSolver, PoseSource, SkeletonInstance};
