mod blending;
mod kinematics;
mod properties;
mod scheduling;
