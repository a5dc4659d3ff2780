//! Simulation and effect systems.
//!
//! The core simulation runs in `FixedUpdate`, ordered by
//! [`crate::SimSet`]; effect systems run in `Update`.

pub mod collision;
pub mod firing;
pub mod kinematics;
pub mod logic;
pub mod vfx;
pub mod waves;
