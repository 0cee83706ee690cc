//! Ray-surface intersection in a surface's local frame.
//!
//! Every routine here works on plain local coordinates: the ray origin and
//! unit direction are already written in the surface's frame, so the
//! surface origin is the frame origin.

mod cylinder;
mod planar;

pub use cylinder::{intersect_cylinder, AnalyticCylinderSolver, CylinderRootSolver};
pub use planar::{intersect_planar, PlanarHit};
