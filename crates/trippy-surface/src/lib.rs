#![warn(missing_docs)]

//! Bounded surfaces for the trippy geometry kernel.
//!
//! A [`Surface`] pairs a [`Shape`] with a frame of its own in a
//! [`trippy_frame::FrameTree`]. Surfaces answer ray intersection queries,
//! sample their boundary and subdivide into smaller surfaces. Cylinder
//! root finding goes through the [`CylinderRootSolver`] trait so callers can
//! plug in their own solver; [`AnalyticCylinderSolver`] is the closed-form
//! default.

mod edge;
pub mod intersect;
mod ray;
mod shape;
mod split;
mod surface;

pub use intersect::{AnalyticCylinderSolver, CylinderRootSolver};
pub use ray::Ray;
pub use shape::Shape;
pub use surface::Surface;
