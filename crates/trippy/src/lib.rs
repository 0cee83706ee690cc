#![warn(missing_docs)]

//! trippy: frame-relative geometry for optical system modelling.
//!
//! Geometry lives in a tree of nested reference frames. Points, rays and
//! surfaces are anchored in a frame and can be re-expressed in any other
//! frame that shares their root. Surfaces are bounded rectangles, ellipses,
//! circles and cylindrical patches that answer ray intersection queries and
//! subdivide for finer sampling.
//!
//! # Example
//!
//! ```ignore
//! use trippy::{DualVector, FrameSpec, Session, Settings, Shape};
//!
//! let mut session = Session::new(Settings::default())?;
//! let root = session.root();
//! let mirror = session.surface(
//!     DualVector::cartesian(0.0, 0.0, 1.0),
//!     root,
//!     Shape::rect(1.0, 1.0)?,
//!     FrameSpec::angles(0.0, 0.0, 0.0),
//! )?;
//! let origin = session.point(DualVector::zero(session.settings().root_kind), root)?;
//! let ray = session.ray(origin, DualVector::cartesian(0.0, 0.0, 1.0))?;
//! assert_eq!(session.intercept(&mirror, &ray)?, Some(1.0));
//! ```

pub mod error;
pub mod session;
pub mod settings;

pub use error::{Result, TrippyError};
pub use session::Session;
pub use settings::Settings;

pub use trippy_frame::{Frame, FrameId, FrameSpec, FrameTree, Orientation, Point, Route};
pub use trippy_math::{
    angle, linspace, rotation_x, rotation_y, rotation_z, wrap_angle, CoordKind, DualVector,
    DualVectorBatch, GeometryError, Tolerance, Vec3,
};
pub use trippy_surface::{AnalyticCylinderSolver, CylinderRootSolver, Ray, Shape, Surface};
