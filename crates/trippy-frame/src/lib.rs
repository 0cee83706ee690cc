#![warn(missing_docs)]

//! Reference frames for the trippy geometry kernel.
//!
//! Frames form a forest stored in a [`FrameTree`] arena and addressed by
//! opaque [`FrameId`] keys. Every frame except a root is positioned and
//! oriented relative to its parent; a [`Point`] is an offset fixed in one
//! frame. Re-expressing a point or frame in another frame walks the two
//! ancestor chains up to their least common ancestor and back down.
//!
//! # Example
//!
//! ```ignore
//! use trippy_frame::{FrameSpec, FrameTree};
//! use trippy_math::{CoordKind, DualVector};
//!
//! let mut tree = FrameTree::new();
//! let root = tree.add_root(CoordKind::Cartesian);
//! let lens = tree.add_frame(
//!     DualVector::cartesian(0.0, 0.0, 1.0),
//!     root,
//!     FrameSpec::angles(0.0, 0.0, 0.0),
//! )?;
//! let p = tree.point(DualVector::cartesian(0.1, 0.0, 0.0), lens)?;
//! let in_root = tree.point_in(&p, root)?;
//! ```

mod frame;
mod point;
mod tree;

pub use frame::{Frame, FrameSpec, Orientation};
pub use point::Point;
pub use tree::{FrameId, FrameTree, Route};
