//! Positions anchored in a frame.

use trippy_math::{DualVector, Result};

use crate::tree::{FrameId, FrameTree};

/// A position fixed relative to a frame.
///
/// The offset is written in the anchoring frame's basis. A point only knows
/// its absolute position by walking the tree to a root.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub(crate) offset: DualVector,
    pub(crate) frame: FrameId,
}

impl Point {
    /// A point at `offset` in `frame`. The offset is used as given; see
    /// [`FrameTree::point`] for a checked constructor.
    pub fn new(offset: DualVector, frame: FrameId) -> Self {
        Self { offset, frame }
    }

    /// Offset from the frame origin.
    pub fn offset(&self) -> DualVector {
        self.offset
    }

    /// Frame the point is anchored in.
    pub fn frame(&self) -> FrameId {
        self.frame
    }

    /// Nesting depth: one more than the anchoring frame's.
    pub fn depth(&self, tree: &FrameTree) -> Result<usize> {
        Ok(tree.depth(self.frame)? + 1)
    }

    /// The point displaced by `v`, written in the same frame.
    pub fn translate(&self, v: &DualVector) -> Self {
        Self {
            offset: self.offset + *v,
            frame: self.frame,
        }
    }
}
