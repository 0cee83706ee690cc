//! Bounded surfaces attached to their own frame.

use trippy_frame::{FrameId, FrameSpec, FrameTree, Point};
use trippy_math::{DualVector, GeometryError, Result};

use crate::intersect::{intersect_cylinder, intersect_planar, CylinderRootSolver};
use crate::ray::Ray;
use crate::shape::Shape;

/// A shape placed in the frame tree.
///
/// Each surface owns one frame, created under a parent at construction. The
/// shape is described in that frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    frame: FrameId,
    shape: Shape,
}

impl Surface {
    /// Place `shape` at `offset` under `parent`, oriented by `spec`.
    pub fn new(
        tree: &mut FrameTree,
        offset: DualVector,
        parent: FrameId,
        shape: Shape,
        spec: FrameSpec,
    ) -> Result<Self> {
        shape.validate()?;
        let frame = tree.add_frame(offset, parent, spec)?;
        Ok(Self { frame, shape })
    }

    /// The surface's own frame.
    pub fn frame(&self) -> FrameId {
        self.frame
    }

    /// The surface's shape.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Surface area.
    pub fn area(&self) -> f64 {
        self.shape.area()
    }

    /// Frame the surface is positioned in.
    pub fn parent(&self, tree: &FrameTree) -> Result<FrameId> {
        tree.parent(self.frame)?
            .ok_or_else(|| GeometryError::FrameMismatch("surface frame has no parent".into()))
    }

    /// Move the surface's frame under `to` without moving the surface.
    pub fn redefine(&self, tree: &mut FrameTree, to: FrameId) -> Result<()> {
        tree.redefine(self.frame, to)
    }

    /// Drop the surface's frame from the tree.
    ///
    /// Fails with `FrameMismatch` while other frames hang off it.
    pub fn remove(self, tree: &mut FrameTree) -> Result<()> {
        tree.remove(self.frame)?;
        Ok(())
    }

    /// Distance along `ray` to the surface, or `None` on a miss.
    ///
    /// The ray must be written in this surface's frame. Planar shapes are
    /// intersected as a full line, so a plane behind the origin reports a
    /// negative distance. A cylinder reports only hits ahead of the origin,
    /// refined once by the tree's linear tolerance when the first root
    /// falls outside the angular window.
    pub fn intercept(
        &self,
        tree: &FrameTree,
        ray: &Ray,
        solver: &dyn CylinderRootSolver,
    ) -> Result<Option<f64>> {
        if ray.frame() != self.frame {
            return Err(GeometryError::FrameMismatch(
                "ray must be written in the surface frame".into(),
            ));
        }
        tree.frame(self.frame)?;
        let origin = ray.origin().offset().xyz();
        let direction = ray.direction().xyz();

        let hit = match self.shape {
            Shape::Cylinder {
                radius,
                half_angle,
                half_length,
            } => {
                let step = tree.tolerance().linear;
                intersect_cylinder(&origin, &direction, radius, half_angle, half_length, step, solver)
            }
            planar => intersect_planar(&origin, &direction)
                .filter(|h| planar.edge_test(h.sagi, h.meri))
                .map(|h| h.s),
        };
        Ok(hit)
    }

    /// Like [`Surface::intercept`], re-expressing a copy of the ray first.
    pub fn intercept_any(
        &self,
        tree: &FrameTree,
        ray: &Ray,
        solver: &dyn CylinderRootSolver,
    ) -> Result<Option<f64>> {
        let local = ray.in_frame(tree, self.frame)?;
        self.intercept(tree, &local, solver)
    }

    /// Hit point in the surface frame, or `None` on a miss.
    pub fn hit_point(
        &self,
        tree: &FrameTree,
        ray: &Ray,
        solver: &dyn CylinderRootSolver,
    ) -> Result<Option<Point>> {
        let local = ray.in_frame(tree, self.frame)?;
        Ok(self
            .intercept(tree, &local, solver)?
            .map(|s| local.point_at(s)))
    }
}
