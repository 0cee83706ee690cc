//! Rays anchored in a frame.

use trippy_frame::{FrameId, FrameTree, Point};
use trippy_math::{DualVector, DualVectorBatch, GeometryError, Result};

/// A line through an origin point, with a unit direction written in the
/// origin's frame.
///
/// Parameters along the ray may be negative. Whether a surface accepts a
/// hit behind the origin depends on the surface family.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    origin: Point,
    direction: DualVector,
}

impl Ray {
    /// Create a ray. The direction is normalized and must be non-zero.
    pub fn new(origin: Point, direction: DualVector) -> Result<Self> {
        if direction.s() == 0.0 || !direction.s().is_finite() {
            return Err(GeometryError::OutOfRange(
                "ray direction must be non-zero and finite".into(),
            ));
        }
        Ok(Self {
            origin,
            direction: direction.normalized(),
        })
    }

    /// Ray from `from` towards `to`, anchored in `from`'s frame.
    pub fn through(tree: &FrameTree, from: &Point, to: &Point) -> Result<Self> {
        let target = tree.point_in(to, from.frame())?;
        Self::new(*from, tree.point_between(from, &target)?)
    }

    /// Start point.
    pub fn origin(&self) -> &Point {
        &self.origin
    }

    /// Unit direction.
    pub fn direction(&self) -> DualVector {
        self.direction
    }

    /// Frame the ray is written in.
    pub fn frame(&self) -> FrameId {
        self.origin.frame()
    }

    /// Position at distance `s` along the ray, in the origin's frame.
    pub fn at(&self, s: f64) -> DualVector {
        self.origin.offset() + self.direction * s
    }

    /// Point at distance `s` along the ray.
    pub fn point_at(&self, s: f64) -> Point {
        Point::new(self.at(s), self.frame())
    }

    /// Positions at each distance in `s`.
    pub fn sample(&self, s: &[f64]) -> DualVectorBatch {
        DualVectorBatch::from_vectors(s.iter().map(|&t| self.at(t)), self.origin.offset().kind())
    }

    /// Re-express the ray in frame `to`.
    pub fn redefine(&mut self, tree: &FrameTree, to: FrameId) -> Result<()> {
        self.direction = tree.transfer_direction(self.direction, self.frame(), to)?;
        tree.redefine_point(&mut self.origin, to)
    }

    /// Copy of the ray written in frame `to`.
    pub fn in_frame(&self, tree: &FrameTree, to: FrameId) -> Result<Self> {
        let mut ray = *self;
        ray.redefine(tree, to)?;
        Ok(ray)
    }
}
