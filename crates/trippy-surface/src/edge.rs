//! Boundary sampling.

use std::f64::consts::PI;

use trippy_frame::{FrameTree, Point};
use trippy_math::{linspace, DualVector, DualVectorBatch, GeometryError, Result, Vec3};

use crate::shape::Shape;
use crate::surface::Surface;

/// `n` samples from `a` towards `b`, excluding `b`.
fn side(a: f64, b: f64, n: usize) -> impl Iterator<Item = f64> {
    linspace(a, b, n + 1).into_iter().take(n)
}

/// Closed outline in local coordinates, first point repeated at the end.
fn outline(shape: &Shape, resolution: usize) -> Vec<Vec3> {
    let n = resolution;
    let mut pts = Vec::with_capacity(4 * n + 1);
    match *shape {
        Shape::Rect { half_sagi, half_meri } => {
            let (hs, hm) = (half_sagi, half_meri);
            pts.extend(side(-hm, hm, n).map(|m| Vec3::new(m, -hs, 0.0)));
            pts.extend(side(-hs, hs, n).map(|s| Vec3::new(hm, s, 0.0)));
            pts.extend(side(hm, -hm, n).map(|m| Vec3::new(m, hs, 0.0)));
            pts.extend(side(hs, -hs, n).map(|s| Vec3::new(-hm, s, 0.0)));
            pts.push(pts[0]);
        }
        Shape::Ellipse { half_sagi, half_meri } => {
            pts.extend(
                linspace(0.0, 2.0 * PI, n)
                    .into_iter()
                    .map(|t| Vec3::new(half_meri * t.sin(), half_sagi * t.cos(), 0.0)),
            );
        }
        Shape::Circle { radius } => {
            pts.extend(
                linspace(0.0, 2.0 * PI, n)
                    .into_iter()
                    .map(|t| Vec3::new(radius * t.sin(), radius * t.cos(), 0.0)),
            );
        }
        Shape::Cylinder {
            radius,
            half_angle,
            half_length,
        } => {
            let (ha, hl) = (half_angle, half_length);
            let at = |phi: f64, z: f64| Vec3::new(radius * phi.cos(), radius * phi.sin(), z);
            pts.extend(side(-ha, ha, n).map(|phi| at(phi, -hl)));
            pts.extend(side(-hl, hl, n).map(|z| at(ha, z)));
            pts.extend(side(ha, -ha, n).map(|phi| at(phi, hl)));
            pts.extend(side(hl, -hl, n).map(|z| at(-ha, z)));
            pts.push(pts[0]);
        }
    }
    pts
}

impl Surface {
    /// Closed boundary as points in the surface's parent frame.
    ///
    /// Rectangles and cylinders get `resolution` samples per side, starting
    /// at the `(-sagi, -meri)` corner and turning counter-clockwise about
    /// the local normal; ellipses and circles get `resolution` samples over
    /// a full turn. Fails with `OutOfRange` below two samples.
    pub fn edge(&self, tree: &FrameTree, resolution: usize) -> Result<Vec<Point>> {
        if resolution < 2 {
            return Err(GeometryError::OutOfRange(format!(
                "edge resolution must be at least 2, got {resolution}"
            )));
        }
        let parent = self.parent(tree)?;
        let kind = tree.frame(self.frame())?.kind();
        let local = DualVectorBatch::from_vectors(
            outline(self.shape(), resolution).into_iter().map(DualVector::from_xyz),
            kind,
        );
        let moved = tree.redefine_batch(&local, self.frame(), parent)?;
        Ok(moved.iter().map(|v| Point::new(v, parent)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use trippy_frame::FrameSpec;
    use trippy_math::CoordKind;

    #[test]
    fn test_rect_outline() {
        let pts = outline(&Shape::rect(1.0, 2.0).unwrap(), 4);
        assert_eq!(pts.len(), 17);
        assert_relative_eq!(pts[0], Vec3::new(-2.0, -1.0, 0.0));
        assert_relative_eq!(pts[4], Vec3::new(2.0, -1.0, 0.0));
        assert_relative_eq!(pts[8], Vec3::new(2.0, 1.0, 0.0));
        assert_relative_eq!(pts[12], Vec3::new(-2.0, 1.0, 0.0));
        assert_eq!(pts[0], pts[16]);
    }

    #[test]
    fn test_ellipse_outline_on_boundary() {
        let shape = Shape::ellipse(1.0, 0.5).unwrap();
        let pts = outline(&shape, 16);
        assert_eq!(pts.len(), 16);
        assert_relative_eq!(pts[0], pts[15], epsilon = 1e-12);
        for p in &pts {
            let r = (p.y / 1.0).powi(2) + (p.x / 0.5).powi(2);
            assert!((r - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_cylinder_outline_on_surface() {
        let shape = Shape::cylinder(2.0, 0.8, 1.0).unwrap();
        let pts = outline(&shape, 3);
        assert_eq!(pts.len(), 13);
        for p in &pts {
            assert!((p.x.hypot(p.y) - 2.0).abs() < 1e-12);
            assert!(p.y.atan2(p.x).abs() <= 0.8 + 1e-12);
        }
        assert!((pts[0].z + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_edge_in_parent_frame() {
        let mut tree = FrameTree::new();
        let root = tree.add_root(CoordKind::Cartesian);
        let rect = Surface::new(
            &mut tree,
            DualVector::cartesian(0.0, 0.0, 3.0),
            root,
            Shape::rect(1.0, 1.0).unwrap(),
            FrameSpec::angles(0.0, 0.0, 0.0),
        )
        .unwrap();
        let pts = rect.edge(&tree, 2).unwrap();
        assert_eq!(pts.len(), 9);
        assert!(pts.iter().all(|p| p.frame() == root));
        assert_relative_eq!(pts[0].offset().xyz(), Vec3::new(-1.0, -1.0, 3.0), epsilon = 1e-12);
    }

    #[test]
    fn test_low_resolution_rejected() {
        let mut tree = FrameTree::new();
        let root = tree.add_root(CoordKind::Cartesian);
        let disc = Surface::new(
            &mut tree,
            DualVector::zero(CoordKind::Cartesian),
            root,
            Shape::circle(1.0).unwrap(),
            FrameSpec::angles(0.0, 0.0, 0.0),
        )
        .unwrap();
        assert!(matches!(disc.edge(&tree, 1), Err(GeometryError::OutOfRange(_))));
    }
}
