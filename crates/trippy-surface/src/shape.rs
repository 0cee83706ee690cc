//! Closed set of bounded surface shapes.

use std::f64::consts::PI;

use trippy_math::{wrap_angle, GeometryError, Result};

/// Shape of a bounded surface in its own frame.
///
/// Planar shapes lie in the local `z = 0` plane with the meridional axis
/// along local x and the sagittal axis along local y. The cylinder's axis
/// is the local z axis through the frame origin; its surface points are
/// `(R cos φ, R sin φ, z)` with `|φ| ≤ half_angle` and `|z| ≤ half_length`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Rectangle with half-widths along the sagittal and meridional axes.
    Rect {
        /// Sagittal half-width.
        half_sagi: f64,
        /// Meridional half-width.
        half_meri: f64,
    },
    /// Ellipse with semi-axes along the sagittal and meridional axes.
    Ellipse {
        /// Sagittal semi-axis.
        half_sagi: f64,
        /// Meridional semi-axis.
        half_meri: f64,
    },
    /// Disc of the given radius.
    Circle {
        /// Radius.
        radius: f64,
    },
    /// Cylindrical patch.
    Cylinder {
        /// Radius of curvature.
        radius: f64,
        /// Angular half-width in radians, below π.
        half_angle: f64,
        /// Half-length along the axis.
        half_length: f64,
    },
}

fn positive(name: &str, v: f64) -> Result<()> {
    if v > 0.0 && v.is_finite() {
        Ok(())
    } else {
        Err(GeometryError::OutOfRange(format!(
            "{name} must be positive and finite, got {v}"
        )))
    }
}

impl Shape {
    /// Checked rectangle.
    pub fn rect(half_sagi: f64, half_meri: f64) -> Result<Self> {
        let s = Self::Rect { half_sagi, half_meri };
        s.validate()?;
        Ok(s)
    }

    /// Checked ellipse.
    pub fn ellipse(half_sagi: f64, half_meri: f64) -> Result<Self> {
        let s = Self::Ellipse { half_sagi, half_meri };
        s.validate()?;
        Ok(s)
    }

    /// Checked circle.
    pub fn circle(radius: f64) -> Result<Self> {
        let s = Self::Circle { radius };
        s.validate()?;
        Ok(s)
    }

    /// Checked cylindrical patch.
    pub fn cylinder(radius: f64, half_angle: f64, half_length: f64) -> Result<Self> {
        let s = Self::Cylinder {
            radius,
            half_angle,
            half_length,
        };
        s.validate()?;
        Ok(s)
    }

    /// Reject non-positive extents and cylinders spanning a full turn.
    pub fn validate(&self) -> Result<()> {
        match *self {
            Self::Rect { half_sagi, half_meri } | Self::Ellipse { half_sagi, half_meri } => {
                positive("half_sagi", half_sagi)?;
                positive("half_meri", half_meri)
            }
            Self::Circle { radius } => positive("radius", radius),
            Self::Cylinder {
                radius,
                half_angle,
                half_length,
            } => {
                positive("radius", radius)?;
                positive("half_angle", half_angle)?;
                positive("half_length", half_length)?;
                if half_angle >= PI {
                    return Err(GeometryError::OutOfRange(format!(
                        "cylinder half_angle must be below π, got {half_angle}"
                    )));
                }
                Ok(())
            }
        }
    }

    /// Short lowercase name, for messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Rect { .. } => "rect",
            Self::Ellipse { .. } => "ellipse",
            Self::Circle { .. } => "circle",
            Self::Cylinder { .. } => "cylinder",
        }
    }

    /// Containment test in local coordinates.
    ///
    /// For the cylinder `sagi` is the angle about the axis and `meri` the
    /// axial coordinate. Boundaries are inclusive.
    pub fn edge_test(&self, sagi: f64, meri: f64) -> bool {
        match *self {
            Self::Rect { half_sagi, half_meri } => sagi.abs() <= half_sagi && meri.abs() <= half_meri,
            Self::Ellipse { half_sagi, half_meri } => {
                (sagi / half_sagi).powi(2) + (meri / half_meri).powi(2) <= 1.0
            }
            Self::Circle { radius } => sagi * sagi + meri * meri <= radius * radius,
            Self::Cylinder {
                half_angle,
                half_length,
                ..
            } => wrap_angle(sagi).abs() <= half_angle && meri.abs() <= half_length,
        }
    }

    /// Surface area.
    pub fn area(&self) -> f64 {
        match *self {
            Self::Rect { half_sagi, half_meri } => 4.0 * half_sagi * half_meri,
            Self::Ellipse { half_sagi, half_meri } => PI * half_sagi * half_meri,
            Self::Circle { radius } => PI * radius * radius,
            Self::Cylinder {
                radius,
                half_angle,
                half_length,
            } => 4.0 * radius * half_angle * half_length,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ellipse_edge() {
        let e = Shape::ellipse(1.0, 0.5).unwrap();
        assert!(e.edge_test(0.5, 0.0));
        assert!(!e.edge_test(0.0, 0.6));
        assert!(e.edge_test(1.0, 0.0));
    }

    #[test]
    fn test_rect_edge_is_closed() {
        let r = Shape::rect(1.0, 2.0).unwrap();
        assert!(r.edge_test(1.0, -2.0));
        assert!(!r.edge_test(1.0 + 1e-9, 0.0));
        assert!(!r.edge_test(0.0, 2.1));
    }

    #[test]
    fn test_circle_edge() {
        let c = Shape::circle(2.0).unwrap();
        assert!(c.edge_test(1.2, 1.5));
        assert!(!c.edge_test(1.5, 1.5));
    }

    #[test]
    fn test_cylinder_half_angle_bound() {
        assert!(matches!(
            Shape::cylinder(1.0, PI, 1.0),
            Err(GeometryError::OutOfRange(_))
        ));
        assert!(Shape::cylinder(1.0, PI - 1e-6, 1.0).is_ok());
    }

    #[test]
    fn test_non_positive_extents_rejected() {
        assert!(Shape::rect(0.0, 1.0).is_err());
        assert!(Shape::ellipse(1.0, -1.0).is_err());
        assert!(Shape::circle(f64::NAN).is_err());
        assert!(Shape::cylinder(1.0, 0.5, 0.0).is_err());
    }

    #[test]
    fn test_cylinder_edge_wraps_angle() {
        let c = Shape::cylinder(1.0, 0.5, 1.0).unwrap();
        assert!(c.edge_test(0.4 + 2.0 * PI, 0.0));
        assert!(!c.edge_test(0.6, 0.0));
        assert!(!c.edge_test(0.0, 1.5));
    }

    #[test]
    fn test_area() {
        assert!((Shape::rect(1.0, 2.0).unwrap().area() - 8.0).abs() < 1e-12);
        assert!((Shape::circle(1.0).unwrap().area() - PI).abs() < 1e-12);
        let c = Shape::cylinder(2.0, PI / 2.0, 1.0).unwrap();
        // half the lateral area of a full cylinder of length 2
        assert!((c.area() - 2.0 * PI * 2.0 * 2.0 / 2.0).abs() < 1e-12);
    }
}
