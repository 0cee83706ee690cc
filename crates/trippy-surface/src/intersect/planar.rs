//! Ray-plane intersection by a 3x3 linear solve.

use trippy_math::{Mat3, Vec3};

/// Solution of a ray-plane system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanarHit {
    /// Parameter along the ray.
    pub s: f64,
    /// Meridional coordinate of the hit (local x).
    pub meri: f64,
    /// Sagittal coordinate of the hit (local y).
    pub sagi: f64,
}

/// Intersect a ray with the local `z = 0` plane.
///
/// Solves `[d | e_meri | e_sagi] x = o - p` for the ray origin `p`,
/// direction `d` and plane origin `o`. The hit lies at `-x₁` along the
/// meridional axis and `-x₂` along the sagittal one. Returns `None` when the
/// ray is parallel to the plane. The parameter may be negative: the line is
/// intersected, not only the forward half.
pub fn intersect_planar(origin: &Vec3, direction: &Vec3) -> Option<PlanarHit> {
    let m = Mat3::from_columns(&[*direction, Vec3::x(), Vec3::y()]);
    if m.determinant().abs() < 1e-12 {
        return None;
    }
    let rhs = -*origin;
    let x = m.lu().solve(&rhs)?;
    Some(PlanarHit {
        s: x[0],
        meri: -x[1],
        sagi: -x[2],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normal_incidence() {
        let hit = intersect_planar(&Vec3::new(0.0, 0.0, -1.0), &Vec3::z()).unwrap();
        assert!((hit.s - 1.0).abs() < 1e-12);
        assert!(hit.meri.abs() < 1e-12);
        assert!(hit.sagi.abs() < 1e-12);
    }

    #[test]
    fn test_offset_hit_coordinates() {
        let d = Vec3::new(1.0, 0.0, 1.0).normalize();
        let hit = intersect_planar(&Vec3::new(0.5, -0.25, -2.0), &d).unwrap();
        assert!((hit.s - 2.0 * 2f64.sqrt()).abs() < 1e-12);
        assert!((hit.meri - 2.5).abs() < 1e-12);
        assert!((hit.sagi + 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_parallel_ray_misses() {
        assert!(intersect_planar(&Vec3::new(0.0, 0.0, 1.0), &Vec3::x()).is_none());
    }

    #[test]
    fn test_hit_behind_origin() {
        let hit = intersect_planar(&Vec3::new(0.0, 0.0, 3.0), &Vec3::z()).unwrap();
        assert!((hit.s + 3.0).abs() < 1e-12);
    }
}
