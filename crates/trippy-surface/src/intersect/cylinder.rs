//! Ray-cylinder intersection with angular windowing.

use std::fmt;

use log::trace;
use trippy_math::Vec3;

/// Root finder for a ray against a finite cylinder about the local z axis.
///
/// Implementations return the nearest distance along the ray beyond their
/// own minimum distance at which the ray meets the cylinder of `radius`
/// with `|z| ≤ half_length`, or `None`.
pub trait CylinderRootSolver: Send + Sync + fmt::Debug {
    /// Nearest admissible root.
    fn solve(&self, origin: &Vec3, direction: &Vec3, radius: f64, half_length: f64) -> Option<f64>;
}

/// Closed-form quadratic solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalyticCylinderSolver {
    /// Roots at or below this distance are skipped.
    pub min_distance: f64,
}

impl AnalyticCylinderSolver {
    /// Solver skipping roots at or below `min_distance`.
    pub fn new(min_distance: f64) -> Self {
        Self { min_distance }
    }
}

impl Default for AnalyticCylinderSolver {
    fn default() -> Self {
        Self { min_distance: 1e-9 }
    }
}

impl CylinderRootSolver for AnalyticCylinderSolver {
    fn solve(&self, origin: &Vec3, direction: &Vec3, radius: f64, half_length: f64) -> Option<f64> {
        // |p_xy + t d_xy|² = r²
        let a = direction.x * direction.x + direction.y * direction.y;
        if a < 1e-12 {
            return None;
        }
        let b = 2.0 * (origin.x * direction.x + origin.y * direction.y);
        let c = origin.x * origin.x + origin.y * origin.y - radius * radius;
        let disc = b * b - 4.0 * a * c;
        if disc < 0.0 {
            return None;
        }
        let sq = disc.sqrt();
        [(-b - sq) / (2.0 * a), (-b + sq) / (2.0 * a)]
            .into_iter()
            .find(|&t| t > self.min_distance && (origin.z + t * direction.z).abs() <= half_length)
    }
}

fn in_window(p: &Vec3, half_angle: f64) -> bool {
    p.y.atan2(p.x).abs() <= half_angle
}

/// Intersect a ray with a cylindrical patch.
///
/// The solver's candidate is checked against the angular window. A miss
/// gets one refinement pass: the ray restarts `step` beyond the candidate,
/// so the candidate itself lies behind the new origin, and the solver is
/// queried again. The returned distance is measured from the original
/// origin. Only roots ahead of the origin are reported.
pub fn intersect_cylinder(
    origin: &Vec3,
    direction: &Vec3,
    radius: f64,
    half_angle: f64,
    half_length: f64,
    step: f64,
    solver: &dyn CylinderRootSolver,
) -> Option<f64> {
    let first = solver.solve(origin, direction, radius, half_length)?;
    let p = origin + direction * first;
    if in_window(&p, half_angle) {
        trace!("cylinder hit at s = {first}");
        return Some(first);
    }
    trace!("cylinder candidate s = {first} outside ±{half_angle} rad, refining");
    let step = step.max(f64::EPSILON);
    let start = p + direction * step;
    let second = solver.solve(&start, direction, radius, half_length)?;
    let q = start + direction * second;
    if in_window(&q, half_angle) {
        let total = first + step + second;
        trace!("cylinder hit after refinement at s = {total}");
        Some(total)
    } else {
        None
    }
}
