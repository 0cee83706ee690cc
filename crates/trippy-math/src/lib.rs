#![warn(missing_docs)]

//! Math types for the trippy geometry kernel.
//!
//! Thin wrappers around nalgebra providing the vector algebra used by
//! the frame tree and surface crates: dual Cartesian/cylindrical vectors,
//! explicit vector batches, rotation helpers and tolerance constants.

pub mod batch;
pub mod error;
pub mod vector;

pub use batch::DualVectorBatch;
pub use error::{GeometryError, Result};
pub use vector::{angle, CoordKind, DualVector};

use nalgebra::{Matrix3, Matrix3xX, Vector3};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// A plain Cartesian 3-vector.
pub type Vec3 = Vector3<f64>;

/// A 3x3 matrix, used for frame rotations.
pub type Mat3 = Matrix3<f64>;

/// A 3xN matrix holding one column per batched vector.
pub type Mat3xN = Matrix3xX<f64>;

/// Rotation about the X axis by `angle` radians.
pub fn rotation_x(angle: f64) -> Mat3 {
    let (s, c) = angle.sin_cos();
    Mat3::new(1.0, 0.0, 0.0, 0.0, c, -s, 0.0, s, c)
}

/// Rotation about the Y axis by `angle` radians.
pub fn rotation_y(angle: f64) -> Mat3 {
    let (s, c) = angle.sin_cos();
    Mat3::new(c, 0.0, s, 0.0, 1.0, 0.0, -s, 0.0, c)
}

/// Rotation about the Z axis by `angle` radians.
pub fn rotation_z(angle: f64) -> Mat3 {
    let (s, c) = angle.sin_cos();
    Mat3::new(c, -s, 0.0, s, c, 0.0, 0.0, 0.0, 1.0)
}

/// Wrap an angle into the canonical branch `(-π, π]`.
pub fn wrap_angle(theta: f64) -> f64 {
    if theta > -PI && theta <= PI {
        return theta;
    }
    let r = theta.rem_euclid(2.0 * PI);
    if r > PI {
        r - 2.0 * PI
    } else {
        r
    }
}

/// `n` evenly spaced samples from `start` to `end` inclusive.
///
/// A single sample sits at `start`.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}

/// Tolerance constants for geometric comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tolerance {
    /// Linear distance tolerance in meters.
    pub linear: f64,
    /// Angular tolerance in radians.
    pub angular: f64,
}

impl Tolerance {
    /// Default tolerances (1e-9 m linear, 1e-9 rad angular).
    pub const DEFAULT: Self = Self {
        linear: 1e-9,
        angular: 1e-9,
    };

    /// Check if a scalar distance is effectively zero.
    pub fn is_zero(&self, d: f64) -> bool {
        d.abs() < self.linear
    }

    /// Check if two angles are effectively equal (in radians).
    pub fn angles_equal(&self, a: f64, b: f64) -> bool {
        wrap_angle(a - b).abs() < self.angular
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}
