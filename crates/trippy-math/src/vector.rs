//! Direction-plus-magnitude vectors with a Cartesian or cylindrical basis.
//!
//! A [`DualVector`] stores a unit direction and a magnitude `s`, tagged with
//! the coordinate system the direction is written in:
//!
//! - **Cartesian**: `unit = (x̂, ŷ, ẑ)`, Euclidean norm 1. Components are
//!   `s * unit`.
//! - **Cylindrical**: `unit = (r̂, θ, ẑ)` with `r̂² + ẑ² = 1`. Components are
//!   `(s * r̂, θ, s * ẑ)`; the angle is never scaled.
//!
//! Binary operations accept any mix of kinds. Sums and differences are
//! formed in Cartesian space and written back in the left operand's kind.

use std::ops::{Add, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, Result};
use crate::{wrap_angle, Vec3};

/// The coordinate system a vector or frame is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoordKind {
    /// `(x, y, z)`.
    #[default]
    Cartesian,
    /// `(r, θ, z)` about the local z axis.
    Cylindrical,
}

/// A vector stored as a unit direction and a magnitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DualVector {
    unit: Vec3,
    s: f64,
    kind: CoordKind,
}

impl DualVector {
    /// Zero vector in the given kind.
    pub fn zero(kind: CoordKind) -> Self {
        Self {
            unit: Vec3::z(),
            s: 0.0,
            kind,
        }
    }

    /// Cartesian vector from components.
    pub fn cartesian(x: f64, y: f64, z: f64) -> Self {
        let v = Vec3::new(x, y, z);
        let s = v.norm();
        if s == 0.0 {
            return Self::zero(CoordKind::Cartesian);
        }
        Self {
            unit: v / s,
            s,
            kind: CoordKind::Cartesian,
        }
    }

    /// Cylindrical vector from `(r, θ, z)` components.
    ///
    /// A negative radius is folded onto the opposite angle.
    pub fn cylindrical(r: f64, theta: f64, z: f64) -> Self {
        let (r, theta) = if r < 0.0 { (-r, theta + std::f64::consts::PI) } else { (r, theta) };
        let theta = wrap_angle(theta);
        let s = r.hypot(z);
        if s == 0.0 {
            return Self {
                unit: Vec3::new(0.0, theta, 1.0),
                s: 0.0,
                kind: CoordKind::Cylindrical,
            };
        }
        Self {
            unit: Vec3::new(r / s, theta, z / s),
            s,
            kind: CoordKind::Cylindrical,
        }
    }

    /// Vector from components written in `kind`.
    pub fn from_components(c: [f64; 3], kind: CoordKind) -> Self {
        match kind {
            CoordKind::Cartesian => Self::cartesian(c[0], c[1], c[2]),
            CoordKind::Cylindrical => Self::cylindrical(c[0], c[1], c[2]),
        }
    }

    /// Vector from a component slice, which must hold exactly three entries.
    pub fn from_slice(c: &[f64], kind: CoordKind) -> Result<Self> {
        match c {
            [a, b, z] => Ok(Self::from_components([*a, *b, *z], kind)),
            _ => Err(GeometryError::InvalidDimension {
                expected: 3,
                found: c.len(),
            }),
        }
    }

    /// Vector from a direction and magnitude.
    ///
    /// The direction is renormalized; for cylindrical directions only the
    /// radial and axial entries take part in the norm.
    pub fn from_unit(unit: Vec3, s: f64, kind: CoordKind) -> Self {
        match kind {
            CoordKind::Cartesian => {
                if unit.norm() == 0.0 {
                    return Self::zero(kind);
                }
                Self::cartesian(unit.x, unit.y, unit.z).with_magnitude(s)
            }
            CoordKind::Cylindrical => {
                let n = unit.x.hypot(unit.z);
                if n == 0.0 {
                    return Self::zero(kind);
                }
                Self::cylindrical(s * unit.x / n, unit.y, s * unit.z / n)
            }
        }
    }

    /// Cartesian vector from an nalgebra vector.
    pub fn from_xyz(v: Vec3) -> Self {
        Self::cartesian(v.x, v.y, v.z)
    }

    /// Build a vector from Cartesian components, written in `kind`.
    ///
    /// The cylindrical angle comes from `atan2(y, x)`. The radius is
    /// `hypot(x, y)`, which equals `|x / cos θ|` without losing precision
    /// at `θ = ±π/2`.
    fn from_xyz_in(v: Vec3, kind: CoordKind) -> Self {
        match kind {
            CoordKind::Cartesian => Self::from_xyz(v),
            CoordKind::Cylindrical => {
                let theta = v.y.atan2(v.x);
                Self::cylindrical(v.x.hypot(v.y), theta, v.z)
            }
        }
    }

    /// Unit direction in this vector's own basis.
    pub fn unit(&self) -> Vec3 {
        self.unit
    }

    /// Magnitude.
    pub fn s(&self) -> f64 {
        self.s
    }

    /// Coordinate kind.
    pub fn kind(&self) -> CoordKind {
        self.kind
    }

    /// Cartesian components `(x, y, z)`.
    pub fn xyz(&self) -> Vec3 {
        match self.kind {
            CoordKind::Cartesian => self.unit * self.s,
            CoordKind::Cylindrical => {
                let (sin_t, cos_t) = self.unit.y.sin_cos();
                let r = self.s * self.unit.x;
                Vec3::new(r * cos_t, r * sin_t, self.s * self.unit.z)
            }
        }
    }

    /// Components in this vector's own kind: `(x, y, z)` or `(r, θ, z)`.
    pub fn components(&self) -> Vec3 {
        match self.kind {
            CoordKind::Cartesian => self.xyz(),
            CoordKind::Cylindrical => {
                Vec3::new(self.s * self.unit.x, self.unit.y, self.s * self.unit.z)
            }
        }
    }

    /// The same vector in Cartesian form.
    pub fn to_cartesian(&self) -> Self {
        match self.kind {
            CoordKind::Cartesian => *self,
            CoordKind::Cylindrical => {
                let (sin_t, cos_t) = self.unit.y.sin_cos();
                Self {
                    unit: Vec3::new(self.unit.x * cos_t, self.unit.x * sin_t, self.unit.z),
                    s: self.s,
                    kind: CoordKind::Cartesian,
                }
            }
        }
    }

    /// The same vector in cylindrical form.
    pub fn to_cylindrical(&self) -> Self {
        match self.kind {
            CoordKind::Cylindrical => *self,
            CoordKind::Cartesian => {
                let r = self.unit.x.hypot(self.unit.y);
                let theta = wrap_angle(self.unit.y.atan2(self.unit.x));
                Self {
                    unit: Vec3::new(r, theta, self.unit.z),
                    s: self.s,
                    kind: CoordKind::Cylindrical,
                }
            }
        }
    }

    /// The same vector written in `kind`.
    pub fn to_kind(&self, kind: CoordKind) -> Self {
        match kind {
            CoordKind::Cartesian => self.to_cartesian(),
            CoordKind::Cylindrical => self.to_cylindrical(),
        }
    }

    /// Inner product of the unit directions (the cosine of the angle
    /// between the two vectors). Magnitudes do not take part.
    pub fn dot(&self, other: &DualVector) -> f64 {
        match self.kind {
            CoordKind::Cartesian => self.unit.dot(&other.to_cartesian().unit),
            CoordKind::Cylindrical => {
                let o = other.to_cylindrical();
                self.unit.x * o.unit.x * (self.unit.y - o.unit.y).cos() + self.unit.z * o.unit.z
            }
        }
    }

    /// Cross product, written in the left operand's kind.
    ///
    /// The skew-symmetric matrix of this vector's Cartesian direction is
    /// applied to the other direction. The magnitude is `s₁ s₂ |û₁ × û₂|`,
    /// which is `s₁ s₂` for orthogonal operands.
    pub fn cross(&self, other: &DualVector) -> Self {
        let a = self.to_cartesian();
        let b = other.to_cartesian();
        let c = a.unit.cross_matrix() * b.unit;
        Self::from_xyz_in(c * (a.s * b.s), self.kind)
    }

    /// This vector scaled by `k`; a negative factor reverses it.
    pub fn scale(&self, k: f64) -> Self {
        if k >= 0.0 {
            return Self { s: self.s * k, ..*self };
        }
        Self::from_xyz_in(self.xyz() * k, self.kind)
    }

    /// This direction with magnitude `s`.
    pub fn with_magnitude(&self, s: f64) -> Self {
        Self { s: 1.0, ..*self }.scale(s)
    }

    /// This direction with unit magnitude.
    pub fn normalized(&self) -> Self {
        Self { s: 1.0, ..*self }
    }

    /// Whether two vectors describe the same displacement within `tol`.
    pub fn approx_eq(&self, other: &DualVector, tol: f64) -> bool {
        (self.xyz() - other.xyz()).norm() <= tol
    }
}

impl Add for DualVector {
    type Output = DualVector;

    fn add(self, rhs: DualVector) -> DualVector {
        DualVector::from_xyz_in(self.xyz() + rhs.xyz(), self.kind)
    }
}

impl Sub for DualVector {
    type Output = DualVector;

    fn sub(self, rhs: DualVector) -> DualVector {
        DualVector::from_xyz_in(self.xyz() - rhs.xyz(), self.kind)
    }
}

impl Neg for DualVector {
    type Output = DualVector;

    fn neg(self) -> DualVector {
        self.scale(-1.0)
    }
}

impl Mul<f64> for DualVector {
    type Output = DualVector;

    fn mul(self, k: f64) -> DualVector {
        self.scale(k)
    }
}

/// Angle between two vectors in radians.
pub fn angle(a: &DualVector, b: &DualVector) -> f64 {
    a.dot(b).clamp(-1.0, 1.0).acos()
}
