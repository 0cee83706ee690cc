//! Oriented frames and how they are specified.

use trippy_math::{
    rotation_x, rotation_y, rotation_z, CoordKind, DualVector, GeometryError, Mat3, Result,
    Tolerance,
};

use crate::tree::FrameId;

/// How a frame's triad is given relative to its parent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Orientation {
    /// Meridional axis and principal axis, written in the parent's basis.
    /// The two must be orthogonal; sagittal is `norm × meri`.
    Vectors {
        /// Meridional ray direction (local x).
        meri: DualVector,
        /// Principal axis (local z).
        norm: DualVector,
    },
    /// Euler angles in radians.
    Angles {
        /// Rotation of the principal axis within the meridional plane.
        alpha: f64,
        /// Rotation about the meridional ray axis.
        beta: f64,
        /// Rotation about the principal axis.
        gamma: f64,
    },
}

/// Builder for frame construction inputs.
///
/// Exactly one of basis vectors or Euler angles must be given; the
/// coordinate kind is inherited from the parent unless set.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameSpec {
    vectors: Option<(DualVector, DualVector)>,
    angles: Option<[f64; 3]>,
    kind: Option<CoordKind>,
}

impl FrameSpec {
    /// An empty spec. Resolving it fails until an orientation is supplied.
    pub fn new() -> Self {
        Self::default()
    }

    /// Orientation from meridional and principal axis vectors.
    pub fn vectors(meri: DualVector, norm: DualVector) -> Self {
        Self::new().with_vectors(meri, norm)
    }

    /// Orientation from Euler angles.
    pub fn angles(alpha: f64, beta: f64, gamma: f64) -> Self {
        Self::new().with_angles(alpha, beta, gamma)
    }

    /// Set the basis vectors.
    pub fn with_vectors(mut self, meri: DualVector, norm: DualVector) -> Self {
        self.vectors = Some((meri, norm));
        self
    }

    /// Set the Euler angles.
    pub fn with_angles(mut self, alpha: f64, beta: f64, gamma: f64) -> Self {
        self.angles = Some([alpha, beta, gamma]);
        self
    }

    /// Override the coordinate kind.
    pub fn with_kind(mut self, kind: CoordKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// The explicit coordinate kind, if any.
    pub fn kind(&self) -> Option<CoordKind> {
        self.kind
    }

    /// Resolve to a single orientation.
    pub fn orientation(&self) -> Result<Orientation> {
        match (self.vectors, self.angles) {
            (Some((meri, norm)), None) => Ok(Orientation::Vectors { meri, norm }),
            (None, Some([alpha, beta, gamma])) => Ok(Orientation::Angles { alpha, beta, gamma }),
            (None, None) => Err(GeometryError::AmbiguousConstruction(
                "a frame needs either basis vectors or Euler angles".into(),
            )),
            (Some(_), Some(_)) => Err(GeometryError::AmbiguousConstruction(
                "basis vectors and Euler angles are mutually exclusive".into(),
            )),
        }
    }
}

impl From<Orientation> for FrameSpec {
    fn from(o: Orientation) -> Self {
        match o {
            Orientation::Vectors { meri, norm } => Self::vectors(meri, norm),
            Orientation::Angles { alpha, beta, gamma } => Self::angles(alpha, beta, gamma),
        }
    }
}

/// A point with an orthonormal triad, positioned in its parent frame.
///
/// The triad is stored in the parent's Cartesian basis. `rotation` has the
/// rows `[meri, sagi, norm]`, so it maps parent components to local ones;
/// its transpose maps local components back to the parent.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub(crate) offset: DualVector,
    pub(crate) parent: Option<FrameId>,
    pub(crate) children: Vec<FrameId>,
    pub(crate) depth: usize,
    pub(crate) meri: DualVector,
    pub(crate) sagi: DualVector,
    pub(crate) norm: DualVector,
    pub(crate) rotation: Mat3,
    pub(crate) kind: CoordKind,
}

impl Frame {
    pub(crate) fn root(kind: CoordKind) -> Self {
        Self {
            offset: DualVector::zero(kind),
            parent: None,
            children: Vec::new(),
            depth: 0,
            meri: DualVector::cartesian(1.0, 0.0, 0.0),
            sagi: DualVector::cartesian(0.0, 1.0, 0.0),
            norm: DualVector::cartesian(0.0, 0.0, 1.0),
            rotation: Mat3::identity(),
            kind,
        }
    }

    pub(crate) fn child(
        offset: DualVector,
        parent: FrameId,
        depth: usize,
        orientation: Orientation,
        kind: CoordKind,
        tol: &Tolerance,
    ) -> Result<Self> {
        let (meri, norm) = match orientation {
            Orientation::Vectors { meri, norm } => {
                if tol.is_zero(meri.s()) || tol.is_zero(norm.s()) {
                    return Err(GeometryError::AmbiguousConstruction(
                        "basis vectors must be non-zero".into(),
                    ));
                }
                let cos = meri.dot(&norm);
                if cos.abs() > tol.angular.max(f64::EPSILON * 16.0) {
                    return Err(GeometryError::AmbiguousConstruction(format!(
                        "basis vectors are not orthogonal (cos = {cos:e})"
                    )));
                }
                (meri.to_cartesian(), norm.to_cartesian())
            }
            Orientation::Angles { alpha, beta, gamma } => {
                let m = rotation_y(alpha) * rotation_x(beta) * rotation_z(gamma);
                (
                    DualVector::from_xyz(m.column(0).into_owned()),
                    DualVector::from_xyz(m.column(2).into_owned()),
                )
            }
        };
        let sagi = norm.cross(&meri);
        let mut frame = Self {
            offset,
            parent: Some(parent),
            children: Vec::new(),
            depth,
            meri,
            sagi,
            norm,
            rotation: Mat3::identity(),
            kind,
        };
        frame.update_rotation();
        Ok(frame)
    }

    /// Replace the triad, keeping the stored sagittal magnitude.
    pub(crate) fn set_triad(&mut self, meri: DualVector, norm: DualVector) {
        let sagi_s = self.sagi.s();
        self.meri = meri.to_cartesian();
        self.norm = norm.to_cartesian();
        self.sagi = self.norm.cross(&self.meri).with_magnitude(sagi_s);
        self.update_rotation();
    }

    fn update_rotation(&mut self) {
        self.rotation = Mat3::from_rows(&[
            self.meri.unit().transpose(),
            self.sagi.unit().transpose(),
            self.norm.unit().transpose(),
        ]);
    }

    /// Offset of this frame's origin in its parent frame.
    pub fn offset(&self) -> DualVector {
        self.offset
    }

    /// Parent frame, `None` for a root.
    pub fn parent(&self) -> Option<FrameId> {
        self.parent
    }

    /// Frames positioned directly in this one.
    pub fn children(&self) -> &[FrameId] {
        &self.children
    }

    /// Nesting depth; roots are 0.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Whether this frame is a root.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Meridional axis (local x) in the parent basis.
    pub fn meri(&self) -> DualVector {
        self.meri
    }

    /// Sagittal axis (local y) in the parent basis.
    pub fn sagi(&self) -> DualVector {
        self.sagi
    }

    /// Principal axis (local z) in the parent basis.
    pub fn norm(&self) -> DualVector {
        self.norm
    }

    /// Rotation matrix with rows `[meri, sagi, norm]`.
    pub fn rotation(&self) -> &Mat3 {
        &self.rotation
    }

    /// Coordinate kind that vectors in this frame are written in.
    pub fn kind(&self) -> CoordKind {
        self.kind
    }

    /// Rotate a vector from this frame's basis into the parent's basis.
    pub fn to_parent(&self, v: &DualVector) -> DualVector {
        let c = v.to_cartesian();
        DualVector::from_unit(self.rotation.transpose() * c.unit(), c.s(), CoordKind::Cartesian)
    }

    /// Rotate a vector from the parent's basis into this frame's basis.
    pub fn from_parent(&self, v: &DualVector) -> DualVector {
        let c = v.to_cartesian();
        DualVector::from_unit(self.rotation * c.unit(), c.s(), CoordKind::Cartesian)
    }
}
