//! Explicit batches of vectors sharing one coordinate kind.
//!
//! A batch stores a 3xN direction matrix and N magnitudes. There is no
//! implicit broadcasting: every operation is a map over the columns.

use nalgebra::DMatrix;

use crate::error::{GeometryError, Result};
use crate::vector::{CoordKind, DualVector};
use crate::Mat3xN;

/// N vectors with a shared [`CoordKind`].
#[derive(Debug, Clone, PartialEq)]
pub struct DualVectorBatch {
    units: Mat3xN,
    s: Vec<f64>,
    kind: CoordKind,
}

impl DualVectorBatch {
    /// Build a batch from unit directions (one per column) and magnitudes.
    pub fn new(units: Mat3xN, s: Vec<f64>, kind: CoordKind) -> Result<Self> {
        if s.len() != units.ncols() {
            return Err(GeometryError::InvalidDimension {
                expected: units.ncols(),
                found: s.len(),
            });
        }
        let vectors = units
            .column_iter()
            .zip(&s)
            .map(|(u, &s)| DualVector::from_unit(u.into_owned(), s, kind));
        Ok(Self::from_vectors(vectors, kind))
    }

    /// Build a batch from a component matrix with one vector per column.
    ///
    /// Components are read in `kind`: `(x, y, z)` or `(r, θ, z)`.
    pub fn from_matrix(m: &DMatrix<f64>, kind: CoordKind) -> Result<Self> {
        if m.nrows() != 3 {
            return Err(GeometryError::InvalidDimension {
                expected: 3,
                found: m.nrows(),
            });
        }
        let vectors = m
            .column_iter()
            .map(|c| DualVector::from_components([c[0], c[1], c[2]], kind));
        Ok(Self::from_vectors(vectors, kind))
    }

    /// Collect vectors into a batch, converting each to `kind`.
    pub fn from_vectors<I>(vectors: I, kind: CoordKind) -> Self
    where
        I: IntoIterator<Item = DualVector>,
    {
        let vectors: Vec<DualVector> = vectors.into_iter().map(|v| v.to_kind(kind)).collect();
        let mut units = Mat3xN::zeros(vectors.len());
        for (mut col, v) in units.column_iter_mut().zip(&vectors) {
            col.copy_from(&v.unit());
        }
        Self {
            units,
            s: vectors.iter().map(DualVector::s).collect(),
            kind,
        }
    }

    /// Number of vectors.
    pub fn len(&self) -> usize {
        self.s.len()
    }

    /// Whether the batch is empty.
    pub fn is_empty(&self) -> bool {
        self.s.is_empty()
    }

    /// Coordinate kind shared by all vectors.
    pub fn kind(&self) -> CoordKind {
        self.kind
    }

    /// Unit directions, one per column.
    pub fn units(&self) -> &Mat3xN {
        &self.units
    }

    /// Magnitudes.
    pub fn magnitudes(&self) -> &[f64] {
        &self.s
    }

    /// The `i`th vector.
    pub fn get(&self, i: usize) -> Option<DualVector> {
        let s = *self.s.get(i)?;
        Some(self.vector_at(i, s))
    }

    fn vector_at(&self, i: usize, s: f64) -> DualVector {
        let u = self.units.column(i);
        match self.kind {
            CoordKind::Cartesian => DualVector::from_unit(u.into_owned(), s, self.kind),
            CoordKind::Cylindrical => DualVector::cylindrical(s * u[0], u[1], s * u[2]),
        }
    }

    /// Iterate over the vectors in order.
    pub fn iter(&self) -> impl Iterator<Item = DualVector> + '_ {
        self.s.iter().enumerate().map(|(i, &s)| self.vector_at(i, s))
    }

    /// Apply `f` to every vector; results are stored in this batch's kind.
    pub fn map<F>(&self, f: F) -> Self
    where
        F: FnMut(DualVector) -> DualVector,
    {
        Self::from_vectors(self.iter().map(f), self.kind)
    }

    /// Apply a fallible `f` to every vector, stopping at the first error.
    pub fn try_map<F>(&self, mut f: F) -> Result<Self>
    where
        F: FnMut(DualVector) -> Result<DualVector>,
    {
        let vectors = self.iter().map(&mut f).collect::<Result<Vec<_>>>()?;
        Ok(Self::from_vectors(vectors, self.kind))
    }

    /// The batch written in `kind`.
    pub fn to_kind(&self, kind: CoordKind) -> Self {
        Self::from_vectors(self.iter(), kind)
    }

    /// Cartesian components, one vector per column.
    pub fn xyz(&self) -> Mat3xN {
        let mut out = Mat3xN::zeros(self.len());
        for (mut col, v) in out.column_iter_mut().zip(self.iter()) {
            col.copy_from(&v.xyz());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Vec3;
    use std::f64::consts::PI;

    #[test]
    fn test_from_matrix_dimension_guard() {
        let m = DMatrix::<f64>::zeros(2, 4);
        let err = DualVectorBatch::from_matrix(&m, CoordKind::Cartesian).unwrap_err();
        assert_eq!(
            err,
            GeometryError::InvalidDimension {
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn test_new_magnitude_count_guard() {
        let units = Mat3xN::from_columns(&[Vec3::x(), Vec3::y()]);
        assert!(DualVectorBatch::new(units.clone(), vec![1.0], CoordKind::Cartesian).is_err());
        let batch = DualVectorBatch::new(units, vec![2.0, 3.0], CoordKind::Cartesian).unwrap();
        assert_eq!(batch.len(), 2);
        let v = batch.get(1).unwrap();
        assert!((v.xyz() - Vec3::new(0.0, 3.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn test_cylindrical_columns() {
        let m = DMatrix::from_column_slice(3, 2, &[1.0, PI / 2.0, 0.0, 2.0, PI, 1.0]);
        let batch = DualVectorBatch::from_matrix(&m, CoordKind::Cylindrical).unwrap();
        let xyz = batch.xyz();
        assert!(xyz[(0, 0)].abs() < 1e-12);
        assert!((xyz[(1, 0)] - 1.0).abs() < 1e-12);
        assert!((xyz[(0, 1)] + 2.0).abs() < 1e-12);
        assert!((xyz[(2, 1)] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_map_is_elementwise() {
        let batch = DualVectorBatch::from_vectors(
            [
                DualVector::cartesian(1.0, 0.0, 0.0),
                DualVector::cartesian(0.0, 2.0, 0.0),
            ],
            CoordKind::Cylindrical,
        );
        let shifted = batch.map(|v| v + DualVector::cartesian(0.0, 0.0, 1.0));
        assert_eq!(shifted.kind(), CoordKind::Cylindrical);
        let out: Vec<Vec3> = shifted.iter().map(|v| v.xyz()).collect();
        assert!((out[0] - Vec3::new(1.0, 0.0, 1.0)).norm() < 1e-12);
        assert!((out[1] - Vec3::new(0.0, 2.0, 1.0)).norm() < 1e-12);
    }
}
