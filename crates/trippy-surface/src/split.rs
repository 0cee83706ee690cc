//! Subdivision of a surface into smaller surfaces.

use log::debug;
use trippy_frame::{FrameId, FrameSpec, FrameTree};
use trippy_math::{linspace, DualVector, DualVectorBatch, GeometryError, Result};

use crate::shape::Shape;
use crate::surface::Surface;

/// Centres of `n` equal cells covering `[-h, h]`.
fn centres(h: f64, n: usize) -> Vec<f64> {
    let c = h * (n - 1) as f64 / n as f64;
    linspace(-c, c, n)
}

fn check_counts(n_sagi: usize, n_meri: usize) -> Result<()> {
    if n_sagi == 0 || n_meri == 0 {
        return Err(GeometryError::OutOfRange(format!(
            "subdivision counts must be positive, got {n_sagi}x{n_meri}"
        )));
    }
    Ok(())
}

impl Surface {
    /// Split into `n_meri` rows of `n_sagi` surfaces each.
    ///
    /// Every piece gets a new frame under this surface's parent with the
    /// same orientation. For a cylinder the sagittal direction is the angle
    /// about the axis and the meridional direction is the axis itself; each
    /// piece's meridional axis is turned about the normal to its angular
    /// centre. Circles must be split evenly in both directions.
    pub fn split(&self, tree: &mut FrameTree, n_sagi: usize, n_meri: usize) -> Result<Vec<Vec<Surface>>> {
        check_counts(n_sagi, n_meri)?;
        let parent = self.parent(tree)?;
        let frame = tree.frame(self.frame())?;
        let (meri, norm, kind) = (frame.meri(), frame.norm(), frame.kind());

        let (shape, local) = match *self.shape() {
            Shape::Rect { half_sagi, half_meri } => (
                Shape::Rect {
                    half_sagi: half_sagi / n_sagi as f64,
                    half_meri: half_meri / n_meri as f64,
                },
                planar_grid(half_sagi, half_meri, n_sagi, n_meri),
            ),
            Shape::Ellipse { half_sagi, half_meri } => (
                Shape::Ellipse {
                    half_sagi: half_sagi / n_sagi as f64,
                    half_meri: half_meri / n_meri as f64,
                },
                planar_grid(half_sagi, half_meri, n_sagi, n_meri),
            ),
            Shape::Circle { radius } => {
                if n_sagi != n_meri {
                    return Err(GeometryError::OutOfRange(format!(
                        "a circle splits evenly only, got {n_sagi}x{n_meri}"
                    )));
                }
                (
                    Shape::Circle {
                        radius: radius / n_sagi as f64,
                    },
                    planar_grid(radius, radius, n_sagi, n_meri),
                )
            }
            Shape::Cylinder {
                radius,
                half_angle,
                half_length,
            } => {
                return self.split_cylinder(tree, parent, radius, half_angle, half_length, n_sagi, n_meri);
            }
        };

        let offsets = tree.redefine_batch(&DualVectorBatch::from_vectors(local, kind), self.frame(), parent)?;
        let spec = FrameSpec::vectors(meri, norm).with_kind(kind);
        let mut rows = Vec::with_capacity(n_meri);
        let mut it = offsets.iter();
        for _ in 0..n_meri {
            let mut row = Vec::with_capacity(n_sagi);
            for offset in it.by_ref().take(n_sagi) {
                row.push(Surface::new(tree, offset, parent, shape, spec)?);
            }
            rows.push(row);
        }
        debug!(
            "split {} {:?} into {n_sagi}x{n_meri}",
            self.shape().name(),
            self.frame()
        );
        Ok(rows)
    }

    #[allow(clippy::too_many_arguments)]
    fn split_cylinder(
        &self,
        tree: &mut FrameTree,
        parent: FrameId,
        radius: f64,
        half_angle: f64,
        half_length: f64,
        n_sagi: usize,
        n_meri: usize,
    ) -> Result<Vec<Vec<Surface>>> {
        let frame = tree.frame(self.frame())?;
        let (norm, kind) = (frame.norm(), frame.kind());
        let shape = Shape::Cylinder {
            radius,
            half_angle: half_angle / n_sagi as f64,
            half_length: half_length / n_meri as f64,
        };
        let phis = centres(half_angle, n_sagi);
        let merid = phis
            .iter()
            .map(|phi| {
                let local = DualVector::cartesian(phi.cos(), phi.sin(), 0.0);
                tree.transfer_direction(local, self.frame(), parent)
            })
            .collect::<Result<Vec<_>>>()?;

        let mut rows = Vec::with_capacity(n_meri);
        for z in centres(half_length, n_meri) {
            let offset = tree.transfer_vector(DualVector::cartesian(0.0, 0.0, z), self.frame(), parent)?;
            let mut row = Vec::with_capacity(n_sagi);
            for m in &merid {
                let spec = FrameSpec::vectors(*m, norm).with_kind(kind);
                row.push(Surface::new(tree, offset, parent, shape, spec)?);
            }
            rows.push(row);
        }
        debug!("split cylinder {:?} into {n_sagi}x{n_meri}", self.frame());
        Ok(rows)
    }

    /// Approximate a cylinder by flat rectangular facets inscribed as chords.
    ///
    /// Each facet's normal is the radial direction at its angular centre,
    /// its meridional axis is the cylinder axis, and it sits `R cos Δ` from
    /// the axis with sagittal half-width `R sin Δ`, where
    /// `Δ = half_angle / n_sagi`. Other shapes fail with `OutOfRange`.
    pub fn pixelate(&self, tree: &mut FrameTree, n_sagi: usize, n_meri: usize) -> Result<Vec<Vec<Surface>>> {
        check_counts(n_sagi, n_meri)?;
        let Shape::Cylinder {
            radius,
            half_angle,
            half_length,
        } = *self.shape()
        else {
            return Err(GeometryError::OutOfRange(format!(
                "only a cylinder can be pixelated, got {}",
                self.shape().name()
            )));
        };
        let parent = self.parent(tree)?;
        let kind = tree.frame(self.frame())?.kind();
        let delta = half_angle / n_sagi as f64;
        let shape = Shape::Rect {
            half_sagi: radius * delta.sin(),
            half_meri: half_length / n_meri as f64,
        };
        let axis = tree.transfer_direction(DualVector::cartesian(0.0, 0.0, 1.0), self.frame(), parent)?;
        let phis = centres(half_angle, n_sagi);

        let mut rows = Vec::with_capacity(n_meri);
        for z in centres(half_length, n_meri) {
            let mut row = Vec::with_capacity(n_sagi);
            for &phi in &phis {
                let (s, c) = phi.sin_cos();
                let d = radius * delta.cos();
                let offset = tree.transfer_vector(DualVector::cartesian(d * c, d * s, z), self.frame(), parent)?;
                let radial = tree.transfer_direction(DualVector::cartesian(c, s, 0.0), self.frame(), parent)?;
                let spec = FrameSpec::vectors(axis, radial).with_kind(kind);
                row.push(Surface::new(tree, offset, parent, shape, spec)?);
            }
            rows.push(row);
        }
        debug!("pixelated cylinder {:?} into {n_sagi}x{n_meri} facets", self.frame());
        Ok(rows)
    }
}

/// Local centre offsets for a planar split, row-major by meridional index.
fn planar_grid(half_sagi: f64, half_meri: f64, n_sagi: usize, n_meri: usize) -> Vec<DualVector> {
    let sagi = centres(half_sagi, n_sagi);
    centres(half_meri, n_meri)
        .into_iter()
        .flat_map(|m| sagi.iter().map(move |&s| DualVector::cartesian(m, s, 0.0)))
        .collect()
}
