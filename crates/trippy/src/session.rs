//! A geometry session: one frame tree, its root and a cylinder solver.

use log::debug;
use trippy_frame::{FrameId, FrameSpec, FrameTree, Point};
use trippy_math::{DualVector, GeometryError};
use trippy_surface::{AnalyticCylinderSolver, CylinderRootSolver, Ray, Shape, Surface};

use crate::error::Result;
use crate::settings::Settings;

/// Owns the frame tree for one geometric scene.
///
/// The root frame is created explicitly at construction. Queries borrow the
/// session shared; anything that adds, moves or drops frames borrows it
/// mutably.
#[derive(Debug)]
pub struct Session {
    tree: FrameTree,
    root: FrameId,
    settings: Settings,
    solver: Box<dyn CylinderRootSolver>,
}

impl Session {
    /// New session with the analytic cylinder solver.
    pub fn new(settings: Settings) -> Result<Self> {
        let solver = AnalyticCylinderSolver::new(settings.solver_min_distance);
        Self::with_solver(settings, Box::new(solver))
    }

    /// New session with a caller-supplied cylinder solver.
    pub fn with_solver(settings: Settings, solver: Box<dyn CylinderRootSolver>) -> Result<Self> {
        settings.validate()?;
        let mut tree = FrameTree::with_tolerance(settings.tolerance);
        let root = tree.add_root(settings.root_kind);
        debug!("session started with {solver:?}");
        Ok(Self {
            tree,
            root,
            settings,
            solver,
        })
    }

    /// The root frame.
    pub fn root(&self) -> FrameId {
        self.root
    }

    /// Active settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The frame tree.
    pub fn tree(&self) -> &FrameTree {
        &self.tree
    }

    /// Mutable access to the frame tree.
    pub fn tree_mut(&mut self) -> &mut FrameTree {
        &mut self.tree
    }

    /// The cylinder solver in use.
    pub fn solver(&self) -> &dyn CylinderRootSolver {
        self.solver.as_ref()
    }

    /// Add a frame under `parent`.
    pub fn frame(&mut self, offset: DualVector, parent: FrameId, spec: FrameSpec) -> Result<FrameId> {
        Ok(self.tree.add_frame(offset, parent, spec)?)
    }

    /// Place a surface under `parent`.
    pub fn surface(
        &mut self,
        offset: DualVector,
        parent: FrameId,
        shape: Shape,
        spec: FrameSpec,
    ) -> Result<Surface> {
        Ok(Surface::new(&mut self.tree, offset, parent, shape, spec)?)
    }

    /// Point at `offset` in `frame`.
    pub fn point(&self, offset: DualVector, frame: FrameId) -> Result<Point> {
        Ok(self.tree.point(offset, frame)?)
    }

    /// Ray from `origin` along `direction`, written in the origin's frame.
    pub fn ray(&self, origin: Point, direction: DualVector) -> Result<Ray> {
        Ok(Ray::new(origin, direction)?)
    }

    /// Re-parent a frame without moving it.
    pub fn redefine(&mut self, frame: FrameId, to: FrameId) -> Result<()> {
        Ok(self.tree.redefine(frame, to)?)
    }

    /// Drop a leaf frame. The session root stays.
    pub fn remove_frame(&mut self, frame: FrameId) -> Result<()> {
        if frame == self.root {
            return Err(GeometryError::FrameMismatch("the session root cannot be removed".into()).into());
        }
        self.tree.remove(frame)?;
        Ok(())
    }

    /// Drop a surface's frame.
    pub fn remove_surface(&mut self, surface: Surface) -> Result<()> {
        Ok(surface.remove(&mut self.tree)?)
    }

    /// Drop every piece returned by [`Session::split`] or
    /// [`Session::pixelate`] once they are no longer needed.
    pub fn discard(&mut self, pieces: Vec<Vec<Surface>>) -> Result<()> {
        let count = pieces.iter().map(Vec::len).sum::<usize>();
        for piece in pieces.into_iter().flatten() {
            piece.remove(&mut self.tree)?;
        }
        debug!("discarded {count} surfaces, {} frames left", self.tree.len());
        Ok(())
    }

    /// Copy of `point` re-anchored in `to`.
    pub fn point_in(&self, point: &Point, to: FrameId) -> Result<Point> {
        Ok(self.tree.point_in(point, to)?)
    }

    /// Distance along `ray` to `surface`. The ray may be written in any
    /// frame sharing the surface's root.
    pub fn intercept(&self, surface: &Surface, ray: &Ray) -> Result<Option<f64>> {
        Ok(surface.intercept_any(&self.tree, ray, self.solver.as_ref())?)
    }

    /// Hit point on `surface`, anchored in the surface frame.
    pub fn hit_point(&self, surface: &Surface, ray: &Ray) -> Result<Option<Point>> {
        Ok(surface.hit_point(&self.tree, ray, self.solver.as_ref())?)
    }

    /// Boundary of `surface` at the configured resolution.
    pub fn edge(&self, surface: &Surface) -> Result<Vec<Point>> {
        Ok(surface.edge(&self.tree, self.settings.edge_resolution)?)
    }

    /// Split `surface` into `n_meri` rows of `n_sagi` pieces.
    pub fn split(&mut self, surface: &Surface, n_sagi: usize, n_meri: usize) -> Result<Vec<Vec<Surface>>> {
        Ok(surface.split(&mut self.tree, n_sagi, n_meri)?)
    }

    /// Facet a cylindrical `surface` into flat chords.
    pub fn pixelate(&mut self, surface: &Surface, n_sagi: usize, n_meri: usize) -> Result<Vec<Vec<Surface>>> {
        Ok(surface.pixelate(&mut self.tree, n_sagi, n_meri)?)
    }
}
