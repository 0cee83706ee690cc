//! Frame arena and least-common-ancestor re-expression.

use log::{debug, trace};
use slotmap::{new_key_type, SlotMap};
use trippy_math::{CoordKind, DualVector, DualVectorBatch, GeometryError, Result, Tolerance};

use crate::frame::{Frame, FrameSpec};
use crate::point::Point;

new_key_type! {
    /// Opaque handle to a frame in a [`FrameTree`]. Compared by value.
    pub struct FrameId;
}

/// Path between two frames through their least common ancestor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Route {
    /// Frames from the source up to, but excluding, the common ancestor.
    pub up: Vec<FrameId>,
    /// Frames from the common ancestor's child down to the destination.
    pub down: Vec<FrameId>,
}

/// Arena owning every frame of a geometry session.
///
/// Several roots may coexist; frames interoperate only when they share a
/// root. Every mutation (adding, removing or redefining a frame) needs
/// `&mut self`, so a tree shared behind `&` is safe to read from many
/// threads.
#[derive(Debug, Clone, Default)]
pub struct FrameTree {
    frames: SlotMap<FrameId, Frame>,
    tolerance: Tolerance,
}

impl FrameTree {
    /// Empty tree with default tolerances.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty tree with the given tolerances.
    pub fn with_tolerance(tolerance: Tolerance) -> Self {
        Self {
            frames: SlotMap::with_key(),
            tolerance,
        }
    }

    /// Tolerances used for construction checks.
    pub fn tolerance(&self) -> &Tolerance {
        &self.tolerance
    }

    /// Number of frames, roots included.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether the tree holds no frames.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Add a root frame: depth 0, identity rotation, no parent.
    pub fn add_root(&mut self, kind: CoordKind) -> FrameId {
        let id = self.frames.insert(Frame::root(kind));
        debug!("created root frame {id:?} ({kind:?})");
        id
    }

    /// Add a frame at `offset` (written in the parent's basis) under `parent`.
    pub fn add_frame(&mut self, offset: DualVector, parent: FrameId, spec: FrameSpec) -> Result<FrameId> {
        let orientation = spec.orientation()?;
        let p = self.frame(parent)?;
        let kind = spec.kind().unwrap_or(p.kind);
        let frame = Frame::child(
            offset.to_kind(p.kind),
            parent,
            p.depth + 1,
            orientation,
            kind,
            &self.tolerance,
        )?;
        let id = self.frames.insert(frame);
        if let Some(p) = self.frames.get_mut(parent) {
            p.children.push(id);
        }
        Ok(id)
    }

    /// Remove a frame that has no children and return it.
    ///
    /// Frames still holding children fail with `FrameMismatch`; remove the
    /// leaves first or reparent them with [`FrameTree::redefine`].
    pub fn remove(&mut self, id: FrameId) -> Result<Frame> {
        let f = self.frame(id)?;
        if !f.children.is_empty() {
            return Err(GeometryError::FrameMismatch(format!(
                "frame {id:?} still has {} child frame(s)",
                f.children.len()
            )));
        }
        let parent = f.parent;
        if let Some(p) = parent.and_then(|p| self.frames.get_mut(p)) {
            p.children.retain(|&c| c != id);
        }
        self.frames
            .remove(id)
            .ok_or_else(|| GeometryError::FrameMismatch(format!("unknown frame {id:?}")))
    }

    /// Frames positioned directly in `id`.
    pub fn children(&self, id: FrameId) -> Result<&[FrameId]> {
        Ok(self.frame(id)?.children())
    }

    /// Look up a frame.
    pub fn frame(&self, id: FrameId) -> Result<&Frame> {
        self.frames
            .get(id)
            .ok_or_else(|| GeometryError::FrameMismatch(format!("unknown frame {id:?}")))
    }

    /// Depth of a frame; roots are 0.
    pub fn depth(&self, id: FrameId) -> Result<usize> {
        Ok(self.frame(id)?.depth)
    }

    /// Parent of a frame, `None` for a root.
    pub fn parent(&self, id: FrameId) -> Result<Option<FrameId>> {
        Ok(self.frame(id)?.parent)
    }

    /// Rotate `v` from frame `id`'s basis into its parent's basis.
    pub fn to_parent(&self, id: FrameId, v: &DualVector) -> Result<DualVector> {
        Ok(self.frame(id)?.to_parent(v))
    }

    /// Rotate `v` from the parent's basis into frame `id`'s basis.
    pub fn from_parent(&self, id: FrameId, v: &DualVector) -> Result<DualVector> {
        Ok(self.frame(id)?.from_parent(v))
    }

    /// Point at `offset` in `frame`, converted to the frame's kind.
    pub fn point(&self, offset: DualVector, frame: FrameId) -> Result<Point> {
        let kind = self.frame(frame)?.kind;
        Ok(Point::new(offset.to_kind(kind), frame))
    }

    /// Ancestor chain from `id` outward to its root, both inclusive.
    pub fn chain(&self, id: FrameId) -> Result<Vec<FrameId>> {
        let mut chain = vec![id];
        let mut current = self.frame(id)?.parent;
        while let Some(p) = current {
            chain.push(p);
            current = self.frame(p)?.parent;
        }
        Ok(chain)
    }

    /// Root of the tree containing `id`.
    pub fn root_of(&self, id: FrameId) -> Result<FrameId> {
        let mut current = id;
        while let Some(p) = self.frame(current)?.parent {
            current = p;
        }
        Ok(current)
    }

    /// Route from `from` to `to` through their least common ancestor.
    ///
    /// Both chains are compared from the root end inward. The first index
    /// where they diverge, or the end of the shorter chain, is the boundary.
    /// When both chains run out together (same frame, or root to root) the
    /// route is empty.
    pub fn lca(&self, from: FrameId, to: FrameId) -> Result<Route> {
        let mut a = self.chain(from)?;
        let mut b = self.chain(to)?;
        a.reverse();
        b.reverse();
        if a[0] != b[0] {
            return Err(GeometryError::FrameMismatch(format!(
                "frames {from:?} and {to:?} do not share a root"
            )));
        }
        let limit = a.len().min(b.len());
        let mut idx = 1;
        while idx < limit && a[idx] == b[idx] {
            idx += 1;
        }
        let route = Route {
            up: a[idx..].iter().rev().copied().collect(),
            down: b[idx..].to_vec(),
        };
        trace!(
            "lca {from:?} -> {to:?} at {:?}: up {} down {}",
            a[idx - 1],
            route.up.len(),
            route.down.len()
        );
        Ok(route)
    }

    /// Walk a route. Positions pick up each frame's offset; free vectors
    /// are only rotated.
    fn apply_route(&self, route: &Route, v: DualVector, translate: bool) -> Result<DualVector> {
        let mut v = v;
        for &id in &route.up {
            let f = self.frame(id)?;
            let rotated = f.to_parent(&v);
            v = if translate { f.offset + rotated } else { rotated };
        }
        for &id in &route.down {
            let f = self.frame(id)?;
            let shifted = if translate { v - f.offset } else { v };
            v = f.from_parent(&shifted);
        }
        Ok(v)
    }

    /// Re-express a position vector written in `from` in the basis of `to`.
    pub fn transfer_vector(&self, v: DualVector, from: FrameId, to: FrameId) -> Result<DualVector> {
        let route = self.lca(from, to)?;
        let kind = self.frame(to)?.kind;
        Ok(self.apply_route(&route, v, true)?.to_kind(kind))
    }

    /// Re-express a free vector (a direction) written in `from` in the basis
    /// of `to`. Frame offsets do not apply.
    pub fn transfer_direction(&self, v: DualVector, from: FrameId, to: FrameId) -> Result<DualVector> {
        let route = self.lca(from, to)?;
        let kind = self.frame(to)?.kind;
        Ok(self.apply_route(&route, v, false)?.to_kind(kind))
    }

    /// Re-express a batch of positions, resolving the route once.
    pub fn redefine_batch(
        &self,
        batch: &DualVectorBatch,
        from: FrameId,
        to: FrameId,
    ) -> Result<DualVectorBatch> {
        let route = self.lca(from, to)?;
        let kind = self.frame(to)?.kind;
        batch
            .try_map(|v| self.apply_route(&route, v, true))
            .map(|b| b.to_kind(kind))
    }

    /// Re-anchor a point in `to` without moving it.
    pub fn redefine_point(&self, point: &mut Point, to: FrameId) -> Result<()> {
        point.offset = self.transfer_vector(point.offset, point.frame, to)?;
        point.frame = to;
        Ok(())
    }

    /// Copy of `point` re-anchored in `to`.
    pub fn point_in(&self, point: &Point, to: FrameId) -> Result<Point> {
        let mut p = *point;
        self.redefine_point(&mut p, to)?;
        Ok(p)
    }

    /// Position of `point` relative to its root.
    pub fn absolute(&self, point: &Point) -> Result<DualVector> {
        let root = self.root_of(point.frame)?;
        self.transfer_vector(point.offset, point.frame, root)
    }

    /// Vector from `a` to `b`. Both points must be anchored in one frame.
    pub fn point_between(&self, a: &Point, b: &Point) -> Result<DualVector> {
        if a.frame != b.frame {
            return Err(GeometryError::FrameMismatch(
                "points must be anchored in the same frame".into(),
            ));
        }
        let kind = self.frame(a.frame)?.kind;
        Ok((b.offset - a.offset).to_kind(kind))
    }

    /// Re-parent frame `id` under `to` without moving or turning it.
    ///
    /// The offset and triad are walked through the route between the old and
    /// new parents; the sagittal axis is rebuilt as `norm × meri` and keeps
    /// its magnitude. Depths are refreshed over the moved subtree only.
    pub fn redefine(&mut self, id: FrameId, to: FrameId) -> Result<()> {
        let (offset, meri, norm, parent) = {
            let f = self.frame(id)?;
            (f.offset, f.meri, f.norm, f.parent)
        };
        let from = parent.ok_or_else(|| {
            GeometryError::FrameMismatch("a root frame cannot be redefined".into())
        })?;
        if self.chain(to)?.contains(&id) {
            return Err(GeometryError::FrameMismatch(
                "cannot redefine a frame into its own subtree".into(),
            ));
        }

        let route = self.lca(from, to)?;
        let target = self.frame(to)?;
        let (kind, depth) = (target.kind, target.depth + 1);
        let offset = self.apply_route(&route, offset, true)?.to_kind(kind);
        let meri = self.apply_route(&route, meri, false)?;
        let norm = self.apply_route(&route, norm, false)?;

        if let Some(frame) = self.frames.get_mut(id) {
            frame.offset = offset;
            frame.set_triad(meri, norm);
            frame.parent = Some(to);
        }
        if let Some(old) = self.frames.get_mut(from) {
            old.children.retain(|&c| c != id);
        }
        if let Some(new) = self.frames.get_mut(to) {
            new.children.push(id);
        }
        self.refresh_depths(id, depth);
        debug!("redefined frame {id:?}: parent {from:?} -> {to:?}, depth {depth}");
        Ok(())
    }

    /// Set `id` to `depth` and its descendants below it.
    fn refresh_depths(&mut self, id: FrameId, depth: usize) {
        let mut stack = vec![(id, depth)];
        while let Some((id, depth)) = stack.pop() {
            if let Some(f) = self.frames.get_mut(id) {
                f.depth = depth;
                stack.extend(f.children.iter().map(|&c| (c, depth + 1)));
            }
        }
    }
}
