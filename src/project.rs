//! Point and vector projection between a frame and its parent.
//!
//! Unprojection (local to parent) is a plain linear combination of the
//! basis and is exact for any basis. Projection (parent to local) applies
//! the basis transpose, which inverts unprojection only when the basis is
//! orthonormal; a scaled or sheared frame projects through the transpose
//! all the same. Batch entry points are parallelized with rayon.

use rayon::prelude::*;

use crate::frame::Frame;
use crate::math::{Point3, Vector3};
use crate::vector::IntoVector3;

impl Frame {
    /// Map a direction from this frame's local coordinates into the
    /// parent's coordinates.
    pub fn unproject_vector(&self, v: impl IntoVector3) -> Vector3 {
        let v = v.into_vector3();
        let d = self.data.borrow();
        d.xv * v.x + d.yv * v.y + d.zv * v.z
    }

    /// Map a point from this frame's local coordinates into the parent's
    /// coordinates.
    pub fn unproject_point(&self, p: impl IntoVector3) -> Point3 {
        let p = p.into_vector3();
        let d = self.data.borrow();
        d.origin + d.xv * p.x + d.yv * p.y + d.zv * p.z
    }

    /// Map a direction from parent coordinates into this frame's local
    /// coordinates through the basis transpose. Exact inverse of
    /// [`unproject_vector`](Frame::unproject_vector) only for an
    /// orthonormal basis.
    pub fn project_vector(&self, v: impl IntoVector3) -> Vector3 {
        let v = v.into_vector3();
        let d = self.data.borrow();
        Vector3::new(v.dot(&d.xv), v.dot(&d.yv), v.dot(&d.zv))
    }

    /// Map a point from parent coordinates into this frame's local
    /// coordinates. Same orthonormality caveat as
    /// [`project_vector`](Frame::project_vector).
    pub fn project_point(&self, p: impl IntoVector3) -> Point3 {
        let p = p.into_vector3();
        let d = self.data.borrow();
        let rel = p - d.origin.coords;
        Point3::new(rel.dot(&d.xv), rel.dot(&d.yv), rel.dot(&d.zv))
    }

    // --- In-place variants ---

    pub fn project_vector_in_place(&self, v: &mut Vector3) -> &Self {
        *v = self.project_vector(*v);
        self
    }

    pub fn unproject_vector_in_place(&self, v: &mut Vector3) -> &Self {
        *v = self.unproject_vector(*v);
        self
    }

    pub fn project_point_in_place(&self, p: &mut Point3) -> &Self {
        *p = self.project_point(*p);
        self
    }

    pub fn unproject_point_in_place(&self, p: &mut Point3) -> &Self {
        *p = self.unproject_point(*p);
        self
    }

    // --- Batch variants ---

    /// Project a batch of directions into local coordinates.
    pub fn project_vectors(&self, vectors: &[Vector3]) -> Vec<Vector3> {
        let (xv, yv, zv, _) = self.snapshot();
        vectors
            .par_iter()
            .map(|v| Vector3::new(v.dot(&xv), v.dot(&yv), v.dot(&zv)))
            .collect()
    }

    /// Unproject a batch of directions into parent coordinates.
    pub fn unproject_vectors(&self, vectors: &[Vector3]) -> Vec<Vector3> {
        let (xv, yv, zv, _) = self.snapshot();
        vectors
            .par_iter()
            .map(|v| xv * v.x + yv * v.y + zv * v.z)
            .collect()
    }

    /// Project a batch of points into local coordinates.
    pub fn project_points(&self, points: &[Point3]) -> Vec<Point3> {
        let (xv, yv, zv, origin) = self.snapshot();
        points
            .par_iter()
            .map(|p| {
                let rel = *p - origin;
                Point3::new(rel.dot(&xv), rel.dot(&yv), rel.dot(&zv))
            })
            .collect()
    }

    /// Unproject a batch of points into parent coordinates.
    pub fn unproject_points(&self, points: &[Point3]) -> Vec<Point3> {
        let (xv, yv, zv, origin) = self.snapshot();
        points
            .par_iter()
            .map(|p| origin + xv * p.x + yv * p.y + zv * p.z)
            .collect()
    }

    /// Copy of the pose fields, so batch loops run without holding a
    /// borrow on the frame.
    fn snapshot(&self) -> (Vector3, Vector3, Vector3, Point3) {
        let d = self.data.borrow();
        (d.xv, d.yv, d.zv, d.origin)
    }

    // --- Frame-level projection ---

    /// Re-express `other` in this frame's local coordinates, making it a
    /// child of this frame. `other` must currently be described in this
    /// frame's parent coordinates (a sibling), and its absolute placement
    /// does not change. Its orthonormality cache is left untouched: the
    /// frame itself did not move.
    pub fn project_frame(&self, other: &Frame) -> &Self {
        debug_assert!(!self.is_same(other), "cannot project a frame into itself");
        let d = self.data.borrow();
        let mut o = other.data.borrow_mut();
        o.xv = Vector3::new(o.xv.dot(&d.xv), o.xv.dot(&d.yv), o.xv.dot(&d.zv));
        o.yv = Vector3::new(o.yv.dot(&d.xv), o.yv.dot(&d.yv), o.yv.dot(&d.zv));
        o.zv = Vector3::new(o.zv.dot(&d.xv), o.zv.dot(&d.yv), o.zv.dot(&d.zv));
        let rel = o.origin - d.origin;
        o.origin = Point3::new(rel.dot(&d.xv), rel.dot(&d.yv), rel.dot(&d.zv));
        o.parent = Some(self.clone());
        o.depth = d.depth + 1;
        self
    }

    /// Re-express `other` in this frame's parent coordinates, one step up
    /// the tree. `other` must currently be described in this frame's
    /// coordinates (a child); it becomes a sibling of this frame and its
    /// absolute placement does not change.
    pub fn unproject_frame(&self, other: &Frame) -> &Self {
        debug_assert!(!self.is_same(other), "cannot unproject a frame through itself");
        let d = self.data.borrow();
        let mut o = other.data.borrow_mut();
        o.xv = d.xv * o.xv.x + d.yv * o.xv.y + d.zv * o.xv.z;
        o.yv = d.xv * o.yv.x + d.yv * o.yv.y + d.zv * o.yv.z;
        o.zv = d.xv * o.zv.x + d.yv * o.zv.y + d.zv * o.zv.z;
        let p = o.origin;
        o.origin = d.origin + d.xv * p.x + d.yv * p.y + d.zv * p.z;
        o.parent = d.parent.clone();
        o.depth = d.depth;
        self
    }
}
