//! The affine coordinate frame and its in-place mutators.
//!
//! A [`Frame`] is three basis vectors plus an origin, all expressed in the
//! coordinates of an optional parent frame. Frames form a forest: each
//! frame holds a shared handle to its parent and nothing points the other
//! way, so a parent outlives none of its children by construction.

use std::cell::RefCell;
use std::rc::Rc;

use crate::math::{Point3, Vector3, ORTHO_TOL};
use crate::vector::{IntoVector3, Scaling};

/// Selects one of a frame's basis axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Cached orthonormality verdict for a frame's basis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Normality {
    Unknown,
    No,
    Yes,
}

pub(crate) struct FrameData {
    pub(crate) xv: Vector3,
    pub(crate) yv: Vector3,
    pub(crate) zv: Vector3,
    pub(crate) origin: Point3,
    pub(crate) parent: Option<Frame>,
    /// Ancestor count. A cache refreshed by the hierarchy walker, never a
    /// source of truth on its own.
    pub(crate) depth: usize,
    pub(crate) normality: Normality,
}

/// A 3D affine coordinate frame expressed relative to a parent frame.
///
/// `Frame` is a cheaply cloneable handle; cloning it aliases the same
/// underlying frame. Use [`Frame::duplicate`] for an independent copy.
/// All mutators work in place and return `&Self` for chaining.
///
/// The handle is `Rc`-based and therefore single-threaded; exclusive
/// mutation is enforced at compile time.
#[derive(Clone)]
pub struct Frame {
    pub(crate) data: Rc<RefCell<FrameData>>,
}

impl Frame {
    /// A standalone identity frame: unit axes, origin at zero, no parent.
    pub fn new() -> Frame {
        Frame::identity(None, 0)
    }

    /// An identity frame created as a child of `parent`.
    pub fn with_parent(parent: &Frame) -> Frame {
        let depth = parent.cached_depth() + 1;
        Frame::identity(Some(parent.clone()), depth)
    }

    fn identity(parent: Option<Frame>, depth: usize) -> Frame {
        Frame {
            data: Rc::new(RefCell::new(FrameData {
                xv: Vector3::new(1.0, 0.0, 0.0),
                yv: Vector3::new(0.0, 1.0, 0.0),
                zv: Vector3::new(0.0, 0.0, 1.0),
                origin: Point3::origin(),
                parent,
                depth,
                normality: Normality::Yes,
            })),
        }
    }

    /// An independent copy of this frame's basis and origin, sharing the
    /// same parent handle. Ancestors are not copied.
    pub fn duplicate(&self) -> Frame {
        let d = self.data.borrow();
        Frame {
            data: Rc::new(RefCell::new(FrameData {
                xv: d.xv,
                yv: d.yv,
                zv: d.zv,
                origin: d.origin,
                parent: d.parent.clone(),
                depth: d.depth,
                normality: d.normality,
            })),
        }
    }

    /// Handle to the parent frame, if any.
    pub fn parent(&self) -> Option<Frame> {
        self.data.borrow().parent.clone()
    }

    /// Whether two handles refer to the same underlying frame.
    pub fn is_same(&self, other: &Frame) -> bool {
        Rc::ptr_eq(&self.data, &other.data)
    }

    pub(crate) fn address(&self) -> *const RefCell<FrameData> {
        Rc::as_ptr(&self.data)
    }

    /// The cached ancestor count. Cheap, but stale after the chain above
    /// this frame has been restructured; see
    /// [`recompute_depths`](Frame::recompute_depths).
    pub fn cached_depth(&self) -> usize {
        self.data.borrow().depth
    }

    // --- Axis access ---

    /// Value copy of one basis axis, in parent coordinates.
    pub fn axis(&self, axis: Axis) -> Vector3 {
        let d = self.data.borrow();
        match axis {
            Axis::X => d.xv,
            Axis::Y => d.yv,
            Axis::Z => d.zv,
        }
    }

    /// Value copy of the origin, in parent coordinates.
    pub fn origin(&self) -> Point3 {
        self.data.borrow().origin
    }

    /// Replace one basis axis. The orthonormality cache drops to unknown.
    pub fn set_axis(&self, axis: Axis, v: impl IntoVector3) -> &Self {
        let v = v.into_vector3();
        let mut d = self.data.borrow_mut();
        match axis {
            Axis::X => d.xv = v,
            Axis::Y => d.yv = v,
            Axis::Z => d.zv = v,
        }
        d.normality = Normality::Unknown;
        self
    }

    /// Replace the origin. Does not affect the orthonormality cache.
    pub fn set_origin(&self, p: impl IntoVector3) -> &Self {
        let p = p.into_vector3();
        self.data.borrow_mut().origin = Point3::from(p);
        self
    }

    // --- Mutators ---

    /// Displace the origin by a vector given in parent coordinates.
    pub fn translate(&self, v: impl IntoVector3) -> &Self {
        let v = v.into_vector3();
        self.data.borrow_mut().origin += v;
        self
    }

    /// Displace the origin along this frame's own axes: the offset's
    /// components are measured along `xv`, `yv`, and `zv`.
    pub fn travel(&self, v: impl IntoVector3) -> &Self {
        let v = v.into_vector3();
        let mut d = self.data.borrow_mut();
        let step = d.xv * v.x + d.yv * v.y + d.zv * v.z;
        d.origin += step;
        self
    }

    /// Scale each axis by a factor relative to its current magnitude.
    /// Accepts a uniform `f64` or a per-axis triple.
    pub fn scale(&self, factors: impl Into<Scaling>) -> &Self {
        let f = factors.into().factors();
        let mut d = self.data.borrow_mut();
        d.xv *= f.x;
        d.yv *= f.y;
        d.zv *= f.z;
        d.normality = Normality::Unknown;
        self
    }

    /// Scale each axis so its magnitude equals the requested value exactly.
    ///
    /// An axis with zero magnitude has no direction to rescale along; it is
    /// left unchanged with a warning rather than failing the whole call.
    pub fn set_scale(&self, magnitudes: impl Into<Scaling>) -> &Self {
        let want = magnitudes.into().factors();
        let mut guard = self.data.borrow_mut();
        let d = &mut *guard;
        for (axis, v, want) in [
            (Axis::X, &mut d.xv, want.x),
            (Axis::Y, &mut d.yv, want.y),
            (Axis::Z, &mut d.zv, want.z),
        ] {
            let len = v.norm();
            if len == 0.0 {
                tracing::warn!(?axis, "set_scale on a zero-length axis, leaving it unchanged");
                continue;
            }
            *v *= want / len;
        }
        d.normality = Normality::Unknown;
        self
    }

    /// Rebuild an orthonormal basis, anchored on the current `zv`:
    /// `zv` is normalized first, then `xv` is rebuilt from the old `yv`
    /// crossed with the new `zv`, then `yv` from the new `xv` crossed with
    /// the new `zv`. The step order matters; this is not a symmetric
    /// Gram-Schmidt pass. The origin is untouched.
    pub fn normalize(&self) -> &Self {
        let mut d = self.data.borrow_mut();
        d.zv = d.zv.normalize();
        d.xv = d.yv.cross(&d.zv).normalize();
        d.yv = d.xv.cross(&d.zv).normalize();
        d.normality = Normality::Yes;
        self
    }

    /// Whether the basis is currently orthonormal, from cache when known.
    ///
    /// The computed check requires each axis's squared length within
    /// `1e-14` of 1 and the (z,y) and (y,x) dot products within `1e-14`
    /// of 0. The (x,z) pair is not checked separately.
    pub fn is_normal(&self) -> bool {
        let mut d = self.data.borrow_mut();
        match d.normality {
            Normality::Yes => true,
            Normality::No => false,
            Normality::Unknown => {
                let ok = (d.xv.norm_squared() - 1.0).abs() <= ORTHO_TOL
                    && (d.yv.norm_squared() - 1.0).abs() <= ORTHO_TOL
                    && (d.zv.norm_squared() - 1.0).abs() <= ORTHO_TOL
                    && d.zv.dot(&d.yv).abs() <= ORTHO_TOL
                    && d.yv.dot(&d.xv).abs() <= ORTHO_TOL;
                d.normality = if ok { Normality::Yes } else { Normality::No };
                ok
            }
        }
    }
}

impl Default for Frame {
    fn default() -> Self {
        Frame::new()
    }
}

impl std::fmt::Debug for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let d = self.data.borrow();
        f.debug_struct("Frame")
            .field("xv", &d.xv)
            .field("yv", &d.yv)
            .field("zv", &d.zv)
            .field("origin", &d.origin)
            .field("depth", &d.depth)
            .field("root", &d.parent.is_none())
            .finish()
    }
}
