//! Frustum and perspective projection matrices, and their combination
//! with a frame's affine inverse into a single GPU-ready matrix.
//!
//! These builders are plain formula evaluation over a frame's final basis
//! and origin; nothing here walks the hierarchy. Field-of-view angles are
//! in revolutions, like every other angle in the crate.

use std::f64::consts::TAU;

use crate::frame::Frame;
use crate::math::Matrix4;

/// An off-axis viewing frustum described by its near-plane rectangle and
/// clip distances.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frustum {
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub top: f64,
    pub near: f64,
    pub far: f64,
}

impl Frustum {
    /// The projective matrix mapping the frustum volume to clip space.
    pub fn matrix(&self) -> Matrix4 {
        let Frustum { left: l, right: r, bottom: b, top: t, near: n, far: f } = *self;
        Matrix4::new(
            2.0 * n / (r - l), 0.0, (r + l) / (r - l), 0.0, //
            0.0, 2.0 * n / (t - b), (t + b) / (t - b), 0.0, //
            0.0, 0.0, -(f + n) / (f - n), -2.0 * f * n / (f - n), //
            0.0, 0.0, -1.0, 0.0,
        )
    }
}

/// A symmetric perspective projection: vertical field of view in
/// revolutions, width/height aspect ratio, and clip distances.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Perspective {
    pub fov_y: f64,
    pub aspect: f64,
    pub near: f64,
    pub far: f64,
}

impl Perspective {
    /// The projective matrix for this perspective.
    pub fn matrix(&self) -> Matrix4 {
        let Perspective { fov_y, aspect, near: n, far: f } = *self;
        let cot = 1.0 / (fov_y * TAU / 2.0).tan();
        Matrix4::new(
            cot / aspect, 0.0, 0.0, 0.0, //
            0.0, cot, 0.0, 0.0, //
            0.0, 0.0, -(f + n) / (f - n), -2.0 * f * n / (f - n), //
            0.0, 0.0, -1.0, 0.0,
        )
    }
}

impl Frame {
    /// The frame's basis and origin as a column-major affine matrix: the
    /// matrix that carries local coordinates into parent coordinates,
    /// exactly like [`unproject_point`](Frame::unproject_point).
    pub fn to_matrix(&self) -> Matrix4 {
        let d = self.data.borrow();
        Matrix4::new(
            d.xv.x, d.yv.x, d.zv.x, d.origin.x, //
            d.xv.y, d.yv.y, d.zv.y, d.origin.y, //
            d.xv.z, d.yv.z, d.zv.z, d.origin.z, //
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// The affine inverse, built from the same basis-transpose mapping as
    /// [`project_point`](Frame::project_point): exact only when the basis
    /// is orthonormal.
    pub fn to_inverse_matrix(&self) -> Matrix4 {
        let d = self.data.borrow();
        let o = d.origin.coords;
        Matrix4::new(
            d.xv.x, d.xv.y, d.xv.z, -o.dot(&d.xv), //
            d.yv.x, d.yv.y, d.yv.z, -o.dot(&d.yv), //
            d.zv.x, d.zv.y, d.zv.z, -o.dot(&d.zv), //
            0.0, 0.0, 0.0, 1.0,
        )
    }
}

/// Combine a projection matrix with an eye frame: the product of the
/// projection and the frame's affine inverse, the single matrix that
/// carries parent-space points into clip space.
pub fn view_projection(projection: &Matrix4, eye: &Frame) -> Matrix4 {
    projection * eye.to_inverse_matrix()
}
