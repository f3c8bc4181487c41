//! Rotation of a frame's basis about arbitrary and axis-aligned axes.
//!
//! All angles are measured in revolutions (1.0 is a full turn). The
//! generic path never builds a rotation matrix: it sets up a scratch
//! orthonormal basis whose z axis is the rotation axis, expresses each
//! basis vector in it, rotates the first two components in 2D, and
//! expresses the result back in parent coordinates. Rotations are rigid,
//! so none of them touch the orthonormality cache.

use std::f64::consts::TAU;
use std::fmt;

use crate::frame::{Axis, Frame};
use crate::math::{Vector3, SEED_TOL};
use crate::vector::IntoVector3;

/// Errors raised by the rotation operations.
#[derive(Debug, PartialEq, Eq)]
pub enum RotateError {
    /// The rotation axis has zero magnitude.
    DegenerateAxis,
    /// Both seed vectors collapsed while building a basis around the axis.
    /// Unreachable for any proper 3D axis.
    SeedCollapse,
}

impl fmt::Display for RotateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RotateError::DegenerateAxis => write!(f, "rotation axis has zero magnitude"),
            RotateError::SeedCollapse => {
                write!(f, "failed to build a perpendicular basis for the rotation axis")
            }
        }
    }
}

impl std::error::Error for RotateError {}

impl Frame {
    /// Rotate all three basis vectors about `axis`, expressed in parent
    /// coordinates, by the given number of revolutions.
    pub fn rotate(&self, revolutions: f64, axis: impl IntoVector3) -> Result<&Self, RotateError> {
        let axis = axis.into_vector3();
        if axis.norm_squared() == 0.0 {
            return Err(RotateError::DegenerateAxis);
        }

        // Scratch orthonormal basis with the axis as its z. The first seed
        // fails only when the axis is nearly parallel to it, so the second
        // seed cannot also fail.
        let zv = axis.normalize();
        let mut xv = Vector3::new(1.0, 0.0, 0.0).cross(&zv);
        if xv.norm_squared() < SEED_TOL {
            xv = Vector3::new(0.0, 1.0, 0.0).cross(&zv);
            if xv.norm_squared() < SEED_TOL {
                return Err(RotateError::SeedCollapse);
            }
        }
        let xv = xv.normalize();
        let yv = zv.cross(&xv);

        let theta = revolutions * TAU;
        let (s, c) = theta.sin_cos();
        let turn = |b: Vector3| {
            let local = Vector3::new(b.dot(&xv), b.dot(&yv), b.dot(&zv));
            xv * (c * local.x - s * local.y) + yv * (s * local.x + c * local.y) + zv * local.z
        };

        let mut d = self.data.borrow_mut();
        d.xv = turn(d.xv);
        d.yv = turn(d.yv);
        d.zv = turn(d.zv);
        Ok(self)
    }

    /// Rotate about one of the parent's standard axes. Skips the scratch
    /// basis entirely: the 2D rotation lands directly on the two non-axis
    /// components of each basis vector.
    pub fn rotate_about_parent_axis(&self, revolutions: f64, axis: Axis) -> &Self {
        let theta = revolutions * TAU;
        let (s, c) = theta.sin_cos();
        let mut guard = self.data.borrow_mut();
        let d = &mut *guard;
        for b in [&mut d.xv, &mut d.yv, &mut d.zv] {
            match axis {
                Axis::X => {
                    let (y, z) = (b.y, b.z);
                    b.y = c * y - s * z;
                    b.z = s * y + c * z;
                }
                Axis::Y => {
                    let (z, x) = (b.z, b.x);
                    b.z = c * z - s * x;
                    b.x = s * z + c * x;
                }
                Axis::Z => {
                    let (x, y) = (b.x, b.y);
                    b.x = c * x - s * y;
                    b.y = s * x + c * y;
                }
            }
        }
        self
    }

    /// Rotate the other two basis vectors about this frame's own `axis`
    /// vector.
    ///
    /// When the basis is orthonormal the rotated images are known in local
    /// coordinates in closed form and only need unprojecting into the
    /// parent. Otherwise the shortcut does not hold and the generic path
    /// runs against the current axis vector, which is where the one
    /// possible failure comes from: a zero-length axis.
    pub fn rotate_about_own_axis(
        &self,
        revolutions: f64,
        axis: Axis,
    ) -> Result<&Self, RotateError> {
        if !self.is_normal() {
            let axis_vector = self.axis(axis);
            return self.rotate(revolutions, axis_vector);
        }

        let theta = revolutions * TAU;
        let (s, c) = theta.sin_cos();
        let mut guard = self.data.borrow_mut();
        let d = &mut *guard;
        match axis {
            Axis::X => {
                // Local images: yv -> (0, c, s), zv -> (0, -s, c).
                let (yv, zv) = (d.yv, d.zv);
                d.yv = yv * c + zv * s;
                d.zv = yv * -s + zv * c;
            }
            Axis::Y => {
                let (zv, xv) = (d.zv, d.xv);
                d.zv = zv * c + xv * s;
                d.xv = zv * -s + xv * c;
            }
            Axis::Z => {
                let (xv, yv) = (d.xv, d.yv);
                d.xv = xv * c + yv * s;
                d.yv = xv * -s + yv * c;
            }
        }
        Ok(self)
    }
}
