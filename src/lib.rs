//! # spaceframe
//!
//! A hierarchy of 3D affine coordinate frames ("spaces"), each expressed
//! relative to a parent frame, with the algorithms to move points and
//! vectors between frames and to restructure the hierarchy without
//! corrupting absolute placement.
//!
//! A [`Frame`] is three basis vectors plus an origin, described in the
//! coordinates of its parent (or of the implicit global frame). Frames
//! are mutated in place; projection moves values between a frame and its
//! parent; [`Frame::reparent`] re-expresses a frame under any other frame
//! while preserving where it sits in the world.
//!
//! # Example
//!
//! ```rust
//! use spaceframe::{Axis, Frame};
//!
//! let root = Frame::new();
//! let arm = Frame::with_parent(&root);
//! arm.translate((3.0, 0.0, 0.0))
//!     .rotate_about_parent_axis(0.25, Axis::Z);
//!
//! // Where the arm's local (1, 0, 0) sits in root coordinates.
//! let tip = arm.unproject_point((1.0, 0.0, 0.0));
//! assert!((tip.y - 1.0).abs() < 1e-12);
//! ```

pub mod camera;
pub mod frame;
pub mod hierarchy;
pub mod math;
pub mod project;
pub mod rotate;
pub mod transport;
pub mod vector;

pub use camera::{view_projection, Frustum, Perspective};
pub use frame::{Axis, Frame};
pub use hierarchy::HierarchyError;
pub use rotate::RotateError;
pub use transport::{matrix_to_f32_bytes, matrix_to_f64_bytes, DecodeError};
pub use vector::{vector_from_slice, IntoVector3, Scaling, VectorInputError};
