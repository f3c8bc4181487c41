//! Linear algebra type aliases and numeric tolerances.

pub type Point3 = nalgebra::Point3<f64>;
pub type Vector3 = nalgebra::Vector3<f64>;
pub type Matrix4 = nalgebra::Matrix4<f64>;

/// Tolerance for the orthonormality predicate: each basis vector's squared
/// length must be within this of 1, and the checked pairwise dot products
/// within this of 0.
pub const ORTHO_TOL: f64 = 1e-14;

/// Squared-length floor below which a candidate perpendicular produced while
/// building a rotation basis counts as degenerate.
pub const SEED_TOL: f64 = 1e-50;
