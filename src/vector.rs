//! Flexible vector-argument conversion.
//!
//! Every operation that takes a point or direction accepts anything that
//! converts to a 3-component vector: nalgebra values, 3-element arrays and
//! tuples, or 2-element arrays and tuples with the z component defaulting
//! to zero. Runtime-length input goes through [`vector_from_slice`], which
//! is the one conversion that can fail.

use std::fmt;

use crate::math::{Point3, Vector3};

/// Conversion into a 3-component `f64` vector.
pub trait IntoVector3 {
    fn into_vector3(self) -> Vector3;
}

impl IntoVector3 for Vector3 {
    fn into_vector3(self) -> Vector3 {
        self
    }
}

impl IntoVector3 for Point3 {
    fn into_vector3(self) -> Vector3 {
        self.coords
    }
}

impl IntoVector3 for [f64; 3] {
    fn into_vector3(self) -> Vector3 {
        Vector3::new(self[0], self[1], self[2])
    }
}

impl IntoVector3 for (f64, f64, f64) {
    fn into_vector3(self) -> Vector3 {
        Vector3::new(self.0, self.1, self.2)
    }
}

impl IntoVector3 for [f64; 2] {
    fn into_vector3(self) -> Vector3 {
        Vector3::new(self[0], self[1], 0.0)
    }
}

impl IntoVector3 for (f64, f64) {
    fn into_vector3(self) -> Vector3 {
        Vector3::new(self.0, self.1, 0.0)
    }
}

/// Convert a runtime-length slice into a vector.
///
/// Accepts 2 or 3 elements; a missing z component defaults to 0.
pub fn vector_from_slice(values: &[f64]) -> Result<Vector3, VectorInputError> {
    match *values {
        [x, y] => Ok(Vector3::new(x, y, 0.0)),
        [x, y, z] => Ok(Vector3::new(x, y, z)),
        _ => Err(VectorInputError::WrongLength(values.len())),
    }
}

/// Scale argument: a uniform factor or one factor per axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Scaling {
    Uniform(f64),
    PerAxis(Vector3),
}

impl Scaling {
    pub(crate) fn factors(self) -> Vector3 {
        match self {
            Scaling::Uniform(f) => Vector3::new(f, f, f),
            Scaling::PerAxis(v) => v,
        }
    }
}

impl From<f64> for Scaling {
    fn from(factor: f64) -> Self {
        Scaling::Uniform(factor)
    }
}

impl From<Vector3> for Scaling {
    fn from(factors: Vector3) -> Self {
        Scaling::PerAxis(factors)
    }
}

impl From<(f64, f64, f64)> for Scaling {
    fn from(factors: (f64, f64, f64)) -> Self {
        Scaling::PerAxis(Vector3::new(factors.0, factors.1, factors.2))
    }
}

impl From<[f64; 3]> for Scaling {
    fn from(factors: [f64; 3]) -> Self {
        Scaling::PerAxis(Vector3::new(factors[0], factors[1], factors[2]))
    }
}

/// Errors from runtime-length vector conversion.
#[derive(Debug, PartialEq, Eq)]
pub enum VectorInputError {
    /// The input holds the wrong number of components.
    WrongLength(usize),
}

impl fmt::Display for VectorInputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VectorInputError::WrongLength(n) => {
                write!(f, "vector input holds {n} components, expected 2 or 3")
            }
        }
    }
}

impl std::error::Error for VectorInputError {}
