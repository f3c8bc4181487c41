//! Flat-buffer serialization of frames and packed matrix export.
//!
//! A frame's pose is twelve numbers: the three basis vectors followed by
//! the origin. The binary layout packs those twelve doubles little-endian,
//! 96 bytes per frame. Matrices bound for the GPU are packed column-major
//! as 32- or 64-bit little-endian floats.

use std::fmt;

use crate::frame::{Frame, Normality};
use crate::math::{Matrix4, Point3, Vector3};

/// Errors raised while decoding a frame buffer.
#[derive(Debug, PartialEq, Eq)]
pub enum DecodeError {
    /// The buffer holds the wrong number of values (twelve expected).
    WrongLength(usize),
    /// The buffer contains a NaN or infinite value.
    Corrupt,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::WrongLength(n) => {
                write!(f, "frame buffer holds {n} values, expected 12")
            }
            DecodeError::Corrupt => write!(f, "frame buffer contains a non-finite value"),
        }
    }
}

impl std::error::Error for DecodeError {}

impl Frame {
    /// The pose as a flat buffer: `xv, yv, zv, origin`, component order.
    pub fn to_floats(&self) -> [f64; 12] {
        let d = self.data.borrow();
        [
            d.xv.x, d.xv.y, d.xv.z, //
            d.yv.x, d.yv.y, d.yv.z, //
            d.zv.x, d.zv.y, d.zv.z, //
            d.origin.x, d.origin.y, d.origin.z,
        ]
    }

    /// Rebuild a frame from a flat buffer under the given parent.
    ///
    /// Depth and the orthonormality cache are re-derived, never trusted
    /// from the buffer.
    pub fn from_floats(parent: Option<&Frame>, values: &[f64]) -> Result<Frame, DecodeError> {
        if values.len() != 12 {
            return Err(DecodeError::WrongLength(values.len()));
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err(DecodeError::Corrupt);
        }
        let frame = match parent {
            Some(p) => Frame::with_parent(p),
            None => Frame::new(),
        };
        {
            let mut d = frame.data.borrow_mut();
            d.xv = Vector3::new(values[0], values[1], values[2]);
            d.yv = Vector3::new(values[3], values[4], values[5]);
            d.zv = Vector3::new(values[6], values[7], values[8]);
            d.origin = Point3::new(values[9], values[10], values[11]);
            d.normality = Normality::Unknown;
        }
        Ok(frame)
    }

    /// The pose packed as 96 bytes of little-endian doubles.
    pub fn to_binary(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(96);
        for v in self.to_floats() {
            buf.extend_from_slice(&v.to_le_bytes());
        }
        buf
    }

    /// Rebuild a frame from the binary layout of
    /// [`to_binary`](Frame::to_binary).
    pub fn from_binary(parent: Option<&Frame>, bytes: &[u8]) -> Result<Frame, DecodeError> {
        if bytes.len() != 96 {
            return Err(DecodeError::WrongLength(bytes.len() / 8));
        }
        let mut values = [0.0f64; 12];
        for (i, value) in values.iter_mut().enumerate() {
            let mut chunk = [0u8; 8];
            chunk.copy_from_slice(&bytes[i * 8..i * 8 + 8]);
            *value = f64::from_le_bytes(chunk);
        }
        Frame::from_floats(parent, &values)
    }
}

/// Pack a column-major matrix as 64-bit little-endian floats.
pub fn matrix_to_f64_bytes(m: &Matrix4) -> Vec<u8> {
    let mut buf = Vec::with_capacity(16 * 8);
    for v in m.iter() {
        buf.extend_from_slice(&v.to_le_bytes());
    }
    buf
}

/// Pack a column-major matrix as 32-bit little-endian floats, the layout
/// most GPU uniform buffers take.
pub fn matrix_to_f32_bytes(m: &Matrix4) -> Vec<u8> {
    let mut buf = Vec::with_capacity(16 * 4);
    for v in m.iter() {
        buf.extend_from_slice(&(*v as f32).to_le_bytes());
    }
    buf
}
