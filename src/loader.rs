//! Raw grid loader: little-endian `f32` captures reshaped to the declared dimensions.

use ndarray::Array2;
use crate::error::{ReconstructionError, Result};
use crate::model::{Dimensions, HeightGrid, SAMPLE_BYTES};

/// Reads a complete capture. Bytes past `width * height * 4` are ignored.
pub fn load(buffer: &[u8], dimensions: Dimensions) -> Result<HeightGrid> {
    let expected = dimensions.byte_len();
    if buffer.len() < expected {
        return Err(ReconstructionError::TruncatedInput { expected, actual: buffer.len() });
    }
    let samples = decode_samples(&buffer[..expected])?;
    into_grid(samples, dimensions)
}

/// Best-effort read of a possibly truncated capture.
///
/// Only whole samples actually present are decoded. Every cell without bytes is
/// left missing (NaN) so the gap filler treats it like any other hole.
pub fn load_available(buffer: &[u8], dimensions: Dimensions) -> Result<HeightGrid> {
    let usable = buffer.len().min(dimensions.byte_len());
    let whole = usable - usable % SAMPLE_BYTES;
    let mut samples = decode_samples(&buffer[..whole])?;
    samples.resize(dimensions.cells(), f32::NAN);
    into_grid(samples, dimensions)
}

fn decode_samples(bytes: &[u8]) -> Result<Vec<f32>> {
    bytes.chunks_exact(SAMPLE_BYTES)
        .enumerate()
        .map(|(i, chunk)| {
            let raw: [u8; SAMPLE_BYTES] = chunk.try_into()
                .map_err(|_| ReconstructionError::Decode { offset: i * SAMPLE_BYTES })?;
            Ok(f32::from_le_bytes(raw))
        })
        .collect()
}

fn into_grid(samples: Vec<f32>, dimensions: Dimensions) -> Result<HeightGrid> {
    let array = Array2::from_shape_vec(dimensions.shape(), samples)
        .map_err(|e| ReconstructionError::DimensionMismatch {
            width: dimensions.width(),
            height: dimensions.height(),
            reason: e.to_string()
        })?;
    HeightGrid::from_array(array)
}
