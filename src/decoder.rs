use std::path::Path;

use crate::array_data::ArrayData;

/// Error produced by a [`SourceDecoder`].
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("{0}")]
    General(String),
    #[error(transparent)]
    Wrapped(Box<dyn std::error::Error + Send + Sync>),
}

impl DecodeError {
    pub fn general(message: impl Into<String>) -> Self {
        Self::General(message.into())
    }

    pub fn wrap(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Wrapped(Box::new(error))
    }
}

/// Logical shape reported by a decoder, in TCZYX order
/// (time, channel, z-depth, y-height, x-width).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SourceInfo {
    pub shape: [usize; 5],
}

impl SourceInfo {
    pub fn new(shape: [usize; 5]) -> Self {
        Self { shape }
    }

    /// Spatial plane extents `(y, x)`.
    pub fn plane(&self) -> (usize, usize) {
        (self.shape[3], self.shape[4])
    }
}

/// Seam to the external library that decodes OME sources (stack patterns,
/// OME-Zarr, OME-Parquet, OME-TIFF) into arrays.
///
/// Implementations are expected to hand out arrays in the TCZYX convention,
/// though the reader tolerates already-squeezed dimensionalities. Decoding
/// internals (chunking, compression, on-disk layout) are entirely the
/// implementation's business.
pub trait SourceDecoder {
    /// Decode the source at `path` into an array.
    fn export(&self, path: &Path) -> Result<ArrayData, DecodeError>;

    /// Report the logical TCZYX shape of the source at `path` without
    /// necessarily decoding pixel data.
    fn info(&self, path: &Path) -> Result<SourceInfo, DecodeError>;
}
