use std::path::Path;

use ndarray::{Array, IxDyn};

use crate::array_data::ArrayData;
use crate::decoder::{DecodeError, SourceDecoder, SourceInfo};

/// Built-in decoder for plain single-image TIFF files.
///
/// Decodes through the `image` crate, converting to 16-bit grayscale and
/// reporting a `(1, 1, 1, Y, X)` logical shape. Always the first frame is
/// used; multi-channel and pyramidal OME-TIFF belong to external decoders.
pub struct TiffFileDecoder;

impl SourceDecoder for TiffFileDecoder {
    fn export(&self, path: &Path) -> Result<ArrayData, DecodeError> {
        let gray = image::open(path).map_err(DecodeError::wrap)?.into_luma16();
        let (width, height) = gray.dimensions();

        let array = Array::from_shape_vec(
            IxDyn(&[1, 1, 1, height as usize, width as usize]),
            gray.into_raw(),
        )
        .map_err(DecodeError::wrap)?;

        log::debug!(
            "decoded {} as {}x{} grayscale tiff",
            path.display(),
            width,
            height
        );
        Ok(array.into())
    }

    fn info(&self, path: &Path) -> Result<SourceInfo, DecodeError> {
        let (width, height) = image::image_dimensions(path).map_err(DecodeError::wrap)?;
        Ok(SourceInfo::new([1, 1, 1, height as usize, width as usize]))
    }
}
