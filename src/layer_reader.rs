use std::fs;
use std::io::Cursor;
use std::path::Path;

use ndarray::ArrayD;
use ndarray_npy::ReadNpyExt;
use thiserror::Error;

use crate::array_data::ArrayData;
use crate::decoder::{DecodeError, SourceDecoder};
use crate::enums::{LayerKind, SourceClass};
use crate::layer::{Layer, LayerOptions};

/// Largest leading-axis size still interpreted as a channel axis on 3-D
/// arrays.
///
/// Small leading dimensions usually mean channels rather than z-depth, but
/// the heuristic is ambiguous for legitimate z-stacks of 6 or fewer slices;
/// such stacks are mislabeled as multi-channel planes.
pub const CHANNEL_AXIS_MAX: usize = 6;

#[derive(Debug, Error)]
pub enum LayerReaderError {
    #[error("no readable inputs found for the given path(s)")]
    NoReadableInputs,

    #[error("unrecognized path: {path}")]
    Unrecognized { path: String },

    #[error("unsupported array dimensionality {ndim} for {path}")]
    UnsupportedDimensionality { ndim: usize, path: String },

    #[error("flat array with unknown shape for {path}: size={size}")]
    ShapeRecovery { path: String, size: usize },

    #[error("{path} is 1-dimensional and its length {len} is not a perfect square")]
    NotSquare { path: String, len: usize },

    #[error("unsupported dtype or invalid npy file: {path}")]
    UnreadableNpy { path: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),
}

/// Decide whether this crate claims responsibility for the given paths.
///
/// Only the first path is inspected. Returns the inferred [`SourceClass`]
/// when the paths are claimed, `None` otherwise. Never fails; any
/// uncertainty resolves to `None`.
pub fn sniff(paths: &[impl AsRef<Path>]) -> Option<SourceClass> {
    let first = paths.first()?;
    match SourceClass::classify(first) {
        SourceClass::Unrecognized => None,
        class => Some(class),
    }
}

/// Turns accepted paths into viewer [`Layer`]s.
///
/// OME sources (stack patterns, zarr, parquet, tiff) are decoded through the
/// configured [`SourceDecoder`]; `.npy` files are loaded directly. Each path
/// is processed independently and in order; per-path problems are logged as
/// warnings and skipped, and the batch fails only when nothing was readable.
pub struct LayerReader<D> {
    decoder: D,
    kind: LayerKind,
    volumetric_hook: Option<Box<dyn Fn(&Layer)>>,
}

impl<D: SourceDecoder> LayerReader<D> {
    pub fn new(decoder: D) -> Self {
        Self {
            decoder,
            kind: LayerKind::default(),
            volumetric_hook: None,
        }
    }

    /// Produce layers of the given kind (image by default). In labels mode
    /// arrays are cast to an integer dtype and no channel axis is set.
    pub fn with_kind(mut self, kind: LayerKind) -> Self {
        self.kind = kind;
        self
    }

    /// Install a callback invoked after a volumetric layer (three or more
    /// non-channel dimensions) is produced, e.g. to switch the host viewer
    /// to a 3-D display. The callback must not fail; the reader never
    /// depends on it.
    pub fn with_volumetric_hook(mut self, hook: impl Fn(&Layer) + 'static) -> Self {
        self.volumetric_hook = Some(Box::new(hook));
        self
    }

    /// Read every path in order, one attempted layer per path.
    ///
    /// # Errors
    ///
    /// Returns [`LayerReaderError::NoReadableInputs`] if no path yielded a
    /// layer. Per-path failures never abort the batch.
    pub fn read(&self, paths: &[impl AsRef<Path>]) -> Result<Vec<Layer>, LayerReaderError> {
        let mut layers = Vec::with_capacity(paths.len());

        for path in paths {
            let path = path.as_ref();
            match self.read_path(path) {
                Ok(layer) => layers.push(layer),
                Err(LayerReaderError::Unrecognized { path }) => {
                    log::warn!("skipping unrecognized path: {}", path);
                }
                Err(error) => {
                    log::warn!("failed to read '{}': {}", path.display(), error);
                }
            }
        }

        if layers.is_empty() {
            return Err(LayerReaderError::NoReadableInputs);
        }
        Ok(layers)
    }

    /// Read a single path, exposing the per-path errors that [`read`]
    /// downgrades to warnings.
    ///
    /// [`read`]: LayerReader::read
    pub fn read_path(&self, path: impl AsRef<Path>) -> Result<Layer, LayerReaderError> {
        let path = path.as_ref();
        // Classification is re-derived here rather than threaded through
        // from the sniffer; both call the same pure function.
        match SourceClass::classify(path) {
            SourceClass::Npy => self.read_npy(path),
            SourceClass::Unrecognized => Err(LayerReaderError::Unrecognized {
                path: path.display().to_string(),
            }),
            class => {
                debug_assert!(class.is_decoder_backed());
                self.read_decoded(path)
            }
        }
    }

    /// Decoder-backed sources: export, repair a flattened array if needed,
    /// then infer the channel axis from dimensionality.
    fn read_decoded(&self, path: &Path) -> Result<Layer, LayerReaderError> {
        let mut data = self.decoder.export(path)?;

        if data.ndim() == 1 {
            let (y, x) = self.decoder.info(path)?.plane();
            let size = data.len();
            if y == 0 || x == 0 || y * x != size {
                return Err(LayerReaderError::ShapeRecovery {
                    path: path.display().to_string(),
                    size,
                });
            }
            // Minimal TCZYX
            data = data.into_shape(&[1, 1, 1, y, x]).map_err(|_| {
                LayerReaderError::ShapeRecovery {
                    path: path.display().to_string(),
                    size,
                }
            })?;
        }

        let channel_axis = infer_channel_axis(data.shape(), path)?;
        Ok(self.finish(data, channel_axis, path))
    }

    /// `.npy` fallback: load directly, squaring up 1-D data when possible.
    fn read_npy(&self, path: &Path) -> Result<Layer, LayerReaderError> {
        let bytes = fs::read(path)?;
        let mut data = read_npy_any(&bytes).ok_or_else(|| LayerReaderError::UnreadableNpy {
            path: path.display().to_string(),
        })?;

        if data.ndim() == 1 {
            let len = data.len();
            let n = len.isqrt();
            if n * n != len {
                return Err(LayerReaderError::NotSquare {
                    path: path.display().to_string(),
                    len,
                });
            }
            data = data
                .into_shape(&[n, n])
                .map_err(|_| LayerReaderError::NotSquare {
                    path: path.display().to_string(),
                    len,
                })?;
        }

        let channel_axis =
            (data.ndim() == 3 && data.shape()[0] <= CHANNEL_AXIS_MAX).then_some(0);
        Ok(self.finish(data, channel_axis, path))
    }

    fn finish(&self, data: ArrayData, channel_axis: Option<usize>, path: &Path) -> Layer {
        let (data, channel_axis) = match self.kind {
            LayerKind::Image => (data, channel_axis),
            LayerKind::Labels => (data.into_labels(), None),
        };

        let options = LayerOptions {
            name: Some(display_name(path)),
            channel_axis,
        };
        let layer = Layer::new(data, options, self.kind);

        if layer.is_volumetric() {
            if let Some(hook) = &self.volumetric_hook {
                hook(&layer);
            }
        }
        layer
    }
}

/// Channel axis from dimensionality alone, assuming the TCZYX convention.
fn infer_channel_axis(shape: &[usize], path: &Path) -> Result<Option<usize>, LayerReaderError> {
    match shape.len() {
        ndim if ndim >= 5 => Ok(Some(1)),
        // Often (C, Z, Y, X)
        4 => Ok(Some(0)),
        // (Z, Y, X) or (C, Y, X); small leading dim reads as channels
        3 => Ok((shape[0] <= CHANNEL_AXIS_MAX).then_some(0)),
        2 => Ok(None),
        ndim => Err(LayerReaderError::UnsupportedDimensionality {
            ndim,
            path: path.display().to_string(),
        }),
    }
}

/// Try dtypes in likelihood order; f32 is the most common for scientific
/// data. Covers every numeric dtype `.npy` files carry in practice:
/// (u)int(8/16/32/64) and float(32/64).
fn read_npy_any(bytes: &[u8]) -> Option<ArrayData> {
    macro_rules! try_dtype {
        ($($t:ty),*) => {
            $(
                if let Ok(array) = ArrayD::<$t>::read_npy(Cursor::new(bytes)) {
                    return Some(array.into());
                }
            )*
        };
    }

    try_dtype!(f32, f64, u8, u16, i16, i32, u32, i64, u64, i8);
    None
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sniff_declines_unknown_suffix() {
        assert_eq!(sniff(&["fake.file"]), None);
        assert_eq!(sniff(&[] as &[&str]), None);
    }

    #[test]
    fn sniff_inspects_first_path_only() {
        assert_eq!(sniff(&["a.npy", "fake.file"]), Some(SourceClass::Npy));
        assert_eq!(sniff(&["fake.file", "a.npy"]), None);
    }

    #[test]
    fn channel_axis_by_dimensionality() {
        let path = Path::new("probe.ome.tiff");
        assert_eq!(
            infer_channel_axis(&[2, 3, 4, 64, 64], path).unwrap(),
            Some(1)
        );
        assert_eq!(infer_channel_axis(&[3, 4, 64, 64], path).unwrap(), Some(0));
        assert_eq!(infer_channel_axis(&[3, 64, 64], path).unwrap(), Some(0));
        assert_eq!(infer_channel_axis(&[40, 64, 64], path).unwrap(), None);
        assert_eq!(infer_channel_axis(&[64, 64], path).unwrap(), None);
    }

    #[test]
    fn channel_axis_threshold_is_inclusive() {
        let path = Path::new("probe.ome.tiff");
        assert_eq!(infer_channel_axis(&[6, 64, 64], path).unwrap(), Some(0));
        assert_eq!(infer_channel_axis(&[7, 64, 64], path).unwrap(), None);
    }

    #[test]
    fn zero_dimensional_is_rejected() {
        let error = infer_channel_axis(&[], Path::new("scalar.zarr")).unwrap_err();
        assert!(matches!(
            error,
            LayerReaderError::UnsupportedDimensionality { ndim: 0, .. }
        ));
    }

    #[test]
    fn display_name_is_final_component() {
        assert_eq!(display_name(Path::new("/data/run1/plate.ome.tiff")), "plate.ome.tiff");
        assert_eq!(display_name(Path::new("t<00-10>.tif")), "t<00-10>.tif");
    }
}
