use std::path::Path;

/// Characters that mark a path as a stack pattern rather than a single file.
pub(crate) const STACK_PATTERN_CHARS: [char; 3] = ['<', '>', '*'];

/// Source format inferred from a path, derived purely from suffix and
/// substring matching. The only filesystem probe is an is-directory check
/// for paths whose `.zarr` nature is otherwise ambiguous.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceClass {
    /// Glob-like pattern (`<`, `>`, `*`) denoting a file sequence.
    Stack,
    /// OME-Zarr or plain Zarr store.
    Zarr,
    /// OME-Parquet file (`.parquet`, `.pq`).
    Parquet,
    /// OME-TIFF or plain TIFF file.
    Tiff,
    /// NumPy array file.
    Npy,
    /// Nothing this crate claims responsibility for.
    Unrecognized,
}

impl SourceClass {
    /// Classify a single path. Matching is checked in order: stack pattern,
    /// zarr, parquet, tiff, npy. Suffix comparison is ASCII-case-insensitive.
    pub fn classify(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let raw = path.to_string_lossy();
        let lower = raw.trim().to_ascii_lowercase();

        let class = if raw.contains(STACK_PATTERN_CHARS) {
            Self::Stack
        } else if lower.ends_with(".ome.zarr")
            || lower.ends_with(".zarr")
            || lower.contains(".zarr/")
            || (path.is_dir() && Self::has_extension(path, "zarr"))
        {
            Self::Zarr
        } else if lower.ends_with(".parquet") || lower.ends_with(".pq") {
            Self::Parquet
        } else if lower.ends_with(".tif") || lower.ends_with(".tiff") {
            Self::Tiff
        } else if lower.ends_with(".npy") {
            Self::Npy
        } else {
            Self::Unrecognized
        };

        log::debug!("classified {} as {:?}", raw, class);
        class
    }

    /// Whether an external decoder is expected to handle this source.
    pub fn is_decoder_backed(self) -> bool {
        matches!(self, Self::Stack | Self::Zarr | Self::Parquet | Self::Tiff)
    }

    fn has_extension(path: &Path, wanted: &str) -> bool {
        path.extension()
            .and_then(|s| s.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(wanted))
    }
}

/// Kind of viewer layer to produce.
///
/// This is an explicit configuration value handed to the reader; nothing in
/// this crate reads it from process-wide state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LayerKind {
    #[default]
    Image,
    Labels,
}

impl LayerKind {
    /// Tag consumed by the host viewer's layer-construction API.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Labels => "labels",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_by_suffix() {
        assert_eq!(SourceClass::classify("scan.ome.zarr"), SourceClass::Zarr);
        assert_eq!(SourceClass::classify("scan.zarr"), SourceClass::Zarr);
        assert_eq!(
            SourceClass::classify("store.zarr/group/array"),
            SourceClass::Zarr
        );
        assert_eq!(SourceClass::classify("table.parquet"), SourceClass::Parquet);
        assert_eq!(SourceClass::classify("table.pq"), SourceClass::Parquet);
        assert_eq!(SourceClass::classify("image.ome.tiff"), SourceClass::Tiff);
        assert_eq!(SourceClass::classify("IMAGE.TIF"), SourceClass::Tiff);
        assert_eq!(SourceClass::classify("data.npy"), SourceClass::Npy);
        assert_eq!(
            SourceClass::classify("fake.file"),
            SourceClass::Unrecognized
        );
    }

    #[test]
    fn stack_pattern_wins_over_suffix() {
        assert_eq!(SourceClass::classify("t<00-10>.tif"), SourceClass::Stack);
        assert_eq!(SourceClass::classify("frames_*.tiff"), SourceClass::Stack);
    }

    #[test]
    fn layer_kind_tags() {
        assert_eq!(LayerKind::Image.as_str(), "image");
        assert_eq!(LayerKind::Labels.as_str(), "labels");
    }
}
