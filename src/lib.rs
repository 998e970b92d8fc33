//! # OME-reader library
//!
//! This crate serves a high-level API for opening OME microscopy sources as
//! viewer image or label layers.

//!
//! A [`sniff`] call decides from the path alone whether this crate claims an
//! input (stack patterns with `<`, `>`, `*`, OME-Zarr, OME-Parquet,
//! OME-TIFF, or NumPy `.npy` files). A [`LayerReader`] then turns accepted
//! paths into [`Layer`]s: decoding of OME sources is delegated to a
//! [`SourceDecoder`] implementation, `.npy` files are loaded directly, and a
//! small set of deterministic shape heuristics picks the channel axis so the
//! host viewer renders channels and dimensions correctly. Sources are
//! assumed to follow the TCZYX axis convention:
//!  - Time
//!  - Channel
//!  - Z-depth
//!  - Y-height
//!  - X-width
//!
//!  Library consumers can choose whether layers are produced as images or as
//!  integer labels, and may install a callback that fires when a volumetric
//!  layer (e.g. a z-stack) is produced. Per-path problems are logged as
//!  warnings and skipped; a batch fails only when none of its paths yielded
//!  a layer.
//!
//!   Contributions are highly welcome!
//!
//! # Examples
//!
//! ## Reading a TIFF file into an image layer
//!
//! Sniff the path, then read it with the built-in TIFF decoder and inspect
//! the produced layer.
//!
//! ```no_run
//! # use ome_reader::{sniff, LayerReader, TiffFileDecoder};
//! let paths = ["plate.ome.tiff"];
//! if sniff(&paths).is_some() {
//!     let layers = LayerReader::new(TiffFileDecoder)
//!         .read(&paths)
//!         .expect("should have produced at least one layer");
//!     for layer in &layers {
//!         println!("{:?}: {:?}", layer.options.name, layer.data.shape());
//!     }
//! }
//! ```

pub mod array_data;
pub mod decoder;
pub mod enums;
pub mod layer;
pub mod layer_reader;
pub mod tiff_decoder;

pub use array_data::ArrayData;
pub use decoder::{DecodeError, SourceDecoder, SourceInfo};
pub use enums::{LayerKind, SourceClass};
pub use layer::{Layer, LayerOptions};
pub use layer_reader::{CHANNEL_AXIS_MAX, LayerReader, LayerReaderError, sniff};
pub use tiff_decoder::TiffFileDecoder;
