//! Reconstructs the values of an irregular surface sampled from a cube that is stored as many fixed-size fragment files.
//!
//! This library is organized into two crates:
//! - **core**: lattice points and extents, and the arithmetic between global cube coordinates, fragment keys, and local
//!   offsets
//! - **storage**: binning surface points by fragment, memory mapped fragment files, and the parallel extraction of
//!   `(global offset, value)` records
//!
//! The `stitch` binary ties them together: it reads a manifest and a point stream, and writes records to standard output.
//!
//! ```no_run
//! use cube_stitch::prelude::*;
//!
//! # fn main() -> Result<(), StitchError> {
//! let manifest = Manifest::load(std::path::Path::new("data/manifest.json"))?;
//! let (indexer, cube) = (manifest.indexer(), manifest.cube_shape());
//!
//! let (_header, surface) = read_surface(std::io::stdin().lock())?;
//! validate_surface(&cube, &surface)?;
//! let bins = FragmentBins::bin_surface(&indexer, &cube, &surface);
//!
//! let source = MappedFragmentSource::new(manifest.layout("data"), &indexer);
//! let sink = LockedWriterSink::new(std::io::stdout());
//! Extractor::new(indexer, cube, source).extract(&bins, &sink)?;
//! sink.flush()?;
//! # Ok(())
//! # }
//! ```

pub use cube_stitch_core as core;
pub use cube_stitch_storage as storage;

pub mod prelude {
    pub use super::core::prelude::*;
    pub use super::storage::prelude::*;
}
