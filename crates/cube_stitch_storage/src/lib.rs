//! Extracting the values of a sparse surface from a cube that is stored as one file per fragment.
//!
//! The pipeline is:
//!   - `surface::read_surface`: parse the point stream
//!   - `binning::FragmentBins`: group the points by fragment, as sorted local offsets
//!   - `extract::Extractor`: one parallel unit of work per fragment, reading values through a `FragmentSource` (normally
//!     memory mapped files via `MappedFragmentSource`) and emitting `Record`s into a shared `RecordSink`
//!
//! The cube and fragment dimensions come from a JSON `Manifest`.

pub mod binning;
pub mod error;
pub mod extract;
pub mod fragment;
pub mod manifest;
pub mod record;
pub mod surface;

pub use binning::{validate_surface, FragmentBins};
pub use error::{Result, StitchError};
pub use extract::{ExtractStats, Extractor};
pub use fragment::{
    FragmentLayout, FragmentSource, FragmentValues, MappedFragment, MappedFragmentSource,
};
pub use manifest::Manifest;
pub use record::{read_records, LockedWriterSink, Record, RecordSink, RECORD_SIZE};
pub use surface::{read_surface, SurfaceHeader};

// Hash types to use for small keys like `FragmentKey`.
pub type SmallKeyHashMap<K, V> = std::collections::HashMap<K, V, SmallKeyBuildHasher>;
pub type SmallKeyBuildHasher = ahash::RandomState;

pub mod prelude {
    pub use super::{
        read_surface, validate_surface, ExtractStats, Extractor, FragmentBins, FragmentLayout,
        FragmentSource, FragmentValues, LockedWriterSink, Manifest, MappedFragment,
        MappedFragmentSource, Record, RecordSink, StitchError,
    };
}
