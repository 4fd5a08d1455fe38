//! Turning `FragmentBins` into a stream of `Record`s.
//!
//! There is one unit of work per fragment: open the fragment, then for each of its offsets (ascending) read the value,
//! translate the offset back to a global point, and emit the record. Fragments share nothing but the sink, so they are
//! processed in parallel on a rayon pool. Records of different fragments may interleave arbitrarily in the output.
//!
//! The first error aborts the run. Fragments that are still in flight are dropped (and unmapped) before the error reaches
//! the caller, and whatever has already been emitted must not be treated as a complete result.

use crate::{
    binning::FragmentBins,
    fragment::{FragmentSource, FragmentValues},
    record::{Record, RecordSink},
    Result,
};

use cube_stitch_core::prelude::*;

use rayon::prelude::*;
use rayon::ThreadPool;

/// Counts of the work done by a successful extraction.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ExtractStats {
    /// The number of fragments opened.
    pub fragments: usize,
    /// The number of records emitted. Equal to the number of surface points.
    pub records: usize,
}

impl ExtractStats {
    fn single_fragment(records: usize) -> Self {
        Self {
            fragments: 1,
            records,
        }
    }
}

impl core::ops::Add for ExtractStats {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            fragments: self.fragments + rhs.fragments,
            records: self.records + rhs.records,
        }
    }
}

/// Reads the values of binned surface points from fragments and emits them keyed by their global offset.
pub struct Extractor<Src> {
    indexer: FragmentIndexer,
    cube: CubeShape,
    source: Src,
}

impl<Src> Extractor<Src>
where
    Src: FragmentSource,
{
    pub fn new(indexer: FragmentIndexer, cube: CubeShape, source: Src) -> Self {
        Self {
            indexer,
            cube,
            source,
        }
    }

    /// Extracts every bin on the current rayon pool (the global pool, unless called from within `ThreadPool::install`).
    pub fn extract(&self, bins: &FragmentBins, sink: &impl RecordSink) -> Result<ExtractStats> {
        let span = tracing::info_span!("extract", fragments = bins.len());
        let _enter = span.enter();

        bins.par_iter()
            .map(|(key, offsets)| self.extract_fragment(key, offsets, sink))
            .try_reduce(ExtractStats::default, |a, b| Ok(a + b))
    }

    /// Like `extract`, but on a caller-provided fixed-size pool.
    pub fn extract_in_pool(
        &self,
        pool: &ThreadPool,
        bins: &FragmentBins,
        sink: &impl RecordSink,
    ) -> Result<ExtractStats> {
        pool.install(|| self.extract(bins, sink))
    }

    /// Open, then (read, transform, emit) for each offset, then release.
    pub fn extract_fragment(
        &self,
        key: FragmentKey,
        offsets: &[LocalOffset],
        sink: &impl RecordSink,
    ) -> Result<ExtractStats> {
        tracing::debug!("extracting {} values from fragment {}", offsets.len(), key);

        let fragment = self.source.open_fragment(key)?;
        for &offset in offsets.iter() {
            let value = fragment.read_float(offset)?;
            let global_point = self.indexer.global_point(key, offset);
            let global_offset = self.cube.global_linear_offset(global_point);
            sink.emit(Record::new(global_offset, value))?;
        }
        drop(fragment);

        Ok(ExtractStats::single_fragment(offsets.len()))
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
