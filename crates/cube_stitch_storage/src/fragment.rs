//! Read-only access to the values of one fragment.
//!
//! A fragment file is a flat array of `f32` in the native byte order, one value per point of the fragment in local offset
//! order. Files are named after the fragment key: `<input_dir>/<basename>-<x>-<y>-<z>.f32`.
//!
//! The file is memory mapped rather than read, so a fragment of which only a handful of values are wanted costs no more than
//! the pages actually touched. The mapping lives exactly as long as the `MappedFragment`.

use crate::{Result, StitchError};

use cube_stitch_core::prelude::*;

use memmap2::Mmap;
use std::fs::File;
use std::mem::size_of;
use std::path::{Path, PathBuf};

/// Random access to the values of one opened fragment.
pub trait FragmentValues {
    fn read_float(&self, offset: LocalOffset) -> Result<f32>;
}

/// Opens fragments by key. Each call should produce a fresh handle, which the caller drops as soon as it is done with it.
pub trait FragmentSource: Sync {
    type Fragment: FragmentValues;

    fn open_fragment(&self, key: FragmentKey) -> Result<Self::Fragment>;
}

/// Where fragment files live and how they are named.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FragmentLayout {
    pub input_dir: PathBuf,
    pub basename: String,
}

impl FragmentLayout {
    pub fn new(input_dir: impl Into<PathBuf>, basename: impl Into<String>) -> Self {
        Self {
            input_dir: input_dir.into(),
            basename: basename.into(),
        }
    }

    #[inline]
    pub fn file_name(&self, key: FragmentKey) -> String {
        format!("{}-{}.f32", self.basename, key)
    }

    #[inline]
    pub fn path_for(&self, key: FragmentKey) -> PathBuf {
        self.input_dir.join(self.file_name(key))
    }
}

/// A read-only memory map of one fragment file.
pub struct MappedFragment {
    key: FragmentKey,
    mmap: Mmap,
}

impl MappedFragment {
    /// Maps the file at `path`, which must hold at least `num_values` floats. A file that is missing, unreadable, empty, or
    /// too short is an error, so that every offset of the fragment is known to be readable afterwards.
    pub fn open(key: FragmentKey, path: &Path, num_values: u64) -> Result<Self> {
        let open_err = |source| StitchError::FragmentOpen {
            path: path.to_owned(),
            source,
        };

        let file = File::open(path).map_err(open_err)?;
        let len = file.metadata().map_err(open_err)?.len();
        let expected = num_values.saturating_mul(size_of::<f32>() as u64);
        if len == 0 || len < expected {
            return Err(StitchError::FragmentTooSmall {
                path: path.to_owned(),
                len,
                expected,
            });
        }

        // SAFETY: The map is read-only. Fragment files are not expected to be modified while a run is reading them.
        let mmap = unsafe { Mmap::map(&file) }.map_err(open_err)?;

        #[cfg(unix)]
        {
            if let Err(e) = mmap.advise(memmap2::Advice::Sequential) {
                tracing::debug!("madvise failed for {:?}: {}", path, e);
            }
        }

        Ok(Self { key, mmap })
    }
}

impl FragmentValues for MappedFragment {
    #[inline]
    fn read_float(&self, offset: LocalOffset) -> Result<f32> {
        let start = offset.0 as usize * size_of::<f32>();
        let bytes = self
            .mmap
            .get(start..start + size_of::<f32>())
            .ok_or(StitchError::OffsetOutOfBounds {
                key: self.key,
                offset,
            })?;

        Ok(bytemuck::pod_read_unaligned(bytes))
    }
}

/// Opens fragments as memory mapped files according to a `FragmentLayout`.
pub struct MappedFragmentSource {
    layout: FragmentLayout,
    values_per_fragment: u64,
}

impl MappedFragmentSource {
    pub fn new(layout: FragmentLayout, indexer: &FragmentIndexer) -> Self {
        Self {
            layout,
            values_per_fragment: indexer.fragment_volume(),
        }
    }
}

impl FragmentSource for MappedFragmentSource {
    type Fragment = MappedFragment;

    fn open_fragment(&self, key: FragmentKey) -> Result<MappedFragment> {
        MappedFragment::open(key, &self.layout.path_for(key), self.values_per_fragment)
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
