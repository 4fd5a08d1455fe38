use crate::{fragment::FragmentLayout, Result, StitchError};

use cube_stitch_core::prelude::*;

use serde::{Deserialize, Serialize};
use std::fs;
use std::mem::size_of;
use std::path::{Path, PathBuf};

/// The description of a fragmented cube, as a JSON object:
///
/// ```json
/// {
///     "fragment-xs": 2, "fragment-ys": 2, "fragment-zs": 2,
///     "cube-xs": 4, "cube-ys": 4, "cube-zs": 4,
///     "basename": "cube"
/// }
/// ```
///
/// Unknown fields are ignored, so a manifest may carry more than this tool needs.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Manifest {
    pub fragment_xs: i32,
    pub fragment_ys: i32,
    pub fragment_zs: i32,
    pub cube_xs: i32,
    pub cube_ys: i32,
    pub cube_zs: i32,
    pub basename: String,
}

impl Manifest {
    /// Reads and validates the manifest at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| StitchError::ManifestRead {
            path: path.to_owned(),
            source,
        })?;

        Self::from_json(&text)
    }

    /// Reads the manifest named `manifest` inside of `input_dir`, which is also where the fragment files are.
    pub fn load_from_dir(input_dir: &Path, manifest: &Path) -> Result<Self> {
        Self::load(&input_dir.join(manifest))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let manifest: Self = serde_json::from_str(text).map_err(StitchError::ManifestParse)?;
        manifest.validate()?;

        Ok(manifest)
    }

    /// All dimensions must be positive, the byte size of a fragment and the number of points in the cube must fit in a
    /// `u64`, and the basename must not be empty.
    pub fn validate(&self) -> Result<()> {
        let dims = [
            ("fragment-xs", self.fragment_xs),
            ("fragment-ys", self.fragment_ys),
            ("fragment-zs", self.fragment_zs),
            ("cube-xs", self.cube_xs),
            ("cube-ys", self.cube_ys),
            ("cube-zs", self.cube_zs),
        ];
        for &(field, value) in dims.iter() {
            if value <= 0 {
                return Err(StitchError::InvalidManifest {
                    field,
                    reason: format!("{} is not positive", value),
                });
            }
        }
        if self.basename.is_empty() {
            return Err(StitchError::InvalidManifest {
                field: "basename",
                reason: "must not be empty".to_owned(),
            });
        }

        let fragment = self.fragment_shape();
        let fragment_bytes = fragment
            .checked_volume()
            .and_then(|v| v.checked_mul(size_of::<f32>() as u64));
        if fragment_bytes.is_none() {
            return Err(StitchError::InvalidManifest {
                field: "fragment-xs",
                reason: format!("a fragment of shape {:?} is too large to address", fragment.0),
            });
        }
        if self.cube_shape().num_points().is_none() {
            return Err(StitchError::InvalidManifest {
                field: "cube-xs",
                reason: format!(
                    "a cube of shape {:?} has more points than a u64 offset can address",
                    self.cube_shape().shape().0
                ),
            });
        }

        let cube = self.cube_shape().shape();
        if cube.vector_div_floor(&fragment) * fragment != cube {
            tracing::debug!(
                "fragment shape {:?} does not divide cube shape {:?}; edge fragments are partially outside of the cube",
                fragment.0,
                cube.0
            );
        }

        Ok(())
    }

    #[inline]
    pub fn fragment_shape(&self) -> Point3i {
        PointN([self.fragment_xs, self.fragment_ys, self.fragment_zs])
    }

    #[inline]
    pub fn cube_shape(&self) -> CubeShape {
        CubeShape::new(PointN([self.cube_xs, self.cube_ys, self.cube_zs]))
    }

    /// Only valid after `validate`, which `load` and `from_json` take care of.
    #[inline]
    pub fn indexer(&self) -> FragmentIndexer {
        FragmentIndexer::new(self.fragment_shape())
    }

    #[inline]
    pub fn layout(&self, input_dir: impl Into<PathBuf>) -> FragmentLayout {
        FragmentLayout::new(input_dir, self.basename.clone())
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
