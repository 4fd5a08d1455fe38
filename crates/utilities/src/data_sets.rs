use cube_stitch_core::prelude::*;

use std::fs;
use std::io;
use std::path::Path;

/// A value that is unique to `p` for any cube smaller than 100 samples on a side, and exactly representable as `f32`.
pub fn sample_value(p: Point3i) -> f32 {
    (p.x() * 10_000 + p.y() * 100 + p.z()) as f32
}

/// The raw file contents for a fragment holding `values`.
pub fn fragment_bytes(values: &[f32]) -> Vec<u8> {
    bytemuck::cast_slice(values).to_vec()
}

/// The values of the fragment at `key`, in local offset order, following `sample_value`.
pub fn fragment_values(indexer: &FragmentIndexer, key: FragmentKey) -> Vec<f32> {
    indexer
        .extent_for_fragment(key)
        .iter_points()
        .map(sample_value)
        .collect()
}

/// Writes one `<basename>-<x>-<y>-<z>.f32` file for every fragment that overlaps `cube`, filled with `sample_value`.
pub fn write_cube_fragments(
    dir: &Path,
    basename: &str,
    indexer: &FragmentIndexer,
    cube: &CubeShape,
) -> io::Result<Vec<FragmentKey>> {
    let keys: Vec<_> = indexer.fragment_keys_for_extent(&cube.extent()).collect();
    for &key in keys.iter() {
        let path = dir.join(format!("{}-{}.f32", basename, key));
        fs::write(path, fragment_bytes(&fragment_values(indexer, key)))?;
    }

    Ok(keys)
}

/// The manifest JSON describing `indexer` and `cube`.
pub fn manifest_json(indexer: &FragmentIndexer, cube: &CubeShape, basename: &str) -> String {
    let f = indexer.fragment_shape();
    let c = cube.shape();

    serde_json::json!({
        "fragment-xs": f.x(),
        "fragment-ys": f.y(),
        "fragment-zs": f.z(),
        "cube-xs": c.x(),
        "cube-ys": c.y(),
        "cube-zs": c.z(),
        "basename": basename,
    })
    .to_string()
}

/// Encodes a point stream: the JSON header followed by the raw coordinates.
pub fn encode_surface(points: &[Point3i]) -> Vec<u8> {
    let mut bytes = serde_json::json!({ "size": points.len() })
        .to_string()
        .into_bytes();
    for p in points.iter() {
        bytes.extend_from_slice(bytemuck::cast_slice(&p.0[..]));
    }

    bytes
}
