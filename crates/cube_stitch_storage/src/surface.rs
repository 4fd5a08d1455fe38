//! Parsing the stream of surface points.
//!
//! The stream starts with a JSON object header, e.g. `{"size": 2}`, followed immediately (no separator) by `size` triples
//! of `i32` (x, y, z) in the byte order of this machine.

use crate::{Result, StitchError};

use cube_stitch_core::prelude::*;

use serde::{Deserialize, Serialize};
use std::io::Read;
use std::mem::size_of;

/// The JSON header of the point stream.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct SurfaceHeader {
    /// The number of points that follow.
    pub size: usize,
}

const POINT_SIZE: usize = 3 * size_of::<i32>();

/// Reads the header and exactly `header.size` points. Bytes after the last point are left in `reader`.
///
/// Memory grows with the bytes that actually arrive, so a header that declares more points than the stream holds is
/// reported as truncated rather than allocated up front.
pub fn read_surface(mut reader: impl Read) -> Result<(SurfaceHeader, Vec<Point3i>)> {
    let header = read_header(&mut reader)?;

    let num_bytes = header.size.checked_mul(POINT_SIZE).ok_or_else(|| {
        StitchError::MalformedInput(format!(
            "point stream header declares {} points, which overflows the addressable size",
            header.size
        ))
    })?;

    let mut bytes = Vec::new();
    (&mut reader)
        .take(num_bytes as u64)
        .read_to_end(&mut bytes)
        .map_err(StitchError::SurfaceRead)?;
    if bytes.len() != num_bytes {
        return Err(StitchError::MalformedInput(format!(
            "point stream truncated: header declares {} points ({} bytes), but only {} bytes follow",
            header.size,
            num_bytes,
            bytes.len()
        )));
    }

    let points = bytes
        .chunks_exact(POINT_SIZE)
        .map(|chunk| PointN(bytemuck::pod_read_unaligned::<[i32; 3]>(chunk)))
        .collect();

    Ok((header, points))
}

/// Reads one JSON object from the front of `reader`, consuming nothing past its closing brace.
pub fn read_header(reader: impl Read) -> Result<SurfaceHeader> {
    let mut de = serde_json::Deserializer::from_reader(reader);

    SurfaceHeader::deserialize(&mut de).map_err(StitchError::SurfaceHeader)
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝

#[cfg(test)]
mod test {
    use super::*;

    use pretty_assertions::assert_eq;
    use utilities::data_sets::encode_surface;

    #[test]
    fn parse_header_and_points() {
        let points = [PointN([3, 1, 0]), PointN([0, 0, 0]), PointN([1, 2, 3])];
        let bytes = encode_surface(&points);

        let (header, parsed) = read_surface(bytes.as_slice()).unwrap();

        assert_eq!(header, SurfaceHeader { size: 3 });
        assert_eq!(parsed, points.to_vec());
    }

    #[test]
    fn trailing_bytes_are_left_unread() {
        let mut bytes = encode_surface(&[PointN([1, 1, 1])]);
        bytes.extend_from_slice(b"rest");
        let mut reader = bytes.as_slice();

        let (_, parsed) = read_surface(&mut reader).unwrap();

        assert_eq!(parsed, vec![PointN([1, 1, 1])]);
        assert_eq!(reader, b"rest");
    }

    #[test]
    fn empty_surface() {
        let (header, parsed) = read_surface(&b"{\"size\": 0}"[..]).unwrap();

        assert_eq!(header.size, 0);
        assert!(parsed.is_empty());
    }

    #[test]
    fn truncated_stream_is_malformed() {
        let mut bytes = encode_surface(&[PointN([1, 2, 3]), PointN([4, 5, 6])]);
        bytes.truncate(bytes.len() - 1);

        match read_surface(bytes.as_slice()) {
            Err(StitchError::MalformedInput(message)) => assert!(message.contains("truncated")),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn huge_declared_size_is_truncated_not_allocated() {
        let mut bytes = b"{\"size\": 1000000000000000000}".to_vec();
        bytes.extend_from_slice(bytemuck::cast_slice(&[1i32, 2, 3]));

        match read_surface(bytes.as_slice()) {
            Err(StitchError::MalformedInput(message)) => {
                assert!(message.contains("truncated"), "{}", message)
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn overflowing_declared_size_is_malformed() {
        let text = format!("{{\"size\": {}}}", usize::MAX);

        assert!(matches!(
            read_surface(text.as_bytes()),
            Err(StitchError::MalformedInput(_))
        ));
    }

    #[test]
    fn bad_header_is_reported() {
        assert!(matches!(
            read_surface(&b"{\"points\": 2}"[..]),
            Err(StitchError::SurfaceHeader(_))
        ));
        assert!(matches!(
            read_surface(&b"{\"size\": -1}"[..]),
            Err(StitchError::SurfaceHeader(_))
        ));
    }
}
