//! The output of a stitching run: one `Record` per surface point, written as 12 raw bytes.
//!
//! Workers never see the output stream directly. They hand each record to a `RecordSink`, which is responsible for keeping
//! the bytes of one record together.

use crate::{Result, StitchError};

use std::io::{self, Write};
use std::sync::Mutex;

/// The number of bytes of one encoded record: an 8-byte offset followed by a 4-byte value.
pub const RECORD_SIZE: usize = 12;

/// A sample of the cube, keyed by its global linear offset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Record {
    pub global_offset: u64,
    pub value: f32,
}

impl Record {
    #[inline]
    pub fn new(global_offset: u64, value: f32) -> Self {
        Self {
            global_offset,
            value,
        }
    }

    /// Encodes the record in the byte order of this machine, which is the same order the fragment files are read in.
    #[inline]
    pub fn to_ne_bytes(&self) -> [u8; RECORD_SIZE] {
        let mut bytes = [0; RECORD_SIZE];
        bytes[..8].copy_from_slice(&self.global_offset.to_ne_bytes());
        bytes[8..].copy_from_slice(&self.value.to_ne_bytes());

        bytes
    }

    #[inline]
    pub fn from_ne_bytes(bytes: [u8; RECORD_SIZE]) -> Self {
        let mut offset = [0; 8];
        offset.copy_from_slice(&bytes[..8]);
        let mut value = [0; 4];
        value.copy_from_slice(&bytes[8..]);

        Self::new(u64::from_ne_bytes(offset), f32::from_ne_bytes(value))
    }
}

/// Decodes a whole output stream. Trailing bytes that do not make up a full record are an error.
pub fn read_records(bytes: &[u8]) -> Result<Vec<Record>> {
    if bytes.len() % RECORD_SIZE != 0 {
        return Err(StitchError::MalformedInput(format!(
            "record stream of {} bytes is not a multiple of {}",
            bytes.len(),
            RECORD_SIZE
        )));
    }

    Ok(bytes
        .chunks_exact(RECORD_SIZE)
        .map(|chunk| {
            let mut record = [0; RECORD_SIZE];
            record.copy_from_slice(chunk);
            Record::from_ne_bytes(record)
        })
        .collect())
}

/// The single destination shared by all extraction workers.
pub trait RecordSink: Sync {
    /// Emits one record. Records from concurrent callers may interleave, but the bytes of one record never do.
    fn emit(&self, record: Record) -> Result<()>;
}

/// A `RecordSink` that serializes writers with a lock held only for the duration of one record.
pub struct LockedWriterSink<W> {
    writer: Mutex<W>,
}

impl<W> LockedWriterSink<W>
where
    W: Write + Send,
{
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn flush(&self) -> Result<()> {
        self.lock()?.flush().map_err(StitchError::Output)
    }

    pub fn into_inner(self) -> Result<W> {
        self.writer.into_inner().map_err(|_| poisoned())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, W>> {
        self.writer.lock().map_err(|_| poisoned())
    }
}

impl<W> RecordSink for LockedWriterSink<W>
where
    W: Write + Send,
{
    #[inline]
    fn emit(&self, record: Record) -> Result<()> {
        let bytes = record.to_ne_bytes();

        self.lock()?.write_all(&bytes).map_err(StitchError::Output)
    }
}

fn poisoned() -> StitchError {
    StitchError::Output(io::Error::new(
        io::ErrorKind::Other,
        "output writer poisoned by a panicking worker",
    ))
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
    use rayon::prelude::*;

    #[test]
    fn record_layout_is_offset_then_value() {
        let record = Record::new(52, 1.5);
        let bytes = record.to_ne_bytes();

        assert_eq!(&bytes[..8], &52u64.to_ne_bytes());
        assert_eq!(&bytes[8..], &1.5f32.to_ne_bytes());
        assert_eq!(Record::from_ne_bytes(bytes), record);
    }

    #[test]
    fn truncated_stream_is_rejected() {
        let bytes = Record::new(1, 2.0).to_ne_bytes();

        assert!(read_records(&bytes[..11]).is_err());
        assert_eq!(read_records(&bytes).unwrap(), vec![Record::new(1, 2.0)]);
        assert!(read_records(&[]).unwrap().is_empty());
    }

    #[test]
    fn concurrent_records_never_tear() {
        let sink = LockedWriterSink::new(Vec::new());

        (0..10_000u64)
            .into_par_iter()
            .try_for_each(|i| sink.emit(Record::new(i, i as f32)))
            .unwrap();

        let mut records = read_records(&sink.into_inner().unwrap()).unwrap();
        records.sort_by_key(|r| r.global_offset);

        assert_eq!(records.len(), 10_000);
        for (i, r) in records.iter().enumerate() {
            assert_eq!(*r, Record::new(i as u64, i as f32));
        }
    }
}
