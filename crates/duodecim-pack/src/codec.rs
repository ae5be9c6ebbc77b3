use std::io::Cursor;

use binrw::{binread, BinReaderExt};

use crate::blob::{Blob, SECTOR};
use crate::error::{PackError, Result};
use crate::index::{Entry, Index, MagicTable};

/// First four bytes of a PACKAGE_INFO.BIN file.
pub const MAGIC: u32 = 537461272;
/// ASCII tag following the magic.
pub const SIGNATURE: [u8; 4] = *b"pack";

const HEADER_LEN: usize = 16;
const RECORD_LEN: usize = 12;

#[binread]
#[br(little)]
struct RawHeader {
    magic: u32,
    signature: [u8; 4],
    count: u32,
    // Skipped on read, always written back as zero.
    #[br(temp)]
    reserved: u32,
}

#[binread]
#[br(little)]
struct RawRecord {
    hash: u32,
    /// Actual offset is `offset_units * 2048`.
    offset_units: u32,
    /// 24-bit little-endian payload size.
    size: [u8; 3],
    flag: u8,
}

/// Parses a PACKAGE_INFO.BIN image into an index.
///
/// When the blob is supplied, each entry's `kind` is inferred from the first
/// bytes of its region through the magic table; an entry whose region falls
/// outside the blob is a format error, not a silent skip.
pub fn parse(bytes: &[u8], blob: Option<&Blob>, magics: &MagicTable) -> Result<Index> {
    if bytes.len() < HEADER_LEN {
        return Err(PackError::Truncated {
            expected: HEADER_LEN,
            actual: bytes.len(),
        });
    }

    let mut cursor = Cursor::new(bytes);
    let header: RawHeader = cursor.read_le().map_err(|_| PackError::Truncated {
        expected: HEADER_LEN,
        actual: bytes.len(),
    })?;

    if header.magic != MAGIC {
        return Err(PackError::BadMagic {
            found: header.magic,
            expected: MAGIC,
        });
    }
    if header.signature != SIGNATURE {
        return Err(PackError::BadSignature {
            found: header.signature,
        });
    }

    let count = header.count as usize;
    let expected = HEADER_LEN + count * RECORD_LEN;
    if bytes.len() < expected {
        return Err(PackError::Truncated {
            expected,
            actual: bytes.len(),
        });
    }

    let mut index = Index::new();
    for _ in 0..count {
        let record: RawRecord = cursor.read_le().map_err(|_| PackError::Truncated {
            expected,
            actual: bytes.len(),
        })?;
        let offset = record.offset_units as u64 * SECTOR;
        let size = u32::from_le_bytes([record.size[0], record.size[1], record.size[2], 0]);

        let kind = match blob {
            Some(blob) => {
                let region = blob.read_region(offset, size)?;
                let tag = &region[..region.len().min(4)];
                magics.extension(tag).map(str::to_string)
            }
            None => None,
        };

        index.insert(Entry {
            hash: record.hash,
            offset,
            size,
            flag: record.flag,
            filename: None,
            kind,
        });
    }

    tracing::debug!(count = index.len(), "parsed index");
    Ok(index)
}

/// Serializes an index back to the binary layout, in the index's own record
/// order. Output is exactly `16 + 12 * count` bytes.
pub fn serialize(index: &Index) -> Vec<u8> {
    let mut out = Vec::with_capacity(HEADER_LEN + RECORD_LEN * index.len());
    out.extend_from_slice(&MAGIC.to_le_bytes());
    out.extend_from_slice(&SIGNATURE);
    out.extend_from_slice(&(index.len() as u32).to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    for entry in index.iter() {
        out.extend_from_slice(&entry.hash.to_le_bytes());
        out.extend_from_slice(&((entry.offset / SECTOR) as u32).to_le_bytes());
        out.extend_from_slice(&entry.size.to_le_bytes()[..3]);
        out.push(entry.flag);
    }
    out
}
