use std::fs;
use std::path::{Path, PathBuf};

use crate::blob::Blob;
use crate::error::Result;
use crate::index::Index;

/// Writes every record's payload under `out_dir`, in blob offset order.
///
/// Resolved entries keep their reconstructed path (directories are created
/// as needed); unresolved ones fall back to `<hex>.<kind|data>` so nothing
/// is silently skipped. Returns the number of files written.
pub fn extract_all(index: &Index, blob: &Blob, out_dir: &Path) -> Result<usize> {
    let mut written = 0;
    for entry in index.by_offset() {
        let relative = match &entry.filename {
            Some(name) => PathBuf::from(name),
            None => PathBuf::from(format!(
                "{}.{}",
                duodecim_hash::to_hex(entry.hash),
                entry.kind.as_deref().unwrap_or("data")
            )),
        };

        let dest = out_dir.join(&relative);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&dest, blob.read_region(entry.offset, entry.size)?)?;
        tracing::debug!(path = %dest.display(), size = entry.size, "extracted");
        written += 1;
    }

    tracing::info!(written, "extraction finished");
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::Entry;

    #[test]
    fn extracts_named_and_unnamed_entries() {
        let dir = tempfile::tempdir().unwrap();

        let mut index = Index::new();
        index.insert(Entry {
            hash: 0x11223344,
            offset: 2048,
            size: 4,
            flag: 0,
            filename: None,
            kind: Some("gmo".to_string()),
        });
        index.insert(Entry {
            hash: 0x55667788,
            offset: 0,
            size: 8,
            flag: 0,
            filename: Some("voice/sounds/test.at3".to_string()),
            kind: Some("at3".to_string()),
        });

        let mut data = vec![0u8; 4096];
        data[..8].copy_from_slice(b"RIFFDATA");
        data[2048..2052].copy_from_slice(b"OMG.");

        let written = extract_all(&index, &Blob::new(data), dir.path()).unwrap();
        assert_eq!(written, 2);

        assert_eq!(
            fs::read(dir.path().join("voice/sounds/test.at3")).unwrap(),
            b"RIFFDATA"
        );
        assert_eq!(
            fs::read(dir.path().join("44332211.gmo")).unwrap(),
            b"OMG."
        );
    }

    #[test]
    fn out_of_range_entry_aborts() {
        let dir = tempfile::tempdir().unwrap();

        let mut index = Index::new();
        index.insert(Entry {
            hash: 1,
            offset: 2048,
            size: 100,
            flag: 0,
            filename: None,
            kind: None,
        });

        assert!(extract_all(&index, &Blob::new(vec![0; 1024]), dir.path()).is_err());
    }
}
