use std::fs;
use std::path::{Path, PathBuf};

use crate::blob::{self, Blob};
use crate::codec;
use crate::error::{PackError, Result};
use crate::index::Index;
use crate::sidecar;

/// Yes/no confirmation capability, injected so the engines never talk to a
/// terminal themselves. Every mutating operation asks exactly once, before
/// its first side effect; declining is a cancellation, not an error.
pub trait Confirm {
    fn confirm(&mut self, question: &str) -> bool;
}

/// The container file set one invocation works on.
#[derive(Debug, Clone)]
pub struct PackPaths {
    pub sidecar: PathBuf,
    pub index_bin: PathBuf,
    pub blob: PathBuf,
}

impl PackPaths {
    pub fn in_dir(dir: &Path) -> Self {
        PackPaths {
            sidecar: dir.join("PACKAGE_INFO.json"),
            index_bin: dir.join("PACKAGE_INFO.BIN"),
            blob: dir.join("PACKAGE.BIN"),
        }
    }

    fn backup_of(path: &Path) -> PathBuf {
        let mut name = path.as_os_str().to_os_string();
        name.push(".bak");
        PathBuf::from(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplaceStatus {
    Replaced { hash: u32, size: u32, capacity: u64 },
    Cancelled,
}

/// In-memory core of a replacement: validates the target and capacity, then
/// swaps the payload and updates the entry's size. `offset`, `hash` and
/// `flag` never change; shrinking a record leaves the stale tail bytes of
/// its region in place.
pub fn apply(index: &mut Index, blob_data: &mut Blob, target: &str, payload: &[u8]) -> Result<u32> {
    let hash = duodecim_hash::compute(target);
    let Some(entry) = index.get(hash) else {
        return Err(PackError::MissingEntry {
            name: target.to_string(),
            hash,
        });
    };

    let capacity = blob::capacity(entry.size);
    if payload.len() as u64 > capacity {
        return Err(PackError::PayloadTooLarge {
            len: payload.len(),
            capacity,
        });
    }

    blob_data.write_region(entry.offset, payload)?;
    if let Some(entry) = index.get_mut(hash) {
        entry.size = payload.len() as u32;
    }
    Ok(hash)
}

/// Replaces one record on disk: loads the sidecar and blob, validates,
/// confirms, snapshots `.bak` backups, then persists the mutated blob,
/// sidecar and regenerated binary index.
///
/// The backups overwrite any stale backup from a previous run and are the
/// only recovery path; the multi-file write is not transactional.
pub fn replace_file(
    paths: &PackPaths,
    confirm: &mut dyn Confirm,
    target: &str,
    payload: &[u8],
) -> Result<ReplaceStatus> {
    let mut index = sidecar::load(&paths.sidecar)?;
    let mut blob_data = Blob::load(&paths.blob)?;

    // Validate up front so a doomed replacement never prompts.
    let hash = duodecim_hash::compute(target);
    let Some(entry) = index.get(hash) else {
        return Err(PackError::MissingEntry {
            name: target.to_string(),
            hash,
        });
    };
    let capacity = blob::capacity(entry.size);
    if payload.len() as u64 > capacity {
        return Err(PackError::PayloadTooLarge {
            len: payload.len(),
            capacity,
        });
    }

    let question = format!(
        "Write {} bytes over {target} ({capacity}-byte region) in {}?",
        payload.len(),
        paths.blob.display()
    );
    if !confirm.confirm(&question) {
        tracing::info!(target, "replace cancelled, nothing written");
        return Ok(ReplaceStatus::Cancelled);
    }

    fs::copy(&paths.sidecar, PackPaths::backup_of(&paths.sidecar))?;
    fs::copy(&paths.blob, PackPaths::backup_of(&paths.blob))?;

    let hash = apply(&mut index, &mut blob_data, target, payload)?;

    blob_data.save(&paths.blob)?;
    sidecar::save(&index, &paths.sidecar)?;
    fs::write(&paths.index_bin, codec::serialize(&index))?;

    let size = payload.len() as u32;
    tracing::info!(target, hash, size, "record replaced, index regenerated");
    Ok(ReplaceStatus::Replaced {
        hash,
        size,
        capacity,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::Entry;

    struct Always(bool);

    impl Confirm for Always {
        fn confirm(&mut self, _question: &str) -> bool {
            self.0
        }
    }

    const TARGET: &str = "voice/sounds/battle_sev120.at3";

    fn seeded_paths(dir: &Path) -> PackPaths {
        let paths = PackPaths::in_dir(dir);

        let mut index = Index::new();
        index.insert(Entry {
            hash: duodecim_hash::compute(TARGET),
            offset: 2048,
            size: 3000,
            flag: 9,
            filename: Some(TARGET.to_string()),
            kind: Some("at3".to_string()),
        });
        sidecar::save(&index, &paths.sidecar).unwrap();

        // Two sectors of header slack, then the 4096-byte capacity region.
        Blob::new(vec![0xAA; 2048 + 4096]).save(&paths.blob).unwrap();
        paths
    }

    #[test]
    fn payload_at_exact_capacity_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let paths = seeded_paths(dir.path());

        let status =
            replace_file(&paths, &mut Always(true), TARGET, &vec![0x55; 4096]).unwrap();
        assert_eq!(
            status,
            ReplaceStatus::Replaced {
                hash: duodecim_hash::compute(TARGET),
                size: 4096,
                capacity: 4096,
            }
        );

        let index = sidecar::load(&paths.sidecar).unwrap();
        let entry = index.get(duodecim_hash::compute(TARGET)).unwrap();
        assert_eq!(entry.size, 4096);
        assert_eq!(entry.offset, 2048);
        assert_eq!(entry.flag, 9);

        let blob_data = Blob::load(&paths.blob).unwrap();
        assert!(blob_data.read_region(2048, 4096).unwrap().iter().all(|&b| b == 0x55));

        // The regenerated binary index agrees with the sidecar.
        let bin = fs::read(&paths.index_bin).unwrap();
        let reparsed = codec::parse(&bin, None, &crate::index::MagicTable::new(&[])).unwrap();
        assert_eq!(reparsed.get(duodecim_hash::compute(TARGET)).unwrap().size, 4096);
    }

    #[test]
    fn payload_one_byte_over_capacity_changes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let paths = seeded_paths(dir.path());
        let sidecar_before = fs::read(&paths.sidecar).unwrap();
        let blob_before = fs::read(&paths.blob).unwrap();

        let err =
            replace_file(&paths, &mut Always(true), TARGET, &vec![0x55; 4097]).unwrap_err();
        assert!(matches!(
            err,
            PackError::PayloadTooLarge { len: 4097, capacity: 4096 }
        ));

        assert_eq!(fs::read(&paths.sidecar).unwrap(), sidecar_before);
        assert_eq!(fs::read(&paths.blob).unwrap(), blob_before);
        assert!(!paths.index_bin.exists());
    }

    #[test]
    fn unknown_target_is_missing_entry() {
        let dir = tempfile::tempdir().unwrap();
        let paths = seeded_paths(dir.path());

        let err = replace_file(&paths, &mut Always(true), "no/such/file.bin", &[1, 2, 3])
            .unwrap_err();
        assert!(matches!(err, PackError::MissingEntry { .. }));
    }

    #[test]
    fn declining_makes_no_side_effects() {
        let dir = tempfile::tempdir().unwrap();
        let paths = seeded_paths(dir.path());
        let sidecar_before = fs::read(&paths.sidecar).unwrap();
        let blob_before = fs::read(&paths.blob).unwrap();

        let status =
            replace_file(&paths, &mut Always(false), TARGET, &vec![0x55; 16]).unwrap();
        assert_eq!(status, ReplaceStatus::Cancelled);

        assert_eq!(fs::read(&paths.sidecar).unwrap(), sidecar_before);
        assert_eq!(fs::read(&paths.blob).unwrap(), blob_before);
        assert!(!PackPaths::backup_of(&paths.blob).exists());
        assert!(!paths.index_bin.exists());
    }

    #[test]
    fn backups_snapshot_the_pre_mutation_state() {
        let dir = tempfile::tempdir().unwrap();
        let paths = seeded_paths(dir.path());
        let sidecar_before = fs::read(&paths.sidecar).unwrap();
        let blob_before = fs::read(&paths.blob).unwrap();

        replace_file(&paths, &mut Always(true), TARGET, &vec![0x55; 16]).unwrap();

        assert_eq!(
            fs::read(PackPaths::backup_of(&paths.sidecar)).unwrap(),
            sidecar_before
        );
        assert_eq!(
            fs::read(PackPaths::backup_of(&paths.blob)).unwrap(),
            blob_before
        );
        // The live blob did mutate.
        assert_ne!(fs::read(&paths.blob).unwrap(), blob_before);
    }

    #[test]
    fn shrinking_keeps_stale_region_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let paths = seeded_paths(dir.path());

        replace_file(&paths, &mut Always(true), TARGET, &vec![0x55; 16]).unwrap();

        let blob_data = Blob::load(&paths.blob).unwrap();
        let region = blob_data.read_region(2048, 3000).unwrap();
        assert!(region[..16].iter().all(|&b| b == 0x55));
        assert!(region[16..].iter().all(|&b| b == 0xAA));
    }
}
