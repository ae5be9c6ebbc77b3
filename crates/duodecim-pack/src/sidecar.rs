use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::{PackError, Result};
use crate::index::{Entry, Index};

/// One record of the PACKAGE_INFO.json sidecar, keyed in the file by the
/// decimal hash string.
///
/// This is the durable form the matching and replacement commands read and
/// write; `hex` mirrors the hash the way the game's hook logs it and
/// `filename` stays empty until a brute-force match lands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SidecarRecord {
    pub filename: String,
    pub hex: String,
    pub offset: u64,
    pub size: u32,
    pub unk1: u8,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl From<&Entry> for SidecarRecord {
    fn from(entry: &Entry) -> Self {
        SidecarRecord {
            filename: entry.filename.clone().unwrap_or_default(),
            hex: duodecim_hash::to_hex(entry.hash),
            offset: entry.offset,
            size: entry.size,
            unk1: entry.flag,
            kind: entry.kind.clone(),
        }
    }
}

impl SidecarRecord {
    fn into_entry(self, hash: u32) -> Entry {
        Entry {
            hash,
            offset: self.offset,
            size: self.size,
            flag: self.unk1,
            filename: Some(self.filename).filter(|name| !name.is_empty()),
            kind: self.kind,
        }
    }
}

/// Serializes the whole index keyed by decimal hash, ascending, so repeated
/// saves produce identical files regardless of in-memory map order.
struct SidecarDoc<'a>(&'a Index);

impl Serialize for SidecarDoc<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut entries: Vec<&Entry> = self.0.iter().collect();
        entries.sort_by_key(|entry| entry.hash);

        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for entry in entries {
            map.serialize_entry(&entry.hash.to_string(), &SidecarRecord::from(entry))?;
        }
        map.end()
    }
}

pub fn save(index: &Index, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(&SidecarDoc(index))?;
    fs::write(path, json)?;
    Ok(())
}

pub fn load(path: &Path) -> Result<Index> {
    if !path.exists() {
        return Err(PackError::MissingSidecar {
            path: path.to_path_buf(),
        });
    }
    let records: HashMap<String, SidecarRecord> = serde_json::from_slice(&fs::read(path)?)?;

    let mut keyed = Vec::with_capacity(records.len());
    for (key, record) in records {
        let hash: u32 = key.parse().map_err(|_| {
            PackError::Sidecar(<serde_json::Error as serde::de::Error>::custom(format!(
                "sidecar key {key:?} is not a decimal hash"
            )))
        })?;
        keyed.push((hash, record));
    }
    keyed.sort_by_key(|(hash, _)| *hash);

    let mut index = Index::new();
    for (hash, record) in keyed {
        index.insert(record.into_entry(hash));
    }
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_index() -> Index {
        let mut index = Index::new();
        index.insert(Entry {
            hash: 900,
            offset: 2048,
            size: 100,
            flag: 1,
            filename: Some("data/menu.bin".to_string()),
            kind: Some("bin".to_string()),
        });
        index.insert(Entry {
            hash: 77,
            offset: 0,
            size: 2048,
            flag: 0,
            filename: None,
            kind: None,
        });
        index
    }

    #[test]
    fn round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("PACKAGE_INFO.json");

        let index = sample_index();
        save(&index, &path).unwrap();
        let loaded = load(&path).unwrap();

        assert_eq!(loaded.len(), 2);
        let named = loaded.get(900).unwrap();
        assert_eq!(named.filename.as_deref(), Some("data/menu.bin"));
        assert_eq!(named.kind.as_deref(), Some("bin"));
        assert_eq!(named.flag, 1);

        let unnamed = loaded.get(77).unwrap();
        assert_eq!(unnamed.filename, None);
        assert_eq!(unnamed.kind, None);
        assert_eq!(unnamed.size, 2048);
    }

    #[test]
    fn unresolved_filenames_serialize_as_empty_strings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("PACKAGE_INFO.json");
        save(&sample_index(), &path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"filename\": \"\""));
        // The unknown type is omitted entirely, not serialized as null.
        assert!(!text.contains("null"));
    }

    #[test]
    fn keys_are_decimal_hashes_in_ascending_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("PACKAGE_INFO.json");
        save(&sample_index(), &path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let low = text.find("\"77\"").expect("key 77 present");
        let high = text.find("\"900\"").expect("key 900 present");
        assert!(low < high);
    }

    #[test]
    fn hex_field_matches_the_hash() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("PACKAGE_INFO.json");
        save(&sample_index(), &path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains(&duodecim_hash::to_hex(900)));
    }

    #[test]
    fn missing_sidecar_is_its_own_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load(&dir.path().join("PACKAGE_INFO.json")),
            Err(PackError::MissingSidecar { .. })
        ));
    }
}
