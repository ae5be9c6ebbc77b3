use hashbrown::HashMap;

/// One record description from the PACKAGE_INFO index.
///
/// `hash` is the only key the game knows; `filename` is reconstructed after
/// the fact by brute-force matching and stays lowercased once set. `flag` is
/// carried verbatim through every operation, its meaning is unknown
/// (suspected compression-related).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub hash: u32,
    /// Byte offset into the blob, always a multiple of 2048.
    pub offset: u64,
    /// Occupied payload length; fits in 24 bits.
    pub size: u32,
    pub flag: u8,
    pub filename: Option<String>,
    /// Extension guessed from the first bytes of the region, when a blob was
    /// available at parse time (or recorded in the sidecar).
    pub kind: Option<String>,
}

/// The parsed index: a `u32 -> Entry` map that remembers insertion order.
///
/// The binary format does not require any particular record order, but the
/// order the records arrived in is preserved so that re-serializing does not
/// shuffle the file. Offset-sorted access is a separate projection.
#[derive(Debug, Clone, Default)]
pub struct Index {
    entries: HashMap<u32, Entry>,
    order: Vec<u32>,
}

impl Index {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an entry, replacing any previous entry with the same hash
    /// without disturbing its position.
    pub fn insert(&mut self, entry: Entry) {
        let hash = entry.hash;
        if self.entries.insert(hash, entry).is_none() {
            self.order.push(hash);
        }
    }

    pub fn get(&self, hash: u32) -> Option<&Entry> {
        self.entries.get(&hash)
    }

    pub fn get_mut(&mut self, hash: u32) -> Option<&mut Entry> {
        self.entries.get_mut(&hash)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.order.iter().filter_map(|hash| self.entries.get(hash))
    }

    /// Entries sorted by blob offset; the order files physically occupy the
    /// container, used for extraction and human-readable listings.
    pub fn by_offset(&self) -> Vec<&Entry> {
        let mut entries: Vec<&Entry> = self.iter().collect();
        entries.sort_by_key(|e| e.offset);
        entries
    }

    /// How many entries have a reconstructed filename.
    pub fn resolved(&self) -> usize {
        self.iter().filter(|e| e.filename.is_some()).count()
    }
}

/// Magic-bytes to extension mapping, supplied as static game data.
///
/// Keys are fragments of the first four region bytes with NUL padding
/// stripped (the SFO magic `\0PSF` is keyed as `PSF`). Lookup strips NULs
/// from both ends of the tag and takes the longest matching prefix; the
/// empty key catches blank regions.
#[derive(Debug, Clone, Copy)]
pub struct MagicTable<'a>(&'a [(&'a [u8], &'a str)]);

impl<'a> MagicTable<'a> {
    pub const fn new(pairs: &'a [(&'a [u8], &'a str)]) -> Self {
        MagicTable(pairs)
    }

    pub fn extension(&self, tag: &[u8]) -> Option<&'a str> {
        let mut tag = &tag[..tag.len().min(4)];
        while let [0, rest @ ..] = tag {
            tag = rest;
        }
        while let [rest @ .., 0] = tag {
            tag = rest;
        }
        if tag.is_empty() {
            return self.lookup(&[]);
        }
        (1..=tag.len()).rev().find_map(|n| self.lookup(&tag[..n]))
    }

    fn lookup(&self, key: &[u8]) -> Option<&'a str> {
        self.0.iter().find(|(magic, _)| *magic == key).map(|(_, ext)| *ext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(hash: u32, offset: u64) -> Entry {
        Entry {
            hash,
            offset,
            size: 16,
            flag: 0,
            filename: None,
            kind: None,
        }
    }

    #[test]
    fn insertion_order_is_preserved() {
        let mut index = Index::new();
        index.insert(entry(30, 4096));
        index.insert(entry(10, 0));
        index.insert(entry(20, 2048));

        let hashes: Vec<u32> = index.iter().map(|e| e.hash).collect();
        assert_eq!(hashes, vec![30, 10, 20]);
    }

    #[test]
    fn reinsert_replaces_in_place() {
        let mut index = Index::new();
        index.insert(entry(1, 0));
        index.insert(entry(2, 2048));
        index.insert(Entry {
            size: 99,
            ..entry(1, 0)
        });

        assert_eq!(index.len(), 2);
        let hashes: Vec<u32> = index.iter().map(|e| e.hash).collect();
        assert_eq!(hashes, vec![1, 2]);
        assert_eq!(index.get(1).unwrap().size, 99);
    }

    #[test]
    fn by_offset_sorts_without_reordering() {
        let mut index = Index::new();
        index.insert(entry(30, 4096));
        index.insert(entry(10, 0));

        let offsets: Vec<u64> = index.by_offset().iter().map(|e| e.offset).collect();
        assert_eq!(offsets, vec![0, 4096]);
        // The insertion-order view is untouched.
        let hashes: Vec<u32> = index.iter().map(|e| e.hash).collect();
        assert_eq!(hashes, vec![30, 10]);
    }

    #[test]
    fn magic_lookup_handles_nul_padding_and_prefixes() {
        let table = MagicTable::new(&[
            (b"RIFF", "at3"),
            (b"PSF", "sfo"),
            (b"\x02", "exex"),
            (b"", "data"),
        ]);

        assert_eq!(table.extension(b"RIFF"), Some("at3"));
        assert_eq!(table.extension(b"\0PSF"), Some("sfo"));
        assert_eq!(table.extension(b"\x02\x00\x10\x20"), Some("exex"));
        assert_eq!(table.extension(b""), Some("data"));
        assert_eq!(table.extension(b"\0\0\0\0"), Some("data"));
        assert_eq!(table.extension(b"XYZW"), None);
    }
}
