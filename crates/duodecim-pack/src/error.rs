use std::path::PathBuf;

/// Structured errors for the pack core.
///
/// The CLI wraps these with `anyhow` for context chains naming the file
/// being processed.
#[derive(Debug, thiserror::Error)]
pub enum PackError {
    #[error("bad index magic {found:#010x} (expected {expected:#010x})")]
    BadMagic { found: u32, expected: u32 },

    #[error("bad index signature {:?} (expected \"pack\")", String::from_utf8_lossy(.found))]
    BadSignature { found: [u8; 4] },

    #[error("index data truncated: need {expected} bytes, have {actual}")]
    Truncated { expected: usize, actual: usize },

    #[error("region [{offset}, {offset}+{size}) lies outside the {len}-byte blob")]
    OffsetOutOfRange { offset: u64, size: u64, len: u64 },

    #[error("no index entry for {name:?} (hash {hash})")]
    MissingEntry { name: String, hash: u32 },

    #[error("sidecar not found: {}", .path.display())]
    MissingSidecar { path: PathBuf },

    #[error("replacement payload of {len} bytes exceeds the region capacity of {capacity}")]
    PayloadTooLarge { len: usize, capacity: u64 },

    #[error(transparent)]
    Wildcard(#[from] duodecim_wildcard::WildcardError),

    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("sidecar is not valid JSON: {0}")]
    Sidecar(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PackError>;
