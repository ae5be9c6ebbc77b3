//! Core of the Dissidia 012 PACKAGE container tooling: the binary index
//! codec, sector-aligned blob access, the sidecar JSON form, and the engines
//! that resolve brute-forced filenames and replace record payloads in place.
//!
//! Everything here is synchronous and whole-file-in-memory; the one
//! interactive touchpoint (confirming a mutation) is injected through the
//! [`Confirm`] trait so the engines stay terminal-free and testable.

pub mod blob;
pub mod codec;
pub mod error;
pub mod extract;
pub mod index;
pub mod replace;
pub mod resolve;
pub mod sidecar;

pub use blob::{capacity, Blob, SECTOR};
pub use error::{PackError, Result};
pub use index::{Entry, Index, MagicTable};
pub use replace::{Confirm, PackPaths, ReplaceStatus};
pub use resolve::{batch_resolve, resolve, Counts, Resolution};
pub use sidecar::SidecarRecord;
