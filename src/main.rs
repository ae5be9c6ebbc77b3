mod codes;
mod prompt;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use duodecim_pack::{codec, extract, replace, resolve, sidecar, Blob, Confirm, PackPaths, SidecarRecord};
use tracing_subscriber::EnvFilter;

use crate::prompt::TerminalConfirm;

#[derive(Parser)]
#[command(name = "duodecim")]
#[command(
    author,
    version,
    about = "Dissidia 012 PACKAGE file list creator and unpacker"
)]
#[command(after_help = "\
The best way to find file names is to play the ULUS10566 version on PPSSPP \
and hook 0x08871288 with a log of {a0:s}, then probe the logged paths with \
`duodecim hash`. Templates may use wildcards: %2s and %3s insert the 2- and \
3-letter character/series codes, %5s and %6s the 5- and 6-letter character \
codes, and %1d..%5d insert zero-padded numbers (0-9, 00-99, ...). Example: \
duodecim hash 'voice/sounds/battle_%3s1%1d0.at3'

WARNING: false positives are possible, so use wildcards sparingly!")]
#[command(arg_required_else_help = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a PACKAGE_INFO.BIN (and the PACKAGE.BIN beside it, when
    /// present) into a fresh PACKAGE_INFO.json
    Info { path: PathBuf },

    /// Regenerate PACKAGE_INFO.BIN from a PACKAGE_INFO.json sidecar
    Compile { path: PathBuf },

    /// Hash a path template (wildcards allowed) and record any index match
    /// in the local PACKAGE_INFO.json
    Hash {
        template: String,

        /// Reject hash hits whose extension contradicts the region magic
        #[arg(short, long)]
        enforce_ext: bool,
    },

    /// Batch version of hash: one template per line from a text file
    Text {
        path: PathBuf,

        /// Reject hash hits whose extension contradicts the region magic
        #[arg(short, long)]
        enforce_ext: bool,
    },

    /// Write PACKAGE_INFO_sorted.json, ordered by blob offset
    Sorted { path: PathBuf },

    /// Report resolved filename coverage, bucketed by file type
    Meta { path: PathBuf },

    /// Unpack every record of a PACKAGE.BIN into its directory
    Extract { path: PathBuf },

    /// Replace one record's payload in PACKAGE.BIN (within region limits);
    /// expects PACKAGE.BIN and PACKAGE_INFO.json in the working directory
    Replace {
        /// Path of the new payload file (its name does not matter)
        payload: PathBuf,

        /// Resolved filename of the record being replaced
        #[arg(short, long)]
        filename: String,
    },
}

fn main() -> ExitCode {
    init_logging();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:?}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

fn run() -> Result<()> {
    match Cli::parse().command {
        Commands::Info { path } => handle_info(&path),
        Commands::Compile { path } => handle_compile(&path),
        Commands::Hash {
            template,
            enforce_ext,
        } => handle_templates(vec![template], enforce_ext),
        Commands::Text { path, enforce_ext } => handle_text(&path, enforce_ext),
        Commands::Sorted { path } => handle_sorted(&path),
        Commands::Meta { path } => handle_meta(&path),
        Commands::Extract { path } => handle_extract(&path),
        Commands::Replace { payload, filename } => handle_replace(&payload, &filename),
    }
}

fn handle_info(path: &Path) -> Result<()> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;

    // Sample region magics for type guesses when the blob sits next to the
    // index, the usual layout of a dumped UMD.
    let blob_path = path.with_file_name("PACKAGE.BIN");
    let blob = match blob_path.exists() {
        true => Some(
            Blob::load(&blob_path).with_context(|| format!("reading {}", blob_path.display()))?,
        ),
        false => None,
    };
    if blob.is_none() {
        tracing::warn!("no PACKAGE.BIN next to the index, skipping type detection");
    }

    let index = codec::parse(&bytes, blob.as_ref(), &codes::MAGIC_EXTS)
        .with_context(|| format!("parsing {}", path.display()))?;

    let out = path.with_file_name("PACKAGE_INFO.json");
    sidecar::save(&index, &out).with_context(|| format!("writing {}", out.display()))?;
    println!("Wrote {} entries to {}", index.len(), out.display());
    Ok(())
}

fn handle_compile(path: &Path) -> Result<()> {
    if !TerminalConfirm.confirm("Do you want to create a new PACKAGE_INFO.BIN file?") {
        println!("Cancelled creating PACKAGE_INFO.BIN.");
        return Ok(());
    }

    let index =
        sidecar::load(path).with_context(|| format!("reading sidecar {}", path.display()))?;
    let out = path.with_file_name("PACKAGE_INFO.BIN");
    fs::write(&out, codec::serialize(&index))
        .with_context(|| format!("writing {}", out.display()))?;
    println!("Wrote {} records to {}", index.len(), out.display());
    Ok(())
}

fn handle_text(path: &Path, enforce_ext: bool) -> Result<()> {
    let content =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let templates: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();
    handle_templates(templates, enforce_ext)
}

fn handle_templates(templates: Vec<String>, enforce_ext: bool) -> Result<()> {
    for template in &templates {
        if !duodecim_wildcard::has_placeholder(template) {
            let hash = duodecim_hash::compute(template);
            println!("Path: {template}");
            println!("Number: {hash}");
            println!("Hex: {}", duodecim_hash::to_hex(hash));
        }
    }

    let paths = workspace_paths()?;
    let mut index = sidecar::load(&paths.sidecar)
        .with_context(|| format!("reading sidecar {}", paths.sidecar.display()))?;

    let counts = resolve::batch_resolve(
        &mut index,
        templates.iter().map(String::as_str),
        codes::CODE_LISTS,
        enforce_ext,
    )?;

    println!("Found {} matches!", counts.matched);
    if counts.matched > 0 {
        sidecar::save(&index, &paths.sidecar)
            .with_context(|| format!("writing {}", paths.sidecar.display()))?;
        println!("Updated {}!", paths.sidecar.display());
    } else {
        println!("Nothing new found. No update to {}.", paths.sidecar.display());
    }
    println!("Filenames: {} / {}", index.resolved(), index.len());
    Ok(())
}

fn handle_sorted(path: &Path) -> Result<()> {
    let index =
        sidecar::load(path).with_context(|| format!("reading sidecar {}", path.display()))?;
    let records: Vec<SidecarRecord> =
        index.by_offset().into_iter().map(SidecarRecord::from).collect();

    let out = path.with_file_name("PACKAGE_INFO_sorted.json");
    fs::write(&out, serde_json::to_string_pretty(&records)?)
        .with_context(|| format!("writing {}", out.display()))?;
    println!("Sorted data written to {}", out.display());
    Ok(())
}

fn handle_meta(path: &Path) -> Result<()> {
    let index =
        sidecar::load(path).with_context(|| format!("reading sidecar {}", path.display()))?;

    let mut buckets: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
    for entry in index.iter() {
        let bucket = buckets
            .entry(entry.kind.as_deref().unwrap_or("unknown"))
            .or_default();
        bucket.1 += 1;
        if entry.filename.is_some() {
            bucket.0 += 1;
        }
    }

    println!("{:<12} {:>9} {:>9}", "type", "named", "total");
    for (kind, (named, total)) in &buckets {
        println!("{kind:<12} {named:>9} {total:>9}");
    }
    println!("Filenames: {} / {}", index.resolved(), index.len());
    Ok(())
}

fn handle_extract(path: &Path) -> Result<()> {
    let out_dir = path.parent().unwrap_or(Path::new(".")).to_path_buf();
    let question = format!(
        "This will unpack all files into {}. Continue?",
        out_dir.display()
    );
    if !TerminalConfirm.confirm(&question) {
        println!("Extract cancelled.");
        return Ok(());
    }

    let sidecar_path = path.with_file_name("PACKAGE_INFO.json");
    let index = sidecar::load(&sidecar_path)
        .with_context(|| format!("reading sidecar {}", sidecar_path.display()))?;
    let blob = Blob::load(path).with_context(|| format!("reading {}", path.display()))?;

    let written = extract::extract_all(&index, &blob, &out_dir)
        .with_context(|| format!("extracting {}", path.display()))?;
    println!("Extracted {written} files to {}", out_dir.display());
    Ok(())
}

fn handle_replace(payload_path: &Path, filename: &str) -> Result<()> {
    let paths = workspace_paths()?;
    let payload =
        fs::read(payload_path).with_context(|| format!("reading {}", payload_path.display()))?;

    println!("Replacing file: {filename}");
    let status = replace::replace_file(&paths, &mut TerminalConfirm, filename, &payload)
        .with_context(|| format!("replacing {filename} in {}", paths.blob.display()))?;

    match status {
        replace::ReplaceStatus::Replaced { size, capacity, .. } => {
            println!("Replaced {filename}: {size} bytes in a {capacity}-byte region.");
            println!("Backups written next to the originals as .bak files.");
        }
        replace::ReplaceStatus::Cancelled => println!("Replace cancelled."),
    }
    Ok(())
}

/// The PACKAGE file set is looked up in the invocation's working directory,
/// next to wherever the UMD dump was unpacked.
fn workspace_paths() -> Result<PackPaths> {
    Ok(PackPaths::in_dir(
        &std::env::current_dir().context("resolving working directory")?,
    ))
}
