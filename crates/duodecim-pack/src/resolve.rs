use duodecim_wildcard::{self as wildcard, CodeLists};

use crate::error::Result;
use crate::index::Index;

/// Outcome of testing one candidate path against the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The candidate's hash hit an unnamed entry; the entry now carries the
    /// lowercased candidate as its filename.
    Matched,
    /// The hash hit an entry that was already named; nothing was modified.
    AlreadyResolved(String),
    NoMatch,
}

/// Running totals for a batch of candidates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counts {
    pub matched: usize,
    pub already: usize,
    pub none: usize,
}

/// Tests a single candidate against the index.
pub fn resolve(index: &mut Index, candidate: &str) -> Resolution {
    resolve_guarded(index, candidate, false)
}

fn resolve_guarded(index: &mut Index, candidate: &str, enforce_extension: bool) -> Resolution {
    let hash = duodecim_hash::compute(candidate);
    let Some(entry) = index.get_mut(hash) else {
        return Resolution::NoMatch;
    };
    if enforce_extension && !extension_compatible(candidate, entry.kind.as_deref()) {
        // A 32-bit hash brute-forced over enough candidates will collide;
        // a type mismatch outranks the hash hit.
        tracing::warn!(
            candidate,
            kind = entry.kind.as_deref().unwrap_or(""),
            "hash hit rejected on extension mismatch"
        );
        return Resolution::NoMatch;
    }
    match &entry.filename {
        Some(existing) => Resolution::AlreadyResolved(existing.clone()),
        None => {
            let name = candidate.to_lowercase();
            tracing::info!(hash, name = %name, "filename resolved");
            entry.filename = Some(name);
            Resolution::Matched
        }
    }
}

fn extension_compatible(candidate: &str, kind: Option<&str>) -> bool {
    // Entries whose region magic was never sampled can't be checked.
    let Some(kind) = kind else { return true };
    match candidate.rsplit_once('.') {
        Some((_, ext)) => ext.eq_ignore_ascii_case(kind),
        None => false,
    }
}

/// Resolves a batch of templates, expanding wildcards where present.
///
/// The caller decides whether the sidecar is worth persisting afterwards
/// (typically only when `matched > 0`).
pub fn batch_resolve<'a, I>(
    index: &mut Index,
    templates: I,
    lists: CodeLists<'_>,
    enforce_extension: bool,
) -> Result<Counts>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts = Counts::default();
    for template in templates {
        if wildcard::has_placeholder(template) {
            let expansion = wildcard::expand(template, lists)?;
            let total = expansion.combinations();
            tracing::info!(template, candidates = %total, "expanding wildcards");
            for (nth, candidate) in expansion.enumerate() {
                let hash = duodecim_hash::compute(&candidate);
                tracing::debug!(
                    "[{} of {total}] {candidate} = {} ({})",
                    nth + 1,
                    hash,
                    duodecim_hash::to_hex(hash)
                );
                counts.tally(resolve_guarded(index, &candidate, enforce_extension));
            }
        } else {
            counts.tally(resolve_guarded(index, template, enforce_extension));
        }
    }
    Ok(counts)
}

impl Counts {
    fn tally(&mut self, resolution: Resolution) {
        match resolution {
            Resolution::Matched => self.matched += 1,
            Resolution::AlreadyResolved(_) => self.already += 1,
            Resolution::NoMatch => self.none += 1,
        }
    }
}
