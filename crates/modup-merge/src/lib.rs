//! Merge engine for ModUp registries.
//!
//! An update ships registry data that has to be reconciled with the
//! registry files already on disk. Two disciplines exist:
//!
//! - **Additive** ([`additive_merge`]): entries whose hash is new to the
//!   destination are appended after the existing content; nothing already
//!   in the file is rewritten or reordered. Re-running the same merge adds
//!   nothing, because every incoming hash is then already present.
//! - **Forced** ([`forced_merge`]): incoming entries evict any existing
//!   entry that collides with them by hash, and the whole file is
//!   rewritten with explicit hash literals on every line.
//!
//! A missing destination file is not an error for either discipline: the
//! merge is silently skipped. Registries are optional, and a fresh install
//! may not have them.

use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use modup_registry::{codec, fnv_hash, NameRegistry};

pub mod error;

pub use error::{MergeError, Result};

/// Which reconciliation discipline a merge step uses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Discipline {
    /// Append-only: existing entries are never touched.
    #[default]
    Additive,
    /// Replace on hash collision, then rewrite the whole file.
    Forced,
}

/// What a merge step did to its destination.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The destination file does not exist; nothing was done.
    SkippedMissing,
    /// The merge ran; `entries` counts the appended (additive) or
    /// replaced-or-inserted (forced) entries.
    Applied { entries: usize },
}

/// Merge `incoming` into the registry file at `dest` under `discipline`.
pub fn merge_into(
    dest: &Path,
    incoming: &NameRegistry,
    discipline: Discipline,
) -> Result<MergeOutcome> {
    match discipline {
        Discipline::Additive => additive_merge(dest, incoming),
        Discipline::Forced => forced_merge(dest, incoming),
    }
}

/// Append the entries of `incoming` that are new to the registry at `dest`.
///
/// Before the first appended entry a blank separator line is written (and
/// only then); each entry goes on its own line, with a `0x` literal when
/// the name ends in `~` or its hash cannot be re-derived from the name.
/// Existing file content is never rewritten.
pub fn additive_merge(dest: &Path, incoming: &NameRegistry) -> Result<MergeOutcome> {
    if !dest.exists() {
        debug!(dest = %dest.display(), "destination registry missing, skipping merge");
        return Ok(MergeOutcome::SkippedMissing);
    }

    let existing = codec::read_registry(BufReader::new(File::open(dest)?))?;

    let mut out = BufWriter::new(OpenOptions::new().append(true).open(dest)?);
    let mut added = 0usize;

    for (hash, name) in incoming.entries() {
        if existing.get_name(hash).is_some() {
            continue;
        }
        if added == 0 {
            // Separator between the old content and the appended block.
            out.write_all(b"\n")?;
        }
        out.write_all(b"\n")?;
        out.write_all(name.as_bytes())?;
        if name.ends_with('~') || fnv_hash(name) != hash {
            write!(out, "\t0x{:x}", hash as u32)?;
        }
        added += 1;
    }

    if added > 0 {
        out.write_all(b"\n")?;
    }
    out.flush()?;

    info!(dest = %dest.display(), added, "additive registry merge");
    Ok(MergeOutcome::Applied { entries: added })
}

/// Replace colliding entries of the registry at `dest` with `incoming`.
///
/// For each incoming entry, the existing entry with the same hash is
/// removed from the hash-keyed index and its old name's entry is removed
/// from the name-keyed index, so no stale reverse mapping survives. The
/// destination is then rewritten in full with explicit hash literals.
///
/// All parsing happens before the destination is touched, and the rewrite
/// goes through a temporary file in the same directory, so a decode
/// failure never leaves a half-written registry behind.
pub fn forced_merge(dest: &Path, incoming: &NameRegistry) -> Result<MergeOutcome> {
    if !dest.exists() {
        debug!(dest = %dest.display(), "destination registry missing, skipping merge");
        return Ok(MergeOutcome::SkippedMissing);
    }

    let mut working = codec::read_registry(BufReader::new(File::open(dest)?))?;

    let mut replaced = 0usize;
    for (hash, name) in incoming.entries() {
        if let Some(old_name) = working.remove_by_hash(hash) {
            working.remove_by_name(&old_name);
        }
        working.add(name, hash);
        replaced += 1;
    }

    let dir = dest.parent().unwrap_or_else(|| Path::new("."));
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    codec::write_registry(&working, &mut tmp, true)?;
    tmp.persist(dest).map_err(|e| e.error)?;

    info!(dest = %dest.display(), entries = replaced, "forced registry merge");
    Ok(MergeOutcome::Applied { entries: replaced })
}
