//! The registry text codec.
//!
//! Registry files are line-oriented UTF-8:
//!
//! ```text
//! // line comment, stripped before parsing
//! # ignored line
//! SomeName
//! OtherName	0x12345678
//! folded~	#9abc
//! ```
//!
//! An entry line is either a bare `NAME`, whose hash is derived with
//! [`fnv_hash`], or `NAME<TAB>LITERAL` with an explicit hash literal. On
//! the way back out, the serializer writes the literal only when the hash
//! cannot be re-derived from the name (or when the caller forces literals,
//! as the forced merge does).

use std::io::{BufRead, Write};

use tracing::debug;

use crate::error::Result;
use crate::hash::fnv_hash;
use crate::literal::parse_i32;
use crate::store::NameRegistry;

/// Parse registry text from a buffered reader.
pub fn read_registry<R: BufRead>(reader: R) -> Result<NameRegistry> {
    let mut registry = NameRegistry::new();
    for line in reader.lines() {
        parse_line(&mut registry, &line?)?;
    }
    debug!(entries = registry.len(), "parsed registry");
    Ok(registry)
}

/// Parse registry text held in a string.
pub fn parse_str(text: &str) -> Result<NameRegistry> {
    let mut registry = NameRegistry::new();
    for line in text.lines() {
        parse_line(&mut registry, line)?;
    }
    Ok(registry)
}

/// Process one raw input line into registry entries.
fn parse_line(registry: &mut NameRegistry, line: &str) -> Result<()> {
    // Everything from the first `//` onward is a comment. This happens
    // before field splitting, so a comment can swallow the literal field.
    let text = line.split("//").next().unwrap_or("").trim();

    if text.is_empty() || text.starts_with('#') {
        return Ok(());
    }

    let mut fields = text.split('\t');
    let name = fields.next().unwrap_or("").trim();

    match fields.next() {
        None => {
            // Bare name: derived hash, names index only.
            registry.insert_name(fnv_hash(name), name);
        }
        Some(literal) => {
            let hash = parse_i32(literal.trim())?;
            if name.ends_with('~') {
                // Tilde names are keyed in lower case for lookup.
                registry.insert_hash(name.to_lowercase(), hash);
            }
            registry.insert_hash(name, hash);
            registry.insert_name(hash, name);
        }
    }
    Ok(())
}

/// Serialize a registry in encounter order.
///
/// An entry's literal is written only when its stored hash differs from
/// the hash derived from its name, unless `force_hashes` is set, in which
/// case every line carries a `0x` literal.
pub fn write_registry<W: Write>(
    registry: &NameRegistry,
    writer: &mut W,
    force_hashes: bool,
) -> Result<()> {
    for (hash, name) in registry.entries() {
        if force_hashes || fnv_hash(name) != hash {
            writeln!(writer, "{name}\t0x{:x}", hash as u32)?;
        } else {
            writeln!(writer, "{name}")?;
        }
    }
    Ok(())
}

/// Serialize a registry to a string.
pub fn write_to_string(registry: &NameRegistry, force_hashes: bool) -> Result<String> {
    let mut buf = Vec::new();
    write_registry(registry, &mut buf, force_hashes)?;
    // The serializer only ever emits UTF-8.
    Ok(String::from_utf8(buf).expect("serialized registry is UTF-8"))
}
