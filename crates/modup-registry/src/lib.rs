//! Name/hash registry core for ModUp.
//!
//! A registry file assigns a 32-bit hash value to each human-readable name,
//! and vice versa. Registries are persisted as line-oriented, tab-delimited
//! UTF-8 text and are the lookup tables a modding toolkit uses to turn
//! identifiers into the hashes the game engine works with.
//!
//! # Key pieces
//!
//! - [`fnv_hash`] — the canonical case-insensitive 32-bit hash of a name
//! - [`parse_i32`] — decodes a hash literal in any of its four notations
//! - [`NameRegistry`] — the in-memory dual-index store for one registry
//! - [`codec`] — parses registry text into a [`NameRegistry`] and
//!   serializes it back out
//!
//! This crate performs no filesystem I/O of its own: the codec reads from
//! any [`std::io::BufRead`] and writes to any [`std::io::Write`]. Opening
//! and replacing registry files is the merge engine's job.

pub mod codec;
pub mod error;
pub mod hash;
pub mod literal;
pub mod store;

pub use error::{RegistryError, Result};
pub use hash::fnv_hash;
pub use literal::parse_i32;
pub use store::NameRegistry;
