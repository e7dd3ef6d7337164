//! Payload access.
//!
//! The updater ships its replacement files and registry data as a payload.
//! [`PayloadSource`] abstracts over where that payload lives; the task only
//! ever asks for a readable stream by relative path.

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, Cursor, Read};
use std::path::{Path, PathBuf};

/// Read access to the shipped update payload.
///
/// Paths are relative, `/`-separated, and case-sensitive. Implementations
/// return [`io::ErrorKind::NotFound`] for paths the payload does not
/// contain; all other errors are propagated as-is.
pub trait PayloadSource: Send + Sync {
    /// Open a payload file for reading.
    fn open(&self, path: &str) -> io::Result<Box<dyn Read + Send>>;

    /// Whether the payload contains `path`.
    fn contains(&self, path: &str) -> bool {
        self.open(path).is_ok()
    }
}

/// Payload unpacked into a directory next to the updater binary.
#[derive(Debug, Clone)]
pub struct DirPayload {
    root: PathBuf,
}

impl DirPayload {
    /// Create a payload rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The payload's root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl PayloadSource for DirPayload {
    fn open(&self, path: &str) -> io::Result<Box<dyn Read + Send>> {
        let file = File::open(self.root.join(path))?;
        Ok(Box::new(file))
    }

    fn contains(&self, path: &str) -> bool {
        self.root.join(path).is_file()
    }
}

/// In-memory payload for tests and embedded use.
#[derive(Debug, Default, Clone)]
pub struct MemoryPayload {
    files: HashMap<String, Vec<u8>>,
}

impl MemoryPayload {
    /// Create an empty payload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file to the payload, replacing any previous content.
    pub fn insert(&mut self, path: impl Into<String>, content: impl Into<Vec<u8>>) {
        self.files.insert(path.into(), content.into());
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, path: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        self.insert(path, content);
        self
    }
}

impl PayloadSource for MemoryPayload {
    fn open(&self, path: &str) -> io::Result<Box<dyn Read + Send>> {
        match self.files.get(path) {
            Some(content) => Ok(Box::new(Cursor::new(content.clone()))),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("payload file not found: {path}"),
            )),
        }
    }

    fn contains(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }
}
