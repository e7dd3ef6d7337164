//! The update manifest.
//!
//! A manifest is a TOML file shipped with the payload that declares every
//! update step in order:
//!
//! ```toml
//! program = "ModTool"
//!
//! [[files]]
//! source = "ModTool"
//!
//! [[files]]
//! source = "styles/dark.css"
//! dest = "styles/dark/theme.css"
//! optional = true
//!
//! [[registries]]
//! source = "reg_file.txt"
//!
//! [[registries]]
//! source = "reg_type.txt"
//! discipline = "forced"
//! ```
//!
//! `dest` defaults to `source`, so entries that land at the same relative
//! path only name it once. `discipline` defaults to `"additive"`.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use modup_merge::Discipline;

use crate::error::TaskResult;

/// Declarative list of update steps, in execution order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    /// Executable the updater waits on before touching the install folder
    /// and relaunches afterwards, relative to the install folder.
    pub program: Option<String>,

    /// Files to copy from the payload into the install folder.
    #[serde(default)]
    pub files: Vec<FileAction>,

    /// Registry data to merge into the user's registry files.
    #[serde(default)]
    pub registries: Vec<RegistryAction>,
}

/// One file-copy step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileAction {
    /// Path of the file inside the payload.
    pub source: String,
    /// Destination path relative to the install folder; defaults to
    /// `source`.
    pub dest: Option<String>,
    /// Optional files are only copied when the destination does not exist
    /// yet, so user edits survive updates.
    #[serde(default)]
    pub optional: bool,
}

/// One registry-merge step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryAction {
    /// Path of the shipped registry data inside the payload.
    pub source: String,
    /// Destination registry file relative to the install folder; defaults
    /// to `source`.
    pub dest: Option<String>,
    /// Merge discipline; additive unless stated otherwise.
    #[serde(default)]
    pub discipline: Discipline,
}

impl FileAction {
    /// The resolved destination path.
    pub fn dest(&self) -> &str {
        self.dest.as_deref().unwrap_or(&self.source)
    }
}

impl RegistryAction {
    /// The resolved destination path.
    pub fn dest(&self) -> &str {
        self.dest.as_deref().unwrap_or(&self.source)
    }
}

impl Manifest {
    /// Decode a manifest from TOML text.
    pub fn from_toml(text: &str) -> TaskResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load a manifest from a file.
    pub fn load(path: &Path) -> TaskResult<Self> {
        Self::from_toml(&fs::read_to_string(path)?)
    }

    /// Total number of steps the manifest declares.
    pub fn step_count(&self) -> usize {
        self.files.len() + self.registries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
program = "ModTool"

[[files]]
source = "ModTool"

[[files]]
source = "styles/dark.css"
dest = "styles/dark/theme.css"
optional = true

[[registries]]
source = "reg_file.txt"

[[registries]]
source = "reg_type.txt"
discipline = "forced"
"#;

    #[test]
    fn parses_full_manifest() {
        let manifest = Manifest::from_toml(SAMPLE).unwrap();
        assert_eq!(manifest.program.as_deref(), Some("ModTool"));
        assert_eq!(manifest.files.len(), 2);
        assert_eq!(manifest.registries.len(), 2);
        assert_eq!(manifest.step_count(), 4);
    }

    #[test]
    fn dest_defaults_to_source() {
        let manifest = Manifest::from_toml(SAMPLE).unwrap();
        assert_eq!(manifest.files[0].dest(), "ModTool");
        assert_eq!(manifest.files[1].dest(), "styles/dark/theme.css");
        assert_eq!(manifest.registries[0].dest(), "reg_file.txt");
    }

    #[test]
    fn discipline_defaults_to_additive() {
        let manifest = Manifest::from_toml(SAMPLE).unwrap();
        assert_eq!(manifest.registries[0].discipline, Discipline::Additive);
        assert_eq!(manifest.registries[1].discipline, Discipline::Forced);
    }

    #[test]
    fn optional_defaults_to_false() {
        let manifest = Manifest::from_toml(SAMPLE).unwrap();
        assert!(!manifest.files[0].optional);
        assert!(manifest.files[1].optional);
    }

    #[test]
    fn empty_manifest_is_valid() {
        let manifest = Manifest::from_toml("").unwrap();
        assert!(manifest.program.is_none());
        assert_eq!(manifest.step_count(), 0);
    }

    #[test]
    fn unknown_discipline_is_rejected() {
        let err = Manifest::from_toml(
            "[[registries]]\nsource = \"r.txt\"\ndiscipline = \"sideways\"\n",
        );
        assert!(err.is_err());
    }
}
