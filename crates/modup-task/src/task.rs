//! The sequential update task.
//!
//! An [`UpdateTask`] owns the resolved step list for one update run: file
//! copies first, then registry merges, executed in declaration order on a
//! single thread. Progress is reported through a callback after each
//! completed step; there is no finer-grained progress and no cancellation
//! mid-step.

use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info};

use modup_merge::{merge_into, Discipline, MergeOutcome};
use modup_registry::codec;

use crate::error::{TaskError, TaskResult};
use crate::manifest::Manifest;
use crate::payload::PayloadSource;

#[derive(Debug, Clone)]
struct FileStep {
    source: String,
    dest: String,
    optional: bool,
}

#[derive(Debug, Clone)]
struct RegistryStep {
    source: String,
    dest: String,
    discipline: Discipline,
}

/// Executes one update run against an install folder.
pub struct UpdateTask {
    dest_folder: PathBuf,
    payload: Arc<dyn PayloadSource>,
    files: Vec<FileStep>,
    registries: Vec<RegistryStep>,
}

impl std::fmt::Debug for UpdateTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdateTask")
            .field("dest_folder", &self.dest_folder)
            .field("files", &self.files.len())
            .field("registries", &self.registries.len())
            .finish()
    }
}

impl UpdateTask {
    /// Create an empty task updating `dest_folder` from `payload`.
    pub fn new(dest_folder: impl Into<PathBuf>, payload: Arc<dyn PayloadSource>) -> Self {
        Self {
            dest_folder: dest_folder.into(),
            payload,
            files: Vec::new(),
            registries: Vec::new(),
        }
    }

    /// Build a task from a manifest's step list.
    pub fn from_manifest(
        manifest: &Manifest,
        dest_folder: impl Into<PathBuf>,
        payload: Arc<dyn PayloadSource>,
    ) -> Self {
        let mut task = Self::new(dest_folder, payload);
        for file in &manifest.files {
            if file.optional {
                task.add_optional_file(&file.source, file.dest());
            } else {
                task.add_file_as(&file.source, file.dest());
            }
        }
        for registry in &manifest.registries {
            match registry.discipline {
                Discipline::Additive => task.modify_registry(&registry.source, registry.dest()),
                Discipline::Forced => {
                    task.forced_modify_registry(&registry.source, registry.dest())
                }
            }
        }
        task
    }

    /// Copy `path` from the payload to the same relative path in the
    /// install folder, replacing the file if it exists.
    pub fn add_file(&mut self, path: &str) {
        self.add_file_as(path, path);
    }

    /// Copy `source` from the payload to `dest`, replacing the file if it
    /// exists.
    pub fn add_file_as(&mut self, source: &str, dest: &str) {
        self.files.push(FileStep {
            source: source.to_string(),
            dest: dest.to_string(),
            optional: false,
        });
    }

    /// Copy `source` from the payload to `dest`, but only when `dest` does
    /// not exist yet.
    pub fn add_optional_file(&mut self, source: &str, dest: &str) {
        self.files.push(FileStep {
            source: source.to_string(),
            dest: dest.to_string(),
            optional: true,
        });
    }

    /// Additively merge the shipped registry `source` into the registry
    /// file `dest`.
    pub fn modify_registry(&mut self, source: &str, dest: &str) {
        self.registries.push(RegistryStep {
            source: source.to_string(),
            dest: dest.to_string(),
            discipline: Discipline::Additive,
        });
    }

    /// Merge the shipped registry `source` into the registry file `dest`,
    /// replacing existing entries on hash collision.
    pub fn forced_modify_registry(&mut self, source: &str, dest: &str) {
        self.registries.push(RegistryStep {
            source: source.to_string(),
            dest: dest.to_string(),
            discipline: Discipline::Forced,
        });
    }

    /// Total number of steps this task will run.
    pub fn step_count(&self) -> usize {
        self.files.len() + self.registries.len()
    }

    fn open_payload(&self, path: &str) -> TaskResult<Box<dyn io::Read + Send>> {
        self.payload.open(path).map_err(|source| TaskError::Payload {
            path: path.to_string(),
            source,
        })
    }

    /// Run every step in order, invoking `progress(done, total)` after
    /// each one.
    ///
    /// The first failing step aborts the run; there is no partial-success
    /// signalling beyond the progress already reported.
    pub fn run(&self, mut progress: impl FnMut(usize, usize)) -> TaskResult<()> {
        let total = self.step_count();
        let mut done = 0;

        for step in &self.files {
            let dest = self.dest_folder.join(&step.dest);
            if step.optional && dest.exists() {
                debug!(dest = %dest.display(), "optional file exists, skipping");
            } else {
                if let Some(parent) = dest.parent() {
                    fs::create_dir_all(parent)?;
                }
                let mut reader = self.open_payload(&step.source)?;
                let mut out = File::create(&dest)?;
                io::copy(&mut reader, &mut out)?;
                debug!(source = %step.source, dest = %dest.display(), "extracted file");
            }
            done += 1;
            progress(done, total);
        }

        for step in &self.registries {
            let dest = self.dest_folder.join(&step.dest);
            let reader = BufReader::new(self.open_payload(&step.source)?);
            let incoming = codec::read_registry(reader)?;
            let outcome = merge_into(&dest, &incoming, step.discipline)?;
            if outcome == MergeOutcome::SkippedMissing {
                debug!(dest = %dest.display(), "registry not installed, merge skipped");
            }
            done += 1;
            progress(done, total);
        }

        info!(steps = total, dest = %self.dest_folder.display(), "update complete");
        Ok(())
    }
}
