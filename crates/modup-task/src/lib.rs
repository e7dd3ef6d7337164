//! Update orchestration for ModUp.
//!
//! An update is a payload (replacement files plus shipped registry data)
//! applied to an install folder as a linear list of steps:
//!
//! 1. copy mandatory files, replacing what is there;
//! 2. copy optional files, skipped when the destination already exists;
//! 3. merge shipped registry data into the user's registry files, either
//!    additively or with forced replacement.
//!
//! The step list is described by a TOML [`Manifest`] shipped alongside the
//! payload, and executed by [`UpdateTask::run`] on whatever thread the
//! caller provides, reporting coarse progress after each completed step.
//!
//! # Key types
//!
//! - [`PayloadSource`] — read access to shipped payload files
//! - [`DirPayload`] / [`MemoryPayload`] — directory-backed and in-memory
//!   payloads
//! - [`Manifest`] — the declarative step list
//! - [`UpdateTask`] — the sequential executor

pub mod error;
pub mod manifest;
pub mod payload;
pub mod task;

pub use error::{TaskError, TaskResult};
pub use manifest::{FileAction, Manifest, RegistryAction};
pub use payload::{DirPayload, MemoryPayload, PayloadSource};
pub use task::UpdateTask;
