//! Runtime abstraction for system operations.
//!
//! This module provides a trait-based abstraction over the process
//! environment, the file system and subprocess execution, so the installer
//! logic can be exercised against a mock.
//!
//! # Structure
//!
//! - `path` - Lexical path helpers (normalize, absolute_path)
//! - `env` - Environment variables, working and home directories
//! - `fs` - File system queries
//! - `process` - Subprocess execution

mod env;
mod fs;
pub mod path;
mod process;

use anyhow::Result;
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::pip::Invocation;

pub use path::absolute_path;

#[cfg_attr(test, mockall::automock)]
pub trait Runtime: Send + Sync {
    // Environment

    /// Snapshot of the current process environment.
    fn env_vars(&self) -> BTreeMap<OsString, OsString>;
    fn current_dir(&self) -> Result<PathBuf>;
    fn home_dir(&self) -> Option<PathBuf>;

    // File System
    fn exists(&self, path: &Path) -> bool;

    // Processes

    /// Run the invocation to completion with inherited stdio.
    ///
    /// Returns the exit code, or `None` if the child was terminated by a signal.
    fn run(&self, invocation: &Invocation) -> Result<Option<i32>>;
}

pub struct RealRuntime;

impl Runtime for RealRuntime {
    fn env_vars(&self) -> BTreeMap<OsString, OsString> {
        self.env_vars_impl()
    }

    fn current_dir(&self) -> Result<PathBuf> {
        self.current_dir_impl()
    }

    fn home_dir(&self) -> Option<PathBuf> {
        self.home_dir_impl()
    }

    fn exists(&self, path: &Path) -> bool {
        self.exists_impl(path)
    }

    fn run(&self, invocation: &Invocation) -> Result<Option<i32>> {
        self.run_impl(invocation)
    }
}
