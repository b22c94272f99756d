//! Warning for user-site packages that would conflict with the framework.

use log::debug;
use std::path::{Path, PathBuf};

use crate::framework::user_site_dir;
use crate::runtime::Runtime;

/// Returns the user-site directory for `version` if it exists.
pub fn conflicting_user_site<R: Runtime>(runtime: &R, version: &str) -> Option<PathBuf> {
    let Some(home) = runtime.home_dir() else {
        debug!("No home directory, skipping user site check");
        return None;
    };
    let path = user_site_dir(&home, version);
    if runtime.exists(&path) {
        Some(path)
    } else {
        debug!("No user site packages at {}", path.display());
        None
    }
}

pub fn user_site_warning(path: &Path) -> String {
    [
        "*********************************************************".to_string(),
        "*** Python user files exist that conflict with the    ***".to_string(),
        "*** version of relocatable python you are trying to   ***".to_string(),
        "*** create. This can result in extra python modules   ***".to_string(),
        "*** not being installed properly or out of date.      ***".to_string(),
        "*** Please remove these files or create this package  ***".to_string(),
        "*** under a fresh user account.                       ***".to_string(),
        "*** The files are located at:                         ***".to_string(),
        format!("*** {} ***", path.display()),
        "*********************************************************".to_string(),
    ]
    .join("\n")
}
