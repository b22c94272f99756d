//! Lexical path helpers.

use std::path::{Component, Path, PathBuf};

/// Normalize a path by processing `.` and `..` components lexically.
/// This does not access the filesystem and does not follow symlinks.
///
/// A `..` that would climb above the root of an absolute path is dropped,
/// while leading `..` components of a relative path are kept.
pub(crate) fn normalize_path(path: &Path) -> PathBuf {
    let mut result = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let at_root = result.parent().is_none() && result.has_root();
                let only_parents = result
                    .components()
                    .all(|c| matches!(c, Component::ParentDir));
                if at_root {
                    continue;
                }
                if only_parents || !result.pop() {
                    result.push(component);
                }
            }
            _ => result.push(component),
        }
    }
    result
}

/// Make `path` absolute against `base_dir` and normalize it.
///
/// An already absolute `path` ignores `base_dir` but is still normalized, so
/// `/R/Versions/3.9/../3.9/include` becomes `/R/Versions/3.9/include`.
pub fn absolute_path(base_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        normalize_path(path)
    } else {
        normalize_path(&base_dir.join(path))
    }
}
