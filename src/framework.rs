//! Layout of a relocatable Python framework.
//!
//! Every path is derived from `<root>/Versions/<version>/` on demand; nothing
//! is cached, so a `Framework` is just the pair of root and version.

use std::path::{Path, PathBuf};

/// Version used when the caller does not name one.
pub const DEFAULT_PYTHON_VERSION: &str = "2.7";

/// Base name of the versioned interpreter, e.g. `python3.9`.
pub const INTERPRETER_NAME: &str = "python";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framework {
    root: PathBuf,
    version: String,
}

impl Framework {
    pub fn new(root: impl Into<PathBuf>, version: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            version: version.into(),
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// `<root>/Versions/<version>`
    pub fn version_dir(&self) -> PathBuf {
        self.root.join("Versions").join(&self.version)
    }

    /// `<root>/Versions/<version>/bin/python<version>`
    pub fn python_path(&self) -> PathBuf {
        self.version_dir().join("bin").join(self.versioned_name())
    }

    /// `<root>/Versions/<version>/include/python<version>`
    ///
    /// Relative when the root is relative; see [`crate::runtime::absolute_path`].
    pub fn headers_dir(&self) -> PathBuf {
        self.version_dir().join("include").join(self.versioned_name())
    }

    /// `<root>/Versions/<version>/lib/python<version>/site-packages`
    pub fn site_packages_dir(&self) -> PathBuf {
        self.version_dir()
            .join("lib")
            .join(self.versioned_name())
            .join("site-packages")
    }

    fn versioned_name(&self) -> String {
        format!("{}{}", INTERPRETER_NAME, self.version)
    }
}

/// Per-user site-packages directory for `version` under `home`.
///
/// Packages installed there are picked up by the framework interpreter and
/// can shadow or conflict with the ones pip installs into the framework.
pub fn user_site_dir(home: &Path, version: &str) -> PathBuf {
    home.join("Library")
        .join("Python")
        .join(version)
        .join("lib")
        .join("python")
        .join("site-packages")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{test_home, test_root};

    #[test]
    fn test_python_path() {
        let framework = Framework::new(test_root(), "3.9");
        assert_eq!(
            framework.python_path(),
            test_root().join("Versions/3.9/bin/python3.9")
        );
    }

    #[test]
    fn test_headers_dir() {
        let framework = Framework::new(test_root(), "3.9");
        assert_eq!(
            framework.headers_dir(),
            test_root().join("Versions/3.9/include/python3.9")
        );
    }

    #[test]
    fn test_site_packages_dir() {
        let framework = Framework::new(test_root(), "3.10");
        assert_eq!(
            framework.site_packages_dir(),
            test_root().join("Versions/3.10/lib/python3.10/site-packages")
        );
    }

    #[test]
    fn test_paths_share_version_dir() {
        let framework = Framework::new(test_root(), "2.7");
        let version_dir = framework.version_dir();

        assert!(framework.python_path().starts_with(&version_dir));
        assert!(framework.headers_dir().starts_with(&version_dir));
        assert!(framework.site_packages_dir().starts_with(&version_dir));
    }

    #[test]
    fn test_user_site_dir() {
        assert_eq!(
            user_site_dir(&test_home(), "3.9"),
            test_home().join("Library/Python/3.9/lib/python/site-packages")
        );
    }
}
