//! Command lines for the framework interpreter's pip.
//!
//! Builders here are pure: they compute argument vectors and environments but
//! never touch the file system or spawn anything. The flag spellings are the
//! contract with pip and must stay exactly as written.

mod invocation;

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::Path;

use crate::framework::Framework;

pub use invocation::{Environment, Invocation};

/// Package installed right after pip is bootstrapped.
pub const WHEEL_PACKAGE: &str = "wheel";

/// Flags passed through to `pip install -r`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequirementsOptions {
    /// Target platforms (`--platform`); installs into site-packages via `--target=`.
    pub platforms: Vec<String>,
    /// Packages that must be built from source (`--no-binary=`).
    pub no_binary: Vec<String>,
    /// Packages that must come from wheels (`--only-binary=`).
    /// Ignored when `no_binary` is not empty.
    pub only_binary: Vec<String>,
}

/// `<python> -s -m <module>`
fn python_module(framework: &Framework, module: &str) -> Invocation {
    Invocation::new(framework.python_path()).args(["-s", "-m", module])
}

fn pip(framework: &Framework) -> Invocation {
    python_module(framework, "pip")
}

pub fn ensurepip(framework: &Framework) -> Invocation {
    python_module(framework, "ensurepip")
}

pub fn install_package(framework: &Framework, package: &str) -> Invocation {
    pip(framework).args(["install", package])
}

pub fn upgrade_pip(framework: &Framework) -> Invocation {
    pip(framework).args(["install", "--upgrade", "pip"])
}

/// `pip install -r <requirements>` with the optional platform and binary flags.
///
/// `headers_dir` becomes `CPPFLAGS=-I<headers_dir>` on top of `base_env`, so
/// packages with C extensions compile against the framework's headers.
pub fn install_requirements(
    framework: &Framework,
    requirements: &Path,
    options: &RequirementsOptions,
    headers_dir: &Path,
    base_env: BTreeMap<OsString, OsString>,
) -> Invocation {
    let mut invocation = pip(framework).args([
        OsString::from("install"),
        OsString::from("-r"),
        requirements.as_os_str().to_os_string(),
    ]);

    if !options.platforms.is_empty() {
        invocation = invocation.args(multi_value_option("--platform", &options.platforms, None));
        let mut target = OsString::from("--target=");
        target.push(framework.site_packages_dir());
        invocation = invocation.arg(target);
    }

    if !options.no_binary.is_empty() {
        invocation = invocation.args(multi_value_option(
            "--no-binary",
            &options.no_binary,
            Some("="),
        ));
    } else if !options.only_binary.is_empty() {
        invocation = invocation.args(multi_value_option(
            "--only-binary",
            &options.only_binary,
            Some("="),
        ));
    }

    let mut cppflags = OsString::from("-I");
    cppflags.push(headers_dir);
    invocation.with_env(Environment::inherit(base_env).set("CPPFLAGS", cppflags))
}

/// Repeat `option` once per value.
///
/// Without a separator each value becomes its own argument
/// (`--platform a --platform b`); with one, option and value are joined into a
/// single argument (`--no-binary=a --no-binary=b`).
pub fn multi_value_option(option: &str, values: &[String], separator: Option<&str>) -> Vec<String> {
    match separator {
        Some(separator) => values
            .iter()
            .map(|value| format!("{}{}{}", option, separator, value))
            .collect(),
        None => values
            .iter()
            .flat_map(|value| [option.to_string(), value.clone()])
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{argv_strings, test_root};
    use std::ffi::OsStr;
    use std::path::PathBuf;

    fn framework() -> Framework {
        Framework::new(test_root(), "3.9")
    }

    fn python() -> String {
        framework().python_path().display().to_string()
    }

    fn headers() -> PathBuf {
        framework().headers_dir()
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn requirements_argv(options: &RequirementsOptions) -> Vec<String> {
        let invocation = install_requirements(
            &framework(),
            Path::new("requirements.txt"),
            options,
            &headers(),
            BTreeMap::new(),
        );
        argv_strings(&invocation)
    }

    #[test]
    fn test_ensurepip() {
        assert_eq!(
            argv_strings(&ensurepip(&framework())),
            vec![python(), "-s".into(), "-m".into(), "ensurepip".into()]
        );
    }

    #[test]
    fn test_install_package() {
        assert_eq!(
            argv_strings(&install_package(&framework(), WHEEL_PACKAGE)),
            vec![
                python(),
                "-s".into(),
                "-m".into(),
                "pip".into(),
                "install".into(),
                "wheel".into()
            ]
        );
    }

    #[test]
    fn test_upgrade_pip() {
        assert_eq!(
            argv_strings(&upgrade_pip(&framework())),
            vec![
                python(),
                "-s".into(),
                "-m".into(),
                "pip".into(),
                "install".into(),
                "--upgrade".into(),
                "pip".into()
            ]
        );
    }

    #[test]
    fn test_requirements_without_extra_flags() {
        let argv = requirements_argv(&RequirementsOptions::default());
        assert_eq!(
            argv,
            vec![
                python(),
                "-s".into(),
                "-m".into(),
                "pip".into(),
                "install".into(),
                "-r".into(),
                "requirements.txt".into()
            ]
        );
    }

    #[test]
    fn test_requirements_with_platforms() {
        let argv = requirements_argv(&RequirementsOptions {
            platforms: strings(&["macosx_10_9_x86_64", "macosx_11_0_arm64"]),
            ..Default::default()
        });

        let target = format!("--target={}", framework().site_packages_dir().display());
        assert_eq!(
            &argv[7..],
            &[
                "--platform".to_string(),
                "macosx_10_9_x86_64".to_string(),
                "--platform".to_string(),
                "macosx_11_0_arm64".to_string(),
                target,
            ]
        );
    }

    #[test]
    fn test_requirements_no_binary_wins_over_only_binary() {
        let argv = requirements_argv(&RequirementsOptions {
            no_binary: strings(&["a", "b"]),
            only_binary: strings(&["c"]),
            ..Default::default()
        });

        assert_eq!(&argv[7..], &["--no-binary=a", "--no-binary=b"]);
        assert!(!argv.iter().any(|a| a.starts_with("--only-binary=")));
    }

    #[test]
    fn test_requirements_only_binary() {
        let argv = requirements_argv(&RequirementsOptions {
            only_binary: strings(&["c"]),
            ..Default::default()
        });

        assert_eq!(&argv[7..], &["--only-binary=c"]);
    }

    #[test]
    fn test_requirements_platform_combines_with_binary_flags() {
        let argv = requirements_argv(&RequirementsOptions {
            platforms: strings(&["macosx_11_0_arm64"]),
            only_binary: strings(&[":all:"]),
            ..Default::default()
        });

        let target = format!("--target={}", framework().site_packages_dir().display());
        assert_eq!(
            &argv[7..],
            &[
                "--platform".to_string(),
                "macosx_11_0_arm64".to_string(),
                target,
                "--only-binary=:all:".to_string(),
            ]
        );
    }

    #[test]
    fn test_requirements_platform_then_no_binary_drops_only_binary() {
        let argv = requirements_argv(&RequirementsOptions {
            platforms: strings(&["macosx_11_0_arm64"]),
            no_binary: strings(&["lxml"]),
            only_binary: strings(&[":all:"]),
        });

        let target = format!("--target={}", framework().site_packages_dir().display());
        assert_eq!(
            &argv[7..],
            &[
                "--platform".to_string(),
                "macosx_11_0_arm64".to_string(),
                target,
                "--no-binary=lxml".to_string(),
            ]
        );
        assert!(!argv.iter().any(|a| a.starts_with("--only-binary=")));
    }

    #[test]
    fn test_requirements_sets_cppflags_on_inherited_env() {
        let mut base = BTreeMap::new();
        base.insert(OsString::from("PATH"), OsString::from("/usr/bin"));
        base.insert(OsString::from("CPPFLAGS"), OsString::from("-DOLD"));

        let invocation = install_requirements(
            &framework(),
            Path::new("requirements.txt"),
            &RequirementsOptions::default(),
            &headers(),
            base,
        );

        let env = invocation.get_env().unwrap();
        let expected = format!("-I{}", headers().display());
        assert_eq!(env.get("CPPFLAGS"), Some(OsStr::new(&expected)));
        assert_eq!(env.get("PATH"), Some(OsStr::new("/usr/bin")));
    }

    #[test]
    fn test_multi_value_option_separate_arguments() {
        assert_eq!(
            multi_value_option("--platform", &strings(&["x", "y"]), None),
            strings(&["--platform", "x", "--platform", "y"])
        );
    }

    #[test]
    fn test_multi_value_option_joined() {
        assert_eq!(
            multi_value_option("--no-binary", &strings(&["x", "y"]), Some("=")),
            strings(&["--no-binary=x", "--no-binary=y"])
        );
    }

    #[test]
    fn test_multi_value_option_empty() {
        assert!(multi_value_option("--platform", &[], None).is_empty());
    }
}
