//! Install extra packages into a relocatable Python framework.
//!
//! The installer drives the framework's own interpreter through pip:
//! bootstrap pip, install `wheel`, optionally upgrade pip, then optionally
//! install a requirements file. Every step checks that the interpreter exists
//! first and quietly returns when it does not; any command that exits
//! non-zero aborts the whole run.

pub mod guard;

use anyhow::{Result, bail};
use log::{debug, info};
use std::path::{Path, PathBuf};

use crate::framework::Framework;
use crate::pip::{self, Invocation, RequirementsOptions, WHEEL_PACKAGE};
use crate::runtime::{Runtime, absolute_path};

/// Options for [`ExtrasInstaller::install_extras`].
#[derive(Debug, Clone, Default)]
pub struct ExtrasOptions {
    /// Requirements file to install after the base packages
    pub requirements_file: Option<PathBuf>,
    /// Upgrade pip after bootstrapping it
    pub upgrade_pip: bool,
    /// Skip pip and every package install
    pub without_pip: bool,
    /// Flags passed through to the requirements install
    pub requirements: RequirementsOptions,
}

pub struct ExtrasInstaller<'a, R: Runtime> {
    runtime: &'a R,
    framework: Framework,
    dry_run: bool,
}

impl<'a, R: Runtime> ExtrasInstaller<'a, R> {
    pub fn new(runtime: &'a R, framework: Framework) -> Self {
        Self {
            runtime,
            framework,
            dry_run: false,
        }
    }

    /// Print commands instead of running them.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Run pip's bootstrap module.
    #[tracing::instrument(skip(self))]
    pub fn ensure_pip(&self) -> Result<()> {
        if !self.python_available() {
            return Ok(());
        }
        println!("Ensuring pip is installed...");
        self.check_call(&pip::ensurepip(&self.framework))
    }

    /// `pip install <package>`
    #[tracing::instrument(skip(self))]
    pub fn install(&self, package: &str) -> Result<()> {
        if !self.python_available() {
            return Ok(());
        }
        println!("Installing {}...", package);
        self.check_call(&pip::install_package(&self.framework, package))
    }

    #[tracing::instrument(skip(self))]
    pub fn upgrade_pip(&self) -> Result<()> {
        if !self.python_available() {
            return Ok(());
        }
        println!("Upgrading pip installation...");
        self.check_call(&pip::upgrade_pip(&self.framework))
    }

    /// `pip install -r <requirements>` with the framework headers on `CPPFLAGS`.
    #[tracing::instrument(skip(self, options))]
    pub fn install_requirements(
        &self,
        requirements: &Path,
        options: &RequirementsOptions,
    ) -> Result<()> {
        if !self.python_available() {
            return Ok(());
        }
        let headers_dir = self.absolute_headers_dir()?;
        let invocation = pip::install_requirements(
            &self.framework,
            requirements,
            options,
            &headers_dir,
            self.runtime.env_vars(),
        );
        println!("Installing modules from {}...", requirements.display());
        self.check_call(&invocation)
    }

    /// Run the whole extras flow.
    #[tracing::instrument(skip(self, options))]
    pub fn install_extras(&self, options: &ExtrasOptions) -> Result<()> {
        println!();
        if let Some(path) = guard::conflicting_user_site(self.runtime, self.framework.version()) {
            println!("{}", guard::user_site_warning(&path));
            println!();
        }

        if options.without_pip {
            println!("Skipping all requirements, packages, etc due to without-pip specified");
            return Ok(());
        }

        self.ensure_pip()?;
        self.install(WHEEL_PACKAGE)?;
        if options.upgrade_pip {
            self.upgrade_pip()?;
        }
        if let Some(requirements) = options
            .requirements_file
            .as_deref()
            .filter(|path| !path.as_os_str().is_empty())
        {
            println!();
            self.install_requirements(requirements, &options.requirements)?;
        }
        Ok(())
    }

    fn python_available(&self) -> bool {
        let python = self.framework.python_path();
        if self.runtime.exists(&python) {
            true
        } else {
            eprintln!("No python at {}", python.display());
            false
        }
    }

    fn absolute_headers_dir(&self) -> Result<PathBuf> {
        let headers_dir = self.framework.headers_dir();
        let base = if headers_dir.is_absolute() {
            PathBuf::new()
        } else {
            self.runtime.current_dir()?
        };
        Ok(absolute_path(&base, &headers_dir))
    }

    /// Run `invocation` and fail unless it exits with status 0.
    fn check_call(&self, invocation: &Invocation) -> Result<()> {
        if self.dry_run {
            println!("Would run: {}", invocation);
            return Ok(());
        }

        info!("Running {}", invocation);
        match self.runtime.run(invocation)? {
            Some(0) => {
                debug!("Command completed successfully");
                Ok(())
            }
            Some(code) => bail!("Command failed with exit code {}: {}", code, invocation),
            None => bail!("Command was terminated by a signal: {}", invocation),
        }
    }
}

/// Install extras into the framework at `framework_path`.
///
/// `version` defaults to [`crate::framework::DEFAULT_PYTHON_VERSION`].
pub fn install_extras<R: Runtime>(
    runtime: &R,
    framework_path: &Path,
    version: Option<&str>,
    options: &ExtrasOptions,
) -> Result<()> {
    let version = version.unwrap_or(crate::framework::DEFAULT_PYTHON_VERSION);
    ExtrasInstaller::new(runtime, Framework::new(framework_path, version)).install_extras(options)
}
