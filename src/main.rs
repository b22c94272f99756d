use anyhow::Result;
use clap::Parser;
use relocatable_extras::extras::{ExtrasInstaller, ExtrasOptions};
use relocatable_extras::framework::{DEFAULT_PYTHON_VERSION, Framework};
use relocatable_extras::pip::RequirementsOptions;
use std::path::PathBuf;

/// relocatable-extras - install extra packages into a relocatable Python framework
///
/// Bootstraps pip inside the framework, installs `wheel`, and optionally
/// upgrades pip and installs a requirements file, all using the framework's
/// own interpreter.
///
/// Examples:
///   relocatable-extras ./Python.framework --python-version 3.9
///   relocatable-extras ./Python.framework --python-version 3.9 --pip-requirements requirements.txt
#[derive(Parser, Debug)]
#[command(author, version = env!("RELOCATABLE_EXTRAS_VERSION"), about)]
struct Cli {
    /// Path to the framework (the directory that contains `Versions/`)
    #[arg(value_name = "FRAMEWORK_PATH")]
    framework_path: PathBuf,

    /// Python version inside the framework
    #[arg(
        long,
        env = "RELOCATABLE_EXTRAS_PYTHON_VERSION",
        default_value = DEFAULT_PYTHON_VERSION,
        value_name = "VERSION"
    )]
    python_version: String,

    /// Requirements file to install with pip
    #[arg(long, value_name = "FILE")]
    pip_requirements: Option<PathBuf>,

    /// Upgrade pip after bootstrapping it
    #[arg(long)]
    upgrade_pip: bool,

    /// Do not install pip or any packages
    #[arg(long)]
    without_pip: bool,

    /// Install wheels for this platform into site-packages (repeatable)
    #[arg(long = "pip-platform", value_name = "PLATFORM")]
    pip_platform: Vec<String>,

    /// Build this package from source (repeatable)
    #[arg(long, value_name = "PACKAGE", conflicts_with = "only_binary")]
    no_binary: Vec<String>,

    /// Only install this package from a wheel (repeatable)
    #[arg(long, value_name = "PACKAGE")]
    only_binary: Vec<String>,

    /// Print the commands that would run without running them
    #[arg(long)]
    dry_run: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn extras_options(&self) -> ExtrasOptions {
        ExtrasOptions {
            requirements_file: self.pip_requirements.clone(),
            upgrade_pip: self.upgrade_pip,
            without_pip: self.without_pip,
            requirements: RequirementsOptions {
                platforms: self.pip_platform.clone(),
                no_binary: self.no_binary.clone(),
                only_binary: self.only_binary.clone(),
            },
        }
    }

    fn default_log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(cli.default_log_filter()),
    )
    .init();

    let runtime = relocatable_extras::runtime::RealRuntime;
    let framework = Framework::new(cli.framework_path.clone(), cli.python_version.clone());

    ExtrasInstaller::new(&runtime, framework)
        .with_dry_run(cli.dry_run)
        .install_extras(&cli.extras_options())
}
