pub mod extras;
pub mod framework;
pub mod pip;
pub mod runtime;

pub use extras::{ExtrasInstaller, ExtrasOptions, install_extras};
pub use framework::{DEFAULT_PYTHON_VERSION, Framework};
