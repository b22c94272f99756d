//! Subprocess execution.

use anyhow::{Context, Result};
use log::debug;
use std::process::Command;

use super::RealRuntime;
use crate::pip::Invocation;

impl RealRuntime {
    #[tracing::instrument(
        skip(self, invocation),
        fields(program = %invocation.get_program().display())
    )]
    pub(crate) fn run_impl(&self, invocation: &Invocation) -> Result<Option<i32>> {
        let mut command = Command::new(invocation.get_program());
        command.args(invocation.get_args());

        if let Some(env) = invocation.get_env() {
            command.env_clear().envs(env.resolved());
        }

        let status = command
            .status()
            .with_context(|| format!("Failed to execute {}", invocation.get_program().display()))?;

        debug!("{} exited with {}", invocation.get_program().display(), status);
        Ok(status.code())
    }
}
