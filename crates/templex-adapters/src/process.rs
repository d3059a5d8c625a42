//! `std::process::Command`-backed `ProcessRunner` adapter (§4.F).

use std::path::Path;
use std::process::Command;

use templex_core::application::ports::output::ProcessRunner;
use templex_core::application::ApplicationError;
use templex_core::domain::TaskCommand;

#[derive(Debug, Clone, Copy, Default)]
pub struct CommandProcessRunner;

impl CommandProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessRunner for CommandProcessRunner {
    fn run(
        &self,
        cwd: &Path,
        command: &TaskCommand,
        extra_env: &[(String, String)],
    ) -> Result<i32, ApplicationError> {
        let mut cmd = match command {
            TaskCommand::Shell(line) => {
                let mut c = Command::new(shell());
                c.arg("-c").arg(line);
                c
            }
            TaskCommand::Argv(parts) => {
                let Some((program, args)) = parts.split_first() else {
                    return Ok(0);
                };
                let mut c = Command::new(program);
                c.args(args);
                c
            }
        };

        cmd.current_dir(cwd);
        for (key, value) in extra_env {
            cmd.env(key, value);
        }

        let span = tracing::info_span!("task", cwd = %cwd.display());
        let _guard = span.enter();
        let status = cmd.status().map_err(|e| ApplicationError::FilesystemError {
            path: cwd.display().to_string(),
            reason: format!("failed to spawn `{}`: {e}", describe(command)),
        })?;

        Ok(status.code().unwrap_or(-1))
    }
}

fn shell() -> &'static str {
    if cfg!(windows) {
        "cmd"
    } else {
        "sh"
    }
}

fn describe(command: &TaskCommand) -> String {
    match command {
        TaskCommand::Shell(line) => line.clone(),
        TaskCommand::Argv(parts) => parts.join(" "),
    }
}
