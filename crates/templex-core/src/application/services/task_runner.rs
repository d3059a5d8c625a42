//! Task Runner (§4.F): sequential execution of post-render tasks.
//!
//! Tasks run in declaration order, each rendered against the current
//! answers before execution. A non-zero exit aborts the remaining tasks and
//! surfaces as `ApplicationError::TaskFailed`, carrying the task's own exit
//! code so the CLI can propagate it (§6).

use std::path::Path;

use crate::application::ApplicationError;
use crate::application::ports::output::{ProcessRunner, TemplateEngine};
use crate::domain::{EnvOps, RenderContext, Task, TaskCommand};

pub struct TaskRunner<'a> {
    engine: &'a dyn TemplateEngine,
    process: &'a dyn ProcessRunner,
}

impl<'a> TaskRunner<'a> {
    pub fn new(engine: &'a dyn TemplateEngine, process: &'a dyn ProcessRunner) -> Self {
        Self { engine, process }
    }

    /// Render and run every task in `tasks` against `cwd`, in order.
    pub fn run_all(
        &self,
        tasks: &[Task],
        cwd: &Path,
        ctx: &RenderContext,
        envops: &EnvOps,
    ) -> Result<(), ApplicationError> {
        let total = tasks.len();
        for (index, task) in tasks.iter().enumerate() {
            let command = self.render_command(&task.command, ctx, envops)?;
            let extra_env: Vec<(String, String)> = task
                .extra_env
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect();
            let exit_code = self.process.run(cwd, &command, &extra_env)?;
            if exit_code != 0 {
                return Err(ApplicationError::TaskFailed {
                    index: index + 1,
                    total,
                    command: display_command(&command),
                    exit_code,
                });
            }
        }
        Ok(())
    }

    fn render_command(
        &self,
        command: &TaskCommand,
        ctx: &RenderContext,
        envops: &EnvOps,
    ) -> Result<TaskCommand, ApplicationError> {
        Ok(match command {
            TaskCommand::Shell(s) => TaskCommand::Shell(self.engine.render_str(s, ctx, envops)?),
            TaskCommand::Argv(parts) => TaskCommand::Argv(
                parts
                    .iter()
                    .map(|p| self.engine.render_str(p, ctx, envops))
                    .collect::<Result<_, _>>()?,
            ),
        })
    }
}

fn display_command(command: &TaskCommand) -> String {
    match command {
        TaskCommand::Shell(s) => s.clone(),
        TaskCommand::Argv(parts) => parts.join(" "),
    }
}
