//! `templex copy` — render a template into a new destination.

use crate::cli::CopyArgs;
use crate::config::AppConfig;
use crate::engine::{self, Adapters};
use crate::error::CliResult;
use crate::output::OutputManager;

pub fn execute(args: CopyArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let options = engine::copy_options_with_config(&args.render, &config)?;
    let template_ref = engine::template_ref_with_config(&args.src_path, &args.render, &config);

    let adapters = Adapters::new(args.render.force);
    let template = adapters
        .engine()
        .copy(&template_ref, &args.destination, &options)?;

    output.success(&format!(
        "Rendered {} into {}",
        template.url,
        args.destination.display()
    ))?;
    Ok(())
}
