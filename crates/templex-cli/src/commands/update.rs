//! `templex update` — re-render a project against a newer template revision.

use crate::cli::UpdateArgs;
use crate::config::AppConfig;
use crate::engine::{self, Adapters};
use crate::error::CliResult;
use crate::output::OutputManager;

pub fn execute(args: UpdateArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let url = engine::stored_template_url(&args.destination, &args.render, &config)?;
    let template_ref = engine::template_ref_with_config(&url, &args.render, &config);
    let options = engine::copy_options_with_config(&args.render, &config)?;

    let adapters = Adapters::new(args.render.force);
    let template = adapters
        .engine()
        .update(&args.destination, &template_ref, &options)?;

    output.success(&format!(
        "Updated {} against {}",
        args.destination.display(),
        template.url
    ))?;
    Ok(())
}
