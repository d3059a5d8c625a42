//! `templex auto` — copy or update, selected by whether `src_path` was given.

use crate::cli::AutoArgs;
use crate::config::AppConfig;
use crate::engine::{self, Adapters};
use crate::error::CliResult;
use crate::output::OutputManager;

pub fn execute(args: AutoArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let options = engine::copy_options_with_config(&args.render, &config)?;
    let adapters = Adapters::new(args.render.force);

    let (template, verb) = match &args.src_path {
        Some(src_path) => {
            let template_ref = engine::template_ref_with_config(src_path, &args.render, &config);
            let template = adapters
                .engine()
                .copy(&template_ref, &args.destination, &options)?;
            (template, "Rendered")
        }
        None => {
            let url = engine::stored_template_url(&args.destination, &args.render, &config)?;
            let template_ref = engine::template_ref_with_config(&url, &args.render, &config);
            let template = adapters
                .engine()
                .update(&args.destination, &template_ref, &options)?;
            (template, "Updated")
        }
    };

    output.success(&format!(
        "{verb} {} against {}",
        args.destination.display(),
        template.url
    ))?;
    Ok(())
}
