pub mod cli;
pub mod commands;
pub mod config;
pub mod controller;
pub mod filter;
pub mod i18n;
pub mod render;
pub mod store;
pub mod task;

use std::ffi::OsString;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, info};

#[tracing::instrument(skip_all)]
pub fn run(raw_args: Vec<OsString>) -> anyhow::Result<()> {
    let cli = cli::GlobalCli::parse_from(raw_args);

    cli::init_tracing(cli.verbose, cli.quiet)?;
    info!(verbose = cli.verbose, quiet = cli.quiet, "starting tick CLI");

    let cfg = config::Config::load(cli.config.as_deref())?;
    let data_file = config::resolve_data_file(&cfg, cli.data.as_deref())
        .context("failed to resolve data file")?;
    debug!(data_file = %data_file.display(), "resolved data file");

    let localizer = i18n::Localizer::new(cfg.language());
    let mut controller = controller::AppController::new(data_file.clone(), localizer);
    if let Some(code) = cli.lang.as_deref() {
        controller.set_language(code);
    }

    let renderer = render::Renderer::new(&cfg);
    let inv = cli::Invocation::parse(cli.rest)?;

    commands::dispatch(&mut controller, &renderer, &data_file, inv)?;

    info!("done");
    Ok(())
}
