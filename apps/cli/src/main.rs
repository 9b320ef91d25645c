use anyhow::Context;
use clap::Parser;
use lmarc_cli::{App, Cli, dispatch};
use lmarc_kernel::config::load_archive_config;
use lmarc_logger::Logger;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let config = load_archive_config(cli.config.as_ref()).context("Configuration is malformed")?;

    let mut logger = Logger::builder().name(env!("CARGO_PKG_NAME")).verbosity(cli.verbose);
    if std::env::var_os("RUST_LOG").is_none() {
        logger = logger.directives(config.logging.level.clone());
    }
    if let Some(directory) = &config.logging.directory {
        logger = logger.directory(directory).json(config.logging.json);
    }
    let _log = logger.init()?;

    let app = App::new(&cli, config);
    dispatch(&app, cli.command).await
}
