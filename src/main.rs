use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use pasar_ternak_lib::adapters::ConsoleUi;
use pasar_ternak_lib::bootstrap::{
    init_tracing_subscriber, load_storefront_config, wire_storefront, WiringOptions,
};
use pasar_ternak_lib::cli::Cli;
use pasar_ternak_lib::commands::run_command;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing_subscriber(cli.verbose)?;

    let config = load_storefront_config(cli.config)?;
    let ui = Arc::new(ConsoleUi::default());
    let storefront = wire_storefront(
        config,
        WiringOptions {
            ephemeral: cli.ephemeral,
        },
        ui.clone(),
        ui,
    )?;

    let mut stdout = std::io::stdout().lock();
    run_command(&storefront, cli.command, &mut stdout).await
}
