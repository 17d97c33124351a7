//! sicme-admin: command-line console for the SICME administration API
//!
//! Every entity page of the console (list with search and paging,
//! create/edit, activate/deactivate, branch stock) is reachable as a
//! subcommand built on the `sicme-client` list substrate.

mod cli;
mod commands;

use clap::Parser;
use cli::Cli;
use sicme_client::{AdminContext, ClientConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let mut config = match cli.base_url.as_deref() {
        Some(base_url) => ClientConfig::new(base_url),
        None => ClientConfig::from_env()?,
    };
    config = config.with_token_path(cli.token_path.clone());
    if let Some(prefix) = cli.password_prefix.as_deref() {
        config = config.with_local_password_prefix(prefix);
    }
    if let Some(timeout) = cli.timeout {
        config = config.with_timeout(timeout);
    }

    tracing::debug!(base_url = %config.base_url, "Starting sicme-admin");
    let ctx = AdminContext::new(config)?;

    commands::run(&ctx, cli.command, cli.json).await
}

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "sicme_admin=info,sicme_client=info".into());
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
