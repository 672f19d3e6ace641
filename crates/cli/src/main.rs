//! `mailpanel`: command-line console for the mail-hosting API.

mod args;
mod commands;
mod prompt;
mod render;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use mailpanel_client::{ApiClient, ClientConfig, Console, Credential, FileTokenStore, Session};

use crate::args::{Cli, Command};
use crate::prompt::PromptConfirmer;

#[tokio::main]
async fn main() -> ExitCode {
    mailpanel_observability::init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = ClientConfig::from_env().context("invalid configuration")?;
    if let Some(url) = &cli.api_url {
        config = config.with_api_url(url).context("invalid --api-url")?;
    }
    if let Some(path) = &cli.session_file {
        config = config.with_session_file(path);
    }
    tracing::debug!(?config, "configuration resolved");

    let session = match &config.session_file {
        Some(path) => Session::new(Arc::new(FileTokenStore::new(path))),
        None => Session::in_memory(),
    };
    let api = ApiClient::new(&config, session).context("failed to build HTTP client")?;
    let console = Console::new(api);

    // Login replaces whatever is stored, so it skips resolution.
    if !matches!(cli.command, Command::Login { .. }) {
        console
            .bootstrap(config.token.clone().map(Credential::new))
            .await
            .context("failed to restore session")?;
    }

    let confirmer = PromptConfirmer::new(cli.yes);
    commands::run(&console, cli.command, &confirmer).await
}
