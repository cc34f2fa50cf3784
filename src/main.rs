use std::{io::IsTerminal, process::ExitCode};

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};

use crate::{github::GithubClient, runner_config::RunnerConfig};
mod cli;
mod error;
mod github;
mod runner_config;
mod token_file;

pub(crate) fn build_http_client() -> reqwest::ClientBuilder {
    reqwest::Client::builder().user_agent("github-runner-init")
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    color_eyre::config::HookBuilder::default()
        .theme(if !std::io::stderr().is_terminal() {
            color_eyre::config::Theme::new()
        } else {
            color_eyre::config::Theme::dark()
        })
        .install()?;

    execute().await
}

async fn execute() -> Result<ExitCode> {
    let cli = cli::RunnerInitCli::parse();
    cli.instrumentation.setup()?;

    let config = RunnerConfig::from_cli(cli);
    init_runner_token(&config).await?;

    Ok(ExitCode::SUCCESS)
}

#[tracing::instrument(
    skip_all,
    fields(
        organization = %config.organization,
        api = config.api.base_url(),
        token_dest = %config.token_dest.display(),
    )
)]
async fn init_runner_token(config: &RunnerConfig) -> Result<()> {
    let client = GithubClient::new(config.api.clone(), config.token.clone())?;

    let runner_token = client
        .registration_token(&config.organization)
        .await
        .wrap_err("Fetching runner registration token")?;

    tracing::info!("Writing token to file: {}", config.token_dest.display());
    token_file::write_token(&config.token_dest, &runner_token)
        .await
        .wrap_err("Writing runner token")?;

    tracing::info!("Runner token successfully written to file");
    Ok(())
}
