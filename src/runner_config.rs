use std::path::PathBuf;

use crate::{
    cli::RunnerInitCli,
    github::{GithubApi, PUBLIC_API_URL},
};

pub(crate) const DEFAULT_SERVICE_ACCOUNT: &str = "default";
pub(crate) const DEFAULT_TOKEN_DEST: &str = "/runner-token/runner_token";

/// Settings resolved once at startup and handed to the fetch and write steps.
pub(crate) struct RunnerConfig {
    pub(crate) api: GithubApi,
    pub(crate) organization: String,
    pub(crate) token: String,
    pub(crate) service_account: String,
    pub(crate) token_dest: PathBuf,
}

impl std::fmt::Debug for RunnerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunnerConfig")
            .field("api", &self.api)
            .field("organization", &self.organization)
            .field("token", &"<redacted>")
            .field("service_account", &self.service_account)
            .field("token_dest", &self.token_dest)
            .finish()
    }
}

impl RunnerConfig {
    #[tracing::instrument(skip_all)]
    pub(crate) fn from_cli(cli: RunnerInitCli) -> Self {
        let RunnerInitCli {
            url,
            organization,
            token,
            service_account,
            token_dest,
            instrumentation: _,
        } = cli;

        let base_url = match url.0 {
            Some(url) => {
                tracing::info!("GitHub URL set to: {url}");
                url
            }
            None => {
                tracing::info!("Using default GitHub URL: {PUBLIC_API_URL}");
                PUBLIC_API_URL.to_string()
            }
        };

        let service_account = service_account.0.unwrap_or_else(|| {
            tracing::info!("Using default service account name: {DEFAULT_SERVICE_ACCOUNT}");
            DEFAULT_SERVICE_ACCOUNT.to_string()
        });

        let token_dest = token_dest.0.unwrap_or_else(|| {
            tracing::info!("Using default token destination: {DEFAULT_TOKEN_DEST}");
            PathBuf::from(DEFAULT_TOKEN_DEST)
        });

        if organization.is_empty() {
            tracing::warn!("`GITHUB_ORGANIZATION` is empty, the token request will likely fail");
        }
        if token.is_empty() {
            tracing::warn!("`GITHUB_TOKEN` is empty, the token request will likely fail");
        }

        let config = Self {
            api: GithubApi::from_base_url(&base_url),
            organization,
            token,
            service_account,
            token_dest,
        };
        tracing::debug!(?config, "Resolved configuration");

        config
    }
}
