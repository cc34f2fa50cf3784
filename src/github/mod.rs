use std::collections::HashMap;

use color_eyre::eyre::Result;
use http::StatusCode;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Response;

use crate::{build_http_client, error::Error};

pub(crate) const PUBLIC_API_URL: &str = "https://api.github.com";
const GITHUB_JSON_MEDIA_TYPE: &str = "application/vnd.github+json";
const GITHUB_API_VERSION: &str = "2022-11-28";

/// Which URL shape the registration token endpoint takes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum GithubApi {
    Public,
    /// A GitHub Enterprise Server, serving the REST API under `/api/v3`.
    Enterprise(String),
}

impl GithubApi {
    // Only an exact match is public, `https://api.github.com/` is treated as an enterprise host.
    pub(crate) fn from_base_url(base_url: &str) -> Self {
        if base_url == PUBLIC_API_URL {
            Self::Public
        } else {
            Self::Enterprise(base_url.to_string())
        }
    }

    pub(crate) fn base_url(&self) -> &str {
        match self {
            Self::Public => PUBLIC_API_URL,
            Self::Enterprise(base_url) => base_url,
        }
    }

    pub(crate) fn registration_token_url(&self, organization: &str) -> String {
        match self {
            Self::Public => format!(
                "{PUBLIC_API_URL}/orgs/{organization}/actions/runners/registration-token"
            ),
            Self::Enterprise(base_url) => format!(
                "{base_url}/api/v3/orgs/{organization}/actions/runners/registration-token"
            ),
        }
    }
}

pub(crate) fn github_headers() -> HeaderMap {
    let mut header_map = HeaderMap::new();

    header_map.insert(
        reqwest::header::ACCEPT,
        HeaderValue::from_static(GITHUB_JSON_MEDIA_TYPE),
    );
    header_map.insert(
        HeaderName::from_static("x-github-api-version"),
        HeaderValue::from_static(GITHUB_API_VERSION),
    );
    header_map
}

pub(crate) struct GithubClient {
    api: GithubApi,
    bearer_token: String,
    client: reqwest::Client,
}

impl GithubClient {
    pub(crate) fn new(api: GithubApi, bearer_token: String) -> Result<Self> {
        let client = build_http_client().build()?;

        Ok(Self {
            api,
            bearer_token,
            client,
        })
    }

    #[tracing::instrument(skip_all)]
    pub(crate) async fn registration_token(&self, organization: &str) -> Result<String, Error> {
        let raw_url = self.api.registration_token_url(organization);
        let registration_token_url =
            url::Url::parse(&raw_url).map_err(|source| Error::BuildRequest {
                url: raw_url.clone(),
                source,
            })?;

        tracing::info!(url = %registration_token_url, "Requesting runner token");

        let response = self
            .client
            .post(registration_token_url)
            .bearer_auth(&self.bearer_token)
            .headers(github_headers())
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = response.status();
        tracing::info!(
            status = tracing::field::display(status),
            "Received registration token response"
        );

        if status != StatusCode::OK && status != StatusCode::CREATED {
            let body = response_text(response).await;
            tracing::error!(%body, "Registration token request failed");
            return Err(Error::Status { status, body });
        }

        let body = response.bytes().await.map_err(Error::ReadBody)?;
        let mut result: HashMap<String, String> =
            serde_json::from_slice(&body).map_err(Error::Parse)?;

        let token = result.remove("token").ok_or(Error::TokenNotFound)?;

        tracing::info!("Runner token successfully retrieved");
        Ok(token)
    }
}

async fn response_text(res: Response) -> String {
    if let Ok(message) = res.text().await {
        message
    } else {
        String::from("no body")
    }
}
