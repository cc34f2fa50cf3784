use std::path::PathBuf;

use http::StatusCode;

#[derive(Debug, thiserror::Error)]
pub(crate) enum Error {
    #[error("Error creating request for `{url}`: {source}")]
    BuildRequest {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Error executing request: {0}")]
    Transport(#[source] reqwest::Error),

    /// The API answered with something other than 200/201, body kept for diagnostics.
    #[error("Failed to get runner token: {status}\n{body}")]
    Status { status: StatusCode, body: String },

    #[error("Error reading response body: {0}")]
    ReadBody(#[source] reqwest::Error),

    #[error("Error unmarshalling response: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("Token not found in response")]
    TokenNotFound,

    #[error("Writing to {path:?}: {source}")]
    WriteToken {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
