use crate::fetch::{CancelToken, FetchError, LogByteStream};
use async_trait::async_trait;
use std::fmt::Display;
use thiserror::Error;

mod anon_github_async_client;
pub mod github_endpoint;
pub mod github_model;
pub mod query;
mod token_github_async_client;

pub use anon_github_async_client::AnonGithubAsyncClient;
pub use token_github_async_client::TokenGithubAsyncClient;

/// A single REST endpoint of the Workflow API.
pub trait Endpoint {
    /// HTTP method used.
    fn method(&self) -> &str;

    /// API path relative to the api base, including query parameters.
    fn endpoint(&self) -> String;
}

#[derive(Error, Debug)]
pub enum WorkflowApiError {
    #[error("workflow api returned status {status}: {body}")]
    Api { status: u16, body: String },

    #[error("workflow api request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to decode workflow api response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid http method {0}")]
    Method(String),

    #[error("workflow api response missing redirect location")]
    MissingLocation,

    #[error("{0}")]
    Misconfigured(String),
}

/// `owner/name` pair identifying a repository.
#[derive(Debug, Clone, PartialEq)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl RepoRef {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl Display for RepoRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Transport seam to the Workflow API. The orchestrator only ever talks to
/// this trait; tests swap in scripted implementations.
#[async_trait]
pub trait WorkflowClient: Send + Sync {
    /// Send a request and return the response body. Non-2xx statuses are an
    /// [`WorkflowApiError::Api`] carrying status and body.
    async fn request(&self, method: &str, endpoint: &str) -> Result<String, WorkflowApiError>;

    /// Send a GET expecting a redirect and return the `Location` target
    /// without following it. Used for signed, time-limited download URLs.
    async fn request_redirect_location(&self, endpoint: &str)
        -> Result<String, WorkflowApiError>;

    /// Open an incremental byte stream over an already-resolved signed URL.
    async fn open_log_stream(
        &self,
        url: &str,
        cancel_token: Option<CancelToken>,
    ) -> Result<LogByteStream, FetchError>;
}
