use crate::fetch;
use crate::fetch::{CancelToken, FetchError, LogByteStream};
use crate::workflow::token_github_async_client::{
    do_request, do_request_redirect_location, github_headers,
};
use crate::workflow::{WorkflowApiError, WorkflowClient};
use async_trait::async_trait;
use reqwest::{redirect, Client};

/// Asynchronous GitHub API client without credentials. Only public
/// repositories are reachable; log URL resolution still works when the
/// repository exposes its Actions logs publicly.
pub struct AnonGithubAsyncClient {
    api_base: String,
    client: Client,
    probe_client: Client,
    download_client: Client,
}

impl AnonGithubAsyncClient {
    pub fn new(api_base: &str) -> Self {
        Self {
            api_base: api_base.trim_end_matches('/').into(),
            client: Client::builder()
                .default_headers(github_headers(None))
                .build()
                .unwrap(),
            probe_client: Client::builder()
                .default_headers(github_headers(None))
                .redirect(redirect::Policy::none())
                .build()
                .unwrap(),
            download_client: Client::new(),
        }
    }
}

#[async_trait]
impl WorkflowClient for AnonGithubAsyncClient {
    async fn request(&self, method: &str, endpoint: &str) -> Result<String, WorkflowApiError> {
        do_request(&self.client, &self.api_base, method, endpoint).await
    }

    async fn request_redirect_location(
        &self,
        endpoint: &str,
    ) -> Result<String, WorkflowApiError> {
        do_request_redirect_location(&self.probe_client, &self.api_base, endpoint).await
    }

    async fn open_log_stream(
        &self,
        url: &str,
        cancel_token: Option<CancelToken>,
    ) -> Result<LogByteStream, FetchError> {
        fetch::open_log_stream_with_retry(&self.download_client, url, cancel_token).await
    }
}
