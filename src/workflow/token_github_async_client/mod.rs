use crate::fetch;
use crate::fetch::{CancelToken, FetchError, LogByteStream};
use crate::workflow::{WorkflowApiError, WorkflowClient};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, LOCATION, USER_AGENT};
use reqwest::{redirect, Client};

/// Asynchronous GitHub API client authenticated by token.
pub struct TokenGithubAsyncClient {
    api_base: String,
    client: Client,
    probe_client: Client,
    download_client: Client,
}

pub(crate) fn github_headers(token: Option<&str>) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static("gale"));
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("application/vnd.github+json"),
    );
    headers.insert(
        "x-github-api-version",
        HeaderValue::from_static("2022-11-28"),
    );

    if let Some(token) = token {
        if let Ok(value) = HeaderValue::from_str(&format!("Bearer {}", token.trim())) {
            headers.insert(AUTHORIZATION, value);
        }
    }

    headers
}

impl TokenGithubAsyncClient {
    /// Creates a new asynchronous GitHub API client authenticated by token.
    ///
    /// # Arguments
    ///
    /// * `api_base` - Base URL of the GitHub API.
    /// * `token` - Token for authentication.
    pub fn new(api_base: &str, token: &str) -> Self {
        Self {
            api_base: api_base.trim_end_matches('/').into(),
            client: Client::builder()
                .default_headers(github_headers(Some(token)))
                .build()
                .unwrap(),
            // The log endpoint answers with a redirect to a signed URL;
            // the Location header must be captured, not followed.
            probe_client: Client::builder()
                .default_headers(github_headers(Some(token)))
                .redirect(redirect::Policy::none())
                .build()
                .unwrap(),
            // Signed URLs are pre-authorized; the blob store rejects
            // requests that also carry the api auth header.
            download_client: Client::new(),
        }
    }
}

pub(crate) async fn do_request(
    client: &Client,
    api_base: &str,
    method: &str,
    endpoint: &str,
) -> Result<String, WorkflowApiError> {
    let url = format!("{}/{}", api_base, endpoint);
    let method: reqwest::Method = method
        .parse()
        .map_err(|_| WorkflowApiError::Method(method.to_string()))?;

    let resp = client.request(method, url).send().await?;
    let status = resp.status().as_u16();
    let body = resp.text().await?;

    if status >= 400 {
        return Err(WorkflowApiError::Api { status, body });
    }

    Ok(body)
}

pub(crate) async fn do_request_redirect_location(
    probe_client: &Client,
    api_base: &str,
    endpoint: &str,
) -> Result<String, WorkflowApiError> {
    let url = format!("{}/{}", api_base, endpoint);
    let resp = probe_client.get(url).send().await?;
    let status = resp.status();

    if status.is_redirection() {
        return resp
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string())
            .ok_or(WorkflowApiError::MissingLocation);
    }

    Err(WorkflowApiError::Api {
        status: status.as_u16(),
        body: resp.text().await.unwrap_or_default(),
    })
}

#[async_trait]
impl WorkflowClient for TokenGithubAsyncClient {
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
