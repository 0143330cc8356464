use crate::constant::log::*;
use crate::default_config;
use crate::fetch::{CancelToken, FetchError, LogByteStream};
use crate::workflow::github_endpoint::job_logs::JobLogs;
use crate::workflow::github_endpoint::rate_limit::RateLimit;
use crate::workflow::github_endpoint::run_jobs::RunJobs;
use crate::workflow::github_model::workflow_jobs::WorkflowJobs;
use crate::workflow::{
    AnonGithubAsyncClient, Endpoint, RepoRef, TokenGithubAsyncClient, WorkflowApiError,
    WorkflowClient,
};
use async_trait::async_trait;

pub enum GaleWorkflowClient {
    TokenClient(TokenGithubAsyncClient),
    AnonClient(AnonGithubAsyncClient),
}

#[async_trait]
impl WorkflowClient for GaleWorkflowClient {
    async fn request(&self, method: &str, endpoint: &str) -> Result<String, WorkflowApiError> {
        match self {
            GaleWorkflowClient::TokenClient(c) => c.request(method, endpoint).await,
            GaleWorkflowClient::AnonClient(c) => c.request(method, endpoint).await,
        }
    }

    async fn request_redirect_location(
        &self,
        endpoint: &str,
    ) -> Result<String, WorkflowApiError> {
        match self {
            GaleWorkflowClient::TokenClient(c) => c.request_redirect_location(endpoint).await,
            GaleWorkflowClient::AnonClient(c) => c.request_redirect_location(endpoint).await,
        }
    }

    async fn open_log_stream(
        &self,
        url: &str,
        cancel_token: Option<CancelToken>,
    ) -> Result<LogByteStream, FetchError> {
        match self {
            GaleWorkflowClient::TokenClient(c) => c.open_log_stream(url, cancel_token).await,
            GaleWorkflowClient::AnonClient(c) => c.open_log_stream(url, cancel_token).await,
        }
    }
}

pub async fn ping_github<C: WorkflowClient>(client: &C) -> Result<(), WorkflowApiError> {
    let ping = RateLimit;
    client.request(ping.method(), &ping.endpoint()).await.map(|_| ())
}

pub async fn try_get_github_async_client(
    api_base: &Option<String>,
    token: &Option<String>,
) -> Result<GaleWorkflowClient, WorkflowApiError> {
    if token.is_some() {
        try_get_github_async_client_by_token(api_base, token).await
    } else {
        try_get_github_async_client_anonymous(api_base).await
    }
}

pub async fn try_get_github_async_client_by_token(
    api_base: &Option<String>,
    token: &Option<String>,
) -> Result<GaleWorkflowClient, WorkflowApiError> {
    let token = token.as_deref().ok_or_else(|| {
        WorkflowApiError::Misconfigured(ERR_GITHUB_CLIENT_INVALID_SIMPLE.to_string())
    })?;

    let client = GaleWorkflowClient::TokenClient(TokenGithubAsyncClient::new(
        api_base
            .as_deref()
            .unwrap_or(default_config::GITHUB_API_URL),
        token,
    ));

    ping_github(&client).await?;
    Ok(client)
}

pub async fn try_get_github_async_client_anonymous(
    api_base: &Option<String>,
) -> Result<GaleWorkflowClient, WorkflowApiError> {
    let client = GaleWorkflowClient::AnonClient(AnonGithubAsyncClient::new(
        api_base
            .as_deref()
            .unwrap_or(default_config::GITHUB_API_URL),
    ));

    ping_github(&client).await?;
    Ok(client)
}

/// # query run jobs
///
/// List the jobs of a workflow run, restricted to the latest attempt,
/// following pagination until a short page.
pub async fn query_run_jobs<C: WorkflowClient>(
    client: &C,
    repo: &RepoRef,
    run_id: u64,
) -> Result<WorkflowJobs, WorkflowApiError> {
    let mut page = 1;
    let mut total_count = 0;
    let mut jobs = Vec::new();

    loop {
        let endpoint = RunJobs {
            owner: repo.owner.clone(),
            repo: repo.name.clone(),
            run_id,
            page,
        };

        let body = client.request(endpoint.method(), &endpoint.endpoint()).await?;
        let chunk: WorkflowJobs = serde_json::from_str(&body)?;

        if page == 1 {
            total_count = chunk.total_count;
        }

        let chunk_len = chunk.jobs.len();
        jobs.extend(chunk.jobs);

        if (chunk_len as u32) < default_config::JOBS_PER_PAGE {
            break;
        }
        page += 1;
    }

    Ok(WorkflowJobs { total_count, jobs })
}

/// # query job log url
///
/// Resolve the signed, time-limited download URL for one job log.
pub async fn query_job_log_url<C: WorkflowClient>(
    client: &C,
    repo: &RepoRef,
    job_id: u64,
) -> Result<String, WorkflowApiError> {
    let endpoint = JobLogs {
        owner: repo.owner.clone(),
        repo: repo.name.clone(),
        job_id,
    };

    client.request_redirect_location(&endpoint.endpoint()).await
}

#[cfg(test)]
mod tests {
    use super::*;

    struct PagedClient {
        pages: Vec<String>,
    }

    #[async_trait]
    impl WorkflowClient for PagedClient {
        async fn request(
            &self,
            _method: &str,
            endpoint: &str,
        ) -> Result<String, WorkflowApiError> {
            let page: usize = endpoint
                .rsplit("page=")
                .next()
                .and_then(|v| v.parse().ok())
                .unwrap();
            Ok(self.pages[page - 1].clone())
        }

        async fn request_redirect_location(
            &self,
            endpoint: &str,
        ) -> Result<String, WorkflowApiError> {
            Ok(format!("https://signed.example/{}", endpoint))
        }

        async fn open_log_stream(
            &self,
            _url: &str,
            _cancel_token: Option<CancelToken>,
        ) -> Result<LogByteStream, FetchError> {
            unreachable!("not used by query tests")
        }
    }

    fn jobs_page(ids: std::ops::Range<u64>, total: u64) -> String {
        let jobs: Vec<String> = ids
            .map(|id| format!(r#"{{ "id": {}, "name": "job-{}", "conclusion": "success" }}"#, id, id))
            .collect();
        format!(r#"{{ "total_count": {}, "jobs": [{}] }}"#, total, jobs.join(","))
    }

    #[tokio::test]
    async fn test_query_run_jobs_single_page() {
        let client = PagedClient {
            pages: vec![jobs_page(1..4, 3)],
        };

        let jobs = query_run_jobs(&client, &RepoRef::new("octo", "hello"), 7)
            .await
            .unwrap();

        assert_eq!(jobs.total_count, 3);
        assert_eq!(jobs.jobs.len(), 3);
    }

    #[tokio::test]
    async fn test_query_run_jobs_paginates_until_short_page() {
        let client = PagedClient {
            pages: vec![jobs_page(0..100, 130), jobs_page(100..130, 130)],
        };

        let jobs = query_run_jobs(&client, &RepoRef::new("octo", "hello"), 7)
            .await
            .unwrap();

        assert_eq!(jobs.total_count, 130);
        assert_eq!(jobs.jobs.len(), 130);
        assert_eq!(jobs.jobs[129].id, 129);
    }

    #[tokio::test]
    async fn test_query_job_log_url_uses_log_endpoint() {
        let client = PagedClient { pages: vec![] };

        let url = query_job_log_url(&client, &RepoRef::new("octo", "hello"), 42)
            .await
            .unwrap();

        assert_eq!(
            url,
            "https://signed.example/repos/octo/hello/actions/jobs/42/logs"
        );
    }
}
