use crate::default_config;
use crate::workflow::Endpoint;

/// Endpoint for listing the jobs of a workflow run, restricted to the
/// latest attempt.
pub struct RunJobs {
    /// Owner of the repository.
    pub owner: String,

    /// Name of the repository.
    pub repo: String,

    /// Identity of the workflow run.
    pub run_id: u64,

    /// 1-based page index.
    pub page: u32,
}

impl Endpoint for RunJobs {
    /// HTTP method used (GET).
    fn method(&self) -> &str {
        "GET"
    }

    /// API path for listing run jobs.
    fn endpoint(&self) -> String {
        format!(
            "repos/{}/{}/actions/runs/{}/jobs?filter=latest&per_page={}&page={}",
            self.owner,
            self.repo,
            self.run_id,
            default_config::JOBS_PER_PAGE,
            self.page
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_path() {
        let endpoint = RunJobs {
            owner: "octo".to_string(),
            repo: "hello".to_string(),
            run_id: 42,
            page: 2,
        };

        assert_eq!(endpoint.method(), "GET");
        assert_eq!(
            endpoint.endpoint(),
            "repos/octo/hello/actions/runs/42/jobs?filter=latest&per_page=100&page=2"
        );
    }
}
