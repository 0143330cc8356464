use crate::workflow::Endpoint;

/// Endpoint resolving the signed, time-limited download URL of one job log.
/// The API answers with a redirect; the `Location` header is the URL.
pub struct JobLogs {
    /// Owner of the repository.
    pub owner: String,

    /// Name of the repository.
    pub repo: String,

    /// Identity of the job.
    pub job_id: u64,
}

impl Endpoint for JobLogs {
    /// HTTP method used (GET).
    fn method(&self) -> &str {
        "GET"
    }

    /// API path for resolving the job log URL.
    fn endpoint(&self) -> String {
        format!(
            "repos/{}/{}/actions/jobs/{}/logs",
            self.owner, self.repo, self.job_id
        )
    }
}
