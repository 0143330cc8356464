use crate::workflow::github_model::job_conclusion::JobConclusion;
use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
pub struct WorkflowJob {
    pub id: u64,

    pub name: String,

    /// Absent or null while the job is still running.
    #[serde(default)]
    pub conclusion: Option<JobConclusion>,

    #[serde(default)]
    pub html_url: Option<String>,
}

impl WorkflowJob {
    pub fn is_failed(&self) -> bool {
        matches!(self.conclusion, Some(JobConclusion::Failure))
    }
}
