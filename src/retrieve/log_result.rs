use serde::Serialize;

/// Per-job outcome. Serialized untagged so every entry is a flat object
/// with stable snake_case field names.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum JobLogResult {
    Success(JobLogSuccess),
    Error(JobLogFailure),
}

impl JobLogResult {
    pub fn job_id(&self) -> u64 {
        match self {
            JobLogResult::Success(s) => s.job_id,
            JobLogResult::Error(e) => e.job_id,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, JobLogResult::Success(_))
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Default)]
pub struct JobLogSuccess {
    pub job_id: u64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_name: Option<String>,

    /// Signed, time-limited download URL. Present when content was not
    /// requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logs_url: Option<String>,

    /// The extracted log tail. Present when content was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logs_content: Option<String>,

    /// Total lines the log contained before tailing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_length: Option<u64>,

    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct JobLogFailure {
    pub job_id: u64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_name: Option<String>,

    pub error: String,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct ReturnFormat {
    pub content: bool,
    pub urls: bool,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct BatchLogResult {
    pub message: String,

    pub run_id: u64,

    pub total_jobs: u64,

    pub failed_jobs: u64,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub logs: Vec<JobLogResult>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_format: Option<ReturnFormat>,
}

/// What one `logs` invocation produced, single-job or batch.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum LogRetrieval {
    Single(JobLogSuccess),
    Batch(BatchLogResult),
}
