use crate::constant::log::*;
use crate::default_config;
use crate::fetch::{CancelToken, FetchError};
use crate::retrieve::log_result::{
    BatchLogResult, JobLogFailure, JobLogResult, JobLogSuccess, LogRetrieval, ReturnFormat,
};
use crate::tail;
use crate::workflow::github_model::workflow_job::WorkflowJob;
use crate::workflow::query::{query_job_log_url, query_run_jobs};
use crate::workflow::{RepoRef, WorkflowApiError, WorkflowClient};
use formatx::formatx;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinSet;

pub mod log_result;
pub mod retrieve_params;

#[derive(Error, Debug)]
pub enum RetrieveError {
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    UpstreamApi(#[from] WorkflowApiError),

    #[error("{0}")]
    Download(FetchError),

    #[error("log stream processing failed: {0}")]
    Processing(String),

    #[error("log retrieval cancelled")]
    Cancelled,

    #[error("log retrieval timed out after {0}s")]
    Timeout(u64),
}

impl From<FetchError> for RetrieveError {
    fn from(value: FetchError) -> Self {
        match value {
            FetchError::Stream(msg) => RetrieveError::Processing(msg),
            FetchError::Cancelled => RetrieveError::Cancelled,
            e => RetrieveError::Download(e),
        }
    }
}

/// Timing/size report for one extraction, handed to the optional hook.
#[derive(Debug, Clone)]
pub struct ExtractStats {
    pub job_id: u64,
    pub bytes_read: u64,
    pub total_lines: u64,
    pub kept_lines: usize,
    pub cost: u128,
}

pub type ExtractHook = Arc<dyn Fn(&ExtractStats) + Send + Sync>;

#[derive(Clone)]
pub struct RetrieveOptions {
    /// Fetch the log tail text; false returns the download URL only.
    pub return_content: bool,

    /// Lines the caller asked for.
    pub tail_lines: usize,

    /// Environment-configured upper bound, independent of the caller.
    pub content_window_ceiling: usize,

    /// Bounded window size for batch retrieval.
    pub concurrency: usize,

    /// Deadline per job in batch mode.
    pub job_timeout: Duration,

    pub extract_hook: Option<ExtractHook>,

    pub cancel_token: Option<CancelToken>,
}

impl Default for RetrieveOptions {
    fn default() -> Self {
        Self {
            return_content: false,
            tail_lines: default_config::TAIL_LINES,
            content_window_ceiling: default_config::CONTENT_WINDOW_CEILING,
            concurrency: default_config::RETRIEVE_CONCURRENCY_COUNT,
            job_timeout: Duration::from_secs(default_config::JOB_LOG_TIMEOUT_SECS),
            extract_hook: None,
            cancel_token: None,
        }
    }
}

impl RetrieveOptions {
    /// How many lines the extractor may retain. The ceiling clamps the
    /// caller's request silently; the truncator never widens it back.
    pub fn effective_capacity(&self) -> usize {
        self.tail_lines.min(self.content_window_ceiling)
    }
}

#[derive(Debug, PartialEq)]
pub enum LogScope {
    SingleJob(u64),
    FailedJobs(u64),
}

/// # resolve log scope
///
/// Exactly one of a job id or a run id with `failed_only` must be supplied.
/// Runs before any network call.
pub fn resolve_log_scope(
    job_id: Option<u64>,
    run_id: Option<u64>,
    failed_only: bool,
) -> Result<LogScope, RetrieveError> {
    match (job_id, run_id) {
        (Some(_), Some(_)) => Err(RetrieveError::Validation(
            ERR_NEED_EXACTLY_ONE_TARGET.to_string(),
        )),
        (Some(job_id), None) => {
            if failed_only {
                Err(RetrieveError::Validation(
                    ERR_NEED_EXACTLY_ONE_TARGET.to_string(),
                ))
            } else {
                Ok(LogScope::SingleJob(job_id))
            }
        }
        (None, Some(run_id)) => {
            if failed_only {
                Ok(LogScope::FailedJobs(run_id))
            } else {
                Err(RetrieveError::Validation(
                    ERR_RUN_NEEDS_FAILED_ONLY.to_string(),
                ))
            }
        }
        (None, None) => {
            if failed_only {
                Err(RetrieveError::Validation(
                    ERR_FAILED_ONLY_NEEDS_RUN.to_string(),
                ))
            } else {
                Err(RetrieveError::Validation(
                    ERR_NEED_EXACTLY_ONE_TARGET.to_string(),
                ))
            }
        }
    }
}

/// # retrieve job logs
///
/// Entry point for both modes. Validates the target, then either fetches
/// one job's log or aggregates over every failed job of a run.
pub async fn retrieve_job_logs<C>(
    client: Arc<C>,
    repo: &RepoRef,
    job_id: Option<u64>,
    run_id: Option<u64>,
    failed_only: bool,
    opts: &RetrieveOptions,
) -> Result<LogRetrieval, RetrieveError>
where
    C: WorkflowClient + 'static,
{
    match resolve_log_scope(job_id, run_id, failed_only)? {
        LogScope::SingleJob(job_id) => {
            retrieve_single_job(client.as_ref(), repo, job_id, None, opts)
                .await
                .map(LogRetrieval::Single)
        }
        LogScope::FailedJobs(run_id) => retrieve_failed_jobs(client, repo, run_id, opts)
            .await
            .map(LogRetrieval::Batch),
    }
}

/// # retrieve single job
///
/// Resolve the signed URL; without `return_content` that URL is the result.
/// With it, drive fetcher → extractor → truncator. Any failure here is
/// fatal to this job.
pub async fn retrieve_single_job<C: WorkflowClient>(
    client: &C,
    repo: &RepoRef,
    job_id: u64,
    job_name: Option<String>,
    opts: &RetrieveOptions,
) -> Result<JobLogSuccess, RetrieveError> {
    let logs_url = query_job_log_url(client, repo, job_id).await?;

    if !opts.return_content {
        return Ok(JobLogSuccess {
            job_id,
            job_name,
            logs_url: Some(logs_url),
            message: MSG_JOB_LOGS_URL.to_string(),
            note: Some(NOTE_FETCH_CONTENT.to_string()),
            ..Default::default()
        });
    }

    let start_time = std::time::Instant::now();

    let stream = client
        .open_log_stream(&logs_url, opts.cancel_token.clone())
        .await?;
    let extract = tail::read_tail_lines(stream, opts.effective_capacity())
        .await
        .map_err(RetrieveError::from)?;
    let logs_content = tail::truncate_to_window(&extract.lines, opts.tail_lines);

    if let Some(hook) = &opts.extract_hook {
        hook(&ExtractStats {
            job_id,
            bytes_read: extract.bytes_read,
            total_lines: extract.total_lines,
            kept_lines: extract.lines.len(),
            cost: start_time.elapsed().as_millis(),
        });
    }

    Ok(JobLogSuccess {
        job_id,
        job_name,
        logs_content: Some(logs_content),
        original_length: Some(extract.total_lines),
        message: formatx!(MSG_JOB_LOG_TAIL, extract.lines.len(), extract.total_lines)
            .unwrap_or_default(),
        ..Default::default()
    })
}

/// # retrieve failed jobs
///
/// List the run's jobs (fatal on failure), then fetch each failed job's
/// log inside a bounded concurrent window. One job's failure is captured
/// into its own result entry and never aborts the rest. Results are written
/// per-slot, so aggregation order always equals listing order.
pub async fn retrieve_failed_jobs<C>(
    client: Arc<C>,
    repo: &RepoRef,
    run_id: u64,
    opts: &RetrieveOptions,
) -> Result<BatchLogResult, RetrieveError>
where
    C: WorkflowClient + 'static,
{
    let listing = query_run_jobs(client.as_ref(), repo, run_id).await?;
    let total_jobs = listing.total_count;
    let failed: Vec<WorkflowJob> = listing
        .jobs
        .into_iter()
        .filter(WorkflowJob::is_failed)
        .collect();

    if failed.is_empty() {
        return Ok(BatchLogResult {
            message: MSG_NO_FAILED_JOBS.to_string(),
            run_id,
            total_jobs,
            failed_jobs: 0,
            logs: vec![],
            return_format: None,
        });
    }

    let failed = Arc::new(failed);
    let mut tasks: JoinSet<(usize, Result<JobLogSuccess, RetrieveError>)> = JoinSet::new();
    let mut results: Vec<Option<JobLogResult>> = std::iter::repeat_with(|| None)
        .take(failed.len())
        .collect();
    let mut next_fetch_idx = 0;

    fn fill_task_window<C: WorkflowClient + 'static>(
        client: &Arc<C>,
        failed: &Arc<Vec<WorkflowJob>>,
        repo: &RepoRef,
        opts: &RetrieveOptions,
        tasks: &mut JoinSet<(usize, Result<JobLogSuccess, RetrieveError>)>,
        next_fetch_idx: &mut usize,
    ) {
        while tasks.len() < opts.concurrency.max(1) && *next_fetch_idx < failed.len() {
            let joined_idx = *next_fetch_idx;
            *next_fetch_idx += 1;
            let arc_client = client.to_owned();
            let failed = failed.to_owned();
            let repo = repo.clone();
            let opts = opts.clone();
            tasks.spawn(async move {
                let job = &failed[joined_idx];
                let timeout_secs = opts.job_timeout.as_secs();
                return match tokio::time::timeout(
                    opts.job_timeout,
                    retrieve_single_job(
                        arc_client.as_ref(),
                        &repo,
                        job.id,
                        Some(job.name.clone()),
                        &opts,
                    ),
                )
                .await
                {
                    Ok(resp) => (joined_idx, resp),
                    Err(_) => (joined_idx, Err(RetrieveError::Timeout(timeout_secs))),
                };
            });
        }
    }

    // start the initial concurrent window
    fill_task_window(&client, &failed, repo, opts, &mut tasks, &mut next_fetch_idx);

    while let Some(joined) = tasks.join_next().await {
        if let Ok((joined_idx, result)) = joined {
            let job = &failed[joined_idx];
            results[joined_idx] = Some(match result {
                Ok(success) => JobLogResult::Success(success),
                Err(e) => JobLogResult::Error(JobLogFailure {
                    job_id: job.id,
                    job_name: Some(job.name.clone()),
                    error: e.to_string(),
                }),
            });
        }

        // hold the next job in the queue
        fill_task_window(&client, &failed, repo, opts, &mut tasks, &mut next_fetch_idx);
    }

    let logs: Vec<JobLogResult> = results
        .into_iter()
        .enumerate()
        .map(|(idx, slot)| {
            slot.unwrap_or_else(|| {
                let job = &failed[idx];
                JobLogResult::Error(JobLogFailure {
                    job_id: job.id,
                    job_name: Some(job.name.clone()),
                    error: ERR_LOG_TASK_LOST.to_string(),
                })
            })
        })
        .collect();

    Ok(BatchLogResult {
        message: formatx!(MSG_BATCH_DONE, failed.len(), run_id).unwrap_or_default(),
        run_id,
        total_jobs,
        failed_jobs: failed.len() as u64,
        logs,
        return_format: Some(ReturnFormat {
            content: opts.return_content,
            urls: !opts.return_content,
        }),
    })
}
