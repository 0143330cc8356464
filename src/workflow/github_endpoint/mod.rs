pub mod job_logs;
pub mod rate_limit;
pub mod run_jobs;
