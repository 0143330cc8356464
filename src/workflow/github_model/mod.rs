pub mod job_conclusion;
pub mod workflow_job;
pub mod workflow_jobs;
