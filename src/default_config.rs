pub const GITHUB_API_URL: &str = "https://api.github.com";

pub const TAIL_LINES: usize = 500;

/// Upper bound on returned lines, configured by the environment rather than
/// the caller. `--tail` above this value is clamped silently.
pub const CONTENT_WINDOW_CEILING: usize = 5000;

pub const ENV_CONTENT_WINDOW_CEILING: &str = "GALE_CONTENT_WINDOW_CEILING";

pub const JOBS_PER_PAGE: u32 = 100;

pub const RETRIEVE_CONCURRENCY_COUNT: usize = 4;

pub const JOB_LOG_TIMEOUT_SECS: u64 = 120;

pub const DOWNLOAD_MAX_ATTEMPTS: u32 = 3;

pub const DOWNLOAD_RETRY_BASE_DELAY_MS: u64 = 500;
