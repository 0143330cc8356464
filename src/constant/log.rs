pub const ERR_INPUT_INVALID: &str = "Invalid input.";
pub const ERR_NEED_PARAM: &str = "Need param {}.";
pub const ERR_NEED_AN_OWNER: &str = "Need a repository owner.";
pub const ERR_NEED_A_REPO: &str = "Need a repository name.";
pub const ERR_NEED_A_GITHUB_TOKEN: &str = "Need your GitHub token.";
pub const ERR_GITHUB_CLIENT_INVALID: &str =
    "Cannot connect to GitHub. Maybe you should check your token.";
pub const ERR_GITHUB_CLIENT_INVALID_SIMPLE: &str = "Cannot connect to GitHub.";
pub const ERR_GITHUB_CLIENT_INVALID_MAY_BE_TOKEN_INVALID: &str =
    "Api base: {}.\nToken: {}\nMaybe you should check your token.\nErr: {}";
pub const ERR_INVALID_RUN_REF: &str =
    "Cannot parse run reference {}. Use a run id or a run URL.";
pub const ERR_INVALID_JOB_REF: &str =
    "Cannot parse job reference {}. Use a job id or a job URL.";
pub const ERR_NEED_EXACTLY_ONE_TARGET: &str =
    "Exactly one of --job or --run with --failed-only must be supplied.";
pub const ERR_FAILED_ONLY_NEEDS_RUN: &str =
    "--failed-only requires --run to identify the workflow run.";
pub const ERR_RUN_NEEDS_FAILED_ONLY: &str =
    "--run requires --failed-only. Fetching every job of a run is not supported.";
pub const ERR_DB_SAVE_FAILURE: &str = "Archive storage failure: {}";
pub const ERR_UPGRADE_NOT_DEFINED: &str = "Upgrade not defined.";
pub const ERR_LOG_TASK_LOST: &str = "log retrieval task terminated unexpectedly";

pub const HINT_INPUT_OWNER: &str = "repository owner (user or organization): ";
pub const HINT_INPUT_REPO: &str = "repository name: ";
pub const HINT_INPUT_GITHUB_TOKEN: &str =
    "create a token at https://github.com/settings/tokens (scope: actions:read)\ncopy to here:";

pub const GITHUB_LOGIN_RESULT: &str = "GitHub login success!";
pub const LOGIN_SUCCESS_BY_TOKEN: &str = "Authenticated with token.";
pub const LOGIN_SUCCESS_ANONYMOUS: &str = "Using anonymous access (public repositories only).";

pub const MSG_JOB_LOGS_URL: &str = "Job log download URL retrieved.";
pub const NOTE_FETCH_CONTENT: &str =
    "The URL is time-limited. Pass --content to fetch the log tail text directly.";
pub const MSG_JOB_LOG_TAIL: &str = "Retrieved last {} line(s) of {} total.";
pub const MSG_NO_FAILED_JOBS: &str = "No failed jobs found in this workflow run.";
pub const MSG_BATCH_DONE: &str = "Retrieved logs for {} failed job(s) of run {}.";

pub const RESOLVING_RUN_JOBS: &str = "Listing jobs of run {} (last check at {})...";
pub const BATCH_CAPTURED_ERRORS: &str =
    "{} job(s) failed during log retrieval. See their error entries above.";
pub const STAT_JOB_EXTRACT: &str =
    "job {}: scanned {} line(s) ({} bytes), kept {}, cost {}ms.";

pub const PARAM_OWNER: &str = "owner";
pub const PARAM_REPO: &str = "repo";
