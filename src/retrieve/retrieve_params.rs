use crate::workflow::RepoRef;
use clap::Args;
use regex::Regex;

#[derive(Args)]
pub struct LogParams {
    /// fetch and return the log tail text instead of the download URL.
    #[arg(short = 'c', long)]
    pub content: bool,

    /// number of lines to keep from the end of the log.
    #[arg(short, long)]
    pub tail: Option<usize>,

    /// repository owner.
    #[arg(short, long)]
    pub owner: Option<String>,

    /// repository name.
    #[arg(short, long)]
    pub repo: Option<String>,
}

/// A run or job reference resolved from user input. URL forms carry the
/// repository too.
#[derive(Debug, PartialEq)]
pub struct ParsedRef {
    pub repo: Option<RepoRef>,
    pub id: u64,
}

const REG_STR_RUN_URL: &str = r"^https?://github\.com/([^/]+)/([^/]+)/actions/runs/(\d+)";
const REG_STR_JOB_URL: &str =
    r"^https?://github\.com/([^/]+)/([^/]+)/(?:actions/runs/\d+/job|runs)/(\d+)";

/// # parse run ref
///
/// Accepts a plain run id (`17236923401`) or a run URL
/// (`https://github.com/OWNER/REPO/actions/runs/17236923401`).
pub fn parse_run_ref(value: &str) -> Option<ParsedRef> {
    parse_ref(value, REG_STR_RUN_URL)
}

/// # parse job ref
///
/// Accepts a plain job id, a job URL
/// (`https://github.com/OWNER/REPO/actions/runs/RUN/job/JOB`) or the check
/// run form (`https://github.com/OWNER/REPO/runs/JOB`).
pub fn parse_job_ref(value: &str) -> Option<ParsedRef> {
    parse_ref(value, REG_STR_JOB_URL)
}

fn parse_ref(value: &str, url_pattern: &str) -> Option<ParsedRef> {
    let value = value.trim();

    if let Ok(id) = value.parse::<u64>() {
        return Some(ParsedRef { repo: None, id });
    }

    Regex::new(url_pattern).ok().and_then(|re| {
        re.captures(value).and_then(|caps| {
            let id = caps.get(3)?.as_str().parse::<u64>().ok()?;
            Some(ParsedRef {
                repo: Some(RepoRef::new(
                    caps.get(1)?.as_str(),
                    caps.get(2)?.as_str(),
                )),
                id,
            })
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_id() {
        assert_eq!(
            parse_run_ref(" 17236923401 "),
            Some(ParsedRef {
                repo: None,
                id: 17236923401
            })
        );
    }

    #[test]
    fn test_parse_run_url() {
        let parsed = parse_run_ref("https://github.com/octo/hello/actions/runs/29679449").unwrap();

        assert_eq!(parsed.repo, Some(RepoRef::new("octo", "hello")));
        assert_eq!(parsed.id, 29679449);
    }

    #[test]
    fn test_parse_job_url_forms() {
        let from_run = parse_job_ref(
            "https://github.com/octo/hello/actions/runs/29679449/job/399444496",
        )
        .unwrap();
        assert_eq!(from_run.repo, Some(RepoRef::new("octo", "hello")));
        assert_eq!(from_run.id, 399444496);

        let from_check = parse_job_ref("https://github.com/octo/hello/runs/399444496").unwrap();
        assert_eq!(from_check.id, 399444496);
    }

    #[test]
    fn test_reject_garbage() {
        assert_eq!(parse_run_ref("not-a-ref"), None);
        assert_eq!(parse_run_ref("https://github.com/octo/hello/pull/12"), None);
        assert_eq!(parse_job_ref(""), None);
    }
}
