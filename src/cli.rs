use crate::constant::log::*;
use crate::db::db_data_proxy::DbDataProxy;
use crate::db::{get_db, save_with_error_log};
use crate::default_config;
use crate::gale_error::GaleError;
use crate::interact::{input_directly, input_token, parse_without_input_with_default};
use crate::pretty_log::{clean_one_line, colored_println, ThemeColor};
use crate::retrieve::log_result::LogRetrieval;
use crate::retrieve::retrieve_params::{parse_job_ref, parse_run_ref, LogParams, ParsedRef};
use crate::retrieve::{retrieve_job_logs, ExtractHook, ExtractStats, RetrieveOptions};
use crate::workflow::query::{try_get_github_async_client, GaleWorkflowClient};
use crate::workflow::RepoRef;
use chrono::Local;
use formatx::formatx;
use std::io::Stdout;
use std::sync::Arc;

/// # cli do logs
///
/// Fetch the log tail of one job, or of every failed job of a run.
///
/// Contains console output.
pub async fn cli_do_logs(
    stdout: &mut Stdout,
    job: Option<String>,
    run: Option<String>,
    failed_only: bool,
    params: LogParams,
) -> Result<(), GaleError> {
    let mut db = get_db(None);

    let parsed_job = match job {
        Some(value) => {
            Some(parse_job_ref(&value).ok_or(GaleError::InvalidJobRef(value))?)
        }
        None => None,
    };
    let parsed_run = match run {
        Some(value) => {
            Some(parse_run_ref(&value).ok_or(GaleError::InvalidRunRef(value))?)
        }
        None => None,
    };

    let repo_ref = resolve_repo(&mut db, &parsed_job, &parsed_run, &params)?;

    let tail_lines = parse_without_input_with_default(
        params.tail,
        db.get_tail_lines().as_ref(),
        default_config::TAIL_LINES,
    );
    db.set_tail_lines(Some(tail_lines));

    if let Some(run_ref) = &parsed_run {
        db.set_last_run_id(Some(run_ref.id));
    }
    save_with_error_log(&db, None);

    let client = db
        .try_get_workflow_client(stdout, true)
        .await
        .map_err(|_| GaleError::GithubClientInvalid)?;

    let extract_hook: ExtractHook = Arc::new(|stats: &ExtractStats| {
        println!(
            "{}",
            formatx!(
                STAT_JOB_EXTRACT,
                stats.job_id,
                stats.total_lines,
                stats.bytes_read,
                stats.kept_lines,
                stats.cost
            )
            .unwrap_or_default()
        );
    });

    let opts = RetrieveOptions {
        return_content: params.content,
        tail_lines,
        content_window_ceiling: resolve_content_window_ceiling(&db),
        extract_hook: Some(extract_hook),
        ..Default::default()
    };

    let show_progress = parsed_run.is_some();
    if let Some(run_ref) = &parsed_run {
        colored_println(
            stdout,
            ThemeColor::Warn,
            &formatx!(
                RESOLVING_RUN_JOBS,
                run_ref.id,
                Local::now().format("%Y-%m-%d %H:%M:%S")
            )
            .unwrap_or_default(),
        );
    }

    let retrieval = retrieve_job_logs(
        Arc::new(client),
        &repo_ref,
        parsed_job.map(|p| p.id),
        parsed_run.map(|p| p.id),
        failed_only,
        &opts,
    )
    .await?;

    if show_progress {
        clean_one_line(stdout);
    }

    let rendered =
        serde_json::to_string_pretty(&retrieval).map_err(|e| GaleError::Custom(e.to_string()))?;
    colored_println(stdout, ThemeColor::Main, &rendered);

    if let LogRetrieval::Batch(batch) = &retrieval {
        let captured_errors = batch.logs.iter().filter(|l| !l.is_success()).count();
        if captured_errors > 0 {
            colored_println(
                stdout,
                ThemeColor::Warn,
                &formatx!(BATCH_CAPTURED_ERRORS, captured_errors).unwrap_or_default(),
            );
        }
    }

    Ok(())
}

/// URL-style references carry the repository; otherwise fall back to cli
/// params, remembered values, and finally prompting.
fn resolve_repo(
    db: &mut DbDataProxy,
    parsed_job: &Option<ParsedRef>,
    parsed_run: &Option<ParsedRef>,
    params: &LogParams,
) -> Result<RepoRef, GaleError> {
    let url_repo = parsed_job
        .as_ref()
        .and_then(|p| p.repo.clone())
        .or_else(|| parsed_run.as_ref().and_then(|p| p.repo.clone()));

    let repo_ref = if let Some(repo_ref) = url_repo {
        repo_ref
    } else {
        let owner = input_directly(
            params.owner.clone(),
            db.get_owner().as_ref(),
            true,
            true,
            HINT_INPUT_OWNER,
            Some(ERR_NEED_AN_OWNER),
        )
        .map_err(|_| GaleError::MissingParam(PARAM_OWNER.to_string()))?;

        let name = input_directly(
            params.repo.clone(),
            db.get_repo().as_ref(),
            true,
            true,
            HINT_INPUT_REPO,
            Some(ERR_NEED_A_REPO),
        )
        .map_err(|_| GaleError::MissingParam(PARAM_REPO.to_string()))?;

        RepoRef::new(owner, name)
    };

    db.set_owner(Some(repo_ref.owner.clone()));
    db.set_repo(Some(repo_ref.name.clone()));

    Ok(repo_ref)
}

fn resolve_content_window_ceiling(db: &DbDataProxy) -> usize {
    std::env::var(default_config::ENV_CONTENT_WINDOW_CEILING)
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .or(*db.get_content_window_ceiling())
        .unwrap_or(default_config::CONTENT_WINDOW_CEILING)
}

/// # cli do login
///
/// Login to GitHub and remember the default repository.
///
/// Contains Inquire(input requests) and console output.
///
/// ### Arguments
///
/// * `db`: db file.
/// * `simplified`: When simplifying, only re-enter the token.
/// * `token`: GitHub token from cli param.
/// * `owner`: repository owner from cli param.
/// * `repo`: repository name from cli param.
pub async fn cli_do_login(
    db: &mut DbDataProxy,
    simplified: bool,
    token: Option<String>,
    owner: Option<String>,
    repo: Option<String>,
) -> Result<GaleWorkflowClient, GaleError> {
    db.set_owner(Some(
        input_directly(
            owner,
            db.get_owner().as_ref(),
            simplified,
            true,
            HINT_INPUT_OWNER,
            Some(ERR_NEED_AN_OWNER),
        )
        .map_err(|_| GaleError::MissingParam(PARAM_OWNER.to_string()))?,
    ));

    db.set_repo(Some(
        input_directly(
            repo,
            db.get_repo().as_ref(),
            simplified,
            true,
            HINT_INPUT_REPO,
            Some(ERR_NEED_A_REPO),
        )
        .map_err(|_| GaleError::MissingParam(PARAM_REPO.to_string()))?,
    ));

    save_with_error_log(db, None);

    db.set_github_token(Some(input_token(
        token,
        HINT_INPUT_GITHUB_TOKEN,
        Some(ERR_NEED_A_GITHUB_TOKEN),
    )?));

    let client = try_get_github_async_client(&None, db.get_github_token()).await;

    match client {
        Ok(client) => {
            save_with_error_log(db, None);
            Ok(client)
        }
        Err(e) => Err(GaleError::GithubLoginError {
            api_base: default_config::GITHUB_API_URL.to_string(),
            token: db.get_github_token().clone().unwrap_or_default(),
            e,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ceiling_falls_back_to_db_then_default() {
        // The env override is covered manually; tests stay env-free to
        // avoid cross-test interference.
        let mut db = DbDataProxy::default();
        assert_eq!(
            resolve_content_window_ceiling(&db),
            default_config::CONTENT_WINDOW_CEILING
        );

        db.set_content_window_ceiling(Some(120));
        assert_eq!(resolve_content_window_ceiling(&db), 120);
    }
}
