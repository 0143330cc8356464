mod cli;
mod constant;
mod db;
mod default_config;
mod fetch;
mod gale_error;
mod interact;
mod pretty_log;
mod retrieve;
mod tail;
mod workflow;

use crate::cli::{cli_do_login, cli_do_logs};
use crate::constant::log::*;
use crate::db::{delete_db_file, get_db};
use crate::gale_error::GaleError;
use crate::pretty_log::{colored_println, ThemeColor};
use crate::retrieve::retrieve_params::LogParams;
use clap::{Parser, Subcommand};
use std::io::stdout;
use strum_macros::Display;

#[derive(Parser)]
#[command(name="GALE",
  author,
  version,
  about(env!("CARGO_PKG_DESCRIPTION")),
  long_about=None,
  arg_required_else_help=true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Display)]
enum Commands {
    /// Fetch the log tail of one job, or of every failed job of a run.
    Logs {
        /// job id or job URL.
        #[arg(short, long)]
        job: Option<String>,

        /// run id or run URL.
        #[arg(short = '#', long)]
        run: Option<String>,

        /// only the failed jobs of the run.
        #[arg(short, long)]
        failed_only: bool,

        #[command(flatten)]
        log_params: LogParams,
    },
    /// Login to GitHub to reach private repositories and raise rate limits.
    Login {
        /// Token from GitHub.
        /// You can get it at https://github.com/settings/tokens
        #[arg(short, long)]
        token: Option<String>,

        /// repository owner.
        #[arg(short, long)]
        owner: Option<String>,

        /// repository name.
        #[arg(short, long)]
        repo: Option<String>,
    },
    /// Clean cache.
    Clean,
    /// Show debug info.
    Debug,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Some(command) = cli.command {
        let command_name = command.to_string();
        show_welcome(Some(command_name.as_str()));

        match main_cli(command).await {
            Ok(_) => {}
            Err(err) => {
                err.colored_println(&mut stdout());
            }
        }

        show_finished(Some(command_name.as_str()));
    }
}

async fn main_cli(command: Commands) -> Result<(), GaleError> {
    let mut stdout = std::io::stdout();
    match command {
        Commands::Logs {
            job,
            run,
            failed_only,
            log_params,
        } => {
            // gale logs
            cli_do_logs(&mut stdout, job, run, failed_only, log_params).await?;
        }
        Commands::Login { token, owner, repo } => {
            // gale login
            let mut db = get_db(None);
            cli_do_login(&mut db, false, token, owner, repo).await?;
            colored_println(&mut stdout, ThemeColor::Success, GITHUB_LOGIN_RESULT);
        }
        Commands::Clean => {
            // gale clean
            delete_db_file(None);
        }
        Commands::Debug => {
            // gale debug
            println!("Debug info:");
            println!("GITHUB_API_URL: {:#?}", default_config::GITHUB_API_URL);
            println!("TAIL_LINES: {:#?}", default_config::TAIL_LINES);
            println!(
                "CONTENT_WINDOW_CEILING: {:#?}",
                default_config::CONTENT_WINDOW_CEILING
            );
            println!(
                "ENV_CONTENT_WINDOW_CEILING: {:#?}",
                default_config::ENV_CONTENT_WINDOW_CEILING
            );
            println!("JOBS_PER_PAGE: {:#?}", default_config::JOBS_PER_PAGE);
            println!(
                "RETRIEVE_CONCURRENCY_COUNT: {:#?}",
                default_config::RETRIEVE_CONCURRENCY_COUNT
            );
            println!(
                "JOB_LOG_TIMEOUT_SECS: {:#?}",
                default_config::JOB_LOG_TIMEOUT_SECS
            );
            println!(
                "DOWNLOAD_MAX_ATTEMPTS: {:#?}",
                default_config::DOWNLOAD_MAX_ATTEMPTS
            );
            println!(
                "DOWNLOAD_RETRY_BASE_DELAY_MS: {:#?}",
                default_config::DOWNLOAD_RETRY_BASE_DELAY_MS
            );
        }
    }

    Ok(())
}

fn show_welcome(title: Option<&str>) {
    let title = if let Some(t) = title {
        format!("| {}", t.to_uppercase())
    } else {
        String::new()
    };

    println!("≋≋≋ GALE {} ≋≋≋", title);
}

fn show_finished(title: Option<&str>) {
    let title = if let Some(t) = title {
        format!("| {}", t.to_uppercase())
    } else {
        String::new()
    };

    println!("≋≋≋ All Finished {} ≋≋≋", title);
}
