use crate::constant::log::{LOGIN_SUCCESS_ANONYMOUS, LOGIN_SUCCESS_BY_TOKEN};
use crate::db::db_struct::db_status::DBStatus;
use crate::db::db_struct::version_only::VersionOnly;
use crate::db::db_struct::{parse_content_with_upgrade, LatestVersionData};
use crate::pretty_log::{colored_println, ThemeColor};
use crate::workflow::query::{try_get_github_async_client, GaleWorkflowClient};
use crate::workflow::WorkflowApiError;
use std::fs::File;
use std::io::{Stdout, Write};
use std::path::Path;

#[derive(Debug, Default)]
pub struct DbDataProxy {
    data: LatestVersionData,
}

impl From<LatestVersionData> for DbDataProxy {
    fn from(data: LatestVersionData) -> Self {
        Self { data }
    }
}

impl DbDataProxy {
    pub async fn try_get_workflow_client(
        &self,
        stdout: &mut Stdout,
        show_client_type: bool,
    ) -> Result<GaleWorkflowClient, WorkflowApiError> {
        let client = try_get_github_async_client(&None, self.get_github_token()).await;

        if show_client_type {
            if let Ok(ref client) = client {
                match client {
                    GaleWorkflowClient::TokenClient(_) => {
                        colored_println(stdout, ThemeColor::Second, LOGIN_SUCCESS_BY_TOKEN)
                    }
                    GaleWorkflowClient::AnonClient(_) => {
                        colored_println(stdout, ThemeColor::Second, LOGIN_SUCCESS_ANONYMOUS)
                    }
                }
            }
        }

        client
    }

    pub fn get_from_path(path: &Path) -> Option<Self> {
        match VersionOnly::get_state_from_path(path) {
            DBStatus::Exist(version) => {
                let content = std::fs::read_to_string(path).ok()?;
                parse_content_with_upgrade(version, &content)
                    .map(|d| d.into())
                    .ok()
            }
            DBStatus::NotExist => None,
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), String> {
        let str = toml::to_string(&self.data).map_err(|e| e.to_string())?;
        File::create(path)
            .map_err(|e| e.to_string())?
            .write_all(str.as_bytes())
            .map_err(|e| e.to_string())
    }

    //region getter & setter
    pub fn get_github_token(&self) -> &Option<String> {
        &self.data.github_token
    }

    pub fn set_github_token(&mut self, val: Option<String>) {
        self.data.github_token = val;
    }

    pub fn get_owner(&self) -> &Option<String> {
        &self.data.owner
    }

    pub fn set_owner(&mut self, val: Option<String>) {
        self.data.owner = val;
    }

    pub fn get_repo(&self) -> &Option<String> {
        &self.data.repo
    }

    pub fn set_repo(&mut self, val: Option<String>) {
        self.data.repo = val;
    }

    pub fn get_tail_lines(&self) -> &Option<usize> {
        &self.data.tail_lines
    }

    pub fn set_tail_lines(&mut self, val: Option<usize>) {
        self.data.tail_lines = val;
    }

    pub fn get_content_window_ceiling(&self) -> &Option<usize> {
        &self.data.content_window_ceiling
    }

    pub fn set_content_window_ceiling(&mut self, val: Option<usize>) {
        self.data.content_window_ceiling = val;
    }

    pub fn get_last_run_id(&self) -> &Option<u64> {
        &self.data.last_run_id
    }

    pub fn set_last_run_id(&mut self, val: Option<u64>) {
        self.data.last_run_id = val;
    }
    //endregion
}
