use crate::constant::log::*;
use crate::constant::util::get_hidden_sensitive_string;
use crate::pretty_log::{colored_println, ThemeColor};
use crate::retrieve::RetrieveError;
use crate::workflow::WorkflowApiError;
use formatx::formatx;
use inquire::InquireError;
use std::fmt::Display;
use std::io::Stdout;
use std::ops::Add;

#[derive(Debug)]
pub enum GaleError {
    Custom(String),
    InquireError(InquireError),
    GithubLoginError {
        api_base: String,
        token: String,
        e: WorkflowApiError,
    },
    GithubClientInvalid,
    MissingParam(String),
    InvalidRunRef(String),
    InvalidJobRef(String),
    Retrieve(RetrieveError),
}

impl From<InquireError> for GaleError {
    fn from(value: InquireError) -> Self {
        GaleError::InquireError(value)
    }
}

impl From<RetrieveError> for GaleError {
    fn from(value: RetrieveError) -> Self {
        GaleError::Retrieve(value)
    }
}

impl Display for GaleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let str = match self {
            GaleError::Custom(msg) => msg.clone(),
            GaleError::InquireError(err) => err.to_string(),
            GaleError::GithubLoginError { api_base, token, e } => {
                let msg = formatx!(
                    ERR_GITHUB_CLIENT_INVALID_MAY_BE_TOKEN_INVALID,
                    api_base,
                    get_hidden_sensitive_string(
                        token,
                        crate::constant::util::SensitiveMode::Normal(4)
                    ),
                    e.to_string()
                )
                .unwrap_or_default();

                ERR_GITHUB_CLIENT_INVALID_SIMPLE
                    .to_string()
                    .add("\n")
                    .add(msg.as_str())
            }
            GaleError::GithubClientInvalid => ERR_GITHUB_CLIENT_INVALID.to_string(),
            GaleError::MissingParam(param) => formatx!(ERR_NEED_PARAM, param).unwrap_or_default(),
            GaleError::InvalidRunRef(value) => {
                formatx!(ERR_INVALID_RUN_REF, value).unwrap_or_default()
            }
            GaleError::InvalidJobRef(value) => {
                formatx!(ERR_INVALID_JOB_REF, value).unwrap_or_default()
            }
            GaleError::Retrieve(err) => err.to_string(),
        };
        write!(f, "{}", str)
    }
}

impl GaleError {
    pub fn colored_println(&self, stdout: &mut Stdout) {
        colored_println(stdout, ThemeColor::Error, self.to_string().as_str());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_error_redacts_token() {
        let err = GaleError::GithubLoginError {
            api_base: "https://api.github.com".to_string(),
            token: "ghp_16c7e42f1a".to_string(),
            e: WorkflowApiError::Api {
                status: 401,
                body: "Bad credentials".to_string(),
            },
        };

        let rendered = err.to_string();

        assert!(!rendered.contains("ghp_16c7e42f1a"));
        assert!(rendered.contains("gh**********1a"));
        assert!(rendered.contains("401"));
    }

    #[test]
    fn test_validation_error_passes_through() {
        let err = GaleError::from(RetrieveError::Validation(
            ERR_NEED_EXACTLY_ONE_TARGET.to_string(),
        ));

        assert_eq!(err.to_string(), ERR_NEED_EXACTLY_ONE_TARGET);
    }
}
