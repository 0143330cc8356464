use crate::constant::log::*;
use inquire::error::InquireResult;
use inquire::validator::{ErrorMessage, Validation};
use inquire::{Password, PasswordDisplayMode, Text};

//region parse directly
/// # parse without input
///
/// parse an existed value from the command line argument or the memory.
///
/// ### Arguments
///
/// * `param_val`: The value from the command line argument. If defined, return this value directly (priority in order of definition).
/// * `db_val`: The value from the memory. If defined, return this value directly (priority in order of definition).
pub fn parse_without_input<T>(param_val: Option<T>, db_val: Option<&T>) -> Option<T>
where
    T: Clone,
{
    param_val.or_else(|| db_val.cloned())
}

/// # parse without input with default
///
/// parse an existed value from the command line argument or the memory. if not exist, return the default value.
pub fn parse_without_input_with_default<T, D>(
    param_val: Option<T>,
    db_val: Option<&T>,
    default: D,
) -> T
where
    T: Clone,
    D: Into<T>,
{
    parse_without_input(param_val, db_val).unwrap_or_else(|| default.into())
}
//endregion

//region inquire::Text

fn prompt_input_with_parse_validator<T>(
    input: Text,
    not_empty: bool,
    err_msg: &str,
) -> InquireResult<String>
where
    T: std::str::FromStr,
{
    let err_msg = err_msg.to_string();
    input
        .with_validator(move |v: &str| {
            if not_empty && v.is_empty() {
                return Ok(Validation::Invalid(ErrorMessage::Custom(
                    ERR_INPUT_INVALID.to_string(),
                )));
            }

            if v.parse::<T>().is_ok() {
                Ok(Validation::Valid)
            } else {
                Ok(Validation::Invalid(ErrorMessage::Custom(err_msg.clone())))
            }
        })
        .prompt()
}

/// # input directly
///
/// Input a value directly.
///
/// ### Arguments
///
/// * `param_val`: The value from the command line argument. If defined, return this value directly (priority in order of definition).
/// * `db_val`: The value from the memory. If db_val_directly_usable and defined, return this value directly (priority in order of definition).
/// * `db_val_directly_usable`: Whether the value from the memory can be used directly.
/// * `not_empty`: The input should not be empty.
/// * `hint`: The hint for the selection.
/// * `err_hint`: The hint for error occurs.
pub fn input_directly<T>(
    param_val: Option<T>,
    db_val: Option<&T>,
    db_val_directly_usable: bool,
    not_empty: bool,
    hint: &str,
    err_hint: Option<&str>,
) -> InquireResult<T>
where
    T: Clone + ToString + std::str::FromStr,
{
    if let Some(val) = param_val {
        return Ok(val);
    }

    if let (true, Some(val)) = (db_val_directly_usable, db_val) {
        return Ok(val.clone());
    }

    let mut input = Text::from(hint);

    let opt_default = db_val.cloned().map(|db_val| db_val.to_string());
    if let Some(ref default) = opt_default {
        input = input.with_default(default.as_ref());
    }

    prompt_input_with_parse_validator::<String>(
        input,
        not_empty,
        err_hint.unwrap_or(ERR_INPUT_INVALID),
    )
    .and_then(|str| {
        str.parse::<T>()
            .map_err(|_| inquire::InquireError::Custom(Box::from(ERR_INPUT_INVALID.to_string())))
    })
}

//endregion

/// # input token
///
/// Input a secret token, masked while typing.
///
/// ### Arguments
///
/// * `param_val`: The value from the command line argument. If defined, return this value directly (priority in order of definition).
/// * `hint`: The hint for the selection.
/// * `err_hint`: The hint for error occurs.
pub fn input_token(
    param_val: Option<String>,
    hint: &str,
    err_hint: Option<&str>,
) -> InquireResult<String> {
    if let Some(val) = param_val {
        return Ok(val);
    }

    let input = Password::from(hint);

    let err_msg = err_hint.unwrap_or(ERR_INPUT_INVALID).to_string();
    input
        .without_confirmation()
        .with_display_mode(PasswordDisplayMode::Masked)
        .with_validator(move |v: &str| {
            if !v.is_empty() {
                Ok(Validation::Valid)
            } else {
                Ok(Validation::Invalid(ErrorMessage::Custom(err_msg.clone())))
            }
        })
        .prompt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_without_input_priority() {
        assert_eq!(
            parse_without_input(Some("arg"), Some(&"saved")),
            Some("arg")
        );
        assert_eq!(parse_without_input(None, Some(&"saved")), Some("saved"));
        assert_eq!(parse_without_input::<&str>(None, None), None);
    }

    #[test]
    fn test_parse_without_input_with_default() {
        assert_eq!(
            parse_without_input_with_default(None::<String>, None, "fallback"),
            "fallback".to_string()
        );
        assert_eq!(
            parse_without_input_with_default(Some(7usize), Some(&3), 42usize),
            7
        );
    }
}
