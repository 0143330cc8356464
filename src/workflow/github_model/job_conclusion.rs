use serde::Deserialize;

#[derive(Deserialize, Clone, Copy, Debug, PartialEq)]
pub enum JobConclusion {
    #[serde(rename = "success")]
    Success,
    #[serde(rename = "failure")]
    Failure,
    #[serde(other)]
    Other,
}
