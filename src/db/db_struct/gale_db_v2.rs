use crate::db::db_struct::versioned_data::{UpgradeValue, VersionedData};
use crate::define_versioned_data_type;
use serde::{Deserialize, Serialize, Serializer};

pub const VERSION_GALE_DB_V2: u32 = 2;

define_versioned_data_type!(GaleDbV2, VERSION_GALE_DB_V2, {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tail_lines: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_window_ceiling: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_run_id: Option<u64>
    }
);

impl VersionedData for GaleDbV2 {
    fn parse_next_version(self: Box<Self>) -> UpgradeValue {
        UpgradeValue::Latest(*self)
    }
}
