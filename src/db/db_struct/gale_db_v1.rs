use crate::db::db_struct::gale_db_v2::GaleDbV2;
use crate::db::db_struct::versioned_data::{UpgradeValue, VersionedData};
use crate::define_versioned_data_type;
use serde::{Deserialize, Serialize, Serializer};

pub const VERSION_GALE_DB_V1: u32 = 1;

define_versioned_data_type!(GaleDbV1, VERSION_GALE_DB_V1, {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>
    }
);

impl VersionedData for GaleDbV1 {
    fn parse_next_version(self: Box<Self>) -> UpgradeValue {
        let mut upg = GaleDbV2::default();
        upg.github_token = self.github_token;
        upg.owner = self.owner;
        upg.repo = self.repo;

        UpgradeValue::Upgraded(Box::new(upg))
    }
}
