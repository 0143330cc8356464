use crate::db::db_struct::gale_db_v1::GaleDbV1;
use crate::db::db_struct::gale_db_v2::{GaleDbV2, VERSION_GALE_DB_V2};
use crate::db::db_struct::versioned_data::{UpgradeValue, VersionedData};

pub mod gale_db_v1;
pub mod versioned_data;

pub(crate) mod db_status;
mod define_versioned_data_type;
pub(crate) mod gale_db_v2;
pub(crate) mod version_only;

pub type LatestVersionData = GaleDbV2;

/// # parse content with upgrade
///
/// parse & upgrade the versioned data to latest.
pub fn parse_content_with_upgrade(
    curr_version: u32,
    content: &str,
) -> Result<LatestVersionData, toml::de::Error> {
    let mut db: Box<dyn VersionedData> = parse_content_by_version(curr_version, content)?;
    loop {
        let upgrade_value = db.parse_next_version();
        match upgrade_value {
            UpgradeValue::Latest(latest) => return Ok(latest),
            UpgradeValue::Upgraded(d) => db = d,
            UpgradeValue::Invalid => {
                return Err(serde::de::Error::custom(
                    crate::constant::log::ERR_UPGRADE_NOT_DEFINED,
                ));
            }
        }
    }
}

/// # parse content by version
///
/// get VersionedData from str by version.
fn parse_content_by_version(
    version: u32,
    content: &str,
) -> Result<Box<dyn VersionedData>, toml::de::Error> {
    match version {
        VERSION_GALE_DB_V2 => {
            GaleDbV2::parse_from_string(content).map(|v| Box::new(v) as Box<dyn VersionedData>)
        }
        _ => GaleDbV1::parse_from_string(content).map(|v| Box::new(v) as Box<dyn VersionedData>),
    }
}
