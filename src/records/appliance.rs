use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{single, UuidRef};
use crate::error::Result;
use crate::session::VmStore;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplianceDisk {
    #[serde(default)]
    pub locator: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub disk_type: String,
}

/// Hardware view of an appliance: its disks and their health.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Appliance {
    #[serde(default)]
    pub uuid: Option<UuidRef>,
    #[serde(default)]
    pub disks: Vec<ApplianceDisk>,
}

impl Appliance {
    pub fn from_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(single(value)?)?)
    }

    pub async fn get(session: &VmStore, appliance_uuid: &str) -> Result<Self> {
        Self::from_value(session.get_appliance(appliance_uuid).await?)
    }
}
