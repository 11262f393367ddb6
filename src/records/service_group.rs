use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{collection, single, QosConfig, UuidRef};
use crate::error::Result;
use crate::session::VmStore;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceGroup {
    #[serde(default)]
    pub uuid: UuidRef,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub member_count: Option<u64>,
    #[serde(default)]
    pub qos_config: Option<QosConfig>,
}

impl ServiceGroup {
    pub fn from_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(single(value)?)?)
    }

    pub async fn get(session: &VmStore, service_group_uuid: &str) -> Result<Self> {
        Self::from_value(session.get_service_group(service_group_uuid).await?)
    }

    pub async fn list(session: &VmStore) -> Result<Vec<Self>> {
        let items = collection(session.get_service_groups().await?)?;
        items.into_iter().map(Self::from_value).collect()
    }
}
