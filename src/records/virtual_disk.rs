use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{collection, UuidRef};
use crate::error::Result;
use crate::session::{Filter, VmStore};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualDisk {
    #[serde(default)]
    pub uuid: UuidRef,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub vm_uuid: Option<UuidRef>,
    #[serde(default)]
    pub vm_name: Option<String>,
    #[serde(default, rename = "spaceProvisionedGiB")]
    pub space_provisioned_gib: Option<f64>,
    #[serde(default, rename = "spaceUsedGiB")]
    pub space_used_gib: Option<f64>,
}

impl VirtualDisk {
    pub fn from_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Virtual disks attached to the VM with the given uuid.
    pub async fn list_for_vm(session: &VmStore, vm_uuid: &str) -> Result<Vec<Self>> {
        let filter = Filter::new().with("vmUuid", vm_uuid);
        let items = collection(session.get_virtual_disks(&filter).await?)?;
        items.into_iter().map(Self::from_value).collect()
    }
}
