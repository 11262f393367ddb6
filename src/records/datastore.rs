use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{collection, single, UuidRef};
use crate::error::Result;
use crate::session::VmStore;

/// Capacity and performance snapshot of a datastore. Fully refetched on
/// every call, never updated in place.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Datastore {
    pub uuid: String,
    pub space_used_gib: f64,
    pub total_space_gib: f64,
    pub space_used_physical_gib: f64,
    pub space_remaining_physical_gib: f64,
    pub performance_reserve_used: f64,
    pub performance_reserve_remaining: f64,
    pub flash_hit_percentage: f64,
    pub storage_containers: Vec<Value>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DatastorePayload {
    uuid: UuidRef,
    stat: StatPayload,
    #[serde(default)]
    storage_containers: Vec<Value>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatPayload {
    #[serde(rename = "spaceUsedGiB")]
    space_used_gib: f64,
    #[serde(rename = "spaceTotalGiB")]
    space_total_gib: f64,
    #[serde(default, rename = "spaceUsedPhysicalGiB")]
    space_used_physical_gib: f64,
    #[serde(default, rename = "spaceRemainingPhysicalGiB")]
    space_remaining_physical_gib: f64,
    #[serde(default)]
    performance_reserve_used: f64,
    #[serde(default)]
    performance_reserve_remaining: f64,
    #[serde(default)]
    flash_hit_percent: f64,
}

impl Datastore {
    pub fn from_value(value: Value) -> Result<Self> {
        let p: DatastorePayload = serde_json::from_value(single(value)?)?;
        Ok(Datastore {
            uuid: p.uuid.uuid,
            space_used_gib: p.stat.space_used_gib,
            total_space_gib: p.stat.space_total_gib,
            space_used_physical_gib: p.stat.space_used_physical_gib,
            space_remaining_physical_gib: p.stat.space_remaining_physical_gib,
            performance_reserve_used: p.stat.performance_reserve_used,
            performance_reserve_remaining: p.stat.performance_reserve_remaining,
            flash_hit_percentage: p.stat.flash_hit_percent,
            storage_containers: p.storage_containers,
        })
    }

    /// Fetches a datastore; `"default"` names the appliance's only one.
    pub async fn get(session: &VmStore, datastore_uuid: &str) -> Result<Self> {
        Self::from_value(session.get_datastore(datastore_uuid).await?)
    }

    pub async fn list(session: &VmStore) -> Result<Vec<Self>> {
        let items = collection(session.get_datastores().await?)?;
        items.into_iter().map(Self::from_value).collect()
    }

    pub async fn realtime_performance(&self, session: &VmStore) -> Result<Value> {
        session.get_realtime_datastore_performance(&self.uuid).await
    }

    pub fn space_used_percentage(&self) -> f64 {
        if self.total_space_gib == 0.0 {
            return 0.0;
        }
        (self.space_used_gib / self.total_space_gib) * 100.0
    }

    pub fn space_free_percentage(&self) -> f64 {
        100.0 - self.space_used_percentage()
    }
}
