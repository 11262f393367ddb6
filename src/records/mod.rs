//! Lightweight mirrors of the JSON payloads returned by the VMstore.
//!
//! Records are built from `serde_json::Value`s, either freshly fetched
//! through a [`VmStore`](crate::session::VmStore) or taken from a response
//! fetched earlier.

mod appliance;
mod datastore;
mod service_group;
mod virtual_disk;
mod virtual_machine;

pub use appliance::{Appliance, ApplianceDisk};
pub use datastore::Datastore;
pub use service_group::ServiceGroup;
pub use virtual_disk::VirtualDisk;
pub use virtual_machine::{QosConfig, VirtualMachine};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// The `{"uuid": "..."}` wrapper the API uses for identifiers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UuidRef {
    pub uuid: String,
}

/// Envelope returned by collection endpoints such as `vm`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(default)]
    pub filtered_total: u64,
    #[serde(default)]
    pub absolute_total: u64,
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

/// Items of a collection response, accepting either a bare array or a page.
pub fn collection(value: Value) -> Result<Vec<Value>> {
    match value {
        Value::Array(items) => Ok(items),
        Value::Null => Ok(Vec::new()),
        obj @ Value::Object(_) => {
            let page: Page<Value> = serde_json::from_value(obj)?;
            Ok(page.items)
        }
        other => Err(Error::Decode(format!(
            "expected a collection, got {}",
            other
        ))),
    }
}

// some single-resource endpoints answer with a one-element array
fn single(value: Value) -> Result<Value> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .next()
            .ok_or_else(|| Error::Decode("empty response".to_string())),
        obj @ Value::Object(_) => Ok(obj),
        other => Err(Error::Decode(format!("expected an object, got {}", other))),
    }
}
