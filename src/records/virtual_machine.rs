use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, info};

use super::{collection, UuidRef, VirtualDisk};
use crate::error::Result;
use crate::session::{Filter, VmStore};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QosConfig {
    #[serde(default)]
    pub type_id: String,
    #[serde(default)]
    pub min_normalized_iops: u64,
    #[serde(default)]
    pub max_normalized_iops: u64, // 0 means no upper limit
}

/// A virtual machine as reported by the VMstore.
///
/// Built from the JSON of the `vm` endpoints. QoS limits can be changed
/// locally and pushed back with [`VirtualMachine::update_qos`]; there is no
/// concurrency control, the last write wins.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VirtualMachine {
    pub type_id: String,
    pub uuid: String,
    pub name: String,
    pub vcenter: String,
    pub power_state: bool,
    pub is_template: bool,
    pub hypervisor: String,
    pub moref: Option<String>,
    pub storage_containers: Option<Vec<String>>,
    pub qos: Option<QosConfig>,
    pub virtual_disks: Option<Vec<VirtualDisk>>,
}

// wire shape of the vm payload
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct VmPayload {
    #[serde(default)]
    type_id: String,
    uuid: UuidRef,
    vmware: VmwarePayload,
    #[serde(default)]
    qos_config: Option<QosConfig>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct VmwarePayload {
    name: String,
    #[serde(default)]
    vcenter_name: String,
    #[serde(default)]
    is_powered: bool,
    #[serde(default)]
    is_template: bool,
    #[serde(default)]
    hypervisor_type: String,
    #[serde(default)]
    mor: Option<String>,
    #[serde(default)]
    storage_containers: Option<Vec<String>>,
}

impl From<VmPayload> for VirtualMachine {
    fn from(p: VmPayload) -> Self {
        VirtualMachine {
            type_id: p.type_id,
            uuid: p.uuid.uuid,
            name: p.vmware.name,
            vcenter: p.vmware.vcenter_name,
            power_state: p.vmware.is_powered,
            is_template: p.vmware.is_template,
            hypervisor: p.vmware.hypervisor_type,
            moref: p.vmware.mor,
            storage_containers: p.vmware.storage_containers,
            qos: p.qos_config,
            virtual_disks: None,
        }
    }
}

impl VirtualMachine {
    /// Builds a record from JSON fetched earlier, without any REST call.
    pub fn from_value(value: Value) -> Result<Self> {
        let payload: VmPayload = serde_json::from_value(value)?;
        Ok(payload.into())
    }

    /// Fetches the VM and its virtual disks.
    pub async fn from_uuid(session: &VmStore, vm_uuid: &str) -> Result<Self> {
        let virtual_disks = VirtualDisk::list_for_vm(session, vm_uuid).await?;
        let mut vm = Self::from_value(session.get_vm(vm_uuid).await?)?;
        vm.virtual_disks = Some(virtual_disks);
        Ok(vm)
    }

    /// Looks a VM up through the server-side `name` filter.
    ///
    /// Returns `None` unless the filter matches exactly one VM, so callers
    /// should be as specific as possible.
    pub async fn from_name(session: &VmStore, name: &str) -> Result<Option<Self>> {
        let filter = Filter::new().with("name", name);
        let mut items = collection(session.get_vms(&filter).await?)?;
        if items.len() != 1 {
            debug!("[VM] name filter {:?} matched {} VMs", name, items.len());
            return Ok(None);
        }
        let vm = Self::from_value(items.remove(0))?;
        Ok(Some(Self::from_value(session.get_vm(&vm.uuid).await?)?))
    }

    /// The `vm` items matching `filter`, exactly as the appliance returned them.
    pub async fn list_raw(session: &VmStore, filter: &Filter) -> Result<Vec<Value>> {
        collection(session.get_vms(filter).await?)
    }

    /// Lists VMs matching `filter`.
    pub async fn list(session: &VmStore, filter: &Filter) -> Result<Vec<Self>> {
        let items = Self::list_raw(session, filter).await?;
        items.into_iter().map(Self::from_value).collect()
    }

    /// Raw `vm` items whose `vmware.name` contains `pattern`.
    ///
    /// The server filters on `name`; the result is narrowed again locally so
    /// only substring matches come back. The local match is case-sensitive.
    pub async fn list_matching_raw(session: &VmStore, pattern: &str) -> Result<Vec<Value>> {
        let filter = Filter::new().with("name", pattern);
        let mut items = Self::list_raw(session, &filter).await?;
        items.retain(|item| {
            item["vmware"]["name"]
                .as_str()
                .is_some_and(|name| name.contains(pattern))
        });
        Ok(items)
    }

    /// Lists VMs whose name contains `pattern` (case-sensitive).
    pub async fn list_matching(session: &VmStore, pattern: &str) -> Result<Vec<Self>> {
        let items = Self::list_matching_raw(session, pattern).await?;
        items.into_iter().map(Self::from_value).collect()
    }

    /// Finds the VM named exactly `name` and loads it with its virtual disks.
    ///
    /// Lists every VM and compares names locally; the `name` query filter is
    /// not escaped, so names holding `+` or `%` would not survive it.
    pub async fn find_by_name(session: &VmStore, name: &str) -> Result<Option<Self>> {
        let vms = Self::list(session, &Filter::new()).await?;
        match vms.into_iter().find(|vm| vm.name == name) {
            Some(vm) => Ok(Some(Self::from_uuid(session, &vm.uuid).await?)),
            None => {
                debug!("[VM] no VM named {:?}", name);
                Ok(None)
            }
        }
    }

    pub fn qos_min_iops(&self) -> Option<u64> {
        self.qos.as_ref().map(|q| q.min_normalized_iops)
    }

    pub fn qos_max_iops(&self) -> Option<u64> {
        self.qos.as_ref().map(|q| q.max_normalized_iops)
    }

    /// Sets QoS limits locally. Nothing is sent until [`update_qos`](Self::update_qos).
    pub fn set_qos_limits(&mut self, min_iops: u64, max_iops: u64) {
        let qos = self.qos.get_or_insert_with(QosConfig::default);
        qos.min_normalized_iops = min_iops;
        qos.max_normalized_iops = max_iops;
    }

    /// The `MultipleSelectionRequest` that applies this VM's QoS limits.
    pub fn qos_payload(&self, api_version: &str) -> Value {
        json!({
            "typeId": format!("com.tintri.api.rest.{}.dto.MultipleSelectionRequest", api_version),
            "ids": [self.uuid],
            "newValue": {
                "typeId": format!(
                    "com.tintri.api.rest.{}.dto.domain.beans.vm.VirtualMachineQoSConfig",
                    api_version
                ),
                "minNormalizedIops": self.qos_min_iops().unwrap_or(0),
                "maxNormalizedIops": self.qos_max_iops().unwrap_or(0),
            },
            "propertyNames": ["minNormalizedIops", "maxNormalizedIops"],
        })
    }

    /// Pushes the locally held QoS limits to the appliance.
    pub async fn update_qos(&self, session: &VmStore) -> Result<Value> {
        info!(
            "[VM] Setting QoS on {} ({}): min {:?} max {:?}",
            self.name,
            self.uuid,
            self.qos_min_iops(),
            self.qos_max_iops()
        );
        let payload = self.qos_payload(session.api_version());
        session.set_qos(&payload).await
    }
}
