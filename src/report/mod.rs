mod export;
mod table;

pub use export::{print_json, write_csv, write_csv_file, write_json, write_json_file};
pub use table::{Align, Table};

use crate::records::{Appliance, VirtualMachine};

fn or_dash(v: Option<u64>) -> String {
    v.map(|n| n.to_string()).unwrap_or_else(|| "-".to_string())
}

/// VM inventory table. The UUID column is only included when asked for.
pub fn virtual_machine_table(vms: &[VirtualMachine], display_uuid: bool) -> Table {
    let headers: &[&str] = if display_uuid {
        &["Name", "UUID", "vCenter", "Power", "QoS Min", "QoS Max"]
    } else {
        &["Name", "vCenter", "Power", "QoS Min", "QoS Max"]
    };
    let mut table = Table::new(headers).align("Name", Align::Left);

    for vm in vms {
        let mut row = vec![vm.name.clone()];
        if display_uuid {
            row.push(vm.uuid.clone());
        }
        row.push(vm.vcenter.clone());
        row.push(vm.power_state.to_string());
        row.push(or_dash(vm.qos_min_iops()));
        row.push(or_dash(vm.qos_max_iops()));
        table.add_row(row);
    }
    table
}

pub fn appliance_disk_table(appliance: &Appliance) -> Table {
    let mut table =
        Table::new(&["locator", "status", "state", "diskType"]).align("locator", Align::Left);
    for disk in &appliance.disks {
        table.add_row([&disk.locator, &disk.status, &disk.state, &disk.disk_type]);
    }
    table
}
