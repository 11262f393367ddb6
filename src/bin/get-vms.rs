use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use vmstore::cli::{self, ConnectArgs};
use vmstore::records::VirtualMachine;
use vmstore::report;
use vmstore::session::Filter;

/// Lists the virtual machines on a VMstore as a table, CSV or JSON
#[derive(Parser)]
#[command(name = "get-vms")]
struct Args {
    #[command(flatten)]
    connect: ConnectArgs,

    /// Display the VMstore UUID of each VM
    #[arg(long)]
    displayuuid: bool,

    /// Also write the report to this CSV file
    #[arg(long, value_name = "PATH")]
    csvout: Option<PathBuf>,

    /// Only return VMs whose name contains this string
    #[arg(long = "match", value_name = "TEXT")]
    pattern: Option<String>,

    /// Also write the raw VM items as JSON to this file
    #[arg(long, value_name = "PATH")]
    json: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    cli::init_tracing();
    let args = Args::parse();

    let session = args.connect.login().await?;

    let items = match &args.pattern {
        Some(pattern) => VirtualMachine::list_matching_raw(&session, pattern).await?,
        None => VirtualMachine::list_raw(&session, &Filter::new()).await?,
    };
    let vms = items
        .iter()
        .cloned()
        .map(VirtualMachine::from_value)
        .collect::<vmstore::Result<Vec<_>>>()?;
    info!("[GET-VMS] Retrieved {} virtual machines", vms.len());

    let table = report::virtual_machine_table(&vms, args.displayuuid);
    print!("{}", table);

    if let Some(path) = &args.csvout {
        report::write_csv_file(&table, path)
            .with_context(|| format!("could not write {}", path.display()))?;
    }
    if let Some(path) = &args.json {
        report::write_json_file(&items, path)
            .with_context(|| format!("could not write {}", path.display()))?;
    }

    if let Err(e) = session.logout().await {
        warn!("[GET-VMS] Logout failed: {}", e);
    }
    Ok(())
}
