use anyhow::{bail, Result};
use clap::Parser;
use tracing::warn;

use vmstore::cli::{self, ConnectArgs};
use vmstore::records::VirtualMachine;

/// Sets the QoS limits of a virtual machine.
///
/// A --maxiops of 0 removes the upper limit.
#[derive(Parser)]
#[command(name = "set-qos")]
struct Args {
    #[command(flatten)]
    connect: ConnectArgs,

    /// VM to set the QoS values on
    #[arg(short = 'v', long)]
    vm: String,

    /// Minimum normalized IOPS for the virtual machine
    #[arg(long, default_value_t = 0)]
    miniops: u64,

    /// Maximum normalized IOPS for the virtual machine
    #[arg(long)]
    maxiops: u64,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    cli::init_tracing();
    let args = Args::parse();

    let session = args.connect.login().await?;

    let Some(mut vm) = VirtualMachine::find_by_name(&session, &args.vm).await? else {
        bail!("No virtual machine named {} found.", args.vm);
    };

    vm.set_qos_limits(args.miniops, args.maxiops);
    vm.update_qos(&session).await?;

    // read back what the appliance now reports
    let current = VirtualMachine::from_value(session.get_vm(&vm.uuid).await?)?;
    if current.qos_min_iops() != vm.qos_min_iops() || current.qos_max_iops() != vm.qos_max_iops() {
        warn!(
            "[SET-QOS] {} reports min {:?} max {:?} after the update",
            current.name,
            current.qos_min_iops(),
            current.qos_max_iops()
        );
    }

    println!("Virtual machine {} updated", vm.name);
    println!("Min IOPS now: {}", args.miniops);
    println!("Max IOPS now: {}", args.maxiops);

    if let Err(e) = session.logout().await {
        warn!("[SET-QOS] Logout failed: {}", e);
    }
    Ok(())
}
