use anyhow::Result;
use clap::Parser;
use tracing::warn;

use vmstore::cli::{self, ConnectArgs};
use vmstore::records::Appliance;
use vmstore::report;

/// Shows the disks of a VMstore appliance and their health
#[derive(Parser)]
#[command(name = "get-appliance")]
struct Args {
    #[command(flatten)]
    connect: ConnectArgs,

    /// Appliance to query
    #[arg(long, default_value = "default")]
    appliance: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    cli::init_tracing();
    let args = Args::parse();

    let session = args.connect.login().await?;
    let appliance = Appliance::get(&session, &args.appliance).await?;
    print!("{}", report::appliance_disk_table(&appliance));

    if let Err(e) = session.logout().await {
        warn!("[GET-APPLIANCE] Logout failed: {}", e);
    }
    Ok(())
}
