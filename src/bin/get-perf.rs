use anyhow::Result;
use clap::Parser;
use tracing::warn;

use vmstore::cli::{self, ConnectArgs};
use vmstore::report;

/// Dumps realtime datastore performance as JSON
#[derive(Parser)]
#[command(name = "get-perf")]
struct Args {
    #[command(flatten)]
    connect: ConnectArgs,

    /// Datastore to query
    #[arg(long, default_value = "default")]
    datastore: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    cli::init_tracing();
    let args = Args::parse();

    let session = args.connect.login().await?;
    let output = session
        .get_realtime_datastore_performance(&args.datastore)
        .await?;
    report::print_json(&output)?;

    if let Err(e) = session.logout().await {
        warn!("[GET-PERF] Logout failed: {}", e);
    }
    Ok(())
}
