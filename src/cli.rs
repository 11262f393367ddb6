//! Plumbing shared by the command-line tools: connection flags, credential
//! prompts and logging setup.

use std::time::Duration;

use anyhow::Context;
use clap::Args;
use dialoguer::{Input, Password};
use tracing_subscriber::EnvFilter;

use crate::session::{SessionConfig, VmStore};

#[derive(Debug, Clone, Args)]
pub struct ConnectArgs {
    /// VMstore IP or hostname
    #[arg(short = 's', long)]
    pub storage: String,

    /// Username to access the VMstore (prompted when omitted)
    #[arg(short = 'u', long)]
    pub username: Option<String>,

    /// Validate the VMstore TLS certificate
    #[arg(long)]
    pub ssl_verify: bool,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,
}

impl ConnectArgs {
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            device: self.storage.clone(),
            ssl_verify: self.ssl_verify,
            timeout: self.timeout.map(Duration::from_secs),
            ..Default::default()
        }
    }

    /// Prompts for whatever credentials are missing and logs in.
    pub async fn login(&self) -> anyhow::Result<VmStore> {
        let username = match &self.username {
            Some(u) => u.clone(),
            None => prompt_username()?,
        };
        let password = prompt_password()?;
        VmStore::login(self.session_config(), &username, &password)
            .await
            .with_context(|| format!("could not log into {}", self.storage))
    }
}

pub fn prompt_username() -> anyhow::Result<String> {
    let username = Input::<String>::new()
        .with_prompt("VMStore Username")
        .interact_text()?;
    Ok(username)
}

pub fn prompt_password() -> anyhow::Result<String> {
    let password = Password::new().with_prompt("VMStore Password").interact()?;
    Ok(password)
}

/// Logs go to stderr so tables and JSON on stdout stay pipeable.
/// `RUST_LOG` overrides the default `vmstore=warn`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("vmstore=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
