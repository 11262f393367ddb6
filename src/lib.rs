//! Client library for the VMstore storage-appliance REST API.
//!
//! ```no_run
//! use vmstore::records::VirtualMachine;
//! use vmstore::session::{SessionConfig, VmStore};
//!
//! # async fn run() -> vmstore::Result<()> {
//! let session = VmStore::login(SessionConfig::new("10.25.36.10"), "admin", "secret!").await?;
//! for vm in VirtualMachine::list_matching(&session, "foo-").await? {
//!     println!("{} {:?}", vm.name, vm.qos_max_iops());
//! }
//! session.logout().await?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod error;
pub mod records;
pub mod report;
pub mod session;

pub use error::{Error, Result};
