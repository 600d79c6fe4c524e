pub mod cert;
pub mod cli;
pub mod columns;
pub mod config;
pub mod export;
pub mod render;
pub mod storage;
pub mod utils;

pub use cert::{SshEntry, Validity, X509Entry};
pub use config::ExportConfig;
pub use export::{dump_bucket, export_ssh, export_x509};
pub use storage::{KvStore, LocalStore, MemoryStore};
pub use utils::errors::{Result, StepDbError};
