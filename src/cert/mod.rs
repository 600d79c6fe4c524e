pub mod correlate;
pub mod records;
pub mod serial;
pub mod ssh;
pub mod validity;
pub mod x509;

pub use correlate::{CorrelatedEntry, Correlator, SshEntry, X509Entry};
pub use records::{ProvisionerRecord, RevocationRecord};
pub use serial::SerialNumber;
pub use ssh::{SshCertType, SshRecord};
pub use validity::Validity;
pub use x509::{X509Parser, X509Record};
