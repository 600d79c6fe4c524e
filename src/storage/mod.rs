pub mod fetcher;
pub mod key_codec;
pub mod local;
pub mod memory;

pub use fetcher::{RecordFetcher, StoreRecord};
pub use key_codec::{decode_segment, encode, encode_key};
pub use local::LocalStore;
pub use memory::MemoryStore;

use crate::utils::errors::Result;
use std::fmt;

/// Read-only access to an ordered byte-keyed store.
pub trait KvStore {
    /// Point lookup of a fully encoded key. A missing key is `Ok(None)`.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>>;

    /// All entries whose key starts with `prefix`, in ascending key order.
    fn scan_prefix(&self, prefix: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>>;
}

/// Buckets written by the certificate authority.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    X509Certs,
    SshCerts,
    RevokedX509Certs,
    RevokedSshCerts,
    X509CertsData,
}

impl Bucket {
    pub fn as_str(&self) -> &'static str {
        match self {
            Bucket::X509Certs => "x509_certs",
            Bucket::SshCerts => "ssh_certs",
            Bucket::RevokedX509Certs => "revoked_x509_certs",
            Bucket::RevokedSshCerts => "revoked_ssh_certs",
            Bucket::X509CertsData => "x509_certs_data",
        }
    }
}

impl AsRef<[u8]> for Bucket {
    fn as_ref(&self) -> &[u8] {
        self.as_str().as_bytes()
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
