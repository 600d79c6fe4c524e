use crate::cert::SerialNumber;
use crate::utils::errors::{Result, StepDbError};
use chrono::{DateTime, Utc};
use colored::Color;
use serde::Serialize;
use ssh_key::certificate::CertType;
use ssh_key::Certificate;
use std::collections::BTreeMap;
use std::fmt;

/// Whether an SSH certificate authenticates a user or a host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SshCertType {
    User,
    Host,
}

impl SshCertType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SshCertType::User => "User",
            SshCertType::Host => "Host",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            SshCertType::User => Color::Cyan,
            SshCertType::Host => Color::Magenta,
        }
    }
}

impl From<CertType> for SshCertType {
    fn from(cert_type: CertType) -> Self {
        if cert_type.is_host() {
            SshCertType::Host
        } else {
            SshCertType::User
        }
    }
}

impl fmt::Display for SshCertType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Owned view of an issued OpenSSH certificate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SshRecord {
    pub serial: SerialNumber,
    #[serde(rename = "CertType")]
    pub cert_type: SshCertType,
    #[serde(rename = "KeyID")]
    pub key_id: String,
    pub valid_principals: Vec<String>,
    pub valid_after: DateTime<Utc>,
    pub valid_before: DateTime<Utc>,
    pub key_algorithm: String,
    pub critical_options: BTreeMap<String, String>,
    pub extensions: BTreeMap<String, String>,
}

impl SshRecord {
    /// Parse a stored value: the binary OpenSSH certificate blob.
    pub fn parse(value: &[u8]) -> Result<Self> {
        let cert = Certificate::from_bytes(value)
            .map_err(|e| StepDbError::CertParsing(format!("SSH certificate error: {e}")))?;

        Ok(Self {
            serial: SerialNumber::from(cert.serial()),
            cert_type: cert.cert_type().into(),
            key_id: cert.key_id().to_string(),
            valid_principals: cert.valid_principals().to_vec(),
            valid_after: unix_to_utc(cert.valid_after())?,
            valid_before: unix_to_utc(cert.valid_before())?,
            key_algorithm: cert.algorithm().as_str().to_string(),
            critical_options: cert.critical_options().0.clone(),
            extensions: cert.extensions().0.clone(),
        })
    }
}

/// OpenSSH uses u64::MAX for "forever"; clamp anything past chrono's range.
fn unix_to_utc(secs: u64) -> Result<DateTime<Utc>> {
    let secs = i64::try_from(secs).unwrap_or(i64::MAX);
    match DateTime::from_timestamp(secs, 0) {
        Some(time) => Ok(time),
        None if secs > 0 => Ok(DateTime::<Utc>::MAX_UTC),
        None => Err(StepDbError::CertParsing(format!(
            "timestamp out of range: {secs}"
        ))),
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::certificate_blob;
    use super::*;

    #[test]
    fn test_parse_user_certificate() {
        let blob = certificate_blob(42, CertType::User, 0, 1000);
        let record = SshRecord::parse(&blob).unwrap();

        assert_eq!(record.serial.as_decimal(), "42");
        assert_eq!(record.cert_type, SshCertType::User);
        assert_eq!(record.key_id, "key-42");
        assert_eq!(record.valid_principals, vec!["alice", "bob"]);
        assert_eq!(record.valid_after.timestamp(), 0);
        assert_eq!(record.valid_before.timestamp(), 1000);
        assert_eq!(record.key_algorithm, "ssh-ed25519");
        assert!(record.extensions.contains_key("permit-pty"));
        assert!(record.critical_options.is_empty());
    }

    #[test]
    fn test_parse_host_certificate() {
        let blob = certificate_blob(3, CertType::Host, 10, 20);
        let record = SshRecord::parse(&blob).unwrap();
        assert_eq!(record.cert_type, SshCertType::Host);
        assert_eq!(record.cert_type.to_string(), "Host");
    }

    #[test]
    fn test_rejects_malformed_blob() {
        let blob = certificate_blob(1, CertType::User, 0, 1000);
        assert!(matches!(
            SshRecord::parse(&blob[..blob.len() / 2]),
            Err(StepDbError::CertParsing(_))
        ));
        assert!(SshRecord::parse(b"ssh-ed25519 AAAA").is_err());
    }

    #[test]
    fn test_forever_is_clamped() {
        assert_eq!(unix_to_utc(u64::MAX).unwrap(), DateTime::<Utc>::MAX_UTC);
        assert_eq!(unix_to_utc(5).unwrap().timestamp(), 5);
    }
}
