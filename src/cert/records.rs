use crate::utils::errors::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Revocation metadata stored by the CA under the certificate's serial.
///
/// A lookup miss yields the default value, which reads as "not revoked".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevocationRecord {
    #[serde(rename = "ProvisionerID")]
    pub provisioner_id: String,
    #[serde(rename = "ReasonCode")]
    pub reason_code: i32,
    #[serde(rename = "Reason")]
    pub reason: String,
    #[serde(rename = "RevokedAt")]
    pub revoked_at: DateTime<Utc>,
    #[serde(rename = "ExpiresAt")]
    pub expires_at: DateTime<Utc>,
    #[serde(rename = "TokenID")]
    pub token_id: String,
    #[serde(rename = "MTLS")]
    pub mtls: bool,
    #[serde(rename = "ACME")]
    pub acme: bool,
}

impl RevocationRecord {
    /// Decode a stored value; blank values are the empty record.
    pub fn from_slice(value: &[u8]) -> Result<Self> {
        if value.trim_ascii().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_slice(value)?)
    }

    /// Whether a revocation was actually recorded.
    pub fn is_present(&self) -> bool {
        !self.provisioner_id.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        !self.is_present()
    }

    /// Revocation time, only when a revocation is present.
    pub fn revoked_at(&self) -> Option<DateTime<Utc>> {
        self.is_present().then_some(self.revoked_at)
    }
}

/// Provisioner that issued an X.509 certificate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvisionerRecord {
    #[serde(rename(serialize = "ID"), alias = "ID")]
    pub id: String,
    #[serde(rename(serialize = "Name"), alias = "Name")]
    pub name: String,
    #[serde(rename(serialize = "Type"), alias = "Type")]
    pub r#type: String,
}

/// Layout of a value in the certificate data bucket.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CertificateData {
    #[serde(alias = "Provisioner")]
    provisioner: Option<ProvisionerRecord>,
}

impl ProvisionerRecord {
    /// Decode a stored certificate data value; blank values are the empty record.
    pub fn from_slice(value: &[u8]) -> Result<Self> {
        if value.trim_ascii().is_empty() {
            return Ok(Self::default());
        }
        let data: CertificateData = serde_json::from_slice(value)?;
        Ok(data.provisioner.unwrap_or_default())
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_empty() && self.name.is_empty() && self.r#type.is_empty()
    }

    /// `name (type)`, or just the name when the type is unknown.
    pub fn display_name(&self) -> String {
        if self.r#type.is_empty() {
            self.name.clone()
        } else {
            format!("{} ({})", self.name, self.r#type)
        }
    }
}
