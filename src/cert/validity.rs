use chrono::{DateTime, Utc};
use colored::Color;
use serde::Serialize;
use std::fmt;

use crate::cert::records::RevocationRecord;

/// Derived state of a certificate at report time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Validity {
    Valid,
    Expired,
    Revoked,
}

impl Validity {
    /// Revocation takes precedence over expiry.
    pub fn derive(
        revocation: &RevocationRecord,
        not_after: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Self {
        if revocation.is_present() && now > revocation.revoked_at {
            Validity::Revoked
        } else if now > not_after {
            Validity::Expired
        } else {
            Validity::Valid
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Validity::Valid => "Valid",
            Validity::Expired => "Expired",
            Validity::Revoked => "Revoked",
        }
    }

    /// Status flag of an openssl index line.
    pub fn index_flag(&self) -> char {
        match self {
            Validity::Valid => 'V',
            Validity::Expired => 'E',
            Validity::Revoked => 'R',
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Validity::Valid => Color::Green,
            Validity::Expired => Color::BrightBlack,
            Validity::Revoked => Color::BrightYellow,
        }
    }
}

impl fmt::Display for Validity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
