use crate::cert::SshEntry;
use crate::columns::{Alignment, ColumnSpec};
use crate::config::ExportConfig;
use colored::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SshColumn {
    Serial,
    Type,
    KeyId,
    ValidPrincipals,
    NotBefore,
    NotAfter,
    RevokedAt,
    Validity,
}

const ALL: &[SshColumn] = &[
    SshColumn::Serial,
    SshColumn::Type,
    SshColumn::KeyId,
    SshColumn::ValidPrincipals,
    SshColumn::NotBefore,
    SshColumn::NotAfter,
    SshColumn::RevokedAt,
    SshColumn::Validity,
];

impl ColumnSpec for SshColumn {
    type Record = SshEntry;

    fn all() -> &'static [Self] {
        ALL
    }

    fn is_shown(&self, config: &ExportConfig) -> bool {
        match self {
            Self::KeyId => config.columns.key_id,
            _ => true,
        }
    }

    fn title(&self) -> &'static str {
        match self {
            Self::Serial => "Serial number",
            Self::Type => "Type",
            Self::KeyId => "Key ID",
            Self::ValidPrincipals => "Valid principals",
            Self::NotBefore => "Not before",
            Self::NotAfter => "Not after",
            Self::RevokedAt => "Revoked at",
            Self::Validity => "Validity",
        }
    }

    fn content(&self, entry: &SshEntry, config: &ExportConfig) -> String {
        let cert = &entry.certificate;
        match self {
            Self::Serial => cert.serial.to_string(),
            Self::Type => cert.cert_type.to_string(),
            Self::KeyId => cert.key_id.clone(),
            // principals are short names; keep them compact
            Self::ValidPrincipals => cert.valid_principals.join(","),
            Self::NotBefore => config.format_time(&cert.valid_after),
            Self::NotAfter => config.format_time(&cert.valid_before),
            Self::RevokedAt => entry
                .revocation
                .revoked_at()
                .map(|t| config.format_time(&t))
                .unwrap_or_default(),
            Self::Validity => entry.validity.to_string(),
        }
    }

    fn content_color(&self, entry: &SshEntry) -> Color {
        match self {
            Self::Serial => Color::White,
            Self::Type => entry.certificate.cert_type.color(),
            Self::NotBefore | Self::NotAfter | Self::RevokedAt => Color::BrightBlack,
            Self::Validity => entry.validity.color(),
            Self::KeyId | Self::ValidPrincipals => Color::BrightWhite,
        }
    }

    fn alignment(&self) -> Alignment {
        match self {
            Self::Serial => Alignment::Right,
            Self::Type => Alignment::Center,
            _ => Alignment::Left,
        }
    }

    fn escape_markdown(&self) -> bool {
        !matches!(self, Self::Serial | Self::Type)
    }
}
