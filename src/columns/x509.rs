use crate::cert::X509Entry;
use crate::columns::{join_list, Alignment, ColumnSpec};
use crate::config::ExportConfig;
use colored::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum X509Column {
    Serial,
    Subject,
    DnsNames,
    EmailAddresses,
    IpAddresses,
    Uris,
    CrlDistributionPoints,
    Provisioner,
    NotBefore,
    NotAfter,
    RevokedAt,
    Validity,
}

const ALL: &[X509Column] = &[
    X509Column::Serial,
    X509Column::Subject,
    X509Column::DnsNames,
    X509Column::EmailAddresses,
    X509Column::IpAddresses,
    X509Column::Uris,
    X509Column::CrlDistributionPoints,
    X509Column::Provisioner,
    X509Column::NotBefore,
    X509Column::NotAfter,
    X509Column::RevokedAt,
    X509Column::Validity,
];

impl ColumnSpec for X509Column {
    type Record = X509Entry;

    fn all() -> &'static [Self] {
        ALL
    }

    fn is_shown(&self, config: &ExportConfig) -> bool {
        let toggles = &config.columns;
        match self {
            Self::DnsNames => toggles.dns_names,
            Self::EmailAddresses => toggles.email_addresses,
            Self::IpAddresses => toggles.ip_addresses,
            Self::Uris => toggles.uris,
            Self::CrlDistributionPoints => toggles.crl_distribution_points,
            Self::Provisioner => toggles.provisioner,
            Self::Serial
            | Self::Subject
            | Self::NotBefore
            | Self::NotAfter
            | Self::RevokedAt
            | Self::Validity => true,
        }
    }

    fn title(&self) -> &'static str {
        match self {
            Self::Serial => "Serial number",
            Self::Subject => "Subject",
            Self::DnsNames => "DNS names",
            Self::EmailAddresses => "Email addresses",
            Self::IpAddresses => "IP addresses",
            Self::Uris => "URIs",
            Self::CrlDistributionPoints => "CRL distribution points",
            Self::Provisioner => "Provisioner",
            Self::NotBefore => "Not before",
            Self::NotAfter => "Not after",
            Self::RevokedAt => "Revoked at",
            Self::Validity => "Validity",
        }
    }

    fn content(&self, entry: &X509Entry, config: &ExportConfig) -> String {
        let cert = &entry.certificate;
        match self {
            Self::Serial => cert.serial.to_string(),
            Self::Subject => cert.subject.clone(),
            Self::DnsNames => join_list(&cert.dns_names),
            Self::EmailAddresses => join_list(&cert.email_addresses),
            Self::IpAddresses => join_list(&cert.ip_addresses),
            Self::Uris => join_list(&cert.uris),
            Self::CrlDistributionPoints => join_list(&cert.crl_distribution_points),
            Self::Provisioner => entry.provisioner.display_name(),
            Self::NotBefore => config.format_time(&cert.not_before),
            Self::NotAfter => config.format_time(&cert.not_after),
            Self::RevokedAt => entry
                .revocation
                .revoked_at()
                .map(|t| config.format_time(&t))
                .unwrap_or_default(),
            Self::Validity => entry.validity.to_string(),
        }
    }

    fn content_color(&self, entry: &X509Entry) -> Color {
        match self {
            Self::Serial => Color::White,
            Self::NotBefore | Self::NotAfter | Self::RevokedAt => Color::BrightBlack,
            Self::Validity => entry.validity.color(),
            _ => Color::BrightWhite,
        }
    }

    fn alignment(&self) -> Alignment {
        match self {
            Self::Serial => Alignment::Right,
            _ => Alignment::Left,
        }
    }

    fn escape_markdown(&self) -> bool {
        !matches!(self, Self::Serial)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::cert::{
        ProvisionerRecord, RevocationRecord, SerialNumber, Validity, X509Entry, X509Record,
    };
    use chrono::{TimeZone, Utc};

    /// Entry built by hand, without going through DER.
    pub fn entry(serial: u64, subject: &str, not_after_year: i32, validity: Validity) -> X509Entry {
        X509Entry {
            certificate: X509Record {
                serial: SerialNumber::from(serial),
                subject: subject.to_string(),
                issuer: "Example CA".to_string(),
                not_before: Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
                not_after: Utc.with_ymd_and_hms(not_after_year, 6, 7, 8, 9, 10).unwrap(),
                dns_names: vec!["a.example.com".to_string(), "b.example.com".to_string()],
                email_addresses: vec![],
                ip_addresses: vec!["10.0.0.1".to_string()],
                uris: vec![],
                crl_distribution_points: vec!["http://ca.example.com/crl".to_string()],
            },
            validity,
            revocation: RevocationRecord::default(),
            provisioner: ProvisionerRecord::default(),
        }
    }
}
