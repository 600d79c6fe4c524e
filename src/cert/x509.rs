use crate::cert::SerialNumber;
use crate::utils::errors::{Result, StepDbError};
use base64::{engine::general_purpose, Engine as _};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use x509_parser::der_parser::oid;
use x509_parser::prelude::*;

// X.509 Extension OIDs
const SUBJECT_ALT_NAME_OID: oid::Oid = oid!(2.5.29 .17);
const CRL_DISTRIBUTION_POINTS_OID: oid::Oid = oid!(2.5.29 .31);

const PEM_BEGIN: &str = "-----BEGIN CERTIFICATE-----";
const PEM_END: &str = "-----END CERTIFICATE-----";

/// Owned view of an issued X.509 certificate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct X509Record {
    pub serial: SerialNumber,
    pub subject: String,
    pub issuer: String,
    pub not_before: DateTime<Utc>,
    pub not_after: DateTime<Utc>,
    #[serde(rename = "DNSNames")]
    pub dns_names: Vec<String>,
    pub email_addresses: Vec<String>,
    #[serde(rename = "IPAddresses")]
    pub ip_addresses: Vec<String>,
    #[serde(rename = "URIs")]
    pub uris: Vec<String>,
    #[serde(rename = "CRLDistributionPoints")]
    pub crl_distribution_points: Vec<String>,
}

pub struct X509Parser;

impl X509Parser {
    /// Parse a stored certificate value (raw DER body).
    ///
    /// The body goes through a PEM envelope so stored values and PEM files
    /// share one decoding path.
    pub fn parse_stored(value: &[u8]) -> Result<X509Record> {
        Self::parse_pem(&Self::wrap_pem(value))
    }

    /// Parse certificate PEM data
    pub fn parse_pem(pem_data: &str) -> Result<X509Record> {
        let cert_data = Self::extract_cert_from_pem(pem_data)?;

        let der_bytes = general_purpose::STANDARD
            .decode(&cert_data)
            .map_err(|e| StepDbError::CertParsing(format!("Base64 decode error: {e}")))?;

        Self::parse_der(&der_bytes)
    }

    pub fn parse_der(der_bytes: &[u8]) -> Result<X509Record> {
        let (_, cert) = X509Certificate::from_der(der_bytes)
            .map_err(|e| StepDbError::CertParsing(format!("DER parsing error: {e}")))?;

        Self::extract_record(&cert)
    }

    fn wrap_pem(der_bytes: &[u8]) -> String {
        let body = general_purpose::STANDARD.encode(der_bytes);
        let mut pem = String::with_capacity(body.len() + body.len() / 64 + 64);
        pem.push_str(PEM_BEGIN);
        pem.push('\n');
        for chunk in body.as_bytes().chunks(64) {
            pem.push_str(&String::from_utf8_lossy(chunk));
            pem.push('\n');
        }
        pem.push_str(PEM_END);
        pem.push('\n');
        pem
    }

    /// Extract certificate data from PEM format
    fn extract_cert_from_pem(pem_data: &str) -> Result<String> {
        let mut in_cert = false;
        let mut cert_lines = Vec::new();

        for line in pem_data.lines() {
            let line = line.trim();
            if line == PEM_BEGIN {
                in_cert = true;
                continue;
            } else if line == PEM_END {
                break;
            } else if in_cert {
                cert_lines.push(line);
            }
        }

        if cert_lines.is_empty() {
            return Err(StepDbError::CertParsing(
                "No certificate data found in PEM".to_string(),
            ));
        }

        Ok(cert_lines.join(""))
    }

    fn extract_record(cert: &X509Certificate) -> Result<X509Record> {
        let serial = SerialNumber::from_be_bytes(cert.raw_serial());

        let subject = format_name(cert.subject());

        let issuer = cert
            .issuer()
            .iter_common_name()
            .next()
            .and_then(|cn| cn.as_str().ok())
            .unwrap_or("Unknown")
            .to_string();

        let not_before = to_utc(cert.validity().not_before.timestamp())?;
        let not_after = to_utc(cert.validity().not_after.timestamp())?;

        let mut dns_names = Vec::new();
        let mut email_addresses = Vec::new();
        let mut ip_addresses = Vec::new();
        let mut uris = Vec::new();
        let mut crl_distribution_points = Vec::new();

        for ext in cert.extensions() {
            if ext.oid == SUBJECT_ALT_NAME_OID {
                if let Ok((_rem, san)) = SubjectAlternativeName::from_der(ext.value) {
                    for name in &san.general_names {
                        match name {
                            GeneralName::DNSName(dns) => dns_names.push(dns.to_string()),
                            GeneralName::RFC822Name(email) => {
                                email_addresses.push(email.to_string())
                            }
                            GeneralName::URI(uri) => uris.push(uri.to_string()),
                            GeneralName::IPAddress(ip) => {
                                if let Some(ip) = format_ip(ip) {
                                    ip_addresses.push(ip);
                                }
                            }
                            _ => {}
                        }
                    }
                }
            } else if ext.oid == CRL_DISTRIBUTION_POINTS_OID {
                if let Ok((_rem, points)) = CRLDistributionPoints::from_der(ext.value) {
                    for point in points.iter() {
                        if let Some(DistributionPointName::FullName(names)) =
                            &point.distribution_point
                        {
                            for name in names {
                                if let GeneralName::URI(uri) = name {
                                    crl_distribution_points.push(uri.to_string());
                                }
                            }
                        }
                    }
                }
            }
        }

        Ok(X509Record {
            serial,
            subject,
            issuer,
            not_before,
            not_after,
            dns_names,
            email_addresses,
            ip_addresses,
            uris,
            crl_distribution_points,
        })
    }
}

fn to_utc(timestamp: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp(timestamp, 0)
        .ok_or_else(|| StepDbError::CertParsing(format!("timestamp out of range: {timestamp}")))
}

// Printed order of the named attribute types, most specific first.
const NAME_ORDER: [&str; 9] = [
    "SERIALNUMBER",
    "CN",
    "OU",
    "O",
    "POSTALCODE",
    "STREET",
    "L",
    "ST",
    "C",
];

fn attribute_short_name(oid: &oid::Oid) -> Option<&'static str> {
    let name = match oid.to_id_string().as_str() {
        "2.5.4.3" => "CN",
        "2.5.4.5" => "SERIALNUMBER",
        "2.5.4.6" => "C",
        "2.5.4.7" => "L",
        "2.5.4.8" => "ST",
        "2.5.4.9" => "STREET",
        "2.5.4.10" => "O",
        "2.5.4.11" => "OU",
        "2.5.4.17" => "POSTALCODE",
        _ => return None,
    };
    Some(name)
}

/// Render a distinguished name the way the CA prints it: named attributes in
/// a fixed order, repeated types joined with `+`, other attributes last as
/// dotted OIDs, everything separated by a bare `,`.
fn format_name(name: &X509Name) -> String {
    let mut named: Vec<(&str, Vec<String>)> =
        NAME_ORDER.iter().map(|short| (*short, Vec::new())).collect();
    let mut others = Vec::new();

    for attr in name.iter_attributes() {
        match attribute_short_name(attr.attr_type()) {
            Some(short) => {
                // non-string values of named types are dropped
                let Ok(value) = attr.as_str() else { continue };
                if let Some((_, values)) = named.iter_mut().find(|(n, _)| *n == short) {
                    values.push(format!("{short}={}", escape_name_value(value)));
                }
            }
            None => {
                let value = match attr.as_str() {
                    Ok(value) => escape_name_value(value),
                    Err(_) => attr.as_slice().iter().fold(String::from("#"), |mut acc, b| {
                        acc.push_str(&format!("{b:02x}"));
                        acc
                    }),
                };
                others.push(format!("{}={value}", attr.attr_type().to_id_string()));
            }
        }
    }

    let mut parts: Vec<String> = named
        .into_iter()
        .filter(|(_, values)| !values.is_empty())
        .map(|(_, values)| values.join("+"))
        .collect();
    parts.extend(others.into_iter().rev());
    parts.join(",")
}

fn escape_name_value(value: &str) -> String {
    let last = value.len().saturating_sub(1);
    let mut escaped = String::with_capacity(value.len());
    for (i, c) in value.char_indices() {
        let escape = match c {
            ',' | '+' | '"' | '\\' | '<' | '>' | ';' => true,
            ' ' => i == 0 || i == last,
            '#' => i == 0,
            _ => false,
        };
        if escape {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn format_ip(bytes: &[u8]) -> Option<String> {
    let ip = match bytes.len() {
        4 => IpAddr::V4(Ipv4Addr::from(<[u8; 4]>::try_from(bytes).ok()?)),
        16 => IpAddr::V6(Ipv6Addr::from(<[u8; 16]>::try_from(bytes).ok()?)),
        _ => return None,
    };
    Some(ip.to_string())
}
