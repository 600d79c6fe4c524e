use crate::cert::X509Entry;
use crate::utils::errors::Result;
use chrono::{DateTime, Utc};
use std::io::Write;

fn index_time(time: &DateTime<Utc>) -> String {
    time.format("%y%m%d%H%M%SZ").to_string()
}

/// openssl `ca` index file: one tab-separated line per certificate.
pub fn render_openssl_index<W: Write>(records: &[X509Entry], out: &mut W) -> Result<()> {
    for entry in records {
        let revoked_at = entry
            .revocation
            .revoked_at()
            .map(|t| index_time(&t))
            .unwrap_or_default();

        writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}\t{}",
            entry.validity.index_flag(),
            index_time(&entry.certificate.not_after),
            revoked_at,
            entry.certificate.serial.as_hex(),
            "unknown",
            entry.certificate.subject
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cert::{RevocationRecord, Validity};
    use crate::columns::x509::test_support::entry;
    use chrono::TimeZone;

    #[test]
    fn test_index_lines() {
        let valid = entry(255, "CN=a", 2030, Validity::Valid);
        let mut revoked = entry(4096, "CN=b", 2031, Validity::Revoked);
        revoked.revocation = RevocationRecord {
            provisioner_id: "admin".to_string(),
            revoked_at: Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap(),
            ..Default::default()
        };

        let mut out = Vec::new();
        render_openssl_index(&[valid, revoked], &mut out).unwrap();
        let output = String::from_utf8(out).unwrap();

        assert_eq!(
            output,
            "V\t300607080910Z\t\tFF\tunknown\tCN=a\n\
             R\t310607080910Z\t250102030405Z\t1000\tunknown\tCN=b\n"
        );
    }

    #[test]
    fn test_no_header() {
        let mut out = Vec::new();
        render_openssl_index(&[], &mut out).unwrap();
        assert!(out.is_empty());
    }
}
