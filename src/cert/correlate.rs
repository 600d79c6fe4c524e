use crate::cert::records::{ProvisionerRecord, RevocationRecord};
use crate::cert::ssh::SshRecord;
use crate::cert::validity::Validity;
use crate::cert::x509::{X509Parser, X509Record};
use crate::config::ValidityFilter;
use crate::storage::{Bucket, KvStore, RecordFetcher, StoreRecord};
use crate::utils::errors::{Result, StepDbError};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// An X.509 certificate joined with its stored metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct X509Entry {
    pub certificate: X509Record,
    pub validity: Validity,
    #[serde(skip_serializing_if = "RevocationRecord::is_empty")]
    pub revocation: RevocationRecord,
    #[serde(skip_serializing_if = "ProvisionerRecord::is_empty")]
    pub provisioner: ProvisionerRecord,
}

/// An SSH certificate joined with its revocation record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SshEntry {
    pub certificate: SshRecord,
    pub validity: Validity,
    #[serde(skip_serializing_if = "RevocationRecord::is_empty")]
    pub revocation: RevocationRecord,
}

/// What the sorter and the index renderer need from any entry.
pub trait CorrelatedEntry {
    fn valid_from(&self) -> DateTime<Utc>;
    fn valid_until(&self) -> DateTime<Utc>;
    fn validity(&self) -> Validity;
    fn revocation(&self) -> &RevocationRecord;
}

impl CorrelatedEntry for X509Entry {
    fn valid_from(&self) -> DateTime<Utc> {
        self.certificate.not_before
    }

    fn valid_until(&self) -> DateTime<Utc> {
        self.certificate.not_after
    }

    fn validity(&self) -> Validity {
        self.validity
    }

    fn revocation(&self) -> &RevocationRecord {
        &self.revocation
    }
}

impl CorrelatedEntry for SshEntry {
    fn valid_from(&self) -> DateTime<Utc> {
        self.certificate.valid_after
    }

    fn valid_until(&self) -> DateTime<Utc> {
        self.certificate.valid_before
    }

    fn validity(&self) -> Validity {
        self.validity
    }

    fn revocation(&self) -> &RevocationRecord {
        &self.revocation
    }
}

/// Joins primary certificate records with revocation and provisioner data.
pub struct Correlator<'a, S: KvStore + ?Sized> {
    fetcher: RecordFetcher<'a, S>,
    now: DateTime<Utc>,
    filter: ValidityFilter,
}

impl<'a, S: KvStore + ?Sized> Correlator<'a, S> {
    pub fn new(store: &'a S, now: DateTime<Utc>, filter: ValidityFilter) -> Self {
        Self {
            fetcher: RecordFetcher::new(store),
            now,
            filter,
        }
    }

    /// Every X.509 certificate that passes the validity filter, in store order.
    pub fn x509_entries(&self) -> Result<Vec<X509Entry>> {
        let mut entries = Vec::new();

        for record in self.scan(Bucket::X509Certs)? {
            let certificate = match X509Parser::parse_stored(&record.value) {
                Ok(certificate) => certificate,
                Err(e) => {
                    skip_unparsable(&record, &e);
                    continue;
                }
            };

            let serial = certificate.serial.as_decimal().as_bytes().to_vec();
            let revocation = self.revocation(Bucket::RevokedX509Certs, &serial)?;
            let provisioner = self.provisioner(&serial)?;
            let validity = Validity::derive(&revocation, certificate.not_after, self.now);

            if !self.filter.accepts(validity) {
                tracing::debug!("Filtered out {} certificate {}", validity, certificate.serial);
                continue;
            }

            entries.push(X509Entry {
                certificate,
                validity,
                revocation,
                provisioner,
            });
        }

        tracing::info!("Correlated {} X.509 certificates", entries.len());
        Ok(entries)
    }

    /// Every SSH certificate that passes the validity filter, in store order.
    pub fn ssh_entries(&self) -> Result<Vec<SshEntry>> {
        let mut entries = Vec::new();

        for record in self.scan(Bucket::SshCerts)? {
            let certificate = match SshRecord::parse(&record.value) {
                Ok(certificate) => certificate,
                Err(e) => {
                    skip_unparsable(&record, &e);
                    continue;
                }
            };

            let serial = certificate.serial.as_decimal().as_bytes().to_vec();
            let revocation = self.revocation(Bucket::RevokedSshCerts, &serial)?;
            let validity = Validity::derive(&revocation, certificate.valid_before, self.now);

            if !self.filter.accepts(validity) {
                tracing::debug!("Filtered out {} certificate {}", validity, certificate.serial);
                continue;
            }

            entries.push(SshEntry {
                certificate,
                validity,
                revocation,
            });
        }

        tracing::info!("Correlated {} SSH certificates", entries.len());
        Ok(entries)
    }

    /// Non-blank records of `bucket`; an empty bucket is fatal.
    fn scan(&self, bucket: Bucket) -> Result<Vec<StoreRecord>> {
        let records = self.fetcher.list(bucket)?;
        if records.is_empty() {
            return Err(StepDbError::NoRecords(bucket.to_string()));
        }

        Ok(records
            .into_iter()
            .filter(|record| !record.is_blank())
            .collect())
    }

    fn revocation(&self, bucket: Bucket, serial: &[u8]) -> Result<RevocationRecord> {
        match self.fetcher.get(bucket, serial)? {
            Some(value) => RevocationRecord::from_slice(&value),
            None => Ok(RevocationRecord::default()),
        }
    }

    fn provisioner(&self, serial: &[u8]) -> Result<ProvisionerRecord> {
        match self.fetcher.get(Bucket::X509CertsData, serial)? {
            Some(value) => ProvisionerRecord::from_slice(&value),
            None => Ok(ProvisionerRecord::default()),
        }
    }
}

fn skip_unparsable(record: &StoreRecord, error: &StepDbError) {
    tracing::info!(
        "Skipping record {}: {}",
        String::from_utf8_lossy(&record.key),
        error
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cert::ssh::test_support::certificate_blob;
    use crate::cert::x509::test_support::der_certificate;
    use crate::storage::MemoryStore;
    use chrono::TimeZone;
    use ssh_key::certificate::CertType;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap()
    }

    fn all_states() -> ValidityFilter {
        ValidityFilter {
            valid: true,
            revoked: true,
            expired: true,
        }
    }

    fn x509_store() -> MemoryStore {
        let mut store = MemoryStore::new();
        store
            .insert(Bucket::X509Certs, b"7", der_certificate(7, "old.example.com", (2020, 2021)))
            .unwrap();
        store
            .insert(Bucket::X509Certs, b"8", der_certificate(8, "live.example.com", (2024, 2030)))
            .unwrap();
        store
            .insert(Bucket::X509Certs, b"9", der_certificate(9, "gone.example.com", (2024, 2030)))
            .unwrap();
        store
            .insert(
                Bucket::RevokedX509Certs,
                b"9",
                r#"{"ProvisionerID":"admin","RevokedAt":"2025-01-01T00:00:00Z"}"#,
            )
            .unwrap();
        store
            .insert(
                Bucket::X509CertsData,
                b"8",
                r#"{"provisioner":{"id":"p","name":"admin","type":"JWK"}}"#,
            )
            .unwrap();
        store
    }

    #[test]
    fn test_expired_hidden_by_default() {
        let mut store = MemoryStore::new();
        store
            .insert(Bucket::X509Certs, b"7", der_certificate(7, "old.example.com", (2020, 2021)))
            .unwrap();

        let correlator = Correlator::new(&store, now(), ValidityFilter::default());
        assert!(correlator.x509_entries().unwrap().is_empty());

        let correlator = Correlator::new(&store, now(), all_states());
        let entries = correlator.x509_entries().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].validity, Validity::Expired);
        assert_eq!(entries[0].certificate.serial.as_decimal(), "7");
    }

    #[test]
    fn test_x509_correlation() {
        let store = x509_store();
        let entries = Correlator::new(&store, now(), all_states())
            .x509_entries()
            .unwrap();

        let states: Vec<_> = entries.iter().map(|e| e.validity).collect();
        assert_eq!(
            states,
            vec![Validity::Expired, Validity::Valid, Validity::Revoked]
        );
        assert_eq!(entries[1].provisioner.display_name(), "admin (JWK)");
        assert!(entries[0].provisioner.is_empty());
        assert!(entries[2].revocation.is_present());
    }

    #[test]
    fn test_filter_combinations() {
        let store = x509_store();
        let count = |valid, revoked, expired| {
            Correlator::new(
                &store,
                now(),
                ValidityFilter {
                    valid,
                    revoked,
                    expired,
                },
            )
            .x509_entries()
            .unwrap()
            .len()
        };

        assert_eq!(count(true, true, false), 2);
        assert_eq!(count(false, false, true), 1);
        assert_eq!(count(false, true, false), 1);
        assert_eq!(count(false, false, false), 0);
    }

    #[test]
    fn test_unparsable_and_blank_records_are_skipped() {
        let mut store = x509_store();
        store.insert(Bucket::X509Certs, b"10", b"garbage").unwrap();
        store.insert(Bucket::X509Certs, b"11", b"   ").unwrap();

        let entries = Correlator::new(&store, now(), all_states())
            .x509_entries()
            .unwrap();
        assert_eq!(entries.len(), 3);
    }

    #[test]
    fn test_empty_bucket_is_fatal() {
        let store = MemoryStore::new();
        let correlator = Correlator::new(&store, now(), all_states());
        assert!(matches!(
            correlator.x509_entries(),
            Err(StepDbError::NoRecords(bucket)) if bucket == "x509_certs"
        ));
        assert!(matches!(
            correlator.ssh_entries(),
            Err(StepDbError::NoRecords(bucket)) if bucket == "ssh_certs"
        ));
    }

    #[test]
    fn test_malformed_revocation_is_fatal() {
        let mut store = x509_store();
        store
            .insert(Bucket::RevokedX509Certs, b"8", b"{broken")
            .unwrap();

        let result = Correlator::new(&store, now(), all_states()).x509_entries();
        assert!(matches!(result, Err(StepDbError::Json(_))));
    }

    #[test]
    fn test_ssh_revoked_before_expiry() {
        let mut store = MemoryStore::new();
        store
            .insert(Bucket::SshCerts, b"42", certificate_blob(42, CertType::User, 0, 1000))
            .unwrap();
        store
            .insert(
                Bucket::RevokedSshCerts,
                b"42",
                r#"{"ProvisionerID":"admin","RevokedAt":"1970-01-01T00:08:20Z"}"#,
            )
            .unwrap();

        let now = Utc.timestamp_opt(600, 0).unwrap();
        let entries = Correlator::new(&store, now, ValidityFilter::default())
            .ssh_entries()
            .unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].validity, Validity::Revoked);
        assert_eq!(entries[0].revocation.revoked_at.timestamp(), 500);
    }
}
