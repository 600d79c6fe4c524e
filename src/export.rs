use crate::cert::{CorrelatedEntry, Correlator};
use crate::columns::{SshColumn, X509Column};
use crate::config::{EmitFormat, ExportConfig, SortOrder};
use crate::render::{render_columns, render_openssl_index};
use crate::storage::{KvStore, RecordFetcher};
use crate::utils::errors::{Result, StepDbError};
use base64::{engine::general_purpose, Engine as _};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

/// Stable ascending sort on one end of the validity window.
pub fn sort_entries<E: CorrelatedEntry>(entries: &mut [E], order: SortOrder) {
    match order {
        SortOrder::Start => entries.sort_by_key(|e| e.valid_from()),
        SortOrder::Finish => entries.sort_by_key(|e| e.valid_until()),
    }
}

/// Report on the X.509 certificates in `store`.
pub fn export_x509<S, W>(
    store: &S,
    config: &ExportConfig,
    now: DateTime<Utc>,
    out: &mut W,
) -> Result<()>
where
    S: KvStore + ?Sized,
    W: Write,
{
    let mut entries = Correlator::new(store, now, config.filter).x509_entries()?;
    sort_entries(&mut entries, config.sort);

    match config.emit {
        EmitFormat::Openssl => render_openssl_index(&entries, out),
        _ => render_columns::<X509Column, _>(&entries, config, out),
    }
}

/// Report on the SSH certificates in `store`.
pub fn export_ssh<S, W>(
    store: &S,
    config: &ExportConfig,
    now: DateTime<Utc>,
    out: &mut W,
) -> Result<()>
where
    S: KvStore + ?Sized,
    W: Write,
{
    let mut entries = Correlator::new(store, now, config.filter).ssh_entries()?;
    sort_entries(&mut entries, config.sort);
    render_columns::<SshColumn, _>(&entries, config, out)
}

#[derive(Debug, Serialize)]
struct DumpRecord {
    key: String,
    value: String,
}

/// Dump every non-blank record of an arbitrary bucket as JSON.
///
/// Values are base64 since buckets may hold binary blobs.
pub fn dump_bucket<S, W>(store: &S, bucket: &str, out: &mut W) -> Result<()>
where
    S: KvStore + ?Sized,
    W: Write,
{
    let records = RecordFetcher::new(store).list(bucket)?;
    if records.is_empty() {
        return Err(StepDbError::NoRecords(bucket.to_string()));
    }

    let dump: Vec<DumpRecord> = records
        .iter()
        .filter(|record| !record.is_blank())
        .map(|record| DumpRecord {
            key: String::from_utf8_lossy(&record.key).into_owned(),
            value: general_purpose::STANDARD.encode(&record.value),
        })
        .collect();

    let json = serde_json::to_string_pretty(&dump)?;
    writeln!(out, "{json}")?;
    Ok(())
}
