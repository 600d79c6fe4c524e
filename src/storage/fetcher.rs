use crate::storage::key_codec::{decode_segment, encode, encode_key};
use crate::storage::KvStore;
use crate::utils::errors::Result;

/// One entry of a bucket scan, with the bucket prefix removed from the key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreRecord {
    pub key: Vec<u8>,
    pub value: Vec<u8>,
}

impl StoreRecord {
    /// Whether the stored value is blank (tombstones and placeholders).
    pub fn is_blank(&self) -> bool {
        self.value.trim_ascii().is_empty()
    }
}

/// Bucket-aware lookups on top of a raw store.
pub struct RecordFetcher<'a, S: KvStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: KvStore + ?Sized> RecordFetcher<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Fetch the value stored under `key` in `bucket`, if any.
    pub fn get(&self, bucket: impl AsRef<[u8]>, key: &[u8]) -> Result<Option<Vec<u8>>> {
        let encoded = encode_key(bucket.as_ref(), key)?;
        self.store.get(&encoded)
    }

    /// List every record of `bucket` in store order.
    pub fn list(&self, bucket: impl AsRef<[u8]>) -> Result<Vec<StoreRecord>> {
        let prefix = encode(bucket.as_ref())?;
        tracing::debug!(
            "Scanning bucket {} with prefix {:?}",
            String::from_utf8_lossy(bucket.as_ref()),
            prefix
        );

        let records = self
            .store
            .scan_prefix(&prefix)?
            .into_iter()
            .map(|(full_key, value)| {
                let remainder = &full_key[prefix.len()..];
                // Keys written outside the codec are kept verbatim.
                let key = match decode_segment(remainder) {
                    Ok((key, rest)) if rest.is_empty() => key.to_vec(),
                    _ => remainder.to_vec(),
                };
                StoreRecord { key, value }
            })
            .collect::<Vec<_>>();

        tracing::debug!("Found {} records", records.len());
        Ok(records)
    }
}
