use crate::storage::key_codec::encode_key;
use crate::storage::KvStore;
use crate::utils::errors::Result;
use std::collections::BTreeMap;

/// In-memory ordered store, laid out exactly like the on-disk one.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` under `key` in `bucket`.
    pub fn insert(
        &mut self,
        bucket: impl AsRef<[u8]>,
        key: &[u8],
        value: impl Into<Vec<u8>>,
    ) -> Result<()> {
        let encoded = encode_key(bucket.as_ref(), key)?;
        self.entries.insert(encoded, value.into());
        Ok(())
    }

    /// Encoded keys and values in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&[u8], &[u8])> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_slice(), value.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        Ok(self.entries.get(key).cloned())
    }

    fn scan_prefix(&self, prefix: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>> {
        Ok(self
            .entries
            .range(prefix.to_vec()..)
            .take_while(|(key, _)| key.starts_with(prefix))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect())
    }
}
