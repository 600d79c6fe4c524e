use crate::storage::KvStore;
use crate::utils::errors::{Result, StepDbError};
use redb::{ReadOnlyDatabase, ReadableDatabase, ReadableTable, TableDefinition, TableError};
use std::path::{Path, PathBuf};

/// Every bucket lives in this one table; buckets are key prefixes.
pub const KV_TABLE: TableDefinition<&[u8], &[u8]> = TableDefinition::new("kv");

/// Offline copy of the certificate authority database.
///
/// The file is opened without write access, so read-only backups work and
/// nothing is ever written back. It is released when the value is dropped.
pub struct LocalStore {
    db: ReadOnlyDatabase,
    path: PathBuf,
}

impl LocalStore {
    /// Open an existing database file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.is_file() {
            return Err(StepDbError::Config(format!(
                "database file not found: {}",
                path.display()
            )));
        }

        let db = ReadOnlyDatabase::open(&path).map_err(redb::Error::from)?;
        tracing::info!("Opened database {}", path.display());

        Ok(Self { db, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KvStore for LocalStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        let read_txn = self.db.begin_read().map_err(redb::Error::from)?;
        let table = match read_txn.open_table(KV_TABLE) {
            Ok(table) => table,
            Err(TableError::TableDoesNotExist(_)) => return Ok(None),
            Err(e) => return Err(redb::Error::from(e).into()),
        };

        let value = table
            .get(key)
            .map_err(redb::Error::from)?
            .map(|guard| guard.value().to_vec());
        Ok(value)
    }

    fn scan_prefix(&self, prefix: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>> {
        let read_txn = self.db.begin_read().map_err(redb::Error::from)?;
        let table = match read_txn.open_table(KV_TABLE) {
            Ok(table) => table,
            Err(TableError::TableDoesNotExist(_)) => {
                tracing::warn!("Table kv missing from {}", self.path.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(redb::Error::from(e).into()),
        };

        let mut entries = Vec::new();
        for item in table.range(prefix..).map_err(redb::Error::from)? {
            let (key, value) = item.map_err(redb::Error::from)?;
            let key = key.value();
            if !key.starts_with(prefix) {
                break;
            }
            entries.push((key.to_vec(), value.value().to_vec()));
        }

        Ok(entries)
    }
}

/// Write the contents of an in-memory store into a new database file.
#[cfg(test)]
pub(crate) fn persist(
    store: &crate::storage::MemoryStore,
    path: &Path,
) -> std::result::Result<(), redb::Error> {
    let db = redb::Database::create(path)?;
    let write_txn = db.begin_write()?;
    {
        let mut table = write_txn.open_table(KV_TABLE)?;
        for (key, value) in store.iter() {
            table.insert(key, value)?;
        }
    }
    write_txn.commit()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{Bucket, MemoryStore, RecordFetcher};
    use redb::Database;
    use std::fs;
    use tempfile::TempDir;

    fn fixture() -> MemoryStore {
        let mut store = MemoryStore::new();
        store.insert(Bucket::SshCerts, b"1", b"first").unwrap();
        store.insert(Bucket::SshCerts, b"2", b"second").unwrap();
        store.insert(Bucket::RevokedSshCerts, b"2", b"{}").unwrap();
        store
    }

    #[test]
    fn test_open_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = LocalStore::open(dir.path().join("absent.redb"));
        assert!(matches!(result, Err(StepDbError::Config(_))));
    }

    #[test]
    fn test_matches_memory_store() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ca.redb");
        let memory = fixture();
        persist(&memory, &path).unwrap();

        let local = LocalStore::open(&path).unwrap();
        assert_eq!(local.path(), path.as_path());

        let from_disk = RecordFetcher::new(&local);
        let from_memory = RecordFetcher::new(&memory);
        assert_eq!(
            from_disk.list(Bucket::SshCerts).unwrap(),
            from_memory.list(Bucket::SshCerts).unwrap()
        );
        assert_eq!(
            from_disk.get(Bucket::RevokedSshCerts, b"2").unwrap(),
            Some(b"{}".to_vec())
        );
        assert_eq!(from_disk.get(Bucket::RevokedSshCerts, b"1").unwrap(), None);
        assert!(from_disk.list(Bucket::X509Certs).unwrap().is_empty());
    }

    #[test]
    fn test_database_without_table_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.redb");
        Database::create(&path).unwrap();

        let local = LocalStore::open(&path).unwrap();
        assert!(local.scan_prefix(b"").unwrap().is_empty());
        assert_eq!(local.get(b"anything").unwrap(), None);
    }

    #[test]
    fn test_opens_read_only_file_without_writing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("backup.redb");
        persist(&fixture(), &path).unwrap();

        let mut permissions = fs::metadata(&path).unwrap().permissions();
        permissions.set_readonly(true);
        fs::set_permissions(&path, permissions).unwrap();
        let before = fs::read(&path).unwrap();

        {
            let local = LocalStore::open(&path).unwrap();
            let records = RecordFetcher::new(&local).list(Bucket::SshCerts).unwrap();
            assert_eq!(records.len(), 2);
            assert_eq!(local.get(b"missing").unwrap(), None);
        }

        assert_eq!(fs::read(&path).unwrap(), before);
        assert!(fs::metadata(&path).unwrap().permissions().readonly());
    }
}
