use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;

use super::loader::load_table;
use super::model::CanonicalTable;
use crate::error::LoadError;

/// Identity of an uploaded file: its name plus a digest of its content.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileKey {
    name: String,
    len: usize,
    digest: u64,
}

impl FileKey {
    pub fn new(name: &str, bytes: &[u8]) -> Self {
        let mut hasher = DefaultHasher::new();
        bytes.hash(&mut hasher);
        FileKey {
            name: name.to_string(),
            len: bytes.len(),
            digest: hasher.finish(),
        }
    }
}

// ---------------------------------------------------------------------------
// LoadCache – bounded memoization of load_table
// ---------------------------------------------------------------------------

/// Remembers the last few successfully loaded tables.
///
/// Only successes are cached; a failed load is retried on the next upload.
pub struct LoadCache {
    tables: LruCache<FileKey, Arc<CanonicalTable>>,
}

impl LoadCache {
    /// A capacity of zero is treated as one.
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            tables: LruCache::new(capacity),
        }
    }

    pub fn load(&mut self, name: &str, bytes: &[u8]) -> Result<Arc<CanonicalTable>, LoadError> {
        let key = FileKey::new(name, bytes);
        if let Some(table) = self.tables.get(&key) {
            log::debug!("Load cache hit for {name}");
            return Ok(Arc::clone(table));
        }

        log::debug!("Load cache miss for {name}");
        let table = Arc::new(load_table(name, bytes)?);
        self.tables.put(key, Arc::clone(&table));
        log::debug!("Load cache holds {} of {} tables", self.len(), self.capacity());
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn capacity(&self) -> usize {
        self.tables.cap().get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::tests::sample_csv;

    #[test]
    fn repeated_loads_share_the_parsed_table() {
        let mut cache = LoadCache::new(2);
        let bytes = sample_csv();
        let first = cache.load("news.csv", bytes.as_bytes()).unwrap();
        let second = cache.load("news.csv", bytes.as_bytes()).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn same_bytes_under_another_name_is_a_different_file() {
        let mut cache = LoadCache::new(4);
        let bytes = sample_csv();
        let a = cache.load("a.csv", bytes.as_bytes()).unwrap();
        let b = cache.load("b.csv", bytes.as_bytes()).unwrap();
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(a.records, b.records);
    }

    #[test]
    fn evicts_least_recently_used() {
        let mut cache = LoadCache::new(2);
        let bytes = sample_csv();
        let a = cache.load("a.csv", bytes.as_bytes()).unwrap();
        cache.load("b.csv", bytes.as_bytes()).unwrap();
        cache.load("a.csv", bytes.as_bytes()).unwrap();
        cache.load("c.csv", bytes.as_bytes()).unwrap();
        assert_eq!(cache.len(), 2);

        // "a" was touched after "b", so "b" went first.
        let a_again = cache.load("a.csv", bytes.as_bytes()).unwrap();
        assert!(Arc::ptr_eq(&a, &a_again));
    }

    #[test]
    fn failures_are_not_cached() {
        let mut cache = LoadCache::new(2);
        assert!(cache.load("broken.csv", b"just,some,columns\n1,2,3").is_err());
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn zero_capacity_is_clamped() {
        assert_eq!(LoadCache::new(0).capacity(), 1);
    }
}
