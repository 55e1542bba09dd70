//! Result cache module
//!
//! This module bridges a search response to the user actions that follow it.
//! Every record shown in a result listing is stored under its external catalog
//! ID and looked up again once the user picks or confirms it. Entries live for
//! the lifetime of the process; there is no expiry and no eviction.

use crate::catalog::ExternalId;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// An in-memory store for search records, keyed by external catalog ID
///
/// Records are immutable once inserted. Storing a record under an ID that is
/// already present replaces the previous entry as a whole, so readers holding
/// an earlier `Arc` keep seeing a complete record.
#[derive(Debug)]
pub struct ResultCache<T> {
    /// The cached records
    entries: RwLock<HashMap<ExternalId, Arc<T>>>,
}

impl<T> Default for ResultCache<T> {
    fn default() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }
}

impl<T> ResultCache<T> {
    /// Creates an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a record under the given ID, replacing any previous entry
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let cache = ResultCache::new();
    /// cache.put(78, record);
    /// ```
    pub fn put(&self, id: ExternalId, record: T) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, Arc::new(record));
    }

    /// Looks up the record stored under the given ID
    ///
    /// Returns `None` if nothing was cached for this ID. Absence is not an
    /// error here; callers decide what an unknown ID means for them.
    pub fn get(&self, id: ExternalId) -> Option<Arc<T>> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Hit {
        title: String,
    }

    fn hit(title: &str) -> Hit {
        Hit {
            title: title.to_string(),
        }
    }

    #[test]
    fn test_put_then_get_returns_record() {
        let cache = ResultCache::new();
        cache.put(78, hit("Blade Runner"));
        cache.put(335984, hit("Blade Runner 2049"));

        assert_eq!(*cache.get(78).unwrap(), hit("Blade Runner"));
        assert_eq!(*cache.get(335984).unwrap(), hit("Blade Runner 2049"));
    }

    #[test]
    fn test_get_unknown_id_is_absent() {
        let cache: ResultCache<Hit> = ResultCache::new();
        assert!(cache.get(1).is_none());

        cache.put(2, hit("Alien"));
        assert!(cache.get(1).is_none());
    }

    #[test]
    fn test_last_write_wins() {
        let cache = ResultCache::new();
        cache.put(42, hit("First"));
        let earlier = cache.get(42).unwrap();

        cache.put(42, hit("Second"));

        assert_eq!(cache.get(42).unwrap().title, "Second");
        // Readers holding the old entry still see it intact
        assert_eq!(earlier.title, "First");
    }
}
