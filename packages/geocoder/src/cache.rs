//! Bounded in-process cache of resolved postal codes.
//!
//! Keyed by postal code, capped by insertion count. When the cap is
//! reached the oldest entry is evicted. Only successful resolutions are
//! cached — a failed lookup is retried on the next request.

use std::collections::{BTreeMap, VecDeque};
use std::sync::Mutex;

use job_board_spatial::GeoPoint;

/// Default number of postal codes kept in the cache.
pub const DEFAULT_CAPACITY: usize = 1024;

struct Inner {
    entries: BTreeMap<String, GeoPoint>,
    order: VecDeque<String>,
}

/// Insertion-ordered, capacity-bounded postal code cache.
///
/// The mutex is held only for map access, never across an await point.
pub struct ZipCache {
    inner: Mutex<Inner>,
    capacity: usize,
}

impl ZipCache {
    /// Creates an empty cache holding at most `capacity` entries.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(Inner {
                entries: BTreeMap::new(),
                order: VecDeque::new(),
            }),
            capacity: capacity.max(1),
        }
    }

    /// Looks up a cached resolution.
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    #[must_use]
    pub fn get(&self, zipcode: &str) -> Option<GeoPoint> {
        let inner = self.inner.lock().expect("zip cache mutex poisoned");
        inner.entries.get(zipcode).copied()
    }

    /// Inserts a resolution, evicting the oldest entry at capacity.
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    pub fn insert(&self, zipcode: &str, point: GeoPoint) {
        let mut inner = self.inner.lock().expect("zip cache mutex poisoned");

        if inner.entries.contains_key(zipcode) {
            inner.entries.insert(zipcode.to_string(), point);
            return;
        }

        while inner.entries.len() >= self.capacity {
            let Some(oldest) = inner.order.pop_front() else {
                break;
            };
            inner.entries.remove(&oldest);
        }

        inner.entries.insert(zipcode.to_string(), point);
        inner.order.push_back(zipcode.to_string());
    }

    /// Number of cached entries.
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().expect("zip cache mutex poisoned").entries.len()
    }

    /// Returns `true` when the cache is empty.
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_cached_point() {
        let cache = ZipCache::new(4);
        assert!(cache.get("02116").is_none());

        cache.insert("02116", GeoPoint::new(-71.07, 42.35));
        let point = cache.get("02116").unwrap();
        assert!((point.longitude - -71.07).abs() < 1e-9);
        assert!((point.latitude - 42.35).abs() < 1e-9);
    }

    #[test]
    fn evicts_oldest_at_capacity() {
        let cache = ZipCache::new(2);
        cache.insert("00001", GeoPoint::new(0.0, 0.0));
        cache.insert("00002", GeoPoint::new(1.0, 1.0));
        cache.insert("00003", GeoPoint::new(2.0, 2.0));

        assert_eq!(cache.len(), 2);
        assert!(cache.get("00001").is_none());
        assert!(cache.get("00002").is_some());
        assert!(cache.get("00003").is_some());
    }

    #[test]
    fn reinserting_same_key_does_not_grow() {
        let cache = ZipCache::new(2);
        cache.insert("02116", GeoPoint::new(0.0, 0.0));
        cache.insert("02116", GeoPoint::new(5.0, 5.0));

        assert_eq!(cache.len(), 1);
        let point = cache.get("02116").unwrap();
        assert!((point.longitude - 5.0).abs() < 1e-9);
    }
}
