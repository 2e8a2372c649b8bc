//! Single-flight guards for input surfaces.
//!
//! A guard is held for the whole lifetime of an outbound request and releases
//! the surface when dropped, including on early return.

use std::collections::HashSet;
use std::hash::Hash;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// At most one request in flight for one surface
#[derive(Debug, Default)]
pub struct SingleFlight {
    busy: AtomicBool,
}

impl SingleFlight {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// `None` when a request is already running
    pub fn try_acquire(self: &Arc<Self>) -> Option<FlightGuard> {
        if self.busy.swap(true, Ordering::SeqCst) {
            return None;
        }

        Some(FlightGuard {
            flight: Arc::clone(self),
        })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }
}

#[derive(Debug)]
pub struct FlightGuard {
    flight: Arc<SingleFlight>,
}

impl Drop for FlightGuard {
    fn drop(&mut self) {
        self.flight.busy.store(false, Ordering::SeqCst);
    }
}

/// One request in flight per key (e.g. per reported entry)
#[derive(Debug)]
pub struct KeyedFlight<K> {
    keys: Mutex<HashSet<K>>,
}

impl<K> Default for KeyedFlight<K> {
    fn default() -> Self {
        Self {
            keys: Mutex::new(HashSet::new()),
        }
    }
}

impl<K: Eq + Hash + Clone> KeyedFlight<K> {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn try_acquire(self: &Arc<Self>, key: K) -> Option<KeyedGuard<K>> {
        let mut keys = self.keys.lock().unwrap_or_else(|e| e.into_inner());
        if !keys.insert(key.clone()) {
            return None;
        }

        Some(KeyedGuard {
            flight: Arc::clone(self),
            key,
        })
    }

    pub fn in_flight(&self, key: &K) -> bool {
        self.keys
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(key)
    }
}

#[derive(Debug)]
pub struct KeyedGuard<K: Eq + Hash> {
    flight: Arc<KeyedFlight<K>>,
    key: K,
}

impl<K: Eq + Hash> Drop for KeyedGuard<K> {
    fn drop(&mut self) {
        self.flight
            .keys
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&self.key);
    }
}
