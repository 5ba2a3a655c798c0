use std::collections::HashSet;
use std::hash::Hash;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use crate::error::Error;

/// Rejects a second submission while one is still running.
#[derive(Debug, Default)]
pub struct BusyFlag(AtomicBool);

impl BusyFlag {
    pub fn is_busy(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    pub fn acquire(&self) -> Result<BusyGuard<'_>, Error> {
        self.0
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .map_err(|_| Error::OperationInProgress)?;

        Ok(BusyGuard(&self.0))
    }
}

pub struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Per-key variant of [`BusyFlag`].
#[derive(Debug)]
pub struct InFlight<K: Eq + Hash> {
    keys: Mutex<HashSet<K>>,
}

impl<K: Eq + Hash> Default for InFlight<K> {
    fn default() -> InFlight<K> {
        InFlight {
            keys: Mutex::new(HashSet::new()),
        }
    }
}

impl<K: Eq + Hash + Clone> InFlight<K> {
    pub fn contains(&self, key: &K) -> bool {
        self.lock().contains(key)
    }

    pub fn acquire(&self, key: &K) -> Result<InFlightGuard<'_, K>, Error> {
        if !self.lock().insert(key.clone()) {
            return Err(Error::OperationInProgress);
        }

        Ok(InFlightGuard {
            owner: self,
            key: key.clone(),
        })
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashSet<K>> {
        self.keys.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

pub struct InFlightGuard<'a, K: Eq + Hash + Clone> {
    owner: &'a InFlight<K>,
    key: K,
}

impl<K: Eq + Hash + Clone> Drop for InFlightGuard<'_, K> {
    fn drop(&mut self) {
        self.owner.lock().remove(&self.key);
    }
}
