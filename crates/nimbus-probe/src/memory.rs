//! In-memory [`ObjectStore`] for tests and dry runs.

use std::{
    collections::BTreeSet,
    sync::{Mutex, MutexGuard},
};

use crate::{
    bucket::BucketName,
    store::{ObjectStore, StoreError},
};

/// A call received by a [`MemoryObjectStore`], in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    Create(String),
    Delete(String),
}

#[derive(Debug, Default)]
struct State {
    buckets: BTreeSet<String>,
    calls: Vec<StoreCall>,
    create_failure: Option<StoreError>,
    delete_failure: Option<StoreError>,
}

/// Object store that keeps buckets in a set and records every call.
///
/// Failures can be injected per operation with [`fail_create_with`] and
/// [`fail_delete_with`]; an injected failure applies to every later call of
/// that operation and leaves the bucket set untouched.
///
/// [`fail_create_with`]: MemoryObjectStore::fail_create_with
/// [`fail_delete_with`]: MemoryObjectStore::fail_delete_with
#[derive(Debug, Default)]
pub struct MemoryObjectStore {
    state: Mutex<State>,
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_create_with(self, error: StoreError) -> Self {
        self.lock().create_failure = Some(error);
        self
    }

    pub fn fail_delete_with(self, error: StoreError) -> Self {
        self.lock().delete_failure = Some(error);
        self
    }

    /// Names of the buckets that currently exist.
    pub fn buckets(&self) -> Vec<String> {
        self.lock().buckets.iter().cloned().collect()
    }

    /// Every call received so far, including failed ones.
    pub fn calls(&self) -> Vec<StoreCall> {
        self.lock().calls.clone()
    }

    pub fn delete_attempts(&self) -> usize {
        self.lock()
            .calls
            .iter()
            .filter(|call| matches!(call, StoreCall::Delete(_)))
            .count()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        // State stays consistent even if a holder panicked.
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ObjectStore for MemoryObjectStore {
    fn create_bucket(&self, name: &BucketName) -> Result<(), StoreError> {
        let mut state = self.lock();
        state.calls.push(StoreCall::Create(name.to_string()));

        if let Some(error) = &state.create_failure {
            return Err(error.clone());
        }
        if !state.buckets.insert(name.to_string()) {
            return Err(StoreError::Conflict(name.to_string()));
        }
        Ok(())
    }

    fn delete_bucket(&self, name: &BucketName) -> Result<(), StoreError> {
        let mut state = self.lock();
        state.calls.push(StoreCall::Delete(name.to_string()));

        if let Some(error) = &state.delete_failure {
            return Err(error.clone());
        }
        if !state.buckets.remove(name.as_str()) {
            return Err(StoreError::Service(format!("no such bucket: {name}")));
        }
        Ok(())
    }
}
