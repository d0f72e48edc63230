// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 Agora Elections
// See LICENSE.md for details

//! Session-scoped key/value persistence.
//!
//! The registration wizard writes its in-progress draft here after
//! every edit so a reload within the same browsing session resumes
//! where the voter left off. The contract is "survive a reload within
//! the session, evaporate otherwise"; the exact medium belongs to the
//! host.

use std::collections::BTreeMap;

use crate::error::Error;

/**
 * A session-scoped string store.
 *
 * Owned exclusively by its single writer; the pipeline never shares a
 * store between components.
 */
pub trait DraftStore {
    /// Reads the value stored under `key`, if any.
    fn read(&self, key: &str) -> Result<Option<String>, Error>;

    /// Writes `value` under `key`, replacing any previous value.
    fn write(&mut self, key: &str, value: &str) -> Result<(), Error>;

    /// Removes the value stored under `key`, if any.
    fn remove(&mut self, key: &str) -> Result<(), Error>;
}

/**
 * In-memory store with session semantics.
 *
 * Lives exactly as long as the owning value, which is the session
 * lifetime under a headless driver.
 */
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store with an existing entry, as a reloaded page would see.
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.entries.insert(key.to_string(), value.to_string());
        store
    }
}

impl DraftStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, Error> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), Error> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), Error> {
        self.entries.remove(key);
        Ok(())
    }
}
