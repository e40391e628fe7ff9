// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! In-memory store used by tests, with failure injection and request
//! counters.

use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
};

use crate::{
    model::{FavouriteRecord, UserId},
    store::{FavouritesStore, StoreError},
};

#[derive(Default)]
pub(crate) struct MemoryStore {
    favourites: Mutex<HashMap<UserId, Vec<FavouriteRecord>>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    reads: AtomicUsize,
    writes: AtomicUsize,
}

impl MemoryStore {
    pub(crate) fn with_favourites(user: &UserId, records: Vec<FavouriteRecord>) -> Self {
        let store = Self::default();
        store.favourites.lock().unwrap().insert(user.clone(), records);
        store
    }

    pub(crate) fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub(crate) fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub(crate) fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub(crate) fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_write(&self) -> Result<(), StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("write rejected".into()));
        }
        Ok(())
    }
}

impl FavouritesStore for MemoryStore {
    fn fetch_favourites(&self, user: &UserId) -> Result<Vec<FavouriteRecord>, StoreError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("connection refused".into()));
        }

        let favourites = self.favourites.lock().unwrap();
        Ok(favourites.get(user).cloned().unwrap_or_default())
    }

    fn is_favourite(&self, user: &UserId, key: &str) -> Result<bool, StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("connection refused".into()));
        }

        let favourites = self.favourites.lock().unwrap();
        Ok(favourites
            .get(user)
            .is_some_and(|records| records.iter().any(|r| r.key == key)))
    }

    fn add_favourite(&self, user: &UserId, record: &FavouriteRecord) -> Result<(), StoreError> {
        self.check_write()?;

        let mut favourites = self.favourites.lock().unwrap();
        let records = favourites.entry(user.clone()).or_default();
        match records.iter_mut().find(|r| r.key == record.key) {
            Some(existing) => *existing = record.clone(),
            None => records.push(record.clone()),
        }

        Ok(())
    }

    fn remove_favourite(&self, user: &UserId, key: &str) -> Result<(), StoreError> {
        self.check_write()?;

        let mut favourites = self.favourites.lock().unwrap();
        if let Some(records) = favourites.get_mut(user) {
            records.retain(|r| r.key != key);
        }

        Ok(())
    }
}

impl FavouritesStore for Arc<MemoryStore> {
    fn fetch_favourites(&self, user: &UserId) -> Result<Vec<FavouriteRecord>, StoreError> {
        self.as_ref().fetch_favourites(user)
    }

    fn is_favourite(&self, user: &UserId, key: &str) -> Result<bool, StoreError> {
        self.as_ref().is_favourite(user, key)
    }

    fn add_favourite(&self, user: &UserId, record: &FavouriteRecord) -> Result<(), StoreError> {
        self.as_ref().add_favourite(user, record)
    }

    fn remove_favourite(&self, user: &UserId, key: &str) -> Result<(), StoreError> {
        self.as_ref().remove_favourite(user, key)
    }
}
