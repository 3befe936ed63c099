//! In-memory persistence for the business modules.
//!
//! Each [`Table`] is a `Uuid`-keyed map behind an async `RwLock`. Clones share
//! the same rows, so the [`Store`] can live in `AppState` and be cloned into
//! every handler.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

use crate::modules::content::model::Content;
use crate::modules::course::model::Course;
use crate::modules::users::model::UserRecord;

#[derive(Debug)]
pub struct Table<T> {
    rows: Arc<RwLock<HashMap<Uuid, T>>>,
}

impl<T> Clone for Table<T> {
    fn clone(&self) -> Self {
        Self {
            rows: Arc::clone(&self.rows),
        }
    }
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl<T: Clone> Table<T> {
    pub async fn insert(&self, id: Uuid, row: T) -> T {
        self.rows.write().await.insert(id, row.clone());
        row
    }

    pub async fn get(&self, id: Uuid) -> Option<T> {
        self.rows.read().await.get(&id).cloned()
    }

    /// Applies `f` to the row and returns the updated copy.
    pub async fn update<F>(&self, id: Uuid, f: F) -> Option<T>
    where
        F: FnOnce(&mut T),
    {
        let mut rows = self.rows.write().await;
        let row = rows.get_mut(&id)?;
        f(row);
        Some(row.clone())
    }

    pub async fn remove(&self, id: Uuid) -> Option<T> {
        self.rows.write().await.remove(&id)
    }

    pub async fn all(&self) -> Vec<T> {
        self.rows.read().await.values().cloned().collect()
    }

    pub async fn filter<P>(&self, predicate: P) -> Vec<T>
    where
        P: Fn(&T) -> bool,
    {
        self.rows
            .read()
            .await
            .values()
            .filter(|row| predicate(row))
            .cloned()
            .collect()
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }

    /// Read lock for multi-row checks.
    pub async fn read(&self) -> RwLockReadGuard<'_, HashMap<Uuid, T>> {
        self.rows.read().await
    }

    /// Write lock for check-then-write sequences that must not interleave.
    pub async fn write(&self) -> RwLockWriteGuard<'_, HashMap<Uuid, T>> {
        self.rows.write().await
    }
}

#[derive(Debug, Clone, Default)]
pub struct Store {
    pub contents: Table<Content>,
    pub courses: Table<Course>,
    pub users: Table<UserRecord>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }
}
