//! In-memory [`Storage`] implementation.

use std::{collections::HashMap, sync::Arc};

use common::operations::{Delete, Insert, Select};
use tokio::sync::Mutex;
use tracerr::Traced;

use crate::infra::{
    storage::{self, Entry, Key},
    Storage,
};

/// [`Storage`] keeping values in memory only.
///
/// Never fails. Clones share the same values.
#[derive(Clone, Debug, Default)]
pub struct Memory(Arc<Mutex<HashMap<Key, String>>>);

impl Memory {
    /// Creates a new empty [`Memory`] storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of all the values currently stored.
    pub async fn snapshot(&self) -> HashMap<Key, String> {
        self.0.lock().await.clone()
    }
}

impl Storage<Select<Key>> for Memory {
    type Ok = Option<String>;
    type Err = Traced<storage::Error>;

    async fn execute(
        &self,
        Select(key): Select<Key>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self.0.lock().await.get(&key).cloned())
    }
}

impl Storage<Insert<Entry>> for Memory {
    type Ok = ();
    type Err = Traced<storage::Error>;

    async fn execute(
        &self,
        Insert(Entry { key, value }): Insert<Entry>,
    ) -> Result<Self::Ok, Self::Err> {
        drop(self.0.lock().await.insert(key, value));
        Ok(())
    }
}

impl Storage<Delete<Key>> for Memory {
    type Ok = ();
    type Err = Traced<storage::Error>;

    async fn execute(
        &self,
        Delete(key): Delete<Key>,
    ) -> Result<Self::Ok, Self::Err> {
        drop(self.0.lock().await.remove(&key));
        Ok(())
    }
}
