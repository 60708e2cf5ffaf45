//! File-backed [`Storage`] implementation.

use std::{collections::HashMap, io, path::PathBuf, sync::Arc};

use common::operations::{Delete, Insert, Select};
use tokio::{fs, sync::Mutex};
use tracerr::Traced;
use tracing as log;

use crate::infra::{
    storage::{self, Entry, Key},
    Storage,
};

/// [`Storage`] keeping values as a JSON object in a single file.
///
/// The file is readable and writable by its owner only (on Unix). A missing
/// file is treated as an empty [`Storage`].
#[derive(Clone, Debug)]
pub struct File {
    /// Path to the file.
    path: Arc<PathBuf>,

    /// Lock serializing read-modify-write cycles of this process.
    lock: Arc<Mutex<()>>,
}

impl File {
    /// Creates a new [`File`] storage located at the provided `path`.
    ///
    /// Nothing is touched until the first operation.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Arc::new(path.into()),
            lock: Arc::default(),
        }
    }

    /// Reads all the values stored in the file.
    async fn load(
        &self,
    ) -> Result<HashMap<String, String>, Traced<storage::Error>> {
        let bytes = match fs::read(self.path.as_ref()).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Ok(HashMap::new());
            }
            Err(e) => {
                return Err(tracerr::new!(storage::Error::from(e)));
            }
        };
        serde_json::from_slice(&bytes)
            .map_err(tracerr::from_and_wrap!(=> storage::Error))
    }

    /// Atomically replaces the file with the provided `values`.
    async fn store(
        &self,
        values: &HashMap<String, String>,
    ) -> Result<(), Traced<storage::Error>> {
        let dir = self.path.parent().filter(|d| !d.as_os_str().is_empty());
        if let Some(dir) = dir {
            fs::create_dir_all(dir)
                .await
                .map_err(tracerr::from_and_wrap!(=> storage::Error))?;
        }

        let json = serde_json::to_vec_pretty(values)
            .map_err(tracerr::from_and_wrap!(=> storage::Error))?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json)
            .await
            .map_err(tracerr::from_and_wrap!(=> storage::Error))?;
        #[cfg(unix)]
        {
            use std::{fs::Permissions, os::unix::fs::PermissionsExt as _};

            fs::set_permissions(&tmp, Permissions::from_mode(0o600))
                .await
                .map_err(tracerr::from_and_wrap!(=> storage::Error))?;
        }
        fs::rename(&tmp, self.path.as_ref())
            .await
            .map_err(tracerr::from_and_wrap!(=> storage::Error))?;

        log::trace!("session storage `{}` updated", self.path.display());
        Ok(())
    }

    /// Applies the provided `change` to the stored values, rewriting the
    /// file only if `change` reports any modification.
    async fn modify(
        &self,
        change: impl FnOnce(&mut HashMap<String, String>) -> bool,
    ) -> Result<(), Traced<storage::Error>> {
        let _guard = self.lock.lock().await;
        let mut values = self.load().await.map_err(tracerr::wrap!())?;
        if change(&mut values) {
            self.store(&values).await.map_err(tracerr::wrap!())?;
        }
        Ok(())
    }
}

impl Storage<Select<Key>> for File {
    type Ok = Option<String>;
    type Err = Traced<storage::Error>;

    async fn execute(
        &self,
        Select(key): Select<Key>,
    ) -> Result<Self::Ok, Self::Err> {
        let _guard = self.lock.lock().await;
        Ok(self
            .load()
            .await
            .map_err(tracerr::wrap!())?
            .remove(key.as_ref()))
    }
}

impl Storage<Insert<Entry>> for File {
    type Ok = ();
    type Err = Traced<storage::Error>;

    async fn execute(
        &self,
        Insert(Entry { key, value }): Insert<Entry>,
    ) -> Result<Self::Ok, Self::Err> {
        self.modify(|values| {
            let prev = values.insert(key.to_string(), value.clone());
            prev.as_ref() != Some(&value)
        })
        .await
        .map_err(tracerr::wrap!())
    }
}

impl Storage<Delete<Key>> for File {
    type Ok = ();
    type Err = Traced<storage::Error>;

    async fn execute(
        &self,
        Delete(key): Delete<Key>,
    ) -> Result<Self::Ok, Self::Err> {
        self.modify(|values| values.remove(key.as_ref()).is_some())
            .await
            .map_err(tracerr::wrap!())
    }
}

#[cfg(test)]
mod spec {
    use std::path::PathBuf;

    use common::operations::{Delete, Insert, Select};

    use crate::infra::{
        storage::{Entry, Key},
        Storage as _,
    };

    use super::File;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("toros-storage-{}-{name}", std::process::id()))
            .join("session.json")
    }

    #[tokio::test]
    async fn treats_missing_file_as_empty() {
        let storage = File::new(temp_path("missing"));

        assert_eq!(
            storage.execute(Select(Key::SessionToken)).await.unwrap(),
            None,
        );
        storage.execute(Delete(Key::UserData)).await.unwrap();
    }

    #[tokio::test]
    async fn persists_between_instances() {
        let path = temp_path("persist");
        File::new(&path)
            .execute(Insert(Entry::new(Key::UserRole, "A")))
            .await
            .unwrap();

        let storage = File::new(&path);
        assert_eq!(
            storage.execute(Select(Key::UserRole)).await.unwrap().as_deref(),
            Some("A"),
        );

        storage.execute(Delete(Key::UserRole)).await.unwrap();
        assert_eq!(storage.execute(Select(Key::UserRole)).await.unwrap(), None);

        let raw = std::fs::read_to_string(&path).unwrap();
        assert_eq!(raw.trim(), "{}");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn restricts_file_to_owner() {
        use std::os::unix::fs::PermissionsExt as _;

        let path = temp_path("mode");
        File::new(&path)
            .execute(Insert(Entry::new(Key::SessionToken, "h.p.s")))
            .await
            .unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[tokio::test]
    async fn reports_corrupted_file() {
        let path = temp_path("corrupted");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "not json").unwrap();

        assert!(File::new(&path)
            .execute(Select(Key::SessionToken))
            .await
            .is_err());
    }
}
