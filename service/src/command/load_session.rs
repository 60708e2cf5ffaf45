//! [`Command`] for loading the stored [`Session`].

use std::convert::Infallible;

use common::operations::Select;
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    auth,
    domain::{
        user::{session, Role, Session, Superuser},
        User,
    },
    infra::{
        storage::{self, Key},
        Storage,
    },
    Service,
};

use super::Command;

/// [`Command`] for hydrating the [`auth::State`] out of the secure
/// [`Storage`].
///
/// Effective once per [`Service`] lifetime: subsequent executions just return
/// the current [`auth::State`].
#[derive(Clone, Copy, Debug, Default)]
pub struct LoadSession;

impl<Net, Store> Command<LoadSession> for Service<Net, Store>
where
    Store: Storage<
        Select<Key>,
        Ok = Option<String>,
        Err = Traced<storage::Error>,
    >,
{
    type Ok = auth::State;
    type Err = Infallible;

    async fn execute(&self, _: LoadSession) -> Result<Self::Ok, Self::Err> {
        _ = self
            .loaded
            .get_or_init(|| async {
                let session = read_session(self.storage())
                    .await
                    .unwrap_or_else(|e| {
                        log::warn!("Failed to load stored `Session`: {e}");
                        None
                    });
                if let Some(s) = &session {
                    let id = s.user.id;
                    log::debug!("Restored `Session` of `User(id: {id})`");
                }

                let mut state = self.auth.write().await;
                state.session = session;
                state.loading = false;
            })
            .await;

        Ok(self.auth.read().await.clone())
    }
}

/// Reads a [`Session`] out of the provided [`Storage`].
///
/// [`None`] is returned if there is no token or no [`User`] stored.
async fn read_session<S>(
    storage: &S,
) -> Result<Option<Session>, Traced<ExecutionError>>
where
    S: Storage<
        Select<Key>,
        Ok = Option<String>,
        Err = Traced<storage::Error>,
    >,
{
    use ExecutionError as E;

    let read = |key: Key| async move {
        storage
            .execute(Select(key))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    };

    let (Some(token), Some(user)) =
        (read(Key::SessionToken).await?, read(Key::UserData).await?)
    else {
        return Ok(None);
    };
    let user = serde_json::from_str::<User>(&user)
        .map_err(tracerr::from_and_wrap!(=> E))?;

    let role = read(Key::UserRole)
        .await?
        .and_then(|r| Role::parse(&r))
        .or(user.role);
    let superuser = read(Key::UserSuperuser)
        .await?
        .and_then(|s| Superuser::parse(&s))
        .or(user.superuser);

    Ok(Some(Session {
        token: session::Token::new(token),
        user,
        role,
        superuser,
    }))
}

/// Error of reading a stored [`Session`].
#[derive(Debug, Display, Error, From)]
enum ExecutionError {
    /// [`Storage`] error.
    #[display("`Storage` operation failed: {_0}")]
    Storage(storage::Error),

    /// Stored [`User`] data cannot be parsed.
    #[display("Stored `User` data is malformed: {_0}")]
    MalformedUser(serde_json::Error),
}

#[cfg(test)]
mod spec {
    use std::io;

    use common::operations::{Insert, Select};
    use tracerr::Traced;

    use crate::{
        command::LoadSession,
        infra::{
            storage::{self, Entry, Key, Memory},
            Storage,
        },
        Command as _, Service,
    };

    /// [`Storage`] failing every read.
    #[derive(Clone, Copy, Debug)]
    struct Unreadable;

    impl Storage<Select<Key>> for Unreadable {
        type Ok = Option<String>;
        type Err = Traced<storage::Error>;

        async fn execute(&self, _: Select<Key>) -> Result<Self::Ok, Self::Err> {
            Err(tracerr::new!(storage::Error::Io(io::Error::other(
                "permission denied",
            ))))
        }
    }

    async fn storage(entries: &[(Key, &str)]) -> Memory {
        let storage = Memory::new();
        for (key, value) in entries {
            storage
                .execute(Insert(Entry::new(*key, *value)))
                .await
                .unwrap();
        }
        storage
    }

    const USER: &str = r#"{"id":7,"username":"ana","email":"a@x.com"}"#;

    #[tokio::test]
    async fn starts_loading() {
        let service = Service::new((), Memory::new());

        assert!(service.auth.read().await.is_loading());
    }

    #[tokio::test]
    async fn restores_stored_session() {
        let storage = storage(&[
            (Key::SessionToken, "h.p.s"),
            (Key::UserData, USER),
            (Key::UserRole, "A"),
            (Key::UserSuperuser, "N"),
        ])
        .await;
        let service = Service::new((), storage);

        let state = service.execute(LoadSession).await.unwrap();

        assert!(!state.is_loading());
        assert!(state.is_logged_in());
        assert_eq!(state.token().unwrap().as_ref(), "h.p.s");
        assert_eq!(i64::from(state.user().unwrap().id), 7);
        assert!(state.role().unwrap().is_admin());
        assert!(!state.superuser().unwrap().is_granted());
    }

    #[tokio::test]
    async fn requires_both_token_and_user() {
        for entries in [
            &[(Key::SessionToken, "h.p.s")][..],
            &[(Key::UserData, USER)][..],
            &[][..],
        ] {
            let service = Service::new((), storage(entries).await);

            let state = service.execute(LoadSession).await.unwrap();

            assert!(!state.is_loading());
            assert!(!state.is_logged_in());
        }
    }

    #[tokio::test]
    async fn treats_storage_failure_as_no_session() {
        let service = Service::new((), Unreadable);

        let state = service.execute(LoadSession).await.unwrap();

        assert!(!state.is_logged_in());
        assert!(!state.is_loading());
    }

    #[tokio::test]
    async fn ignores_malformed_user() {
        let storage = storage(&[
            (Key::SessionToken, "h.p.s"),
            (Key::UserData, "{not json"),
        ])
        .await;
        let service = Service::new((), storage);

        let state = service.execute(LoadSession).await.unwrap();

        assert!(!state.is_loading());
        assert!(!state.is_logged_in());
    }

    #[tokio::test]
    async fn runs_once() {
        let storage = Memory::new();
        let service = Service::new((), storage.clone());

        assert!(!service.execute(LoadSession).await.unwrap().is_logged_in());

        storage
            .execute(Insert(Entry::new(Key::SessionToken, "h.p.s")))
            .await
            .unwrap();
        storage
            .execute(Insert(Entry::new(Key::UserData, USER)))
            .await
            .unwrap();

        assert!(!service.execute(LoadSession).await.unwrap().is_logged_in());
    }
}
