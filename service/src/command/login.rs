//! [`Command`] for logging a [`User`] in.

use common::operations::{Delete, Insert, Perform, Select};
use derive_more::{Display, Error, From};
use secrecy::SecretBox;
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{
        user::{self, Session},
        User,
    },
    infra::{
        api::{self, LoginResponse},
        storage::{self, Entry, Key},
        Api, Storage,
    },
    Service,
};

use super::Command;

/// [`Command`] for logging a [`User`] in with credentials.
///
/// On success, the new [`Session`] is persisted in the secure [`Storage`]
/// and becomes the current one. On failure, the previous [`Session`] (if
/// any) is left untouched.
#[derive(Debug)]
pub struct Login {
    /// [`user::Login`] of the [`User`].
    pub username: user::Login,

    /// [`user::Password`] of the [`User`].
    pub password: SecretBox<user::Password>,
}

impl<Net, Store> Command<Login> for Service<Net, Store>
where
    Net: Api<
        Perform<api::Login>,
        Ok = LoginResponse,
        Err = Traced<api::Error>,
    >,
    Store: Storage<
            Select<Key>,
            Ok = Option<String>,
            Err = Traced<storage::Error>,
        > + Storage<Insert<Entry>, Ok = (), Err = Traced<storage::Error>>
        + Storage<Delete<Key>, Ok = (), Err = Traced<storage::Error>>,
{
    type Ok = Session;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: Login) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let Login { username, password } = cmd;

        let LoginResponse {
            message,
            token,
            user,
        } = self
            .api()
            .execute(Perform(api::Login { username, password }))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        let session = Session::new(token, user);

        let user_data = serde_json::to_string(&session.user)
            .map_err(tracerr::from_and_wrap!(=> E))?;
        let entries = [
            (Key::SessionToken, Some(session.token.as_ref().to_owned())),
            (Key::UserData, Some(user_data)),
            (Key::UserRole, session.role.map(|r| r.to_string())),
            (Key::UserSuperuser, session.superuser.map(|s| s.to_string())),
        ];

        let mut previous = Vec::with_capacity(Key::ALL.len());
        for key in Key::ALL {
            let value = self
                .storage()
                .execute(Select(key))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?;
            previous.push((key, value));
        }
        if let Err(e) = persist(self.storage(), entries).await {
            // Keys are written one by one, so a partial write must not
            // survive as a mix of two sessions.
            for (key, value) in previous {
                if let Err(e) = persist(self.storage(), [(key, value)]).await {
                    log::error!("Failed to restore `{key}` in `Storage`: {e}");
                }
            }
            return Err(e).map_err(tracerr::map_from_and_wrap!(=> E));
        }

        {
            let mut state = self.auth.write().await;
            state.session = Some(session.clone());
            state.loading = false;
        }

        let id = session.user.id;
        log::info!(
            "`User(id: {id})` logged in{}",
            message.map(|m| format!(": {m}")).unwrap_or_default(),
        );
        Ok(session)
    }
}

/// Writes the provided values into the [`Storage`], deleting the [`Key`]s
/// having no value.
async fn persist<S>(
    storage: &S,
    entries: impl IntoIterator<Item = (Key, Option<String>)>,
) -> Result<(), Traced<storage::Error>>
where
    S: Storage<Insert<Entry>, Ok = (), Err = Traced<storage::Error>>
        + Storage<Delete<Key>, Ok = (), Err = Traced<storage::Error>>,
{
    for (key, value) in entries {
        if let Some(value) = value {
            storage
                .execute(Insert(Entry::new(key, value)))
                .await
                .map_err(tracerr::wrap!())?;
        } else {
            storage.execute(Delete(key)).await.map_err(tracerr::wrap!())?;
        }
    }
    Ok(())
}

/// Error of [`Login`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Api`] error.
    #[display("`Api` operation failed: {_0}")]
    #[from(ignore)]
    Api(api::Error),

    /// Remote API rejected the provided credentials.
    #[display("{_0}")]
    #[from(ignore)]
    Authentication(#[error(not(source))] String),

    /// [`Storage`] error.
    #[display("`Storage` operation failed: {_0}")]
    Storage(storage::Error),

    /// [`User`] cannot be serialized for [`Storage`].
    #[display("Failed to serialize `User`: {_0}")]
    Serialization(serde_json::Error),
}

impl ExecutionError {
    /// Message of an [`ExecutionError::Authentication`] when the remote API
    /// provides none.
    pub const FALLBACK_MESSAGE: &'static str = "Login failed";
}

impl From<api::Error> for ExecutionError {
    fn from(e: api::Error) -> Self {
        if let api::Error::Rejected(rejection) = e {
            Self::Authentication(
                rejection
                    .message
                    .unwrap_or_else(|| Self::FALLBACK_MESSAGE.into()),
            )
        } else {
            Self::Api(e)
        }
    }
}

#[cfg(test)]
mod spec {
    use http::StatusCode;

    use crate::infra::api::{self, Rejection};

    use super::ExecutionError;

    #[test]
    fn rejection_becomes_authentication_error() {
        let err = ExecutionError::from(api::Error::Rejected(Rejection {
            status: StatusCode::UNAUTHORIZED,
            message: Some("Invalid credentials".into()),
        }));

        assert_eq!(err.to_string(), "Invalid credentials");
    }

    #[test]
    fn falls_back_to_generic_message() {
        let err = ExecutionError::from(api::Error::Rejected(Rejection {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: None,
        }));

        assert!(matches!(err, ExecutionError::Authentication(_)));
        assert_eq!(err.to_string(), "Login failed");
    }

    #[test]
    fn keeps_other_api_errors() {
        let json = serde_json::from_str::<u8>("x").unwrap_err();
        let err = ExecutionError::from(api::Error::Malformed(json));

        assert!(matches!(err, ExecutionError::Api(_)));
    }
}
