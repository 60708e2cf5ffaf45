//! [`Command`] for logging the current [`User`] out.
//!
//! [`User`]: crate::domain::User

use common::operations::{Delete, Perform, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::user::{session, Session},
    infra::{
        api,
        storage::{self, Key},
        Api, Storage,
    },
    Service,
};

use super::Command;

/// [`Command`] for destroying the current [`Session`].
///
/// The remote API is notified on a best-effort basis. The stored [`Session`]
/// and the in-memory one are always cleared, even if the remote API is
/// unreachable.
///
/// The remote API is sent the stored [`session::Token`], or the in-memory
/// one if nothing is stored. So a [`GuardSession`] deleting an expired
/// stored token still notifies the remote API with the in-memory copy. No
/// request is made when there is no token at all.
///
/// [`GuardSession`]: super::GuardSession
#[derive(Clone, Copy, Debug, Default)]
pub struct Logout;

impl<Net, Store> Command<Logout> for Service<Net, Store>
where
    Net: Api<Perform<api::Logout>, Ok = (), Err = Traced<api::Error>>,
    Store: Storage<
            Select<Key>,
            Ok = Option<String>,
            Err = Traced<storage::Error>,
        > + Storage<Delete<Key>, Ok = (), Err = Traced<storage::Error>>,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(&self, _: Logout) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let stored = self
            .storage()
            .execute(Select(Key::SessionToken))
            .await
            .unwrap_or_else(|e| {
                log::warn!("Failed to read stored `session::Token`: {e}");
                None
            })
            .map(session::Token::new);
        let token = match stored {
            Some(token) => Some(token),
            None => self.token().await,
        };

        if let Some(token) = token {
            if let Err(e) =
                self.api().execute(Perform(api::Logout { token })).await
            {
                log::warn!("Remote logout failed: {e}");
            }
        }

        let mut failure = None;
        for key in Key::ALL {
            if let Err(e) = self.storage().execute(Delete(key)).await {
                log::error!("Failed to delete `{key}` from `Storage`: {e}");
                failure = failure.or(Some(e));
            }
        }

        let prev: Option<Session> = {
            let mut state = self.auth.write().await;
            state.loading = false;
            state.session.take()
        };
        if let Some(s) = prev {
            let id = s.user.id;
            log::info!("`User(id: {id})` logged out");
        }

        match failure {
            Some(e) => Err(e).map_err(tracerr::map_from_and_wrap!(=> E)),
            None => Ok(()),
        }
    }
}

/// Error of [`Logout`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Storage`] error.
    #[display("`Storage` operation failed: {_0}")]
    Storage(storage::Error),
}
