//! [`Command`] for guarding a screen behind a valid [`Session`].
//!
//! [`Session`]: crate::domain::user::Session

use std::convert::Infallible;

use common::operations::{Delete, Select};
use tracerr::Traced;
use tracing as log;

use crate::{
    command::{logout, Logout},
    domain::user::session,
    infra::{
        storage::{self, Key},
        Storage,
    },
    Service,
};

use super::Command;

/// [`Command`] checking the stored [`session::Token`] on a guarded screen
/// activation.
///
/// This check is advisory only: it never replaces authorization performed by
/// the remote API on every request.
#[derive(Clone, Copy, Debug, Default)]
pub struct GuardSession;

/// Outcome of a [`GuardSession`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Access {
    /// Guarded screen may be shown.
    Granted,

    /// Guarded screen must not be shown, navigation should follow the
    /// [`Redirect`] instead.
    Denied(Redirect),
}

impl Access {
    /// Indicates whether this [`Access`] is [`Access::Granted`].
    #[must_use]
    pub fn is_granted(self) -> bool {
        matches!(self, Self::Granted)
    }
}

/// Navigation to be performed instead of showing a guarded screen.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Redirect {
    /// [`Screen`] to navigate to.
    pub to: Screen,

    /// Indicator whether the current navigation entry must be replaced, so
    /// going back doesn't return to the guarded screen.
    pub replace: bool,
}

/// Screen of the application a [`Redirect`] may lead to.
#[derive(
    Clone, Copy, Debug, Eq, PartialEq, strum::AsRefStr, strum::Display,
)]
#[strum(serialize_all = "snake_case")]
pub enum Screen {
    /// Home screen.
    Home,

    /// Login screen.
    Login,
}

impl<Net, Store> Command<GuardSession> for Service<Net, Store>
where
    Store: Storage<
            Select<Key>,
            Ok = Option<String>,
            Err = Traced<storage::Error>,
        > + Storage<Delete<Key>, Ok = (), Err = Traced<storage::Error>>,
    Self: Command<Logout, Ok = (), Err = Traced<logout::ExecutionError>>,
{
    type Ok = Access;
    type Err = Infallible;

    async fn execute(&self, _: GuardSession) -> Result<Self::Ok, Self::Err> {
        let token = self
            .storage()
            .execute(Select(Key::SessionToken))
            .await
            .unwrap_or_else(|e| {
                log::warn!("Failed to read stored `session::Token`: {e}");
                None
            });
        if session::is_valid(token.as_deref()) {
            return Ok(Access::Granted);
        }

        log::info!("`session::Token` is missing or expired, logging out");
        if let Err(e) = self.storage().execute(Delete(Key::SessionToken)).await
        {
            log::error!("Failed to delete stored `session::Token`: {e}");
        }
        if let Err(e) = self.execute(Logout).await {
            log::error!("Forced logout failed: {e}");
        }

        Ok(Access::Denied(Redirect {
            to: Screen::Login,
            replace: true,
        }))
    }
}
