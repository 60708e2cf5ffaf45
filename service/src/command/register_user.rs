//! [`Command`] for registering a new [`User`].
//!
//! [`User`]: crate::domain::User

use common::operations::Perform;
use derive_more::{Display, Error, From};
use secrecy::{ExposeSecret as _, SecretBox};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::user,
    infra::{api, Api},
    Service,
};

use super::Command;

/// [`Command`] for registering a new player account.
///
/// Leaves the current [`Session`] untouched.
///
/// [`Session`]: user::Session
#[derive(Debug)]
pub struct RegisterUser {
    /// [`user::Username`] of the new account.
    pub username: user::Username,

    /// [`user::Email`] of the new account.
    pub email: user::Email,

    /// [`user::Password`] of the new account.
    pub password: SecretBox<user::Password>,
}

impl<Net, Store> Command<RegisterUser> for Service<Net, Store>
where
    Net: Api<
        Perform<api::Register>,
        Ok = serde_json::Value,
        Err = Traced<api::Error>,
    >,
{
    /// Response of the remote API, as is.
    type Ok = serde_json::Value;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: RegisterUser,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let RegisterUser {
            username,
            email,
            password,
        } = cmd;

        if !password.expose_secret().meets_policy() {
            return Err(tracerr::new!(E::WeakPassword));
        }

        let response = self
            .api()
            .execute(Perform(api::Register {
                username: username.clone(),
                email,
                password,
            }))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        log::info!("`User(username: {username})` registered");
        Ok(response)
    }
}

/// Error of [`RegisterUser`] [`Command`] execution.
#[derive(Debug, Display, Error)]
pub enum ExecutionError {
    /// [`Api`] error.
    #[display("`Api` operation failed: {_0}")]
    Api(api::Error),

    /// Remote API refused the registration.
    #[display("{_0}")]
    Registration(#[error(not(source))] String),

    /// [`user::Password`] is too short.
    #[display(
        "Password must be at least {} characters long",
        user::Password::MIN_LEN
    )]
    WeakPassword,
}

impl ExecutionError {
    /// Message of an [`ExecutionError::Registration`] when the remote API
    /// provides none.
    pub const FALLBACK_MESSAGE: &'static str = "Registration failed";
}

impl From<api::Error> for ExecutionError {
    fn from(e: api::Error) -> Self {
        if let api::Error::Rejected(rejection) = e {
            Self::Registration(
                rejection
                    .message
                    .unwrap_or_else(|| Self::FALLBACK_MESSAGE.into()),
            )
        } else {
            Self::Api(e)
        }
    }
}
