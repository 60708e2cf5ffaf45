//! Login, logout and current player screens.

use derive_more::Debug;
use secrecy::SecretBox;
use service::{
    command::{self, login, logout},
    domain::user,
    query::CurrentSession,
    Command as _, Query as _,
};

use crate::{error, AsError, Error, Service};

/// Login screen.
#[derive(clap::Args, Debug)]
pub struct Login {
    /// Username or email.
    #[arg(short, long)]
    pub username: user::Login,

    /// Password.
    #[arg(short, long, env = "TOROS_PASSWORD", hide_env_values = true)]
    #[debug(skip)]
    pub password: user::Password,
}

impl Login {
    /// Logs in, persisting the new session.
    ///
    /// # Errors
    ///
    /// If the credentials are rejected or the session cannot be stored.
    pub async fn open(self, service: &Service) -> Result<String, Error> {
        let Self { username, password } = self;

        let session = service
            .execute(command::Login {
                username,
                password: SecretBox::new(Box::new(password)),
            })
            .await
            .map_err(AsError::into_error)?;
        Ok(format!("Welcome, {}!", session.user.username))
    }
}

/// Logs out, forgetting the stored session.
///
/// # Errors
///
/// If the stored session fails to be removed.
pub async fn logout(service: &Service) -> Result<String, Error> {
    service
        .execute(command::Logout)
        .await
        .map_err(AsError::into_error)?;
    Ok("Logged out".to_owned())
}

/// Describes the logged in player.
///
/// # Errors
///
/// If nobody is logged in.
pub async fn whoami(service: &Service) -> Result<String, Error> {
    let state = service
        .execute(CurrentSession)
        .await
        .unwrap_or_else(|e| match e {});
    let session = state
        .session()
        .ok_or_else(|| Error::from(error::Common::SessionRequired))?;

    let mut out = format!(
        "{} <{}> (id: {})",
        session.user.username, session.user.email, session.user.id,
    );
    if state.is_admin() {
        out.push_str("\nadministrator");
    }
    Ok(out)
}

impl AsError for login::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Api(e) => e.try_as_error(),
            Self::Authentication(message) => {
                Some(Error::new("AUTHENTICATION_FAILED", message.clone()))
            }
            Self::Storage(e) => e.try_as_error(),
            Self::Serialization(_) => None,
        }
    }
}

impl AsError for logout::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Storage(e) => e.try_as_error(),
        }
    }
}
