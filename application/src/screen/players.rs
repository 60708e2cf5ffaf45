//! Player management screens.

use clap::Subcommand;
use derive_more::Debug;
use itertools::Itertools as _;
use secrecy::SecretBox;
use service::{
    command::{self, register_user},
    domain::user,
    query::{self, users},
    Command as _, Query as _,
};

use crate::{error, AsError, Error, Service};

/// Player management screens.
#[derive(Debug, Subcommand)]
pub enum Players {
    /// Registers a new player.
    Register(Register),

    /// Lists registered players.
    List,
}

impl Players {
    /// Opens the selected screen.
    ///
    /// # Errors
    ///
    /// If the remote API rejects the request.
    pub async fn open(self, service: &Service) -> Result<String, Error> {
        match self {
            Self::Register(r) => r.open(service).await,
            Self::List => list(service).await,
        }
    }
}

/// New player registration form.
#[derive(clap::Args, Debug)]
pub struct Register {
    /// Username of the new player.
    #[arg(short, long)]
    pub username: user::Username,

    /// Email of the new player.
    #[arg(short, long)]
    pub email: user::Email,

    /// Password of the new player.
    #[arg(short, long, env = "TOROS_NEW_PASSWORD", hide_env_values = true)]
    #[debug(skip)]
    pub password: user::Password,
}

impl Register {
    /// Submits the registration form.
    ///
    /// # Errors
    ///
    /// If the password is too weak or the remote API rejects the player.
    pub async fn open(self, service: &Service) -> Result<String, Error> {
        let Self {
            username,
            email,
            password,
        } = self;

        let response = service
            .execute(command::RegisterUser {
                username,
                email,
                password: SecretBox::new(Box::new(password)),
            })
            .await
            .map_err(AsError::into_error)?;
        Ok(response
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or("Player registered")
            .to_owned())
    }
}

async fn list(service: &Service) -> Result<String, Error> {
    let players = service
        .execute(query::users::List)
        .await
        .map_err(AsError::into_error)?;
    if players.is_empty() {
        return Ok("No players registered yet".to_owned());
    }

    Ok(players
        .iter()
        .map(|p| {
            format!(
                "{:>5}  {:<24}  {}",
                p.id,
                p.username,
                p.email
                    .as_ref()
                    .map_or_else(|| "-".to_owned(), ToString::to_string),
            )
        })
        .join("\n"))
}

impl AsError for register_user::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Api(e) => e.try_as_error(),
            Self::Registration(message) => {
                Some(Error::new("REGISTRATION_FAILED", message.clone()))
            }
            Self::WeakPassword => {
                Some(Error::new("WEAK_PASSWORD", self.to_string()))
            }
        }
    }
}

impl AsError for users::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Api(e) => e.try_as_error(),
            Self::Unauthenticated => {
                Some(error::Common::SessionRequired.into())
            }
        }
    }
}
