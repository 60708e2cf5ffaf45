//! [`Screen`]s of the CLI, one per subcommand.

pub mod games;
pub mod offense;
pub mod players;
pub mod seasons;
pub mod session;
pub mod stats;

use clap::Subcommand;
use service::{
    command::{Access, GuardSession, Redirect},
    Command as _,
};
use tracing as log;

use crate::{error, Error, Service};

pub use self::{
    games::Games, offense::Offense, players::Players, seasons::Seasons,
    session::Login, stats::Stats,
};

/// Screen of the application activated by a CLI invocation.
#[derive(Debug, Subcommand)]
pub enum Screen {
    /// Logs in with username (or email) and password.
    Login(Login),

    /// Logs out, forgetting the stored session.
    Logout,

    /// Shows the logged in player.
    Whoami,

    /// Manages players of the team.
    #[command(subcommand)]
    Players(Players),

    /// Lists and manages seasons.
    #[command(subcommand)]
    Seasons(Seasons),

    /// Lists and registers games of a season.
    #[command(subcommand)]
    Games(Games),

    /// Shows and records offensive data of the logged in player.
    #[command(subcommand)]
    Offense(Offense),

    /// Shows offensive statistics of a season.
    Stats(Stats),
}

impl Screen {
    /// Indicates whether this [`Screen`] requires a valid session to be
    /// opened.
    #[must_use]
    pub fn is_guarded(&self) -> bool {
        match self {
            Self::Login(_) | Self::Logout | Self::Stats(_) => false,
            Self::Whoami | Self::Players(_) | Self::Offense(_) => true,
            Self::Seasons(s) => s.is_guarded(),
            Self::Games(g) => g.is_guarded(),
        }
    }

    /// Opens this [`Screen`], returning the text to show on success.
    ///
    /// Guarded [`Screen`]s check the stored session first and are never
    /// opened with an invalid one.
    ///
    /// # Errors
    ///
    /// With an [`Error`] to be alerted to the user.
    pub async fn open(self, service: &Service) -> Result<String, Error> {
        if self.is_guarded() {
            let access = service
                .execute(GuardSession)
                .await
                .unwrap_or_else(|e| match e {});
            if let Access::Denied(Redirect { to, replace }) = access {
                log::info!("redirected to `{to}` screen (replace: {replace})");
                return Err(error::Common::SessionRequired.into());
            }
        }

        match self {
            Self::Login(login) => login.open(service).await,
            Self::Logout => session::logout(service).await,
            Self::Whoami => session::whoami(service).await,
            Self::Players(p) => p.open(service).await,
            Self::Seasons(s) => s.open(service).await,
            Self::Games(g) => g.open(service).await,
            Self::Offense(o) => o.open(service).await,
            Self::Stats(s) => s.open(service).await,
        }
    }
}
