//! Game screens.

use clap::Subcommand;
use service::{
    command::{self, create_game},
    domain::{game, season, Game},
    query, Command as _, Query as _,
};

use super::seasons;
use crate::{error, AsError, Error, Service};

/// Game screens.
#[derive(Debug, Subcommand)]
pub enum Games {
    /// Lists games of a season, the most recent first.
    List {
        /// ID of the season (the newest one by default).
        #[arg(long)]
        season: Option<season::Id>,
    },

    /// Registers a played game.
    Create {
        /// ID of the season (the newest one by default).
        #[arg(long)]
        season: Option<season::Id>,

        /// Name of the opposing team.
        #[arg(long)]
        opponent: game::Opponent,

        /// Runs scored by the team.
        #[arg(long)]
        team_score: game::Score,

        /// Runs scored by the opposing team.
        #[arg(long)]
        opponent_score: game::Score,
    },
}

impl Games {
    /// Indicates whether the selected screen changes data.
    #[must_use]
    pub fn is_guarded(&self) -> bool {
        matches!(self, Self::Create { .. })
    }

    /// Opens the selected screen.
    ///
    /// # Errors
    ///
    /// If the remote API rejects the request.
    pub async fn open(self, service: &Service) -> Result<String, Error> {
        match self {
            Self::List { season } => {
                let season = seasons::or_newest(service, season).await?;
                let list = service
                    .execute(query::games::BySeason(season))
                    .await
                    .map_err(AsError::into_error)?;

                let mut out = list.season.map_or_else(
                    || format!("Season {season}"),
                    |s| format!("{} ({})", s.name, s.starts_on),
                );
                if list.games.is_empty() {
                    out.push_str("\nNo games played yet");
                }
                for g in &list.games {
                    out.push('\n');
                    out.push_str(&describe(g));
                }
                Ok(out)
            }
            Self::Create {
                season,
                opponent,
                team_score,
                opponent_score,
            } => {
                let season = seasons::or_newest(service, season).await?;
                service
                    .execute(command::CreateGame {
                        season,
                        opponent: opponent.clone(),
                        team_score,
                        opponent_score,
                    })
                    .await
                    .map_err(AsError::into_error)?;
                Ok(format!(
                    "Game against `{opponent}` registered \
                     ({team_score}-{opponent_score})",
                ))
            }
        }
    }
}

fn describe(game: &Game) -> String {
    format!(
        "{:>5}  {}  {}-{}  vs {}",
        game.id,
        if game.win { "W" } else { "L" },
        game.team_score,
        game.opposing_team_score,
        game.opposing_team_name,
    )
}

impl AsError for create_game::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Api(e) => e.try_as_error(),
            Self::Unauthenticated => {
                Some(error::Common::SessionRequired.into())
            }
        }
    }
}
