//! [`Command`] for registering a played [`Game`].
//!
//! [`Game`]: crate::domain::Game

use common::operations::Insert;
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{game, season},
    infra::{api, api::Authorized, Api},
    Service,
};

use super::Command;

/// [`Command`] for registering a played [`Game`].
///
/// Its outcome is computed by the remote API out of the scores.
///
/// [`Game`]: crate::domain::Game
#[derive(Clone, Debug)]
pub struct CreateGame {
    /// ID of the [`Season`] the [`Game`] belongs to.
    ///
    /// [`Game`]: crate::domain::Game
    /// [`Season`]: crate::domain::Season
    pub season: season::Id,

    /// [`game::Opponent`] the team played against.
    pub opponent: game::Opponent,

    /// Runs scored by the team.
    pub team_score: game::Score,

    /// Runs scored by the [`game::Opponent`].
    pub opponent_score: game::Score,
}

impl<Net, Store> Command<CreateGame> for Service<Net, Store>
where
    Net: Api<
        Authorized<Insert<game::Draft>>,
        Ok = (),
        Err = Traced<api::Error>,
    >,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateGame) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateGame {
            season,
            opponent,
            team_score,
            opponent_score,
        } = cmd;

        let token = self
            .token()
            .await
            .ok_or(E::Unauthenticated)
            .map_err(tracerr::wrap!())?;

        log::info!(
            "Registering `Game` of `Season(id: {season})`: \
             {team_score}-{opponent_score} against {opponent}",
        );
        self.api()
            .execute(Authorized::new(
                token,
                Insert(game::Draft {
                    season_id: season,
                    team_score,
                    opposing_team_name: opponent,
                    opposing_team_score: opponent_score,
                }),
            ))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of [`CreateGame`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Api`] error.
    #[display("`Api` operation failed: {_0}")]
    Api(api::Error),

    /// No logged in [`User`].
    ///
    /// [`User`]: crate::domain::User
    #[display("Authentication required")]
    Unauthenticated,
}
