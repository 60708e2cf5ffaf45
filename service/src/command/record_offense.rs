//! [`Command`] for recording an offensive batting line of the logged in
//! player.

use common::operations::Insert;
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{game, offense, season},
    infra::{api, api::Authorized, Api},
    Service,
};

use super::Command;

/// [`Command`] for recording an [`offense::Line`] of the logged in player in
/// a [`Game`].
///
/// [`Game`]: crate::domain::Game
#[derive(Clone, Copy, Debug)]
pub struct RecordOffense {
    /// ID of the [`Season`] the [`Game`] belongs to.
    ///
    /// [`Game`]: crate::domain::Game
    /// [`Season`]: crate::domain::Season
    pub season: season::Id,

    /// ID of the [`Game`].
    ///
    /// [`Game`]: crate::domain::Game
    pub game: game::Id,

    /// [`offense::Line`] to record.
    pub line: offense::Line,
}

impl<Net, Store> Command<RecordOffense> for Service<Net, Store>
where
    Net: Api<
        Authorized<Insert<offense::Draft>>,
        Ok = (),
        Err = Traced<api::Error>,
    >,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: RecordOffense,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let RecordOffense { season, game, line } = cmd;

        let (token, player) = self
            .credentials()
            .await
            .ok_or(E::Unauthenticated)
            .map_err(tracerr::wrap!())?;

        log::info!(
            "Recording offense of `User(id: {player})` in `Game(id: {game})`",
        );
        self.api()
            .execute(Authorized::new(
                token,
                Insert(offense::Draft {
                    season_id: season,
                    game_id: game,
                    player_id: player,
                    line,
                }),
            ))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of [`RecordOffense`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Api`] error.
    #[display("`Api` operation failed: {_0}")]
    Api(api::Error),

    /// No logged in player.
    #[display("Authentication required")]
    Unauthenticated,
}
