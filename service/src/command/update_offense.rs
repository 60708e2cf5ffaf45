//! [`Command`] for correcting a recorded offensive batting line of the
//! logged in player.

use common::operations::Update;
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{game, offense, season},
    infra::{api, api::Authorized, Api},
    Service,
};

use super::Command;

/// [`Command`] for replacing the [`offense::Line`] of an existing
/// [`offense::Record`] of the logged in player.
#[derive(Clone, Copy, Debug)]
pub struct UpdateOffense {
    /// ID of the [`offense::Record`] to update.
    pub id: offense::Id,

    /// ID of the [`Season`] the [`Game`] belongs to.
    ///
    /// [`Game`]: crate::domain::Game
    /// [`Season`]: crate::domain::Season
    pub season: season::Id,

    /// ID of the [`Game`].
    ///
    /// [`Game`]: crate::domain::Game
    pub game: game::Id,

    /// New [`offense::Line`].
    pub line: offense::Line,
}

impl<Net, Store> Command<UpdateOffense> for Service<Net, Store>
where
    Net: Api<
        Authorized<Update<offense::Record>>,
        Ok = (),
        Err = Traced<api::Error>,
    >,
{
    type Ok = offense::Record;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdateOffense,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateOffense {
            id,
            season,
            game,
            line,
        } = cmd;

        let (token, player) = self
            .credentials()
            .await
            .ok_or(E::Unauthenticated)
            .map_err(tracerr::wrap!())?;

        let record = offense::Record {
            id,
            season_id: season,
            game_id: game,
            player_id: player,
            line,
        };
        self.api()
            .execute(Authorized::new(token, Update(record.clone())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        log::info!("`offense::Record(id: {id})` updated");
        Ok(record)
    }
}

/// Error of [`UpdateOffense`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Api`] error.
    #[display("`Api` operation failed: {_0}")]
    Api(api::Error),

    /// No logged in player.
    #[display("Authentication required")]
    Unauthenticated,
}
