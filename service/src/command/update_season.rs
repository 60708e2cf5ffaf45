//! [`Command`] for updating an existing [`Season`].

use common::operations::Update;
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{season, Season},
    infra::{api, api::Authorized, Api},
    Service,
};

use super::Command;

/// [`Command`] for updating an existing [`Season`].
#[derive(Clone, Debug)]
pub struct UpdateSeason {
    /// ID of the [`Season`] to update.
    pub id: season::Id,

    /// New [`season::Name`] of the [`Season`].
    pub name: season::Name,

    /// New [`season::StartDate`] of the [`Season`].
    pub starts_on: season::StartDate,
}

impl<Net, Store> Command<UpdateSeason> for Service<Net, Store>
where
    Net: Api<Authorized<Update<Season>>, Ok = (), Err = Traced<api::Error>>,
{
    type Ok = Season;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdateSeason,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateSeason {
            id,
            name,
            starts_on,
        } = cmd;

        let token = self
            .token()
            .await
            .ok_or(E::Unauthenticated)
            .map_err(tracerr::wrap!())?;

        let season = Season {
            id,
            name,
            starts_on,
        };
        self.api()
            .execute(Authorized::new(token, Update(season.clone())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        log::info!("`Season(id: {id})` updated");
        Ok(season)
    }
}

/// Error of [`UpdateSeason`] [`Command`] execution.
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
