//! [`Command`] for creating a new [`Season`].

use common::operations::Insert;
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use crate::domain::Season;
use crate::{
    domain::season,
    infra::{api, api::Authorized, Api},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Season`].
#[derive(Clone, Debug)]
pub struct CreateSeason {
    /// [`season::Name`] of the new [`Season`].
    pub name: season::Name,

    /// [`season::StartDate`] of the new [`Season`].
    pub starts_on: season::StartDate,
}

impl<Net, Store> Command<CreateSeason> for Service<Net, Store>
where
    Net: Api<
        Authorized<Insert<season::Draft>>,
        Ok = (),
        Err = Traced<api::Error>,
    >,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateSeason,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateSeason { name, starts_on } = cmd;

        let token = self
            .token()
            .await
            .ok_or(E::Unauthenticated)
            .map_err(tracerr::wrap!())?;

        log::info!("Creating `Season(name: {name})` starting on {starts_on}");
        self.api()
            .execute(Authorized::new(
                token,
                Insert(season::Draft { name, starts_on }),
            ))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of [`CreateSeason`] [`Command`] execution.
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
