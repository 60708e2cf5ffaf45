//! [`Query`] collection related to the multiple players.

use common::operations::{By, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    infra::{api, api::Authorized, Api},
    read, Service,
};

use super::Query;

/// Queries all the registered players, on behalf of the logged in [`User`].
///
/// [`User`]: crate::domain::User
#[derive(Clone, Copy, Debug, Default)]
pub struct List;

impl<Net, Store> Query<List> for Service<Net, Store>
where
    Net: Api<
        Authorized<Select<By<Vec<read::Player>, ()>>>,
        Ok = Vec<read::Player>,
        Err = Traced<api::Error>,
    >,
{
    type Ok = Vec<read::Player>;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, _: List) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let token = self
            .token()
            .await
            .ok_or(E::Unauthenticated)
            .map_err(tracerr::wrap!())?;

        self.api()
            .execute(Authorized::new(token, Select(By::new(()))))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of [`List`] [`Query`] execution.
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
