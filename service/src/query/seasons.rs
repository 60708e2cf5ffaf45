//! [`Query`] collection related to the multiple [`Season`]s.

use std::cmp::Reverse;

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    domain::Season,
    infra::{
        api::{self, MaybeAuthorized},
        Api,
    },
    Service,
};

use super::Query;

/// Queries all the [`Season`]s, the most recently started first.
#[derive(Clone, Copy, Debug, Default)]
pub struct List;

impl<Net, Store> Query<List> for Service<Net, Store>
where
    Net: Api<
        MaybeAuthorized<Select<By<Vec<Season>, ()>>>,
        Ok = Vec<Season>,
        Err = Traced<api::Error>,
    >,
{
    type Ok = Vec<Season>;
    type Err = Traced<api::Error>;

    async fn execute(&self, _: List) -> Result<Self::Ok, Self::Err> {
        let token = self.token().await;
        let mut seasons = self
            .api()
            .execute(MaybeAuthorized::new(token, Select(By::new(()))))
            .await
            .map_err(tracerr::wrap!())?;
        seasons.sort_by_key(|s| Reverse((s.starts_on, s.id)));
        Ok(seasons)
    }
}
