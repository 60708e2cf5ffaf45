//! [`Query`] collection related to the multiple [`Game`]s.
//!
//! [`Game`]: crate::domain::Game

use std::cmp::Reverse;

use common::operations::{By, Select};
use derive_more::From;
use tracerr::Traced;

use crate::{
    domain::season,
    infra::{
        api::{self, MaybeAuthorized},
        Api,
    },
    read, Service,
};

use super::Query;

/// Queries [`Game`]s of a [`Season`], the most recent first.
///
/// [`Game`]: crate::domain::Game
/// [`Season`]: crate::domain::Season
#[derive(Clone, Copy, Debug, From)]
pub struct BySeason(pub season::Id);

impl<Net, Store> Query<BySeason> for Service<Net, Store>
where
    Net: Api<
        MaybeAuthorized<Select<By<read::game::List, season::Id>>>,
        Ok = read::game::List,
        Err = Traced<api::Error>,
    >,
{
    type Ok = read::game::List;
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        BySeason(season): BySeason,
    ) -> Result<Self::Ok, Self::Err> {
        let token = self.token().await;
        let mut list = self
            .api()
            .execute(MaybeAuthorized::new(token, Select(By::new(season))))
            .await
            .map_err(tracerr::wrap!())?;
        list.games.sort_by_key(|g| Reverse(g.id));
        Ok(list)
    }
}
