//! [`Query`] of the current [`auth::State`].

use std::convert::Infallible;

use crate::{auth, Service};

use super::Query;

/// Queries a snapshot of the current [`auth::State`].
#[derive(Clone, Copy, Debug, Default)]
pub struct CurrentSession;

impl<Net, Store> Query<CurrentSession> for Service<Net, Store> {
    type Ok = auth::State;
    type Err = Infallible;

    async fn execute(&self, _: CurrentSession) -> Result<Self::Ok, Self::Err> {
        Ok(self.auth.read().await.clone())
    }
}
