//! [`Query`] definition.

pub mod current_session;
pub mod games;
pub mod offense;
pub mod seasons;
pub mod stats;
pub mod users;

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    infra::{api, Api},
    Service,
};

pub use self::current_session::CurrentSession;

/// [`Query`] of the [`Service`].
pub use common::Handler as Query;

/// [`Query`] [`Select`]ing a `T`ype from an [`Api`].
#[derive(Clone, Copy, Debug)]
#[expect(clippy::module_name_repetitions, reason = "more readable")]
pub struct ApiQuery<T>(T);

impl<W, B> ApiQuery<By<W, B>> {
    /// Creates a new [`ApiQuery`] selecting a `W` by the provided `B`.
    #[must_use]
    pub fn by(by: B) -> Self {
        Self(By::new(by))
    }
}

impl<Net, Store, W, B> Query<ApiQuery<By<W, B>>> for Service<Net, Store>
where
    Net: Api<Select<By<W, B>>, Ok = W, Err = Traced<api::Error>>,
{
    type Ok = W;
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        ApiQuery(by): ApiQuery<By<W, B>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.api()
            .execute(Select(by))
            .await
            .map_err(tracerr::wrap!())
    }
}
