//! REST [`Api`] implementation.

use std::sync::Arc;

use common::operations::{By, Insert, Perform, Select, Update};
use reqwest::{Client, RequestBuilder};
use secrecy::ExposeSecret as _;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{
        game,
        offense::{self, Count},
        season,
        user::session,
        Season,
    },
    infra::{
        api::{
            self, Authorized, Login, LoginResponse, Logout, MaybeAuthorized,
            Register, Rejection,
        },
        Api,
    },
    read,
};

/// HTTP/JSON client of the remote API.
#[derive(Clone, Debug)]
pub struct Rest {
    /// Underlying HTTP client.
    client: Client,

    /// Base URL every endpoint path is appended to.
    base_url: Arc<str>,
}

impl Rest {
    /// Creates a new [`Rest`] client of the API located at the provided
    /// `base_url`.
    ///
    /// # Errors
    ///
    /// If the underlying HTTP client fails to initialize.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self, Traced<api::Error>> {
        let client = Client::builder()
            .build()
            .map_err(tracerr::from_and_wrap!(=> api::Error))?;
        Ok(Self {
            client,
            base_url: base_url.as_ref().trim_end_matches('/').into(),
        })
    }

    /// Returns the full URL of the provided endpoint `path`.
    fn url(&self, path: impl AsRef<str>) -> String {
        format!("{}{}", self.base_url, path.as_ref())
    }

    /// Sends the provided `request` and returns the body of its successful
    /// response.
    ///
    /// Non-success statuses are turned into an [`api::Error::Rejected`].
    async fn send(
        &self,
        request: RequestBuilder,
    ) -> Result<String, Traced<api::Error>> {
        let response = request
            .send()
            .await
            .map_err(tracerr::from_and_wrap!(=> api::Error))?;
        let status = response.status();
        let url = response.url().path().to_owned();
        let body = response
            .text()
            .await
            .map_err(tracerr::from_and_wrap!(=> api::Error))?;

        if !status.is_success() {
            log::debug!("`{url}` responded with `{status}`: {body}");
            return Err(tracerr::new!(api::Error::Rejected(
                Rejection::from_body(status, &body)
            )));
        }
        log::trace!("`{url}` responded with `{status}`");
        Ok(body)
    }

    /// Sends the provided `request` and parses the JSON body of its
    /// successful response.
    async fn fetch<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, Traced<api::Error>> {
        let body = self.send(request).await.map_err(tracerr::wrap!())?;
        serde_json::from_str(&body)
            .map_err(tracerr::from_and_wrap!(=> api::Error))
    }

    /// Adds the bearer `token` to the provided `request`, if there is one.
    fn authorize(
        request: RequestBuilder,
        token: Option<&session::Token>,
    ) -> RequestBuilder {
        match token {
            Some(token) => request.bearer_auth(token.as_ref()),
            None => request,
        }
    }

    /// Sends the provided `request`, authorized by the provided `token`, and
    /// discards the body of its successful response.
    async fn submit<T: Serialize>(
        &self,
        request: RequestBuilder,
        token: &session::Token,
        body: &T,
    ) -> Result<(), Traced<api::Error>> {
        _ = self
            .send(request.bearer_auth(token.as_ref()).json(body))
            .await
            .map_err(tracerr::wrap!())?;
        Ok(())
    }
}

impl Api<Perform<Login>> for Rest {
    type Ok = LoginResponse;
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        Perform(login): Perform<Login>,
    ) -> Result<Self::Ok, Self::Err> {
        #[derive(Serialize)]
        struct Body<'a> {
            username: &'a str,
            password: &'a str,
        }

        let body = Body {
            username: login.username.as_ref(),
            password: login.password.expose_secret().as_ref(),
        };
        self.fetch(self.client.post(self.url("/login")).json(&body))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl Api<Perform<Logout>> for Rest {
    type Ok = ();
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        Perform(Logout { token }): Perform<Logout>,
    ) -> Result<Self::Ok, Self::Err> {
        _ = self
            .send(
                self.client
                    .post(self.url("/logout"))
                    .bearer_auth(token.as_ref()),
            )
            .await
            .map_err(tracerr::wrap!())?;
        Ok(())
    }
}

impl Api<Perform<Register>> for Rest {
    type Ok = serde_json::Value;
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        Perform(register): Perform<Register>,
    ) -> Result<Self::Ok, Self::Err> {
        #[derive(Serialize)]
        struct Body<'a> {
            username: &'a str,
            email: &'a str,
            password: &'a str,
        }

        let body = Body {
            username: register.username.as_ref(),
            email: register.email.as_ref(),
            password: register.password.expose_secret().as_ref(),
        };
        self.fetch(self.client.post(self.url("/register")).json(&body))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl Api<MaybeAuthorized<Select<By<Vec<Season>, ()>>>> for Rest {
    type Ok = Vec<Season>;
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        MaybeAuthorized { token, op: _ }: MaybeAuthorized<
            Select<By<Vec<Season>, ()>>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        #[derive(Deserialize)]
        struct Response {
            #[serde(default)]
            seasons: Vec<Season>,
        }

        let request = self.client.get(self.url("/seasons"));
        self.fetch::<Response>(Self::authorize(request, token.as_ref()))
            .await
            .map(|r| r.seasons)
            .map_err(tracerr::wrap!())
    }
}

impl Api<Authorized<Insert<season::Draft>>> for Rest {
    type Ok = ();
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        Authorized { token, op: Insert(draft) }: Authorized<
            Insert<season::Draft>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        self.submit(self.client.post(self.url("/seasons")), &token, &draft)
            .await
            .map_err(tracerr::wrap!())
    }
}

impl Api<Authorized<Update<Season>>> for Rest {
    type Ok = ();
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        Authorized {
            token,
            op: Update(season),
        }: Authorized<Update<Season>>,
    ) -> Result<Self::Ok, Self::Err> {
        let url = self.url(format!("/seasons/{}", season.id));
        self.submit(
            self.client.put(url),
            &token,
            &season::Draft::from(season),
        )
        .await
        .map_err(tracerr::wrap!())
    }
}

impl Api<MaybeAuthorized<Select<By<read::game::List, season::Id>>>>
    for Rest
{
    type Ok = read::game::List;
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        MaybeAuthorized {
            token,
            op: Select(by),
        }: MaybeAuthorized<Select<By<read::game::List, season::Id>>>,
    ) -> Result<Self::Ok, Self::Err> {
        let season = by.into_inner();
        let request = self
            .client
            .get(self.url("/games"))
            .query(&[("id_season", season)]);
        self.fetch(Self::authorize(request, token.as_ref()))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl Api<Authorized<Insert<game::Draft>>> for Rest {
    type Ok = ();
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        Authorized { token, op: Insert(draft) }: Authorized<
            Insert<game::Draft>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        self.submit(self.client.post(self.url("/games")), &token, &draft)
            .await
            .map_err(tracerr::wrap!())
    }
}

impl Api<Select<By<Option<offense::Record>, offense::Key>>> for Rest {
    type Ok = Option<offense::Record>;
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<offense::Record>, offense::Key>>,
    ) -> Result<Self::Ok, Self::Err> {
        #[derive(Deserialize)]
        struct Response {
            #[serde(default)]
            count: Count,
            #[serde(default)]
            data: Vec<offense::Record>,
        }

        let offense::Key {
            season_id,
            game_id,
            player_id,
        } = by.into_inner();
        let response = self
            .fetch::<Response>(
                self.client.get(self.url("/offensive-player-data")).query(&[
                    ("id_season", i64::from(season_id)),
                    ("id_game", i64::from(game_id)),
                    ("id_player", i64::from(player_id)),
                ]),
            )
            .await
            .map_err(tracerr::wrap!())?;

        if u32::from(response.count) == 0 {
            return Ok(None);
        }
        Ok(response.data.into_iter().next())
    }
}

impl Api<Authorized<Insert<offense::Draft>>> for Rest {
    type Ok = ();
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        Authorized { token, op: Insert(draft) }: Authorized<
            Insert<offense::Draft>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        self.submit(
            self.client.post(self.url("/offensive-player-data")),
            &token,
            &draft,
        )
        .await
        .map_err(tracerr::wrap!())
    }
}

impl Api<Authorized<Update<offense::Record>>> for Rest {
    type Ok = ();
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        Authorized {
            token,
            op: Update(record),
        }: Authorized<Update<offense::Record>>,
    ) -> Result<Self::Ok, Self::Err> {
        let offense::Record {
            id,
            season_id,
            game_id,
            player_id,
            line,
        } = record;
        let draft = offense::Draft {
            season_id,
            game_id,
            player_id,
            line,
        };
        self.submit(
            self.client
                .put(self.url(format!("/offensive-player-data/{id}"))),
            &token,
            &draft,
        )
        .await
        .map_err(tracerr::wrap!())
    }
}

impl Api<Select<By<Vec<read::stats::Line>, season::Id>>> for Rest {
    type Ok = Vec<read::stats::Line>;
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<read::stats::Line>, season::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        #[derive(Deserialize)]
        struct Response {
            #[serde(default)]
            stats: Vec<read::stats::Line>,
        }

        let url =
            self.url(format!("/offensive-stats-by-season/{}", by.into_inner()));
        self.fetch::<Response>(self.client.get(url))
            .await
            .map(|r| r.stats)
            .map_err(tracerr::wrap!())
    }
}

impl Api<Authorized<Select<By<Vec<read::Player>, ()>>>> for Rest {
    type Ok = Vec<read::Player>;
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        Authorized { token, op: _ }: Authorized<
            Select<By<Vec<read::Player>, ()>>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Response {
            Bare(Vec<read::Player>),
            Wrapped { users: Vec<read::Player> },
        }

        let response = self
            .fetch::<Response>(
                self.client
                    .get(self.url("/users"))
                    .bearer_auth(token.as_ref()),
            )
            .await
            .map_err(tracerr::wrap!())?;
        Ok(match response {
            Response::Bare(users) | Response::Wrapped { users } => users,
        })
    }
}
