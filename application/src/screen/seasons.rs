//! Season screens.

use clap::Subcommand;
use itertools::Itertools as _;
use service::{
    command::{self, create_season, update_season},
    domain::{season, Season},
    query, Command as _, Query as _,
};

use crate::{error, AsError, Error, Service};

/// Season screens.
#[derive(Debug, Subcommand)]
pub enum Seasons {
    /// Lists seasons, the newest first.
    List,

    /// Creates a new season.
    Create {
        /// Name of the season.
        #[arg(long)]
        name: season::Name,

        /// Start date of the season (`YYYY-MM-DD`).
        #[arg(long)]
        starts_on: season::StartDate,
    },

    /// Replaces name and start date of an existing season.
    Update {
        /// ID of the season.
        id: season::Id,

        /// New name of the season.
        #[arg(long)]
        name: season::Name,

        /// New start date of the season (`YYYY-MM-DD`).
        #[arg(long)]
        starts_on: season::StartDate,
    },
}

impl Seasons {
    /// Indicates whether the selected screen changes data.
    #[must_use]
    pub fn is_guarded(&self) -> bool {
        !matches!(self, Self::List)
    }

    /// Opens the selected screen.
    ///
    /// # Errors
    ///
    /// If the remote API rejects the request.
    pub async fn open(self, service: &Service) -> Result<String, Error> {
        match self {
            Self::List => {
                let seasons = list(service).await?;
                if seasons.is_empty() {
                    return Err(error::Common::NoSeasons.into());
                }
                Ok(seasons.iter().map(describe).join("\n"))
            }
            Self::Create { name, starts_on } => {
                service
                    .execute(command::CreateSeason {
                        name: name.clone(),
                        starts_on,
                    })
                    .await
                    .map_err(AsError::into_error)?;
                Ok(format!("Season `{name}` created"))
            }
            Self::Update {
                id,
                name,
                starts_on,
            } => {
                let season = service
                    .execute(command::UpdateSeason {
                        id,
                        name,
                        starts_on,
                    })
                    .await
                    .map_err(AsError::into_error)?;
                Ok(format!("Season updated: {}", describe(&season)))
            }
        }
    }
}

/// Returns the provided `season`, or the newest one if [`None`].
///
/// # Errors
///
/// If no season is registered yet.
pub(crate) async fn or_newest(
    service: &Service,
    season: Option<season::Id>,
) -> Result<season::Id, Error> {
    if let Some(id) = season {
        return Ok(id);
    }
    list(service)
        .await?
        .first()
        .map(|s| s.id)
        .ok_or_else(|| error::Common::NoSeasons.into())
}

async fn list(service: &Service) -> Result<Vec<Season>, Error> {
    service
        .execute(query::seasons::List)
        .await
        .map_err(AsError::into_error)
}

fn describe(season: &Season) -> String {
    format!("{:>5}  {}  {}", season.id, season.starts_on, season.name)
}

impl AsError for create_season::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Api(e) => e.try_as_error(),
            Self::Unauthenticated => {
                Some(error::Common::SessionRequired.into())
            }
        }
    }
}

impl AsError for update_season::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Api(e) => e.try_as_error(),
            Self::Unauthenticated => {
                Some(error::Common::SessionRequired.into())
            }
        }
    }
}
