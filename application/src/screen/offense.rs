//! Offensive data screens of the logged in player.

use clap::Subcommand;
use service::{
    command::{self, record_offense, update_offense},
    domain::{game, offense, season},
    query::{self, CurrentSession},
    Command as _, Query as _,
};

use super::seasons;
use crate::{error, AsError, Error, Service};

/// Offensive data screens.
#[derive(Debug, Subcommand)]
pub enum Offense {
    /// Shows the batting line recorded in a game.
    Show {
        /// ID of the season (the newest one by default).
        #[arg(long)]
        season: Option<season::Id>,

        /// ID of the game.
        #[arg(long)]
        game: game::Id,
    },

    /// Records a batting line for a game.
    Record {
        /// ID of the season (the newest one by default).
        #[arg(long)]
        season: Option<season::Id>,

        /// ID of the game.
        #[arg(long)]
        game: game::Id,

        #[command(flatten)]
        line: Line,
    },

    /// Replaces a previously recorded batting line.
    Update {
        /// ID of the record.
        id: offense::Id,

        /// ID of the season (the newest one by default).
        #[arg(long)]
        season: Option<season::Id>,

        /// ID of the game.
        #[arg(long)]
        game: game::Id,

        #[command(flatten)]
        line: Line,
    },
}

/// Batting line form.
#[derive(clap::Args, Clone, Copy, Debug)]
pub struct Line {
    /// At bats.
    #[arg(long = "vb", default_value_t)]
    pub at_bats: offense::Count,

    /// Hits.
    #[arg(long = "hits", default_value_t)]
    pub hits: offense::Count,

    /// Doubles.
    #[arg(long = "doubles", default_value_t)]
    pub doubles: offense::Count,

    /// Triples.
    #[arg(long = "triples", default_value_t)]
    pub triples: offense::Count,

    /// Home runs.
    #[arg(long = "hr", default_value_t)]
    pub home_runs: offense::Count,

    /// Bases on balls.
    #[arg(long = "bb", default_value_t)]
    pub walks: offense::Count,

    /// Strikeouts.
    #[arg(long = "kk", default_value_t)]
    pub strikeouts: offense::Count,
}

impl From<Line> for offense::Line {
    fn from(line: Line) -> Self {
        let Line {
            at_bats,
            hits,
            doubles,
            triples,
            home_runs,
            walks,
            strikeouts,
        } = line;
        Self {
            at_bats,
            hits,
            doubles,
            triples,
            home_runs,
            walks,
            strikeouts,
        }
    }
}

impl Offense {
    /// Opens the selected screen.
    ///
    /// # Errors
    ///
    /// If the remote API rejects the request.
    pub async fn open(self, service: &Service) -> Result<String, Error> {
        match self {
            Self::Show { season, game } => {
                let season_id = seasons::or_newest(service, season).await?;
                let player_id = service
                    .execute(CurrentSession)
                    .await
                    .unwrap_or_else(|e| match e {})
                    .user()
                    .map(|u| u.id)
                    .ok_or_else(|| Error::from(error::Common::SessionRequired))?;

                let record = service
                    .execute(query::offense::ByPlayer::by(offense::Key {
                        season_id,
                        game_id: game,
                        player_id,
                    }))
                    .await
                    .map_err(AsError::into_error)?;
                Ok(record.map_or_else(
                    || "No offensive data recorded for this game yet".into(),
                    |r| format!("{:>5}  {}", r.id, describe(&r.line)),
                ))
            }
            Self::Record { season, game, line } => {
                let season = seasons::or_newest(service, season).await?;
                let line = offense::Line::from(line);
                service
                    .execute(command::RecordOffense { season, game, line })
                    .await
                    .map_err(AsError::into_error)?;
                Ok(format!("Recorded: {}", describe(&line)))
            }
            Self::Update {
                id,
                season,
                game,
                line,
            } => {
                let season = seasons::or_newest(service, season).await?;
                let record = service
                    .execute(command::UpdateOffense {
                        id,
                        season,
                        game,
                        line: line.into(),
                    })
                    .await
                    .map_err(AsError::into_error)?;
                Ok(format!("Updated: {}", describe(&record.line)))
            }
        }
    }
}

fn describe(line: &offense::Line) -> String {
    match line.average() {
        Some(avg) => format!("{line} | AVG {avg:.3}"),
        None => line.to_string(),
    }
}

impl AsError for record_offense::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Api(e) => e.try_as_error(),
            Self::Unauthenticated => {
                Some(error::Common::SessionRequired.into())
            }
        }
    }
}

impl AsError for update_offense::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Api(e) => e.try_as_error(),
            Self::Unauthenticated => {
                Some(error::Common::SessionRequired.into())
            }
        }
    }
}

#[cfg(test)]
mod spec {
    use clap::Parser as _;

    use crate::{screen::Screen, Args};

    use super::Offense;

    #[test]
    fn parses_batting_line_with_defaults() {
        let args = Args::try_parse_from([
            "toros", "offense", "record", "--game", "4", "--vb", "4",
            "--hits", "2", "--hr", "1",
        ])
        .unwrap();

        let Screen::Offense(Offense::Record { season, game, line }) =
            args.screen
        else {
            panic!("unexpected screen");
        };
        assert_eq!(season, None);
        assert_eq!(i64::from(game), 4);
        assert_eq!(u32::from(line.at_bats), 4);
        assert_eq!(u32::from(line.hits), 2);
        assert_eq!(u32::from(line.home_runs), 1);
        assert_eq!(u32::from(line.doubles), 0);
        assert_eq!(u32::from(line.strikeouts), 0);
    }

    #[test]
    fn rejects_negative_counts() {
        assert!(Args::try_parse_from([
            "toros", "offense", "record", "--game", "4", "--kk", "-1",
        ])
        .is_err());
    }
}
