//! Season statistics screen.

use itertools::Itertools as _;
use service::{domain::season, query, read, Query as _};

use super::seasons;
use crate::{AsError, Error, Service};

/// Season statistics screen.
#[derive(clap::Args, Debug)]
pub struct Stats {
    /// ID of the season (the newest one by default).
    pub season: Option<season::Id>,
}

impl Stats {
    /// Shows offensive totals of every player of the season.
    ///
    /// # Errors
    ///
    /// If the remote API rejects the request.
    pub async fn open(self, service: &Service) -> Result<String, Error> {
        let season = seasons::or_newest(service, self.season).await?;
        let stats = service
            .execute(query::stats::BySeason::by(season))
            .await
            .map_err(AsError::into_error)?;
        if stats.is_empty() {
            return Ok(format!("No statistics for season {season} yet"));
        }

        let header = format!(
            "{:<24} {:>4} {:>4} {:>4} {:>4} {:>4} {:>4} {:>4} {:>6}",
            "PLAYER", "VB", "H", "2B", "3B", "HR", "BB", "K", "AVG",
        );
        Ok(std::iter::once(header)
            .chain(stats.iter().map(row))
            .join("\n"))
    }
}

fn row(line: &read::stats::Line) -> String {
    format!(
        "{:<24} {:>4} {:>4} {:>4} {:>4} {:>4} {:>4} {:>4} {:>6}",
        line.player_name,
        line.at_bats,
        line.hits,
        line.doubles,
        line.triples,
        line.home_runs,
        line.walks,
        line.strikeouts,
        line.avg.map_or_else(|| "-".to_owned(), |a| a.to_string()),
    )
}
