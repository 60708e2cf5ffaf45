//! Offensive batting [`Record`] definitions.

use std::fmt;

use derive_more::{Display, From, FromStr, Into};
use serde::{de, Deserialize, Deserializer, Serialize};

use crate::domain::{game, season, user};

/// Offensive batting line of a single player in a single [`Game`].
///
/// [`Game`]: crate::domain::Game
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Record {
    /// ID of this [`Record`].
    pub id: Id,

    /// ID of the [`Season`] the [`Game`] belongs to.
    ///
    /// [`Game`]: crate::domain::Game
    /// [`Season`]: crate::domain::Season
    #[serde(rename = "id_season")]
    pub season_id: season::Id,

    /// ID of the [`Game`] this [`Record`] is about.
    ///
    /// [`Game`]: crate::domain::Game
    #[serde(rename = "id_game")]
    pub game_id: game::Id,

    /// ID of the player (a [`User`]) this [`Record`] is about.
    ///
    /// [`User`]: crate::domain::User
    #[serde(rename = "id_player")]
    pub player_id: user::Id,

    /// Batting [`Line`] of this [`Record`].
    #[serde(flatten)]
    pub line: Line,
}

/// Data of a [`Record`] to be registered or updated.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Draft {
    /// ID of the [`Season`] the [`Game`] belongs to.
    ///
    /// [`Game`]: crate::domain::Game
    /// [`Season`]: crate::domain::Season
    #[serde(rename = "id_season")]
    pub season_id: season::Id,

    /// ID of the [`Game`].
    ///
    /// [`Game`]: crate::domain::Game
    #[serde(rename = "id_game")]
    pub game_id: game::Id,

    /// ID of the player.
    #[serde(rename = "id_player")]
    pub player_id: user::Id,

    /// Batting [`Line`].
    #[serde(flatten)]
    pub line: Line,
}

/// Key identifying a [`Record`] of a player in a [`Game`].
///
/// [`Game`]: crate::domain::Game
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Key {
    /// ID of the [`Season`].
    ///
    /// [`Season`]: crate::domain::Season
    pub season_id: season::Id,

    /// ID of the [`Game`].
    ///
    /// [`Game`]: crate::domain::Game
    pub game_id: game::Id,

    /// ID of the player.
    pub player_id: user::Id,
}

/// Batting counts of a player.
#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize,
)]
pub struct Line {
    /// At bats (`VB`).
    #[serde(rename = "vb")]
    pub at_bats: Count,

    /// Hits (`H`).
    #[serde(rename = "hit")]
    pub hits: Count,

    /// Doubles (`2B`).
    #[serde(rename = "2b")]
    pub doubles: Count,

    /// Triples (`3B`).
    #[serde(rename = "3b")]
    pub triples: Count,

    /// Home runs (`HR`).
    #[serde(rename = "hr")]
    pub home_runs: Count,

    /// Base on balls (`BB`).
    #[serde(rename = "bb")]
    pub walks: Count,

    /// Strikeouts (`K`).
    #[serde(rename = "kk")]
    pub strikeouts: Count,
}

impl Line {
    /// Returns the batting average (hits per at bat) of this [`Line`].
    ///
    /// [`None`] is returned when there are no at bats.
    #[must_use]
    pub fn average(&self) -> Option<f64> {
        (self.at_bats.0 > 0)
            .then(|| f64::from(self.hits.0) / f64::from(self.at_bats.0))
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "VB {} | H {} | 2B {} | 3B {} | HR {} | BB {} | K {}",
            self.at_bats,
            self.hits,
            self.doubles,
            self.triples,
            self.home_runs,
            self.walks,
            self.strikeouts,
        )
    }
}

/// ID of a [`Record`].
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[serde(transparent)]
pub struct Id(i64);

/// Non-negative batting count.
///
/// Deserializes from either a JSON number or a numeric string, as aggregates
/// computed by the remote database may arrive in both shapes. A `null`
/// aggregate (nothing to sum up) is zero.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Display,
    Eq,
    From,
    FromStr,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[serde(transparent)]
pub struct Count(u32);

impl<'de> Deserialize<'de> for Count {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u32),
            Text(String),
        }

        match Option::<Raw>::deserialize(deserializer)? {
            None => Ok(Self::default()),
            Some(Raw::Number(n)) => Ok(Self(n)),
            Some(Raw::Text(s)) => s.trim().parse().map(Self).map_err(|_| {
                de::Error::invalid_value(
                    de::Unexpected::Str(&s),
                    &"a non-negative integer",
                )
            }),
        }
    }
}
