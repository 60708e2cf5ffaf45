//! [`Game`] definitions.

use derive_more::{AsRef, Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};

use crate::domain::season;

/// Single match result against an opposing team.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Game {
    /// ID of this [`Game`].
    pub id: Id,

    /// ID of the [`Season`] this [`Game`] belongs to.
    ///
    /// [`Season`]: crate::domain::Season
    #[serde(rename = "id_season")]
    pub season_id: season::Id,

    /// Indicator whether the team won this [`Game`].
    pub win: bool,

    /// Runs scored by the team.
    pub team_score: Score,

    /// [`Opponent`] the team played against.
    pub opposing_team_name: Opponent,

    /// Runs scored by the [`Opponent`].
    pub opposing_team_score: Score,
}

/// Data of a [`Game`] to be registered.
///
/// The outcome is decided by the remote API out of the scores.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Draft {
    /// ID of the [`Season`] the [`Game`] belongs to.
    ///
    /// [`Season`]: crate::domain::Season
    #[serde(rename = "id_season")]
    pub season_id: season::Id,

    /// Runs scored by the team.
    pub team_score: Score,

    /// [`Opponent`] the team played against.
    pub opposing_team_name: Opponent,

    /// Runs scored by the [`Opponent`].
    pub opposing_team_score: Score,
}

/// ID of a [`Game`].
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

/// Runs scored in a [`Game`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
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
pub struct Score(u32);

/// Name of an opposing team.
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, PartialEq, Serialize,
)]
#[as_ref(str, String)]
#[serde(transparent)]
pub struct Opponent(String);

impl Opponent {
    /// Creates a new [`Opponent`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Checks whether the given `name` is a valid [`Opponent`] name.
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        !name.trim().is_empty() && name.len() <= 255
    }
}

impl FromStr for Opponent {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("opposing team name must not be blank")
    }
}
