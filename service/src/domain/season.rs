//! [`Season`] definitions.

use common::{unit, DateOf};
use derive_more::{AsRef, Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};

/// Tournament (league period) grouping [`Game`]s.
///
/// [`Game`]: crate::domain::Game
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Season {
    /// ID of this [`Season`].
    pub id: Id,

    /// [`Name`] of this [`Season`].
    pub name: Name,

    /// [`StartDate`] of this [`Season`].
    #[serde(rename = "date_ini")]
    pub starts_on: StartDate,
}

/// Data of a [`Season`] to be created or updated.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Draft {
    /// [`Name`] of the [`Season`].
    pub name: Name,

    /// [`StartDate`] of the [`Season`].
    #[serde(rename = "date_ini")]
    pub starts_on: StartDate,
}

impl From<Season> for Draft {
    fn from(season: Season) -> Self {
        let Season {
            id: _,
            name,
            starts_on,
        } = season;
        Self { name, starts_on }
    }
}

/// ID of a [`Season`].
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

/// Name of a [`Season`].
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, PartialEq, Serialize,
)]
#[as_ref(str, String)]
#[serde(transparent)]
pub struct Name(String);

impl Name {
    /// Creates a new [`Name`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Checks whether the given `name` is a valid [`Name`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        !name.trim().is_empty() && name.len() <= 255
    }
}

impl FromStr for Name {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("season name must not be blank")
    }
}

/// Date when a [`Season`] starts.
pub type StartDate = DateOf<(Season, unit::Start)>;

#[cfg(test)]
mod spec {
    use super::{Draft, Name, Season};

    #[test]
    fn deserializes_server_timestamps() {
        let season: Season = serde_json::from_str(
            r#"{"id":3,"name":"Apertura 2024","date_ini":"2024-03-01T00:00:00.000Z"}"#,
        )
        .unwrap();

        assert_eq!(i64::from(season.id), 3);
        assert_eq!(season.starts_on.to_string(), "2024-03-01");
    }

    #[test]
    fn serializes_draft_as_plain_date() {
        let season: Season = serde_json::from_str(
            r#"{"id":3,"name":"Apertura 2024","date_ini":"2024-03-01"}"#,
        )
        .unwrap();

        assert_eq!(
            serde_json::to_value(Draft::from(season)).unwrap(),
            serde_json::json!({"name": "Apertura 2024", "date_ini": "2024-03-01"}),
        );
    }

    #[test]
    fn rejects_blank_names() {
        assert!(Name::new("").is_none());
        assert!(Name::new("   ").is_none());
        assert!(Name::new("Clausura").is_some());
    }
}
