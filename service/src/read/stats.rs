//! Aggregated offensive statistics of a [`Season`].
//!
//! [`Season`]: crate::domain::Season

use std::fmt;

use serde::{de, Deserialize, Deserializer};

use crate::domain::offense::Count;

/// Season totals of a single player.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Line {
    /// Name of the player.
    pub player_name: String,

    /// Total at bats.
    #[serde(default, rename = "tot_vb")]
    pub at_bats: Count,

    /// Total hits.
    #[serde(default, rename = "tot_hits")]
    pub hits: Count,

    /// Total doubles.
    #[serde(default, rename = "tot_2b")]
    pub doubles: Count,

    /// Total triples.
    #[serde(default, rename = "tot_3b")]
    pub triples: Count,

    /// Total home runs.
    #[serde(default, rename = "tot_hr")]
    pub home_runs: Count,

    /// Total base on balls.
    #[serde(default, rename = "tot_bb")]
    pub walks: Count,

    /// Total strikeouts.
    #[serde(default, rename = "tot_k")]
    pub strikeouts: Count,

    /// Batting [`Average`], if computed by the remote API.
    #[serde(default)]
    pub avg: Option<Average>,
}

/// Batting average.
///
/// Deserializes from either a JSON number or a numeric string.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Average(f64);

impl Average {
    /// Returns the numeric value of this [`Average`].
    #[must_use]
    pub fn get(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Average {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}", self.0)
    }
}

impl<'de> Deserialize<'de> for Average {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f64),
            Text(String),
        }

        let value = match Raw::deserialize(deserializer)? {
            Raw::Number(n) => n,
            Raw::Text(s) => s.trim().parse().map_err(|_| {
                de::Error::invalid_value(de::Unexpected::Str(&s), &"a number")
            })?,
        };
        value.is_finite().then_some(Self(value)).ok_or_else(|| {
            de::Error::invalid_value(de::Unexpected::Float(value), &"a number")
        })
    }
}
