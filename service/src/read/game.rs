//! [`Game`]s of a [`Season`] read model definition.
//!
//! [`Season`]: crate::domain::Season

use serde::Deserialize;

use crate::domain::{season, Game};

/// [`Game`]s played in a [`Season`].
///
/// [`Season`]: crate::domain::Season
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
pub struct List {
    /// Summary of the [`Season`] the [`Game`]s belong to.
    ///
    /// [`Season`]: crate::domain::Season
    #[serde(default)]
    pub season: Option<SeasonSummary>,

    /// [`Game`]s themselves, the most recent first.
    #[serde(default)]
    pub games: Vec<Game>,
}

/// Short description of a [`Season`].
///
/// [`Season`]: crate::domain::Season
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct SeasonSummary {
    /// [`season::Name`] of the [`Season`].
    ///
    /// [`Season`]: crate::domain::Season
    pub name: season::Name,

    /// [`season::StartDate`] of the [`Season`].
    ///
    /// [`Season`]: crate::domain::Season
    #[serde(rename = "date_ini")]
    pub starts_on: season::StartDate,
}
