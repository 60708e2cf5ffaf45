//! [`Query`] collection related to aggregated statistics.

use common::operations::By;

use crate::{domain::season, read};
#[cfg(doc)]
use crate::Query;

use super::ApiQuery;

/// Queries the per-player totals of a [`Season`].
///
/// [`Season`]: crate::domain::Season
pub type BySeason = ApiQuery<By<Vec<read::stats::Line>, season::Id>>;
