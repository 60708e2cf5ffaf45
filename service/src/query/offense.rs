//! [`Query`] collection related to offensive batting [`Record`]s.
//!
//! [`Record`]: offense::Record

use common::operations::By;

use crate::domain::offense;
#[cfg(doc)]
use crate::Query;

use super::ApiQuery;

/// Queries the [`offense::Record`] of a player in a [`Game`], if any.
///
/// [`Game`]: crate::domain::Game
pub type ByPlayer = ApiQuery<By<Option<offense::Record>, offense::Key>>;
