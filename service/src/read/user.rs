//! [`Player`] read model definition.

use serde::Deserialize;

use crate::domain::user;

/// Registered player, as listed for administrative selection.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct Player {
    /// ID of the player.
    pub id: user::Id,

    /// [`user::Username`] of the player.
    pub username: user::Username,

    /// [`user::Email`] of the player, if exposed.
    #[serde(default)]
    pub email: Option<user::Email>,
}
