//! Secure key-value [`Storage`] of the session.

mod file;
mod memory;

use derive_more::{Display, Error as StdError, From};

pub use self::{file::File, memory::Memory};

/// Secure storage operation.
///
/// Implemented for [`Select`]ing, [`Insert`]ing and [`Delete`]ing a value
/// by its [`Key`].
///
/// [`Delete`]: common::operations::Delete
/// [`Insert`]: common::operations::Insert
/// [`Select`]: common::operations::Select
pub use common::Handler as Storage;

/// Key of a value kept in a [`Storage`].
#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    Hash,
    PartialEq,
    strum::AsRefStr,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
)]
pub enum Key {
    /// Bearer token of the session.
    #[strum(serialize = "session_token")]
    SessionToken,

    /// Serialized JSON of the logged in [`User`].
    ///
    /// [`User`]: crate::domain::User
    #[strum(serialize = "user_data")]
    UserData,

    /// [`Role`] of the logged in [`User`].
    ///
    /// [`Role`]: crate::domain::user::Role
    /// [`User`]: crate::domain::User
    #[strum(serialize = "user_rol")]
    UserRole,

    /// [`Superuser`] flag of the logged in [`User`].
    ///
    /// [`Superuser`]: crate::domain::user::Superuser
    /// [`User`]: crate::domain::User
    #[strum(serialize = "user_superuser")]
    UserSuperuser,
}

impl Key {
    /// All the [`Key`]s constituting a session.
    pub const ALL: [Self; 4] = [
        Self::SessionToken,
        Self::UserData,
        Self::UserRole,
        Self::UserSuperuser,
    ];
}

/// Value to be stored under its [`Key`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Entry {
    /// [`Key`] to store the value under.
    pub key: Key,

    /// Value itself.
    pub value: String,
}

impl Entry {
    /// Creates a new [`Entry`] of the provided `value` under the provided
    /// [`Key`].
    #[must_use]
    pub fn new(key: Key, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }
}

/// [`Storage`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// I/O error of the underlying medium.
    #[display("Storage I/O failed: {_0}")]
    Io(std::io::Error),

    /// Stored data cannot be decoded.
    #[display("Stored data is corrupted: {_0}")]
    Corrupted(serde_json::Error),
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use strum::IntoEnumIterator as _;

    use super::Key;

    #[test]
    fn uses_stable_key_names() {
        let names: Vec<_> = Key::ALL.iter().map(Key::to_string).collect();

        assert_eq!(
            names,
            ["session_token", "user_data", "user_rol", "user_superuser"],
        );
    }

    #[test]
    fn lists_every_key() {
        assert_eq!(Key::iter().collect::<Vec<_>>(), Key::ALL);
        assert_eq!(Key::from_str("user_rol").unwrap(), Key::UserRole);
    }
}
