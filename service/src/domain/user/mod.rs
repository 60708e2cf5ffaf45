//! [`User`] definitions.

pub mod session;

use std::sync::LazyLock;

use derive_more::{AsRef, Display, From, FromStr, Into};
use regex::Regex;
use secrecy::{zeroize::Zeroize, CloneableSecret};
use serde::{Deserialize, Serialize};

pub use self::session::Session;

/// Registered player of the league.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct User {
    /// ID of this [`User`].
    pub id: Id,

    /// [`Username`] of this [`User`].
    pub username: Username,

    /// [`Email`] of this [`User`].
    pub email: Email,

    /// [`Role`] of this [`User`].
    #[serde(
        default,
        rename = "rol",
        deserialize_with = "flag::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub role: Option<Role>,

    /// [`Superuser`] flag of this [`User`].
    #[serde(
        default,
        deserialize_with = "flag::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub superuser: Option<Superuser>,
}

/// ID of a [`User`].
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

/// Login of a [`User`]: either a [`Username`] or an [`Email`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
pub struct Login(String);

impl Login {
    /// Creates a new [`Login`] if the given `login` is valid.
    #[must_use]
    pub fn new(login: impl Into<String>) -> Option<Self> {
        let login = login.into();
        Self::check(&login).then_some(Self(login))
    }

    /// Checks whether the given `login` is a valid [`Login`].
    fn check(login: impl AsRef<str>) -> bool {
        let login = login.as_ref();
        !login.trim().is_empty() && login.len() <= 255
    }
}

impl FromStr for Login {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Login`")
    }
}

/// Name under which a [`User`] is registered.
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, PartialEq, Serialize,
)]
#[as_ref(str, String)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    /// Minimal length of a [`Username`] in characters.
    pub const MIN_LEN: usize = 3;

    /// Creates a new [`Username`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Checks whether the given `name` is a valid [`Username`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref().trim();
        name.chars().count() >= Self::MIN_LEN && name.len() <= 64
    }
}

impl FromStr for Username {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("must be at least 3 characters long")
    }
}

/// Password of a [`User`].
#[derive(Clone, Debug, Display, Eq, From, PartialEq)]
#[from(&str, String)]
pub struct Password(String);

impl Password {
    /// Minimal length (in characters) of a [`Password`] accepted for a new
    /// registration.
    pub const MIN_LEN: usize = 8;

    /// Creates a new [`Password`] if the given `password` is valid.
    #[must_use]
    pub fn new(password: impl Into<String>) -> Option<Self> {
        let password = password.into();
        Self::check(&password).then_some(Self(password))
    }

    /// Checks whether the given `password` is a valid [`Password`].
    fn check(password: impl AsRef<str>) -> bool {
        let password = password.as_ref();
        !password.is_empty() && password.len() <= 128
    }

    /// Indicates whether this [`Password`] is long enough to register a new
    /// [`User`] with.
    #[must_use]
    pub fn meets_policy(&self) -> bool {
        self.0.chars().count() >= Self::MIN_LEN
    }
}

impl AsRef<str> for Password {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for Password {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Password`")
    }
}

impl CloneableSecret for Password {}
impl Zeroize for Password {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

/// Email address of a [`User`].
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, PartialEq, Serialize,
)]
#[as_ref(str, String)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Creates a new [`Email`] if the given `address` is valid.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Option<Self> {
        let address = address.into();
        Self::check(&address).then_some(Self(address))
    }

    /// Checks whether the given `address` is a valid [`Email`].
    fn check(address: impl AsRef<str>) -> bool {
        /// Regular expression checking [`Email`] shape: `local@domain.tld`.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^\S+@\S+\.\S+$").expect("valid regex")
        });

        REGEX.is_match(address.as_ref())
    }
}

impl FromStr for Email {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid email address")
    }
}

/// Single-character designator distinguishing regular players from
/// administrators.
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    Hash,
    PartialEq,
    Serialize,
)]
#[serde(transparent)]
pub struct Role(#[serde(with = "flag")] char);

impl Role {
    /// [`Role`] of an administrator.
    pub const ADMIN: Self = Self('A');

    /// Parses a [`Role`] from its stored single-character representation.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        flag::single(raw).map(Self)
    }

    /// Indicates whether this [`Role`] designates an administrator.
    #[must_use]
    pub fn is_admin(self) -> bool {
        self.0.eq_ignore_ascii_case(&Self::ADMIN.0)
    }
}

/// Single-character flag granting administrative access independently of
/// the [`Role`].
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    Hash,
    PartialEq,
    Serialize,
)]
#[serde(transparent)]
pub struct Superuser(#[serde(with = "flag")] char);

impl Superuser {
    /// Parses a [`Superuser`] flag from its stored single-character
    /// representation.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        flag::single(raw).map(Self)
    }

    /// Indicates whether this flag grants superuser access (`S` or `Y`).
    #[must_use]
    pub fn is_granted(self) -> bool {
        matches!(self.0.to_ascii_uppercase(), 'S' | 'Y')
    }
}

mod flag {
    //! (De)serialization of single-character flags as JSON strings.

    use serde::{
        de::{Error as _, Unexpected},
        Deserialize as _, Deserializer, Serializer,
    };

    /// Extracts the only character of the provided `raw` string.
    pub(super) fn single(raw: &str) -> Option<char> {
        let mut chars = raw.trim().chars();
        let c = chars.next()?;
        chars.next().is_none().then_some(c)
    }

    /// Serializes a flag as a one-character string.
    #[expect(
        clippy::trivially_copy_pass_by_ref,
        reason = "required by `serde(with)`"
    )]
    pub(super) fn serialize<S>(
        flag: &char,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(flag)
    }

    /// Deserializes a flag from a one-character string.
    pub(super) fn deserialize<'de, D>(
        deserializer: D,
    ) -> Result<char, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        single(&raw).ok_or_else(|| {
            D::Error::invalid_value(
                Unexpected::Str(&raw),
                &"a single character",
            )
        })
    }

    /// Deserializes an optional flag, treating `null` and blank strings as
    /// absent.
    pub(super) fn optional<'de, D, T>(
        deserializer: D,
    ) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: From<char>,
    {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(None),
            Some(raw) if raw.trim().is_empty() => Ok(None),
            Some(raw) => single(&raw).map(T::from).map(Some).ok_or_else(|| {
                D::Error::invalid_value(
                    Unexpected::Str(&raw),
                    &"a single character",
                )
            }),
        }
    }
}

#[cfg(test)]
mod spec {
    use super::{Email, Password, Role, Superuser, User, Username};

    #[test]
    fn deserializes_login_user() {
        let user: User = serde_json::from_str(
            r#"{"id":7,"username":"ana","email":"a@x.com","rol":"A","superuser":"N"}"#,
        )
        .unwrap();

        assert_eq!(i64::from(user.id), 7);
        assert_eq!(AsRef::<str>::as_ref(&user.username), "ana");
        assert_eq!(user.role, Some(Role::ADMIN));
        assert_eq!(user.superuser, Superuser::parse("N"));
        assert!(!user.superuser.unwrap().is_granted());
    }

    #[test]
    fn treats_blank_flags_as_absent() {
        let user: User = serde_json::from_str(
            r#"{"id":1,"username":"bob","email":"b@x.com","rol":"","superuser":null}"#,
        )
        .unwrap();

        assert_eq!(user.role, None);
        assert_eq!(user.superuser, None);

        let user: User = serde_json::from_str(
            r#"{"id":1,"username":"bob","email":"b@x.com"}"#,
        )
        .unwrap();

        assert_eq!(user.role, None);
    }

    #[test]
    fn rejects_multi_character_flags() {
        assert!(serde_json::from_str::<User>(
            r#"{"id":1,"username":"bob","email":"b@x.com","rol":"AB"}"#,
        )
        .is_err());
        assert_eq!(Role::parse("AB"), None);
        assert_eq!(Role::parse(""), None);
    }

    #[test]
    fn serializes_with_wire_names() {
        let user: User = serde_json::from_str(
            r#"{"id":7,"username":"ana","email":"a@x.com","rol":"A","superuser":"S"}"#,
        )
        .unwrap();

        let json = serde_json::to_value(&user).unwrap();

        assert_eq!(json["rol"], "A");
        assert_eq!(json["superuser"], "S");
        assert_eq!(json["id"], 7);
        assert_eq!(serde_json::from_value::<User>(json).unwrap(), user);
    }

    #[test]
    fn validates_registration_fields() {
        assert!(Username::new("ana").is_some());
        assert!(Username::new("an").is_none());
        assert!(Username::new("  an  ").is_none());

        assert!(Email::new("a@x.com").is_some());
        assert!(Email::new("a@x").is_none());
        assert!(Email::new("a x@y.com").is_none());

        assert!(Password::new("secret").is_some());
        assert!(!Password::new("secret").unwrap().meets_policy());
        assert!(Password::new("secret12").unwrap().meets_policy());
        assert!(Password::new("").is_none());
    }

    #[test]
    fn recognizes_administrative_access() {
        assert!(Role::ADMIN.is_admin());
        assert!(Role::parse("a").unwrap().is_admin());
        assert!(!Role::parse("J").unwrap().is_admin());
        assert!(Superuser::parse("S").unwrap().is_granted());
        assert!(Superuser::parse("y").unwrap().is_granted());
        assert!(!Superuser::parse("N").unwrap().is_granted());
    }
}
