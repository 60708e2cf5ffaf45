//! [`Session`] definitions.

use base64::{
    alphabet,
    engine::{general_purpose::GeneralPurposeConfig, GeneralPurpose},
    Engine as _,
};
use common::DateTime;
use derive_more::{AsRef, Debug};
use serde::{Deserialize, Serialize};

use crate::domain::{user, User};

/// Session of a logged in [`User`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Session {
    /// Access [`Token`] of this [`Session`].
    pub token: Token,

    /// [`User`] this [`Session`] belongs to.
    pub user: User,

    /// [`user::Role`] of the [`User`].
    pub role: Option<user::Role>,

    /// [`user::Superuser`] flag of the [`User`].
    pub superuser: Option<user::Superuser>,
}

impl Session {
    /// Creates a new [`Session`] of the provided [`User`], taking its
    /// [`user::Role`] and [`user::Superuser`] flag from the [`User`] itself.
    #[must_use]
    pub fn new(token: Token, user: User) -> Self {
        Self {
            token,
            role: user.role,
            superuser: user.superuser,
            user,
        }
    }
}

/// Bearer access token of a [`Session`].
///
/// This is a [JWT] issued by the remote API. Its signature is never verified
/// on the client, so [`Token::is_valid()`] is a convenience check only: the
/// remote API authorizes every request on its own.
///
/// [JWT]: https://datatracker.ietf.org/doc/html/rfc7519
#[derive(AsRef, Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[as_ref(str)]
#[debug("Token(..)")]
#[serde(transparent)]
pub struct Token(String);

impl Token {
    /// Creates a new [`Token`] out of its raw representation.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Indicates whether this [`Token`] is still usable at the current time.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        is_valid(Some(&self.0))
    }
}

/// Indicates whether the provided raw `token` is usable at the current time.
///
/// See [`is_valid_at()`] for details.
#[must_use]
pub fn is_valid(token: Option<&str>) -> bool {
    is_valid_at(token, DateTime::now())
}

/// Indicates whether the provided raw `token` is usable at the provided
/// moment.
///
/// A `token` is valid if and only if:
/// - it consists of exactly three dot-separated segments;
/// - its middle segment is base64url-encoded UTF-8 JSON;
/// - that JSON contains a numeric `exp` claim (Unix seconds);
/// - `exp` is strictly greater than `now`.
///
/// Any decoding failure results in `false`.
#[must_use]
pub fn is_valid_at(token: Option<&str>, now: DateTime) -> bool {
    let Some(token) = token.filter(|t| !t.is_empty()) else {
        return false;
    };

    let mut segments = token.split('.');
    let (Some(_), Some(payload), Some(_), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return false;
    };

    #[expect(
        clippy::cast_precision_loss,
        reason = "timestamps are far below 2^52"
    )]
    let now = now.unix_timestamp() as f64;

    decode_payload(payload)
        .and_then(|claims| claims.get("exp")?.as_f64())
        .is_some_and(|exp| exp > now)
}

/// Decodes the base64url-encoded JSON `payload` segment of a [JWT].
///
/// [JWT]: https://datatracker.ietf.org/doc/html/rfc7519
fn decode_payload(payload: &str) -> Option<serde_json::Value> {
    /// Standard base64 engine tolerating non-canonical trailing bits.
    const ENGINE: GeneralPurpose = GeneralPurpose::new(
        &alphabet::STANDARD,
        GeneralPurposeConfig::new().with_decode_allow_trailing_bits(true),
    );

    let mut encoded: String = payload
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            c => c,
        })
        .collect();
    while encoded.len() % 4 != 0 {
        encoded.push('=');
    }

    let bytes = ENGINE.decode(encoded).ok()?;
    // Strict UTF-8 keeps multi-byte characters of the payload intact.
    let json = String::from_utf8(bytes).ok()?;
    serde_json::from_str(&json).ok()
}
