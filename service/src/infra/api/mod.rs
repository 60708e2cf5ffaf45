//! Remote [`Api`]-related definitions.

#[cfg(feature = "rest")]
pub mod rest;

use std::fmt;

use derive_more::{Display, Error as StdError, From};
use http::StatusCode;
use secrecy::SecretBox;
use serde::Deserialize;

use crate::domain::{
    user::{self, session},
    User,
};

#[cfg(feature = "rest")]
pub use self::rest::Rest;

/// Remote API operation.
pub use common::Handler as Api;

/// Operation performed on behalf of a logged in [`User`].
#[derive(Clone, Debug)]
pub struct Authorized<T> {
    /// Bearer [`session::Token`] to authorize the operation with.
    pub token: session::Token,

    /// Operation itself.
    pub op: T,
}

impl<T> Authorized<T> {
    /// Wraps the provided `op` to be authorized with the provided `token`.
    #[must_use]
    pub fn new(token: session::Token, op: T) -> Self {
        Self { token, op }
    }
}

/// Operation the remote API allows anybody to perform, authorized by the
/// logged in [`User`] whenever there is one.
#[derive(Clone, Debug)]
pub struct MaybeAuthorized<T> {
    /// Bearer [`session::Token`] to authorize the operation with, if any.
    pub token: Option<session::Token>,

    /// Operation itself.
    pub op: T,
}

impl<T> MaybeAuthorized<T> {
    /// Wraps the provided `op` to be authorized with the provided `token`,
    /// if any.
    #[must_use]
    pub fn new(token: Option<session::Token>, op: T) -> Self {
        Self { token, op }
    }
}

/// Request for a new [`Session`] of a [`User`].
///
/// [`Session`]: user::Session
#[derive(Debug)]
pub struct Login {
    /// [`user::Login`] of the [`User`].
    pub username: user::Login,

    /// [`user::Password`] of the [`User`].
    pub password: SecretBox<user::Password>,
}

/// Successful response to a [`Login`].
#[derive(Clone, Debug, Deserialize)]
pub struct LoginResponse {
    /// Informational message of the remote API.
    #[serde(default)]
    pub message: Option<String>,

    /// Issued [`session::Token`].
    pub token: session::Token,

    /// Logged in [`User`].
    pub user: User,
}

/// Request for invalidating a [`session::Token`] remotely.
#[derive(Clone, Debug)]
pub struct Logout {
    /// [`session::Token`] to invalidate.
    pub token: session::Token,
}

/// Request for registering a new [`User`].
#[derive(Debug)]
pub struct Register {
    /// [`user::Username`] of the new [`User`].
    pub username: user::Username,

    /// [`user::Email`] of the new [`User`].
    pub email: user::Email,

    /// [`user::Password`] of the new [`User`].
    pub password: SecretBox<user::Password>,
}

/// [`Api`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// Request could not be sent or its response could not be read.
    #[cfg(feature = "rest")]
    #[display("Network failure: {_0}")]
    Network(reqwest::Error),

    /// Response body is not the expected JSON.
    #[display("Malformed response: {_0}")]
    Malformed(serde_json::Error),

    /// Remote API responded with a non-success status.
    #[display("{_0}")]
    Rejected(Rejection),
}

impl Error {
    /// Returns the [`Rejection`] of this [`Error`], if it's the one.
    #[must_use]
    pub fn rejection(&self) -> Option<&Rejection> {
        if let Self::Rejected(r) = self {
            Some(r)
        } else {
            None
        }
    }
}

/// Non-success response of the remote API.
#[derive(Clone, Debug, StdError)]
pub struct Rejection {
    /// HTTP status of the response.
    pub status: StatusCode,

    /// Message provided by the remote API, if any.
    pub message: Option<String>,
}

impl Rejection {
    /// Extracts a [`Rejection`] message out of the provided response `body`.
    ///
    /// Only a non-blank string `message` field of a JSON object counts.
    #[must_use]
    pub fn from_body(status: StatusCode, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|json| Some(json.get("message")?.as_str()?.to_owned()))
            .filter(|m| !m.trim().is_empty());
        Self { status, message }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(msg) => f.write_str(msg),
            None => write!(f, "server responded with `{}`", self.status),
        }
    }
}

#[cfg(test)]
mod spec {
    use http::StatusCode;

    use super::Rejection;

    #[test]
    fn extracts_server_message() {
        let r = Rejection::from_body(
            StatusCode::BAD_REQUEST,
            r#"{"message":"username taken"}"#,
        );

        assert_eq!(r.message.as_deref(), Some("username taken"));
        assert_eq!(r.to_string(), "username taken");
    }

    #[test]
    fn falls_back_to_status() {
        for body in ["", "<html>", r#"{"message":42}"#, r#"{"message":" "}"#] {
            let r = Rejection::from_body(StatusCode::BAD_GATEWAY, body);

            assert_eq!(r.message, None, "body: {body}");
            assert_eq!(r.to_string(), "server responded with `502 Bad Gateway`");
        }
    }
}
