//! [`Error`]-related definitions.

use std::{convert::Infallible, fmt, process::ExitCode};

use derive_more::Error as StdError;
use itertools::Itertools as _;
use service::infra::{api, storage};
use tracerr::{Trace, Traced};

/// Defines a new error type.
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_error {
    (
        enum $name:ident {
            $(
                #[code = $code:literal]
                #[exit = $exit:literal]
                #[message = $message:literal]
                $variant:ident
            ),* $(,)?
        }
    ) => {
        /// Error type.
        #[derive(
            Clone,
            Copy,
            Debug,
            ::derive_more::Display,
            ::derive_more::Error
        )]
        pub enum $name {
            $(
                #[display($message)]
                #[doc = $message]
                $variant,
            )*
        }

        impl From<$name> for $crate::Error {
            fn from(err: $name) -> Self {
                match err {
                    $(
                        $name::$variant => Self {
                            code: $code,
                            exit: $exit,
                            message: $message.to_string(),
                            backtrace: None,
                        },
                    )*
                }
            }
        }
    };
}

define_error! {
    enum Common {
        #[code = "SESSION_REQUIRED"]
        #[exit = 3]
        #[message = "Your session has expired. Log in again with \
                     `toros login`"]
        SessionRequired,

        #[code = "NO_SEASONS"]
        #[exit = 1]
        #[message = "No seasons registered yet"]
        NoSeasons,
    }
}

/// CLI [`Error`] shown to the user as an alert.
#[derive(Clone, Debug, StdError)]
pub struct Error {
    /// [`Error`] code.
    pub code: Code,

    /// Process exit status of this [`Error`].
    pub exit: u8,

    /// Backtrace of this [`Error`].
    #[error(not(backtrace))]
    pub backtrace: Option<Trace>,

    /// [`Error`] message.
    pub message: String,
}

impl Error {
    /// Creates a new [`Error`] with the provided `code` and `message`, which
    /// makes the process exit with a generic failure status.
    #[must_use]
    pub fn new(code: Code, message: impl Into<String>) -> Self {
        Self {
            code,
            exit: 1,
            message: message.into(),
            backtrace: None,
        }
    }

    /// Create a new [`Error`] representing an unexpected failure.
    #[must_use]
    pub fn internal(msg: &impl ToString) -> Self {
        Self {
            code: "INTERNAL_ERROR",
            exit: 70,
            message: msg.to_string(),
            backtrace: None,
        }
    }

    /// Returns the [`ExitCode`] the process should terminate with.
    #[must_use]
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.exit)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            code,
            exit: _,
            backtrace,
            message,
        } = self;

        write!(
            f,
            "[{code}]: {message}{}",
            backtrace
                .iter()
                .format_with("\n", |trace, f| f(&format_args!("\n{trace}"))),
        )
    }
}

/// [`Error`] code.
pub type Code = &'static str;

/// Helper trait for converting types into [`Error`]s.
pub trait AsError {
    /// Tries to convert the type into an [`Error`].
    ///
    /// [`None`] is returned if the type cannot be converted into an [`Error`].
    fn try_as_error(&self) -> Option<Error>;

    /// Converts the type into an [`Error`].
    fn as_error(&self) -> Error
    where
        Self: fmt::Display,
    {
        self.try_as_error()
            .unwrap_or_else(|| Error::internal(&self))
    }

    /// Converts the type into an [`Error`] by consuming it.
    fn into_error(self) -> Error
    where
        Self: fmt::Display + Sized,
    {
        self.as_error()
    }
}

impl<E: AsError> AsError for Traced<E> {
    fn try_as_error(&self) -> Option<Error> {
        let mut error = self.as_ref().try_as_error()?;
        error.backtrace = Some(self.trace().clone());
        Some(error)
    }
}

impl AsError for Infallible {
    fn try_as_error(&self) -> Option<Error> {
        match *self {}
    }
}

impl AsError for api::Error {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Network(e) => Some(Error {
                exit: 69,
                ..Error::new(
                    "NETWORK_ERROR",
                    format!("Could not reach the server: {e}"),
                )
            }),
            Self::Malformed(_) => Some(Error::new(
                "MALFORMED_RESPONSE",
                "The server answered with unexpected data",
            )),
            Self::Rejected(rejection) => {
                Some(Error::new("REJECTED", rejection.to_string()))
            }
        }
    }
}

impl AsError for storage::Error {
    fn try_as_error(&self) -> Option<Error> {
        None
    }
}

#[cfg(test)]
mod spec {
    use service::infra::api::{self, Rejection};

    use super::{AsError as _, Common, Error};

    #[test]
    fn shows_rejection_message() {
        let err = api::Error::Rejected(Rejection {
            status: http::StatusCode::CONFLICT,
            message: Some("Season already exists".into()),
        })
        .into_error();

        assert_eq!(err.code, "REJECTED");
        assert_eq!(err.message, "Season already exists");
        assert_eq!(err.exit, 1);
    }

    #[test]
    fn falls_back_to_internal() {
        let err = service::infra::storage::Error::Io(std::io::Error::other(
            "disk full",
        ))
        .into_error();

        assert_eq!(err.code, "INTERNAL_ERROR");
        assert!(err.message.contains("disk full"), "{}", err.message);
    }

    #[test]
    fn session_required_has_distinct_exit() {
        let err = Error::from(Common::SessionRequired);

        assert_eq!(err.code, "SESSION_REQUIRED");
        assert_eq!(err.exit, 3);
        assert!(err.message.contains("toros login"));
    }
}
