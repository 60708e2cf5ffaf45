//! Authentication [`State`] definitions.

use smart_default::SmartDefault;

use crate::domain::{
    user::{self, session, Session},
    User,
};

/// Authentication state of the application: who is logged in.
#[derive(Clone, Debug, SmartDefault)]
pub struct State {
    /// Current [`Session`], if any.
    pub(crate) session: Option<Session>,

    /// Indicator whether the stored [`Session`] is still being loaded.
    #[default(true)]
    pub(crate) loading: bool,
}

impl State {
    /// Returns the current [`Session`], if any.
    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Indicates whether somebody is logged in.
    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.session.is_some()
    }

    /// Indicates whether the stored [`Session`] is still being loaded.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Returns the [`session::Token`] of the current [`Session`].
    #[must_use]
    pub fn token(&self) -> Option<&session::Token> {
        self.session.as_ref().map(|s| &s.token)
    }

    /// Returns the logged in [`User`].
    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.session.as_ref().map(|s| &s.user)
    }

    /// Returns the [`user::Role`] of the logged in [`User`].
    #[must_use]
    pub fn role(&self) -> Option<user::Role> {
        self.session.as_ref().and_then(|s| s.role)
    }

    /// Returns the [`user::Superuser`] flag of the logged in [`User`].
    #[must_use]
    pub fn superuser(&self) -> Option<user::Superuser> {
        self.session.as_ref().and_then(|s| s.superuser)
    }

    /// Indicates whether the logged in [`User`] has administrative access,
    /// either by [`user::Role`] or by [`user::Superuser`] flag.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role().is_some_and(user::Role::is_admin)
            || self.superuser().is_some_and(user::Superuser::is_granted)
    }
}
