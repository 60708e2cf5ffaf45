//! Service contains the client-side logic of the Toros Softball application:
//! session handling and typed access to the remote statistics API.
//!
//! List of available Cargo features:
#![doc = document_features::document_features!()]
#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod auth;
pub mod command;
pub mod domain;
pub mod infra;
pub mod query;
pub mod read;

use std::sync::Arc;

use derive_more::Debug;
use tokio::sync::{OnceCell, RwLock};
// Used in integration tests.
#[cfg(test)]
use axum as _;
#[cfg(test)]
use jsonwebtoken as _;

#[cfg(doc)]
use infra::{Api, Storage};

use crate::domain::user::{self, session};

pub use self::{command::Command, query::Query};

/// Domain service.
///
/// Owns the process-wide [`auth::State`]. Clones share the same state.
#[derive(Clone, Debug)]
pub struct Service<Net, Store> {
    /// Remote [`Api`] of this [`Service`].
    api: Net,

    /// Secure [`Storage`] of this [`Service`].
    storage: Store,

    /// Current authentication state.
    auth: Arc<RwLock<auth::State>>,

    /// Marker of the stored session being loaded already.
    #[debug(skip)]
    loaded: Arc<OnceCell<()>>,
}

impl<Net, Store> Service<Net, Store> {
    /// Creates a new [`Service`] with the provided infrastructure.
    ///
    /// The returned [`Service`] is in the loading state until
    /// [`command::LoadSession`] is executed.
    pub fn new(api: Net, storage: Store) -> Self {
        Self {
            api,
            storage,
            auth: Arc::default(),
            loaded: Arc::default(),
        }
    }

    /// Returns [`Api`] of this [`Service`].
    #[must_use]
    pub fn api(&self) -> &Net {
        &self.api
    }

    /// Returns [`Storage`] of this [`Service`].
    #[must_use]
    pub fn storage(&self) -> &Store {
        &self.storage
    }

    /// Returns the [`session::Token`] of the current session, if any.
    async fn token(&self) -> Option<session::Token> {
        self.auth.read().await.token().cloned()
    }

    /// Returns the [`session::Token`] and the [`user::Id`] of the current
    /// session, if any.
    async fn credentials(&self) -> Option<(session::Token, user::Id)> {
        self.auth
            .read()
            .await
            .session()
            .map(|s| (s.token.clone(), s.user.id))
    }
}
