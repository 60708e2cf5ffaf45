//! [`Command`] definition.

pub mod create_game;
pub mod create_season;
pub mod guard_session;
pub mod load_session;
pub mod login;
pub mod logout;
pub mod record_offense;
pub mod register_user;
pub mod update_offense;
pub mod update_season;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    create_game::CreateGame,
    create_season::CreateSeason,
    guard_session::{Access, GuardSession, Redirect, Screen},
    load_session::LoadSession,
    login::Login,
    logout::Logout,
    record_offense::RecordOffense,
    register_user::RegisterUser,
    update_offense::UpdateOffense,
    update_season::UpdateSeason,
};
