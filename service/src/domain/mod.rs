//! Domain definitions.

pub mod game;
pub mod offense;
pub mod season;
pub mod user;

pub use self::{game::Game, season::Season, user::User};
