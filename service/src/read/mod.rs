//! Read entities definitions.

pub mod game;
pub mod stats;
pub mod user;

pub use self::user::Player;
