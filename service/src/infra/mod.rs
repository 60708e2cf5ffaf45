//! Infrastructure layer.

pub mod api;
pub mod storage;

pub use self::{api::Api, storage::Storage};
#[cfg(feature = "rest")]
pub use self::api::Rest;
