//! Custom Axum extractors.

pub mod caller;
pub mod request;

pub use caller::{Caller, MaybeCaller};
pub use request::{ApiJson, ApiPath, ApiQuery};
