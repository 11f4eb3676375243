//! Application services used by the handlers and at startup.

pub mod admin_bootstrap;
pub mod auth;

pub use admin_bootstrap::{bootstrap_admin, BootstrapError, BootstrapOutcome};
pub use auth::{AuthError, AuthService};
