//! Domain services for the parking backend.

pub mod access_policy;

pub use access_policy::{
    authorize_lot, authorize_lot_filter, require_service_admin, require_user_admin, visibility,
    Access, Denial, Identity, LotLinks, Visibility,
};
