//! Who may read or change what.
//!
//! Every lot-scoped handler goes through [`authorize_lot`]; administrative
//! resources (cameras, users, link tables) go through [`require_service_admin`]
//! or [`require_user_admin`]. List endpoints ask [`visibility`] how far to
//! widen the query. The functions only read, so calling them twice in one
//! request gives the same answer.

use async_trait::async_trait;
use tracing::debug;

use crate::models::UserRole;

/// The authenticated caller, decoded from a verified identity token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: i64,
    pub username: String,
    pub role: UserRole,
}

impl Identity {
    pub fn is_service_admin(&self) -> bool {
        self.role == UserRole::ServiceAdmin
    }
}

/// Why a request was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denial {
    /// No (valid) identity was presented. Maps to 401.
    Unauthenticated,
    /// The caller's role can never perform this action. Maps to 403.
    InsufficientRole,
    /// A parking administrator without a grant for the lot. Maps to 403.
    NotLinked,
}

/// Outcome of a policy check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allow,
    Deny(Denial),
}

impl Access {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Access::Allow)
    }

    /// Converts to a `Result` so handlers can use `?`.
    pub fn into_result(self) -> Result<(), Denial> {
        match self {
            Access::Allow => Ok(()),
            Access::Deny(denial) => Err(denial),
        }
    }
}

/// How much of a lot-scoped table a list query may return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Every row.
    All,
    /// Only rows whose lot has a grant for this user.
    LinkedTo(i64),
}

/// Lookup of user-to-lot grants.
#[async_trait]
pub trait LotLinks: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    async fn is_linked(&self, user_id: i64, parking_id: i64) -> Result<bool, Self::Error>;
}

/// List scope for lots, spots and history.
///
/// Anonymous callers and service admins see everything; a parking
/// administrator only sees lots they hold a grant for. Lookups by id are not
/// scoped.
pub fn visibility(caller: Option<&Identity>) -> Visibility {
    match caller {
        Some(identity) if identity.role == UserRole::ParkingAdministrator => {
            Visibility::LinkedTo(identity.user_id)
        }
        _ => Visibility::All,
    }
}

/// Writes to cameras, link tables, and lot creation/deletion.
pub fn require_service_admin(caller: Option<&Identity>) -> Access {
    match caller {
        None => Access::Deny(Denial::Unauthenticated),
        Some(identity) if identity.is_service_admin() => Access::Allow,
        Some(identity) => {
            debug!(user_id = identity.user_id, role = %identity.role, "Service admin required");
            Access::Deny(Denial::InsufficientRole)
        }
    }
}

/// Every read and write of user accounts.
pub fn require_user_admin(caller: Option<&Identity>) -> Access {
    // Same table as service-admin writes; kept separate because user reads are
    // gated too, unlike every other resource.
    require_service_admin(caller)
}

/// Writes to a specific lot or to rows that belong to it.
pub async fn authorize_lot<L>(
    caller: Option<&Identity>,
    parking_id: i64,
    links: &L,
) -> Result<Access, L::Error>
where
    L: LotLinks + ?Sized,
{
    let identity = match caller {
        None => return Ok(Access::Deny(Denial::Unauthenticated)),
        Some(identity) => identity,
    };

    match identity.role {
        UserRole::ServiceAdmin => Ok(Access::Allow),
        UserRole::ParkingAdministrator => {
            if links.is_linked(identity.user_id, parking_id).await? {
                Ok(Access::Allow)
            } else {
                debug!(
                    user_id = identity.user_id,
                    parking_id = parking_id,
                    "Parking administrator has no grant for lot"
                );
                Ok(Access::Deny(Denial::NotLinked))
            }
        }
    }
}

/// Check for list requests that name a lot explicitly.
///
/// A parking administrator filtering by a lot they have no grant for is
/// refused instead of getting an empty list. Everyone else passes.
pub async fn authorize_lot_filter<L>(
    caller: Option<&Identity>,
    parking_id: Option<i64>,
    links: &L,
) -> Result<Access, L::Error>
where
    L: LotLinks + ?Sized,
{
    match (caller, parking_id) {
        (Some(identity), Some(parking_id)) if identity.role == UserRole::ParkingAdministrator => {
            authorize_lot(caller, parking_id, links).await
        }
        _ => Ok(Access::Allow),
    }
}
