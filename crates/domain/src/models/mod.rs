//! Domain models for the parking backend.

pub mod app_user;
pub mod camera;
pub mod parking;
pub mod parking_camera;
pub mod parking_history;
pub mod parking_spot;
pub mod patch;
pub mod query;
pub mod user_parking;

pub use app_user::{
    AppUser, AppUserChanges, AppUserCredentials, LoginRequest, LoginResponse, LoginUser, UserRole,
};
pub use camera::Camera;
pub use parking::Parking;
pub use parking_camera::ParkingCamera;
pub use parking_history::ParkingHistory;
pub use parking_spot::ParkingSpot;
pub use patch::{PartialUpdate, Patch};
pub use user_parking::UserParking;
