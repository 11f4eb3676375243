//! Database entity definitions.
//!
//! Entities are direct mappings to database rows.

pub mod app_user;
pub mod camera;
pub mod parking;
pub mod parking_camera;
pub mod parking_history;
pub mod parking_spot;
pub mod user_parking;

pub use app_user::{AppUserCredentialsEntity, AppUserEntity, UserRoleDb};
pub use camera::CameraEntity;
pub use parking::ParkingEntity;
pub use parking_camera::ParkingCameraEntity;
pub use parking_history::ParkingHistoryEntity;
pub use parking_spot::ParkingSpotEntity;
pub use user_parking::UserParkingEntity;
