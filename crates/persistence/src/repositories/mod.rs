//! Repository implementations for database operations.

pub mod app_user;
pub mod camera;
pub mod parking;
pub mod parking_camera;
pub mod parking_history;
pub mod parking_spot;
pub mod user_parking;

pub use app_user::AppUserRepository;
pub use camera::CameraRepository;
pub use parking::ParkingRepository;
pub use parking_camera::ParkingCameraRepository;
pub use parking_history::{ParkingHistoryFilter, ParkingHistoryRepository};
pub use parking_spot::{ParkingSpotFilter, ParkingSpotRepository};
pub use user_parking::UserParkingRepository;
