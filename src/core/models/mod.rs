//! Domain models

pub mod billing;
pub mod device;
pub mod user;

pub use billing::{ContactProfile, Demographics, Journal, SubscribedService, Subscription};
pub use device::{Device, DeviceStatistic, DeviceStatistics};
pub use user::User;
