/// Contact profile entity module
pub mod contact_profile;
/// Device entity module
pub mod device;
/// Journal entity module
pub mod journal;
/// Subscription entity module
pub mod subscription;
/// User entity module
pub mod user;

pub use contact_profile::Entity as ContactProfile;
pub use device::Entity as Device;
pub use journal::Entity as Journal;
pub use subscription::Entity as Subscription;
pub use user::Entity as User;
