//! User directory administration: registration, login and RBAC

mod manager;
mod rbac_ops;
mod types;
mod user_ops;

pub use manager::UserManager;
pub use types::{Credentials, PermissionUpdate, Registration, RolesUpdate};
