//! Role sets and the role/permission catalog

mod catalog;
mod role_set;

pub use catalog::RoleCatalog;
pub use role_set::{RoleEdit, RoleSet};
