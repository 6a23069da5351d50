//! Typed client for the admin API and the view state it drives

pub mod api;
pub mod errors;
pub mod session;
pub mod table;
pub mod views;

pub use api::{AdminApi, HttpAdminClient};
pub use errors::{ClientError, GENERIC_ERROR_MESSAGE};
pub use session::{Route, RouteDecision, Session, route_guard};
pub use table::{Column, DataTable, TableError, TableState, TableView};
pub use views::{
    PERMISSION_OPTIONS, PermissionsView, ROLE_OPTIONS, RoleMutation, RoleToggle, RolesView,
};
