//! HTTP server implementation

pub mod builder;
mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;


pub use builder::{ServerBuilder, run_server};
pub use server::HttpServer;
pub use state::AppState;
