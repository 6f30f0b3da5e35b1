//! REST API layer
//!
//! Thin plumbing over the query service and the refresh coordinator; no
//! business logic lives here.

mod server;

pub mod models;
pub mod routes;
pub mod state;
pub mod utils;

pub use server::{shutdown, start_server};
