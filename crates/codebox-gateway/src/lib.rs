//! codebox-gateway — HTTP surface for the execution sandbox
//!
//! Exposes the sandbox as form-POST endpoints for a browser UI: run code,
//! download code as a file, list languages, health. Owns the
//! deployment-side concerns the engine deliberately does not: the
//! concurrency cap, CORS, and the local/remote backend switch.

pub mod routes;
pub mod server;
pub mod state;

pub use server::GatewayServer;
pub use state::GatewayState;
