/*!
 * API Module
 * Request layer and the NDJSON server in front of it
 */

pub mod handlers;
pub mod server;
pub mod service;
pub mod types;

// Re-export for convenience
pub use handlers::{dispatch, dispatch_line, Reply};
pub use server::{serve, start_server};
pub use service::{Engine, SimulatorService};
pub use types::*;
