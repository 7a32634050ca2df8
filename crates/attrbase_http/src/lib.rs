//! HTTP surface for the attribute registry.
//!
//! # Responsibility
//! - Map the REST contract (`/api/attribute`, `/health`) onto core services.
//! - Own request-shape validation and the JSON error envelope.
//!
//! # Invariants
//! - Handlers never run SQLite work on the async executor.
//! - Storage failures are reported with a generic message; details go to logs.

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use router::{build_router, cors_layer};
pub use server::serve;
pub use state::AppState;
