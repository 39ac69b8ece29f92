//! # Roster Web
//!
//! HTTP boundary over [`roster_core::DirectoryService`]: routing, request binding, id
//! validation, error-to-status mapping and the `{data, status, error}` response body.
//!
//! | Kind | Status |
//! |------|--------|
//! | `NotFound` | 404 |
//! | `InvalidInput` | 400 |
//! | `RateLimited` | 429 |
//! | `UpstreamUnavailable` | 502 |
//! | `Unknown` | 500 |

pub mod error;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use error::{ApiError, ServeError};
pub use response::ApiSuccess;
pub use routes::build_router;
pub use server::serve;
pub use state::AppState;
