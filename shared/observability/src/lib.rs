//! Plan catalog observability library.
//!
//! Provides the tracing subscriber setup shared by the plan catalog binaries
//! and an actix-web middleware that logs every request with a request id.

pub mod init;
pub mod middleware;
pub mod request_id;

pub use init::*;
pub use middleware::*;
pub use request_id::*;
