//! Connection resolution, the per-request session guard and the submission
//! path built on top of them.

pub mod resolver;
pub mod session_guard;
pub mod sources;
pub mod submission;

pub use resolver::{Resolved, Resolver};
pub use session_guard::{ConnectionHealth, LiveSession, SessionGuard};
pub use sources::{ConnectionConfig, ConnectionSource, Environment, SOURCES};
pub use submission::{SubmissionOutcome, submit};
