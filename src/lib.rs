pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod pages;
pub mod router;
pub mod service;

pub use error::{AppError, DbError, Unavailable};
pub use service::{Resolver, SessionGuard};
