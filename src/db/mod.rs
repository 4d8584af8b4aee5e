//! Database module: contact rows, the table DDL and the MySQL session.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows and the insert payload
//! - `schema.rs`: idempotent DDL for the `contacts` table
//! - `session.rs`: the `Connector` / `Session` seams the resolver and guard drive
//! - `mysql.rs`: the sqlx-backed implementation of those seams

pub mod models;
pub mod mysql;
pub mod schema;
pub mod session;

pub use models::{ContactRecord, NewContact};
pub use mysql::MySqlConnector;
pub use schema::CONTACTS_INIT;
pub use session::{Connector, Session};
