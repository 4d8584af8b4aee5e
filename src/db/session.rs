use crate::db::models::{ContactRecord, NewContact};
use crate::error::DbError;
use crate::service::sources::ConnectionConfig;
use sqlx::Error as SqlxError;
use std::future::Future;

/// Opens one live session from a resolved config.
///
/// The resolver bounds every call with the config's timeout, so
/// implementations need not enforce it themselves.
pub trait Connector: Send + Sync + 'static {
    type Conn: Session;

    fn connect(
        &self,
        config: &ConnectionConfig,
    ) -> impl Future<Output = Result<Self::Conn, SqlxError>> + Send;
}

/// Operations the core performs on a live connection.
pub trait Session: Send + 'static {
    /// Trivial round-trip used only to confirm the connection still works.
    fn ping(&mut self) -> impl Future<Output = Result<(), DbError>> + Send;

    /// Idempotent `contacts` table creation.
    fn ensure_schema(&mut self) -> impl Future<Output = Result<(), DbError>> + Send;

    /// Single parameterized insert. Returns the server-assigned id.
    fn insert_contact(
        &mut self,
        contact: &NewContact,
    ) -> impl Future<Output = Result<i64, DbError>> + Send;

    /// Read back one stored row; `None` when no row has that id.
    fn fetch_contact(
        &mut self,
        id: i64,
    ) -> impl Future<Output = Result<Option<ContactRecord>, DbError>> + Send;
}
