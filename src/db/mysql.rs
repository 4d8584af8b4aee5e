use crate::db::models::{ContactRecord, NewContact};
use crate::db::schema::CONTACTS_INIT;
use crate::db::session::{Connector, Session};
use crate::error::DbError;
use crate::service::sources::ConnectionConfig;
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection};
use sqlx::{ConnectOptions, Connection};

/// Opens plain (unpooled) MySQL connections.
#[derive(Debug, Clone, Copy, Default)]
pub struct MySqlConnector;

impl Connector for MySqlConnector {
    type Conn = MySqlConnection;

    async fn connect(&self, config: &ConnectionConfig) -> Result<MySqlConnection, sqlx::Error> {
        let mut opts = MySqlConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.user)
            .database(&config.database);
        if !config.password.is_empty() {
            opts = opts.password(&config.password);
        }
        opts.connect().await
    }
}

impl Session for MySqlConnection {
    async fn ping(&mut self) -> Result<(), DbError> {
        Connection::ping(self).await.map_err(DbError::Stale)
    }

    async fn ensure_schema(&mut self) -> Result<(), DbError> {
        sqlx::query(CONTACTS_INIT)
            .execute(&mut *self)
            .await
            .map_err(DbError::Schema)?;
        Ok(())
    }

    async fn insert_contact(&mut self, contact: &NewContact) -> Result<i64, DbError> {
        // explicit commit: the session may run with autocommit off
        let mut tx = Connection::begin(&mut *self).await.map_err(DbError::Write)?;
        let result = sqlx::query(
            r#"
            INSERT INTO contacts (name, company, email, phone, message)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&contact.name)
        .bind(&contact.company)
        .bind(&contact.email)
        .bind(&contact.phone)
        .bind(&contact.message)
        .execute(&mut *tx)
        .await
        .map_err(DbError::Write)?;
        tx.commit().await.map_err(DbError::Write)?;
        Ok(result.last_insert_id() as i64)
    }

    async fn fetch_contact(&mut self, id: i64) -> Result<Option<ContactRecord>, DbError> {
        let row = sqlx::query_as::<_, ContactRecord>(
            r#"SELECT CAST(id AS SIGNED) AS id, name,
               COALESCE(company, '') AS company, email,
               COALESCE(phone, '') AS phone,
               COALESCE(message, '') AS message, created_at
               FROM contacts WHERE id = ?"#,
        )
        .bind(id)
        .fetch_optional(&mut *self)
        .await?;
        Ok(row)
    }
}
