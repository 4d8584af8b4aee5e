#![allow(dead_code)]

use chrono::Utc;
use contact_front::DbError;
use contact_front::db::{ContactRecord, NewContact};
use contact_front::db::{Connector, Session};
use contact_front::service::ConnectionConfig;
use std::collections::HashSet;
use std::io;
use std::sync::{Arc, Mutex, MutexGuard};

/// In-memory stand-in for a MySQL server.
///
/// Hosts must be accepted explicitly before connections to them succeed.
/// `kill_connections` invalidates every session opened so far, the way a
/// server-side idle timeout would.
#[derive(Clone, Default)]
pub struct FakeServer {
    inner: Arc<Mutex<FakeState>>,
}

#[derive(Default)]
struct FakeState {
    reachable: HashSet<String>,
    hanging: HashSet<String>,
    hang_pings: bool,
    attempts: Vec<String>,
    generation: u64,
    table_exists: bool,
    schema_calls: u32,
    fail_writes: bool,
    rows: Vec<ContactRecord>,
}

impl FakeServer {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, FakeState> {
        self.inner.lock().expect("fake server poisoned")
    }

    pub fn accept(&self, host: &str) -> &Self {
        self.state().reachable.insert(host.to_string());
        self
    }

    pub fn refuse(&self, host: &str) -> &Self {
        self.state().reachable.remove(host);
        self
    }

    /// Connections to `host` never complete, like a silently dropped SYN.
    pub fn hang(&self, host: &str) -> &Self {
        self.state().hanging.insert(host.to_string());
        self
    }

    /// Pings on open sessions never answer.
    pub fn hang_pings(&self, hang: bool) {
        self.state().hang_pings = hang;
    }

    pub fn kill_connections(&self) {
        self.state().generation += 1;
    }

    pub fn fail_writes(&self, fail: bool) {
        self.state().fail_writes = fail;
    }

    /// Hosts connected to, in order, successful or not.
    pub fn attempts(&self) -> Vec<String> {
        self.state().attempts.clone()
    }

    pub fn rows(&self) -> Vec<ContactRecord> {
        self.state().rows.clone()
    }

    pub fn schema_calls(&self) -> u32 {
        self.state().schema_calls
    }

    pub fn table_exists(&self) -> bool {
        self.state().table_exists
    }

    pub fn connector(&self) -> FakeConnector {
        FakeConnector(self.clone())
    }
}

pub struct FakeConnector(pub FakeServer);

impl Connector for FakeConnector {
    type Conn = FakeConn;

    async fn connect(&self, config: &ConnectionConfig) -> Result<FakeConn, sqlx::Error> {
        let outcome = {
            let mut state = self.0.state();
            state.attempts.push(config.host.clone());
            if state.hanging.contains(&config.host) {
                None
            } else if state.reachable.contains(&config.host) {
                Some(Ok(state.generation))
            } else {
                Some(Err(refused()))
            }
        };
        let Some(outcome) = outcome else {
            return std::future::pending().await;
        };
        outcome.map(|generation| FakeConn {
            server: self.0.clone(),
            generation,
        })
    }
}

pub struct FakeConn {
    server: FakeServer,
    generation: u64,
}

impl FakeConn {
    fn alive(&self) -> bool {
        self.server.state().generation == self.generation
    }
}

impl Session for FakeConn {
    async fn ping(&mut self) -> Result<(), DbError> {
        let hang = self.server.state().hang_pings;
        if hang {
            return std::future::pending().await;
        }
        if self.alive() {
            Ok(())
        } else {
            Err(DbError::Stale(refused()))
        }
    }

    async fn ensure_schema(&mut self) -> Result<(), DbError> {
        let mut state = self.server.state();
        state.schema_calls += 1;
        state.table_exists = true;
        Ok(())
    }

    async fn insert_contact(&mut self, contact: &NewContact) -> Result<i64, DbError> {
        if !self.alive() {
            return Err(DbError::Write(refused()));
        }
        let mut state = self.server.state();
        if state.fail_writes {
            return Err(DbError::Write(sqlx::Error::Io(io::Error::other(
                "disk full",
            ))));
        }
        let id = state.rows.len() as i64 + 1;
        state.rows.push(ContactRecord {
            id,
            name: contact.name.clone(),
            company: contact.company.clone(),
            email: contact.email.clone(),
            phone: contact.phone.clone(),
            message: contact.message.clone(),
            created_at: Utc::now(),
        });
        Ok(id)
    }

    async fn fetch_contact(&mut self, id: i64) -> Result<Option<ContactRecord>, DbError> {
        Ok(self.server.state().rows.iter().find(|r| r.id == id).cloned())
    }
}

fn refused() -> sqlx::Error {
    sqlx::Error::Io(io::Error::new(
        io::ErrorKind::ConnectionRefused,
        "connection refused",
    ))
}
