use crate::db::session::{Connector, Session};
use crate::error::{DbError, Unavailable};
use crate::service::sources::{ConnectionConfig, ConnectionSource, Environment, SOURCES};
use std::time::Instant;
use tracing::{debug, info, warn};

/// A live connection together with the source that produced it.
#[derive(Debug)]
pub struct Resolved<T> {
    pub conn: T,
    pub source: &'static str,
}

/// Turns configuration sources into a live connection.
///
/// Sources are tried in order and the first one that both yields a complete
/// config and connects wins. There are no retries within a single call.
pub struct Resolver<C> {
    connector: C,
    env: Environment,
    sources: Vec<ConnectionSource>,
}

impl<C: Connector> Resolver<C> {
    pub fn new(connector: C, env: Environment) -> Self {
        Self::with_sources(connector, env, SOURCES.to_vec())
    }

    /// Resolver over an explicit source order; [`Resolver::new`] passes
    /// [`SOURCES`].
    pub fn with_sources(connector: C, env: Environment, sources: Vec<ConnectionSource>) -> Self {
        Self {
            connector,
            env,
            sources,
        }
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    pub fn sources(&self) -> &[ConnectionSource] {
        &self.sources
    }

    pub async fn resolve(&self) -> Result<Resolved<C::Conn>, Unavailable> {
        for source in &self.sources {
            let Some(config) = source.config(&self.env) else {
                debug!(source = source.name, "source incomplete; skipping");
                continue;
            };

            let started = Instant::now();
            match self.attempt(source.name, &config).await {
                Ok(conn) => {
                    info!(
                        source = source.name,
                        host = %config.host,
                        database = %config.database,
                        outcome = "connected",
                        latency_ms = started.elapsed().as_millis() as u64,
                        "connection source succeeded"
                    );
                    return Ok(Resolved {
                        conn,
                        source: source.name,
                    });
                }
                Err(e) => {
                    warn!(
                        source = source.name,
                        host = %config.host,
                        outcome = "failed",
                        latency_ms = started.elapsed().as_millis() as u64,
                        error = %e,
                        "connection source failed"
                    );
                }
            }
        }

        warn!("no connection source succeeded; datastore unavailable");
        Err(Unavailable)
    }

    /// First resolution at process start: resolve, then make sure the
    /// `contacts` table exists. A bootstrap failure is logged but the
    /// connection is kept, since a compatible table may already be there.
    pub async fn bootstrap(&self) -> Result<Resolved<C::Conn>, Unavailable> {
        let mut resolved = self.resolve().await?;
        match resolved.conn.ensure_schema().await {
            Ok(()) => info!(source = resolved.source, "contacts table ready"),
            Err(e) => warn!(source = resolved.source, error = %e, "table bootstrap failed; keeping connection"),
        }
        Ok(resolved)
    }

    async fn attempt(
        &self,
        source_name: &'static str,
        config: &ConnectionConfig,
    ) -> Result<C::Conn, DbError> {
        match tokio::time::timeout(config.timeout, self.connector.connect(config)).await {
            Ok(Ok(conn)) => Ok(conn),
            Ok(Err(error)) => Err(DbError::Connect { source_name, error }),
            Err(_) => Err(DbError::Timeout {
                source_name,
                after: config.timeout,
            }),
        }
    }
}
