use crate::db::session::{Connector, Session};
use crate::error::Unavailable;
use crate::service::resolver::{Resolved, Resolver};
use crate::service::sources::CONNECT_TIMEOUT;
use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{MappedMutexGuard, Mutex, MutexGuard};
use tracing::{info, warn};

/// Single access point to the process-wide connection.
///
/// Every request that needs the datastore goes through
/// [`with_connection`](Self::with_connection), which verifies the current
/// connection and re-resolves it if it is missing or stale. The mutex makes
/// the check-then-replace atomic, so concurrent requests never open
/// redundant connections.
pub struct SessionGuard<C: Connector> {
    resolver: Resolver<C>,
    slot: Mutex<Option<Resolved<C::Conn>>>,
    /// Completed re-resolutions, successful or not.
    resolutions: AtomicU64,
}

/// Exclusive borrow of the live connection for the duration of a request.
pub struct LiveSession<'a, T> {
    conn: MappedMutexGuard<'a, T>,
    source: &'static str,
}

impl<T> LiveSession<'_, T> {
    pub fn source(&self) -> &'static str {
        self.source
    }
}

impl<T> Deref for LiveSession<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.conn
    }
}

impl<T> DerefMut for LiveSession<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.conn
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionHealth {
    pub connected: bool,
    pub source: Option<&'static str>,
}

impl<C: Connector> SessionGuard<C> {
    pub fn new(resolver: Resolver<C>) -> Self {
        Self {
            resolver,
            slot: Mutex::new(None),
            resolutions: AtomicU64::new(0),
        }
    }

    pub fn resolver(&self) -> &Resolver<C> {
        &self.resolver
    }

    /// Startup path: resolve with table bootstrap and install the result.
    /// Returns `false` when the process starts in degraded mode.
    pub async fn start(&self) -> bool {
        match self.resolver.bootstrap().await {
            Ok(resolved) => {
                self.install(resolved).await;
                true
            }
            Err(Unavailable) => {
                warn!("starting without a datastore; submissions will not be saved");
                false
            }
        }
    }

    /// Replace whatever connection is held with `resolved`.
    pub async fn install(&self, resolved: Resolved<C::Conn>) {
        *self.slot.lock().await = Some(resolved);
    }

    /// Verify the held connection, re-resolving it if it is missing or stale.
    ///
    /// Waiting for the lock is bounded by [`CONNECT_TIMEOUT`]. A request that
    /// waited while another one ran a failed re-resolution shares that
    /// outcome instead of running its own, so an outage never queues
    /// resolutions back to back.
    pub async fn with_connection(&self) -> Result<LiveSession<'_, C::Conn>, Unavailable> {
        let seen = self.resolutions.load(Ordering::Acquire);
        let Ok(mut slot) = tokio::time::timeout(CONNECT_TIMEOUT, self.slot.lock()).await else {
            warn!("connection busy past the timeout; proceeding without datastore");
            return Err(Unavailable);
        };

        let mut dropped_stale = false;
        if let Some(current) = slot.as_mut() {
            let alive = tokio::time::timeout(CONNECT_TIMEOUT, current.conn.ping()).await;
            match alive {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    warn!(source = current.source, error = %e, "stale connection; re-resolving");
                    *slot = None;
                    dropped_stale = true;
                }
                Err(_) => {
                    warn!(source = current.source, "liveness check timed out; re-resolving");
                    *slot = None;
                    dropped_stale = true;
                }
            }
        }

        if slot.is_none() {
            if !dropped_stale && self.resolutions.load(Ordering::Acquire) != seen {
                // a resolution finished while we waited and left nothing behind
                return Err(Unavailable);
            }
            let resolved = self.resolver.resolve().await;
            self.resolutions.fetch_add(1, Ordering::AcqRel);
            let resolved = resolved?;
            info!(source = resolved.source, "connection re-established");
            *slot = Some(resolved);
        }

        let source = slot.as_ref().map(|r| r.source).ok_or(Unavailable)?;
        let conn = MutexGuard::try_map(slot, |s| s.as_mut().map(|r| &mut r.conn))
            .map_err(|_| Unavailable)?;
        Ok(LiveSession { conn, source })
    }

    /// Current health, after the same verify-and-replace step a request runs.
    pub async fn health(&self) -> ConnectionHealth {
        match self.with_connection().await {
            Ok(session) => ConnectionHealth {
                connected: true,
                source: Some(session.source()),
            },
            Err(Unavailable) => ConnectionHealth {
                connected: false,
                source: None,
            },
        }
    }
}
