use axum::{
    Router,
    extract::FromRef,
    routing::{get, post},
};
use std::sync::Arc;

use crate::db::session::Connector;
use crate::handlers::{contact::submit_contact, diagnostics::db_health, pages};
use crate::pages::Pages;
use crate::service::session_guard::SessionGuard;

/// Shared state for every route.
pub struct AppState<C: Connector> {
    pub guard: Arc<SessionGuard<C>>,
    pub pages: Pages,
}

impl<C: Connector> AppState<C> {
    pub fn new(guard: SessionGuard<C>, pages: Pages) -> Self {
        Self {
            guard: Arc::new(guard),
            pages,
        }
    }
}

impl<C: Connector> Clone for AppState<C> {
    fn clone(&self) -> Self {
        Self {
            guard: Arc::clone(&self.guard),
            pages: self.pages.clone(),
        }
    }
}

impl<C: Connector> FromRef<AppState<C>> for Pages {
    fn from_ref(state: &AppState<C>) -> Self {
        state.pages.clone()
    }
}

pub fn app_router<C: Connector>(state: AppState<C>) -> Router {
    Router::new()
        .route("/", get(pages::home))
        .route("/products", get(pages::products))
        .route("/contact", get(pages::contact))
        .route("/ecommerce", get(pages::ecommerce))
        .route("/submit", post(submit_contact::<C>))
        .route("/health/db", get(db_health::<C>))
        .with_state(state)
}
