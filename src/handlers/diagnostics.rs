use axum::{Json, extract::State};
use serde::Serialize;
use std::collections::BTreeMap;
use url::Url;

use crate::db::session::Connector;
use crate::router::AppState;
use crate::service::sources::{ConnectionSource, Environment};

const REDACTED: &str = "***";
const SECRET_HINTS: [&str; 3] = ["PASS", "SECRET", "TOKEN"];

#[derive(Debug, Serialize)]
pub struct DbHealthReport {
    pub status: &'static str,
    pub connected: bool,
    pub source: Option<&'static str>,
    /// Every recognised connection key that is set, secrets redacted.
    pub config: BTreeMap<&'static str, String>,
}

/// GET /health/db -> current connection health plus the discovered
/// connection settings. Never renders a secret value.
pub async fn db_health<C: Connector>(State(state): State<AppState<C>>) -> Json<DbHealthReport> {
    let health = state.guard.health().await;
    let resolver = state.guard.resolver();
    Json(DbHealthReport {
        status: if health.connected { "ok" } else { "degraded" },
        connected: health.connected,
        source: health.source,
        config: redacted_config(resolver.environment(), resolver.sources()),
    })
}

pub fn redacted_config(
    env: &Environment,
    sources: &[ConnectionSource],
) -> BTreeMap<&'static str, String> {
    sources
        .iter()
        .flat_map(|source| source.keys.iter().copied())
        .filter_map(|key| env.get(key).map(|value| (key, redact(key, value))))
        .collect()
}

/// Secret-named keys are masked outright; URLs keep everything but their
/// password. Anything that does not parse as a URL with a host is masked
/// whole.
pub fn redact(key: &str, value: &str) -> String {
    let upper = key.to_ascii_uppercase();
    if SECRET_HINTS.iter().any(|hint| upper.contains(hint)) {
        return REDACTED.to_string();
    }
    if upper.ends_with("URL") {
        return match Url::parse(value) {
            Ok(mut url) if url.has_host() => {
                if url.password().is_some() && url.set_password(Some(REDACTED)).is_err() {
                    return REDACTED.to_string();
                }
                url.to_string()
            }
            _ => REDACTED.to_string(),
        };
    }
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::sources::SOURCES;

    #[test]
    fn passwords_are_masked_in_every_convention() {
        let env = Environment::from_pairs([
            ("MYSQL_URL", "mysql://root:hunter2@db:3306/railway"),
            ("MYSQL_HOST", "db"),
            ("MYSQL_PASSWORD", "hunter2"),
            ("MYSQLPASSWORD", "hunter2"),
            ("UNRELATED", "hunter2"),
        ]);
        let view = redacted_config(&env, &SOURCES);

        assert_eq!(view.get("MYSQL_HOST").map(String::as_str), Some("db"));
        assert_eq!(view.get("MYSQL_PASSWORD").map(String::as_str), Some(REDACTED));
        assert_eq!(view.get("MYSQLPASSWORD").map(String::as_str), Some(REDACTED));
        assert!(!view.contains_key("UNRELATED"));

        let url = view.get("MYSQL_URL").expect("url listed");
        assert!(url.contains("root"));
        assert!(!url.contains("hunter2"));
        assert!(view.values().all(|v| !v.contains("hunter2")));
    }

    #[test]
    fn urls_without_password_are_kept_and_garbage_is_masked() {
        assert_eq!(
            redact("DATABASE_URL", "mysql://root@db/railway"),
            "mysql://root@db/railway"
        );
        assert_eq!(redact("MYSQL_URL", "root:hunter2 at db"), REDACTED);
    }
}
