//! Connection-source discovery.
//!
//! Each deployment spells its credentials differently. Every convention is a
//! [`ConnectionSource`]: a name plus a pure function from an [`Environment`]
//! snapshot to an optional [`ConnectionConfig`]. [`SOURCES`] fixes the order
//! they are tried in.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;
use tracing::warn;
use url::Url;

pub const DEFAULT_DATABASE: &str = "railway";
pub const DEFAULT_PORT: u16 = 3306;
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Immutable key/value snapshot that connection sources read from.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    vars: BTreeMap<String, String>,
}

impl Environment {
    /// Snapshot of the process environment. Non-UTF-8 entries are skipped.
    pub fn from_process() -> Self {
        std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        pairs.into_iter().collect()
    }

    /// Trimmed value for `key`; blank values read as absent.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Environment {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Everything needed for one connection attempt.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    pub host: String,
    pub user: String,
    pub password: String,
    pub database: String,
    pub port: u16,
    pub timeout: Duration,
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("host", &self.host)
            .field("user", &self.user)
            .field("password", &"***")
            .field("database", &self.database)
            .field("port", &self.port)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// One credential naming convention.
#[derive(Clone, Copy)]
pub struct ConnectionSource {
    pub name: &'static str,
    /// Keys this source reads, in the order shown by diagnostics.
    pub keys: &'static [&'static str],
    build: fn(&Environment) -> Option<ConnectionConfig>,
}

impl ConnectionSource {
    pub const fn new(
        name: &'static str,
        keys: &'static [&'static str],
        build: fn(&Environment) -> Option<ConnectionConfig>,
    ) -> Self {
        Self { name, keys, build }
    }

    /// `None` means the source is incomplete (no host or no user) and must be
    /// skipped without a connection attempt.
    pub fn config(&self, env: &Environment) -> Option<ConnectionConfig> {
        (self.build)(env)
    }
}

impl fmt::Debug for ConnectionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionSource")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

const URL_KEYS: &[&str] = &["MYSQL_URL", "DATABASE_URL"];

struct DiscreteKeys {
    host: &'static str,
    user: &'static str,
    password: &'static str,
    database: &'static str,
    port: &'static str,
}

const UNDERSCORE: DiscreteKeys = DiscreteKeys {
    host: "MYSQL_HOST",
    user: "MYSQL_USER",
    password: "MYSQL_PASSWORD",
    database: "MYSQL_DATABASE",
    port: "MYSQL_PORT",
};

const COMPACT: DiscreteKeys = DiscreteKeys {
    host: "MYSQLHOST",
    user: "MYSQLUSER",
    password: "MYSQLPASSWORD",
    database: "MYSQLDATABASE",
    port: "MYSQLPORT",
};

/// Priority order: URL form first, then each discrete convention in the
/// order it was introduced.
pub const SOURCES: [ConnectionSource; 3] = [
    ConnectionSource::new("url", URL_KEYS, from_url),
    ConnectionSource::new(
        "mysql_underscore",
        &[
            "MYSQL_HOST",
            "MYSQL_USER",
            "MYSQL_PASSWORD",
            "MYSQL_DATABASE",
            "MYSQL_PORT",
        ],
        from_underscore,
    ),
    ConnectionSource::new(
        "mysql_compact",
        &[
            "MYSQLHOST",
            "MYSQLUSER",
            "MYSQLPASSWORD",
            "MYSQLDATABASE",
            "MYSQLPORT",
        ],
        from_compact,
    ),
];

fn from_url(env: &Environment) -> Option<ConnectionConfig> {
    let (key, raw) = URL_KEYS
        .iter()
        .find_map(|key| env.get(key).map(|v| (*key, v)))?;

    let url = match Url::parse(raw) {
        Ok(url) => url,
        Err(e) => {
            warn!(key, error = %e, "ignoring unparsable connection url");
            return None;
        }
    };
    if !matches!(url.scheme(), "mysql" | "mariadb") {
        warn!(key, scheme = url.scheme(), "ignoring non-mysql connection url");
        return None;
    }

    let host = url.host_str().filter(|h| !h.is_empty())?.to_string();
    let user = decode(url.username());
    if user.is_empty() {
        return None;
    }
    let password = url.password().map(decode).unwrap_or_default();
    let database = url
        .path()
        .trim_start_matches('/')
        .split('/')
        .next()
        .map(decode)
        .filter(|db| !db.is_empty())
        .unwrap_or_else(|| DEFAULT_DATABASE.to_string());

    Some(ConnectionConfig {
        host,
        user,
        password,
        database,
        port: url.port().unwrap_or(DEFAULT_PORT),
        timeout: CONNECT_TIMEOUT,
    })
}

fn from_underscore(env: &Environment) -> Option<ConnectionConfig> {
    from_discrete(env, &UNDERSCORE)
}

fn from_compact(env: &Environment) -> Option<ConnectionConfig> {
    from_discrete(env, &COMPACT)
}

fn from_discrete(env: &Environment, keys: &DiscreteKeys) -> Option<ConnectionConfig> {
    let host = env.get(keys.host)?.to_string();
    let user = env.get(keys.user)?.to_string();

    let port = match env.get(keys.port) {
        None => DEFAULT_PORT,
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            warn!(key = keys.port, value = raw, "invalid port; using default");
            DEFAULT_PORT
        }),
    };

    Some(ConnectionConfig {
        host,
        user,
        password: env.get(keys.password).unwrap_or_default().to_string(),
        database: env
            .get(keys.database)
            .unwrap_or(DEFAULT_DATABASE)
            .to_string(),
        port,
        timeout: CONNECT_TIMEOUT,
    })
}

fn decode(raw: &str) -> String {
    urlencoding::decode(raw)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| raw.to_string())
}
