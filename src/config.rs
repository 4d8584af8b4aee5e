use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::PathBuf;

/// Process-level settings. Datastore credentials are not part of this: they
/// are discovered separately from an [`Environment`](crate::service::sources::Environment)
/// snapshot because several naming conventions are in play.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub bind_host: IpAddr,
    pub port: u16,
    pub loglevel: String,
    pub templates_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_host: IpAddr::from([0, 0, 0, 0]),
            port: 5000,
            loglevel: "info".to_string(),
            templates_dir: PathBuf::from("templates"),
        }
    }
}

impl AppConfig {
    /// Defaults overlaid with `BIND_HOST`, `PORT`, `LOGLEVEL` and `TEMPLATES_DIR`.
    pub fn load() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }

    fn figment() -> Figment {
        Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Env::raw().only(&["bind_host", "port", "loglevel", "templates_dir"]))
    }
}
