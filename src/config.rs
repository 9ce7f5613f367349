use std::{env, net::SocketAddr, path::PathBuf};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DATA_PATH: &str = "data/state.json";

/// Runtime configuration, read from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// JSON file backing the local store.
    pub data_path: PathBuf,
    /// Hosted backend, used instead of the local store when present.
    pub remote: Option<RemoteConfig>,
}

#[derive(Debug, Clone)]
pub struct RemoteConfig {
    pub base_url: String,
    pub api_key: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = lookup("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let data_path = lookup("APP_DATA_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH));

        let remote = match (lookup("MOOD_BACKEND_URL"), lookup("MOOD_BACKEND_KEY")) {
            (Some(url), Some(key)) if !url.trim().is_empty() && !key.trim().is_empty() => {
                Some(RemoteConfig {
                    base_url: url.trim().trim_end_matches('/').to_string(),
                    api_key: key.trim().to_string(),
                })
            }
            _ => None,
        };

        Self {
            port,
            data_path,
            remote,
        }
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}
