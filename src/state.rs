use crate::config::Config;
use crate::repository::{Backend, LocalStore, RemoteStore};
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub repo: Backend,
    /// Settings live here whichever backend holds the records.
    pub local: LocalStore,
}

impl AppState {
    pub fn new(repo: Backend, local: LocalStore) -> Self {
        Self { repo, local }
    }

    pub fn local(local: LocalStore) -> Self {
        Self {
            repo: Backend::Local(local.clone()),
            local,
        }
    }

    pub async fn from_config(config: &Config) -> Self {
        let local = LocalStore::open(&config.data_path).await;
        match &config.remote {
            Some(remote) => {
                info!("using hosted backend at {}", remote.base_url);
                Self::new(Backend::Remote(RemoteStore::new(remote)), local)
            }
            None => {
                info!("using local store at {}", local.path().display());
                Self::local(local)
            }
        }
    }
}
