//! Environment-driven configuration.

use std::net::SocketAddr;
use std::path::PathBuf;

/// Settings read once at startup. `BASE_URL` overrides the public origin
/// used for shareable links; when unset, links fall back to each request's
/// own host.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub addr: SocketAddr,
    pub data_dir: PathBuf,
    pub base_url: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let addr = std::env::var("MENULINK_ADDR")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(|| SocketAddr::from(([127, 0, 0, 1], 8080)));

        let data_dir = std::env::var("MENULINK_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data"));

        let base_url = std::env::var("BASE_URL")
            .ok()
            .map(|v| v.trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty());

        Self {
            addr,
            data_dir,
            base_url,
        }
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join("menulink.db")
    }

    pub fn uploads_dir(&self) -> PathBuf {
        self.data_dir.join("uploads")
    }
}
