// Server configuration
// Read once from the environment at startup

use std::env;
use std::path::PathBuf;

/// Application identifier used for the default data directory
pub const APP_IDENTIFIER: &str = "courtside";

/// Runtime configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub admin_password: String,
    /// Holds the SQLite file and the uploads/ asset directory
    pub data_dir: PathBuf,
    /// Prebuilt dashboard bundle served for non-API paths
    pub public_dir: PathBuf,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3000);

        let admin_password =
            env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".to_string());
        if admin_password == "admin123" {
            log::warn!("ADMIN_PASSWORD not set, using the default password");
        }

        let data_dir = env::var("COURTSIDE_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_data_dir());

        let public_dir = env::var("COURTSIDE_PUBLIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("public"));

        Self {
            port,
            admin_password,
            data_dir,
            public_dir,
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_IDENTIFIER)
}
