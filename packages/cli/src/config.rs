// ABOUTME: Environment-driven server configuration
// ABOUTME: Loaded once at startup; handlers never read the environment

use std::env;
use std::num::ParseIntError;
use std::path::PathBuf;
use thiserror::Error;

use workforce_core::workforce_dir;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid port number: {0}")]
    InvalidPort(#[from] ParseIntError),
    #[error("Port {0} is out of valid range (1-65535)")]
    PortOutOfRange(u16),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub cors_origin: String,
    pub db_path: PathBuf,
    pub upload_dir: PathBuf,
    pub require_auth: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = parse_port(env::var("PORT").ok().as_deref())?;

        let cors_origin = env::var("CORS_ORIGIN").unwrap_or_else(|_| "*".to_string());

        let db_path = env::var("WORKFORCE_DB_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| workforce_dir().join("workforce.db"));

        let upload_dir = env::var("WORKFORCE_UPLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| workforce_dir().join("uploads"));

        let require_auth = parse_bool(env::var("REQUIRE_AUTH").ok().as_deref());

        Ok(Config {
            port,
            cors_origin,
            db_path,
            upload_dir,
            require_auth,
        })
    }
}

fn parse_port(raw: Option<&str>) -> Result<u16, ConfigError> {
    let port = raw.unwrap_or("4000").parse::<u16>()?;
    if port == 0 {
        return Err(ConfigError::PortOutOfRange(port));
    }
    Ok(port)
}

fn parse_bool(raw: Option<&str>) -> bool {
    raw.map(|s| s.trim().eq_ignore_ascii_case("true") || s.trim() == "1")
        .unwrap_or(false)
}
