use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_MODEL_PATH: &str = "model/ev_full_pipeline.json";
pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub model_path: PathBuf,
    pub port: u16,
}

impl AppConfig {
    /// Read `MODEL_PATH` and `PORT` from the environment, falling back to the
    /// defaults. A malformed `PORT` is an error, not a silent default.
    pub fn from_env() -> Result<Self> {
        let model_path = std::env::var("MODEL_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_MODEL_PATH));
        let port = match std::env::var("PORT") {
            Ok(s) => s
                .parse()
                .with_context(|| format!("invalid PORT value '{s}'"))?,
            Err(_) => DEFAULT_PORT,
        };
        Ok(Self { model_path, port })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_addr_uses_configured_port() {
        let cfg = AppConfig {
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            port: 9999,
        };
        assert_eq!(cfg.bind_addr().to_string(), "0.0.0.0:9999");
    }
}
