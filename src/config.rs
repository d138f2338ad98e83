use std::{env, net::SocketAddr};

use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub listen_addr: SocketAddr,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://commuteu.db".to_string());
        let listen_addr = parse_listen_addr(
            &env::var("APP_LISTEN_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".to_string()),
        )?;

        Ok(Self {
            database_url,
            listen_addr,
        })
    }
}

fn parse_listen_addr(raw: &str) -> Result<SocketAddr, AppError> {
    raw.parse()
        .map_err(|err| AppError::Config(format!("invalid APP_LISTEN_ADDR: {err}")))
}
