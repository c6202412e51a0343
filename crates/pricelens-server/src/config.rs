use pricelens_core::{AppError, FetchConfig};

pub const DEFAULT_PORT: u16 = 5000;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub fetch: FetchConfig,
}

impl ServerConfig {
    /// Read configuration from environment variables.
    ///
    /// - `PORT` (optional, defaults to 5000)
    /// - fetch tuning, see [`FetchConfig::from_env`]
    pub fn from_env() -> Result<Self, AppError> {
        let port = match std::env::var("PORT") {
            Err(_) => DEFAULT_PORT,
            Ok(raw) => raw.trim().parse().map_err(|_| {
                AppError::ConfigError(format!("Invalid PORT '{raw}': must be 0-65535"))
            })?,
        };

        Ok(Self {
            port,
            fetch: FetchConfig::from_env()?,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}
