use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub gateway: GatewayConfig,
    pub redis: RedisConfig,
    pub server: ServerConfig,
    pub ledger: LedgerConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// Accounts endpoint of the external banking gateway.
    pub base_url: String,
    /// Placeholder security header value; attached to every request but not
    /// functionally exercised by the gateway.
    pub api_key: String,
    /// Per-request timeout; expiry is treated as a gateway failure.
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RedisConfig {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LedgerConfig {
    /// Maximum entries retained in the recent-activity list. 0 disables the
    /// cap and keeps the list unbounded.
    pub recent_activity_cap: usize,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();

        Ok(Config {
            gateway: GatewayConfig {
                base_url: env::var("GATEWAY_BASE_URL")?,
                api_key: env::var("GATEWAY_API_KEY")
                    .unwrap_or_else(|_| "placeholder".to_string()),
                timeout_secs: env::var("GATEWAY_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "10".to_string())
                    .parse()?,
            },
            redis: RedisConfig {
                url: env::var("REDIS_URL")?,
            },
            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("SERVER_PORT")
                    .unwrap_or_else(|_| "8080".to_string())
                    .parse()?,
            },
            ledger: LedgerConfig {
                recent_activity_cap: env::var("RECENT_ACTIVITY_CAP")
                    .unwrap_or_else(|_| "50".to_string())
                    .parse()?,
            },
        })
    }
}
