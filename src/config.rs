use std::net::Ipv4Addr;

/// Environment-derived settings, read once at startup and passed explicitly
/// into the components that need them.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: Ipv4Addr,
    pub port: u16,
    pub api_base_url: String,
    pub api_key: String,
    pub player_sync_limit: u64,
    pub match_sync_limit: u64,
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

impl Config {
    pub fn from_env() -> Self {
        let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in .env");

        let host: Ipv4Addr = env_or("HOST", "127.0.0.1")
            .parse()
            .expect("HOST is not in the correct format");

        let port: u16 = env_or("PORT", "3000")
            .parse()
            .expect("PORT is not the correct format");

        let player_sync_limit: u64 = env_or("SYNC_PLAYER_LIMIT", "500")
            .parse()
            .expect("SYNC_PLAYER_LIMIT is not a number");

        let match_sync_limit: u64 = env_or("SYNC_MATCH_LIMIT", "200")
            .parse()
            .expect("SYNC_MATCH_LIMIT is not a number");

        Self {
            database_url,
            host,
            port,
            api_base_url: env_or("CRICKET_API_BASE_URL", "https://api.cricapi.com/v1"),
            api_key: env_or("CRICKET_API_KEY", "demo-key"),
            player_sync_limit,
            match_sync_limit,
        }
    }
}
