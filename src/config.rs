use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub state_path: String,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let state_path = env::var("STATE_PATH").unwrap_or_else(|_| "data/state.json".to_string());
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        Ok(Self {
            state_path,
            host,
            port,
        })
    }
}
