use dotenvy::dotenv;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    /// Base URL of the HR/Excel API every view reads from, e.g. http://127.0.0.1:8000
    pub upstream_base_url: String,
    pub upstream_timeout_secs: u64,
    pub directory_page_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_host: "127.0.0.1".to_string(),
            server_port: 3000,
            upstream_base_url: "http://127.0.0.1:8000".to_string(),
            upstream_timeout_secs: 10,
            directory_page_size: 15,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();
        let defaults = Self::default();

        Self {
            server_host: env::var("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port: env::var("SERVER_PORT")
                .map(|v| v.parse().expect("SERVER_PORT must be a valid port number"))
                .unwrap_or(defaults.server_port),
            upstream_base_url: env::var("UPSTREAM_BASE_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or(defaults.upstream_base_url),
            upstream_timeout_secs: env::var("UPSTREAM_TIMEOUT_SECS")
                .map(|v| v.parse().expect("UPSTREAM_TIMEOUT_SECS must be a number"))
                .unwrap_or(defaults.upstream_timeout_secs),
            directory_page_size: env::var("DIRECTORY_PAGE_SIZE")
                .map(|v| {
                    v.parse()
                        .ok()
                        .filter(|size: &usize| *size > 0)
                        .expect("DIRECTORY_PAGE_SIZE must be a positive number")
                })
                .unwrap_or(defaults.directory_page_size),
        }
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}
