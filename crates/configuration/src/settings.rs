use serde::Deserialize;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
}

/// Contains parameters for the HTTP server.
///
/// Every field carries a default so the application can start with no
/// `config.toml` present at all.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// The interface the server binds to.
    #[serde(default = "default_host")]
    pub host: String,
    /// The TCP port the server listens on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl ServerConfig {
    /// Formats the host and port as a socket address string, e.g. `0.0.0.0:3000`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
