use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Runtime settings shared by the relay server and the CLI views.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    /// Address the relay listens on.
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Catalog gateway the relay forwards to.
    pub upstream_url: String,
    /// Relay route the catalog and detail views fetch from.
    pub relay_url: String,
    /// Whole-request timeout for outbound calls. `None` keeps the transport
    /// default, which never times out.
    pub http_timeout_secs: Option<u64>,
    pub user_agent: String,
}
