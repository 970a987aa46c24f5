//! Server configuration read from the environment (and `.env` via dotenvy)

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:5000";

/// Tracing filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "guesser_backend=debug,guesser_core=info,tower_http=debug";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Unset or blank values keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(addr) = lookup("BIND_ADDRESS").filter(|v| !v.trim().is_empty()) {
            config.bind_address = addr.trim().to_string();
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_unset() {
        let config = ServerConfig::from_lookup(|_| None);
        assert_eq!(config.bind_address, "0.0.0.0:5000");
    }

    #[test]
    fn test_bind_address_override() {
        let config = ServerConfig::from_lookup(|key| {
            (key == "BIND_ADDRESS").then(|| "127.0.0.1:9000".to_string())
        });
        assert_eq!(config.bind_address, "127.0.0.1:9000");
    }

    #[test]
    fn test_blank_bind_address_ignored() {
        let config = ServerConfig::from_lookup(|_| Some("  ".to_string()));
        assert_eq!(config, ServerConfig::default());
    }
}
