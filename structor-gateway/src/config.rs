//! Environment configuration for the gateway binary.

use structor_sandbox::SandboxConfig;

/// Address the gateway listens on when `STRUCTOR_LISTEN_ADDR` is unset.
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:2300";

/// Sandbox root when `STRUCTOR_SANDBOX_DIR` is unset.
pub const DEFAULT_SANDBOX_DIR: &str = ".structor/sandbox";

/// Collaborator backend when `STRUCTOR_BACKEND_URL` is unset.
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:2301";

/// Runtime settings for `structor-gateway`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub listen_addr: String,
    pub sandbox: SandboxConfig,
    pub backend_url: String,
}

impl GatewayConfig {
    /// Read the configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_owned())
        };
        Self {
            listen_addr: read("STRUCTOR_LISTEN_ADDR", DEFAULT_LISTEN_ADDR),
            sandbox: SandboxConfig::new(read("STRUCTOR_SANDBOX_DIR", DEFAULT_SANDBOX_DIR)),
            backend_url: read("STRUCTOR_BACKEND_URL", DEFAULT_BACKEND_URL),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn from_lookup_uses_defaults_for_missing_and_blank_keys() {
        let env: HashMap<&str, &str> = HashMap::from([("STRUCTOR_BACKEND_URL", "  ")]);
        let config = GatewayConfig::from_lookup(|k| env.get(k).map(|v| (*v).to_owned()));
        assert_eq!(config.listen_addr, DEFAULT_LISTEN_ADDR);
        assert_eq!(config.backend_url, DEFAULT_BACKEND_URL);
        assert_eq!(config.sandbox, SandboxConfig::new(DEFAULT_SANDBOX_DIR));
    }

    #[test]
    fn from_lookup_reads_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("STRUCTOR_LISTEN_ADDR", "0.0.0.0:8080"),
            ("STRUCTOR_SANDBOX_DIR", "/srv/sandbox"),
            ("STRUCTOR_BACKEND_URL", "http://backend:9000/api"),
        ]);
        let config = GatewayConfig::from_lookup(|k| env.get(k).map(|v| (*v).to_owned()));
        assert_eq!(config.listen_addr, "0.0.0.0:8080");
        assert_eq!(config.sandbox.sandbox_dir(), std::path::Path::new("/srv/sandbox"));
        assert_eq!(config.backend_url, "http://backend:9000/api");
    }
}
