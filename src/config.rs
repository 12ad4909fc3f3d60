//! Server configuration loaded from environment variables.

use std::net::SocketAddr;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerConfigError {
    #[error("EXAMGEN_BIND is not a valid socket address: {0}")]
    InvalidBind(String),

    #[error(
        "EXAMGEN_ALLOW_REMOTE is true but EXAMGEN_AUTH_TOKEN is not set; refusing to start without authentication"
    )]
    RemoteWithoutToken,
}

/// HTTP-layer configuration. Provider keys and model names live in
/// [`examgen_core::Config`]; this covers only the listening surface.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    pub allow_remote: bool,
    pub auth_token: Option<String>,
    pub cors_origins: Vec<String>,
}

impl ServerConfig {
    /// Load from environment variables with sensible defaults.
    ///
    /// - EXAMGEN_BIND: socket address to bind (default: 127.0.0.1:8080)
    /// - EXAMGEN_ALLOW_REMOTE: allow non-loopback binds (default: false)
    /// - EXAMGEN_AUTH_TOKEN: bearer token guarding /api routes (optional
    ///   for local use, required when remote access is allowed)
    /// - EXAMGEN_CORS_ORIGINS: comma-separated allowed origins (default: *)
    pub fn from_env() -> Result<Self, ServerConfigError> {
        let bind_str =
            std::env::var("EXAMGEN_BIND").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
        let bind: SocketAddr = bind_str
            .parse()
            .map_err(|_| ServerConfigError::InvalidBind(bind_str))?;

        let allow_remote = std::env::var("EXAMGEN_ALLOW_REMOTE")
            .map(|v| v == "true" || v == "1" || v == "yes")
            .unwrap_or(false);

        let auth_token = std::env::var("EXAMGEN_AUTH_TOKEN")
            .ok()
            .filter(|t| !t.is_empty());

        let cors_origins = std::env::var("EXAMGEN_CORS_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        if allow_remote && auth_token.is_none() {
            return Err(ServerConfigError::RemoteWithoutToken);
        }

        Ok(Self {
            bind,
            allow_remote,
            auth_token,
            cors_origins,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Tests in this module mutate process-wide env vars and must not overlap.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn clear_env() {
        // SAFETY: test-only code, env mutation is confined to this module
        unsafe {
            std::env::remove_var("EXAMGEN_BIND");
            std::env::remove_var("EXAMGEN_ALLOW_REMOTE");
            std::env::remove_var("EXAMGEN_AUTH_TOKEN");
            std::env::remove_var("EXAMGEN_CORS_ORIGINS");
        }
    }

    #[test]
    fn loads_defaults() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();

        let config = ServerConfig::from_env().unwrap();
        assert_eq!(config.bind, "127.0.0.1:8080".parse::<SocketAddr>().unwrap());
        assert!(!config.allow_remote);
        assert!(config.auth_token.is_none());
        assert_eq!(config.cors_origins, vec!["*"]);
    }

    #[test]
    fn rejects_remote_without_token() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();
        // SAFETY: test-only code, env mutation is confined to this module
        unsafe {
            std::env::set_var("EXAMGEN_ALLOW_REMOTE", "true");
        }

        let result = ServerConfig::from_env();

        // SAFETY: test-only code, env mutation is confined to this module
        unsafe {
            std::env::remove_var("EXAMGEN_ALLOW_REMOTE");
        }

        let err = result.expect_err("should refuse remote access without a token");
        assert!(err.to_string().contains("EXAMGEN_AUTH_TOKEN"));
    }
}
