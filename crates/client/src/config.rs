/// Backend connection configuration loaded from environment variables.
///
/// The default points at a local development backend; in any other
/// deployment, override via environment variables.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend origin, no trailing slash (default:
    /// `http://localhost:8000`).
    pub base_url: String,
}

impl ClientConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                 |
    /// |-------------------------|-------------------------|
    /// | `CLIPSIGHT_BACKEND_URL` | `http://localhost:8000` |
    pub fn from_env() -> Self {
        let base_url = std::env::var("CLIPSIGHT_BACKEND_URL")
            .unwrap_or_else(|_| "http://localhost:8000".into());

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Build a config for a known origin (tests, embedding hosts).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_stripped() {
        let config = ClientConfig::with_base_url("http://host:9000/");
        assert_eq!(config.base_url, "http://host:9000");
    }
}
