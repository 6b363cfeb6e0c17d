//! Server configuration

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite database file path
    pub db_path: String,
    /// HTTP port
    pub http_port: u16,
    /// Public base URL baked into table QR codes
    pub public_base_url: String,
    /// JWT secret for owner authentication
    pub jwt_secret: String,
    /// Environment: development | staging | production
    pub environment: String,
    /// Log directory; file logging is off when unset
    pub log_dir: Option<String>,
}

impl Config {
    /// Require a secret env var: must be set and non-empty in non-development environments.
    fn require_secret(name: &str, environment: &str) -> Result<String, BoxError> {
        let val = match std::env::var(name) {
            Ok(v) => v,
            Err(_) => {
                if environment != "development" {
                    return Err(format!("{name} must be set in {environment} environment").into());
                }
                format!("dev-{name}-not-for-production")
            }
        };
        if val.is_empty() && environment != "development" {
            return Err(format!("{name} must not be empty in {environment} environment").into());
        }
        Ok(val)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        Ok(Self {
            db_path: std::env::var("DB_PATH").unwrap_or_else(|_| "data/qrdine.db".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            public_base_url: std::env::var("PUBLIC_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8080".into()),
            jwt_secret: Self::require_secret("JWT_SECRET", &environment)?,
            environment,
            log_dir: std::env::var("LOG_DIR").ok().filter(|s| !s.is_empty()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_secret_allowed_in_development() {
        let val = Config::require_secret("QRDINE_UNSET_SECRET_FOR_TEST", "development").unwrap();
        assert!(val.starts_with("dev-"));
    }

    #[test]
    fn test_missing_secret_rejected_in_production() {
        let err = Config::require_secret("QRDINE_UNSET_SECRET_FOR_TEST", "production");
        assert!(err.is_err());
    }
}
