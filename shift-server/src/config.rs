//! Server configuration

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Organization + first manager created at startup when missing
#[derive(Debug, Clone)]
pub struct BootstrapConfig {
    pub organization_name: String,
    pub short_key: String,
    pub manager_username: String,
    pub manager_password: String,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite database file
    pub database_path: String,
    /// HTTP port
    pub http_port: u16,
    /// Environment: development | staging | production
    pub environment: String,
    /// Cap for employee-created shifts
    pub max_shift_minutes: i64,
    /// Emit JSON log lines (LOG_FORMAT=json)
    pub log_json: bool,
    pub bootstrap: Option<BootstrapConfig>,
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

        let max_shift_minutes = match std::env::var("MAX_SHIFT_MINUTES") {
            Ok(v) => v
                .parse::<i64>()
                .ok()
                .filter(|m| *m > 0)
                .ok_or_else(|| format!("MAX_SHIFT_MINUTES must be a positive integer, got {v}"))?,
            Err(_) => 720,
        };

        let bootstrap = match std::env::var("BOOTSTRAP_ORG_SHORT_KEY")
            .ok()
            .filter(|s| !s.is_empty())
        {
            Some(short_key) => Some(BootstrapConfig {
                organization_name: std::env::var("BOOTSTRAP_ORG_NAME")
                    .unwrap_or_else(|_| short_key.clone()),
                manager_username: std::env::var("BOOTSTRAP_MANAGER_USERNAME")
                    .unwrap_or_else(|_| "admin".into()),
                manager_password: Self::require_secret("BOOTSTRAP_MANAGER_PASSWORD", &environment)?,
                short_key,
            }),
            None => None,
        };

        Ok(Self {
            database_path: std::env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "data/shift-planner.db".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            log_json: std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json")),
            environment,
            max_shift_minutes,
            bootstrap,
        })
    }
}
