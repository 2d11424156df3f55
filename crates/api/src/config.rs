use crate::auth::jwt::JwtConfig;

/// Default inter-send delay in milliseconds. The provider advertises 14
/// messages per second; 100ms per message keeps us conservatively at 10/s.
const DEFAULT_SEND_DELAY_MS: u64 = 100;

/// Server configuration loaded from environment variables.
///
/// Network and timing fields have defaults suitable for local development;
/// secrets are required.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Externally reachable base URL baked into tracking and unsubscribe
    /// links (default: `http://localhost:8000`).
    pub base_url: String,
    /// Inter-send delay in milliseconds for the dispatch rate ceiling.
    pub send_delay_ms: u64,
    /// HMAC secret for unsubscribe tokens.
    pub unsubscribe_secret: String,
    /// Admin login email.
    pub admin_email: String,
    /// Argon2 hash of the admin password.
    pub admin_password_hash: String,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var                | Default                 |
    /// |------------------------|-------------------------|
    /// | `HOST`                 | `0.0.0.0`               |
    /// | `PORT`                 | `8000`                  |
    /// | `CORS_ORIGINS`         | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                    |
    /// | `BASE_URL`             | `http://localhost:8000` |
    /// | `SEND_DELAY_MS`        | `100`                   |
    /// | `UNSUBSCRIBE_SECRET`   | **required**            |
    /// | `ADMIN_EMAIL`          | **required**            |
    /// | `ADMIN_PASSWORD_HASH`  | **required**            |
    ///
    /// # Panics
    ///
    /// Panics on missing required variables or unparsable numbers; we want
    /// misconfiguration to fail fast at startup.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let base_url =
            std::env::var("BASE_URL").unwrap_or_else(|_| "http://localhost:8000".into());

        let send_delay_ms: u64 = std::env::var("SEND_DELAY_MS")
            .unwrap_or_else(|_| DEFAULT_SEND_DELAY_MS.to_string())
            .parse()
            .expect("SEND_DELAY_MS must be a valid u64");

        let unsubscribe_secret = std::env::var("UNSUBSCRIBE_SECRET")
            .expect("UNSUBSCRIBE_SECRET must be set in the environment");

        let admin_email =
            std::env::var("ADMIN_EMAIL").expect("ADMIN_EMAIL must be set in the environment");
        let admin_password_hash = std::env::var("ADMIN_PASSWORD_HASH")
            .expect("ADMIN_PASSWORD_HASH must be set in the environment");

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            base_url,
            send_delay_ms,
            unsubscribe_secret,
            admin_email,
            admin_password_hash,
            jwt,
        }
    }
}
