use clinique_core::clinical::DEFAULT_PASSWORD_MIN_LENGTH;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// PostgreSQL connection string. When unset the server keeps its data in memory.
    pub database_url: Option<String>,
    /// Minimum password length accepted at registration (default: `1`).
    pub password_min_length: usize,
    /// Administrator account created at startup if it does not exist yet.
    pub admin_seed: Option<AdminSeed>,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
}

/// Credentials for the bootstrap administrator.
#[derive(Clone)]
pub struct AdminSeed {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for AdminSeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminSeed")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                                       |
    /// |------------------------|-----------------------------------------------|
    /// | `HOST`                 | `0.0.0.0`                                     |
    /// | `PORT`                 | `5000`                                        |
    /// | `CORS_ORIGINS`         | `http://localhost:3000,http://localhost:3001` |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                                          |
    /// | `DATABASE_URL`         | unset (in-memory store)                       |
    /// | `PASSWORD_MIN_LENGTH`  | `1`                                           |
    /// | `ADMIN_EMAIL`          | unset (no bootstrap admin)                    |
    /// | `ADMIN_PASSWORD`       | required when `ADMIN_EMAIL` is set            |
    /// | `ADMIN_NAME`           | `Administrateur`                              |
    ///
    /// See [`JwtConfig::from_env`] for the token variables.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "5000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000,http://localhost:3001".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let database_url = std::env::var("DATABASE_URL")
            .ok()
            .filter(|s| !s.trim().is_empty());

        let password_min_length: usize = std::env::var("PASSWORD_MIN_LENGTH")
            .unwrap_or_else(|_| DEFAULT_PASSWORD_MIN_LENGTH.to_string())
            .parse()
            .expect("PASSWORD_MIN_LENGTH must be a valid usize");

        let admin_seed = std::env::var("ADMIN_EMAIL").ok().map(|email| AdminSeed {
            name: std::env::var("ADMIN_NAME").unwrap_or_else(|_| "Administrateur".into()),
            email,
            password: std::env::var("ADMIN_PASSWORD")
                .expect("ADMIN_PASSWORD must be set when ADMIN_EMAIL is set"),
        });

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            database_url,
            password_min_length,
            admin_seed,
            jwt,
        }
    }
}
