/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development except the
/// cost-center directory endpoint, which must be configured explicitly.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Base URL of the cost-center directory OData service.
    pub directory_base_url: String,
    /// API key sent in the `KeyId` header on directory requests.
    pub directory_api_key: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `DIRECTORY_BASE_URL`   | (required)                 |
    /// | `DIRECTORY_API_KEY`    | (required)                 |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
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

        let directory_base_url =
            std::env::var("DIRECTORY_BASE_URL").expect("DIRECTORY_BASE_URL must be set");
        let directory_api_key =
            std::env::var("DIRECTORY_API_KEY").expect("DIRECTORY_API_KEY must be set");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            directory_base_url,
            directory_api_key,
        }
    }
}
