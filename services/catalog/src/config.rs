use std::time::Duration;

use url::Url;

/// Catalog service configuration loaded from environment variables.
#[derive(Debug)]
pub struct CatalogConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// Symmetric signing key for identity tokens. Env var: `JWT_SECRET`.
    pub jwt_secret: String,
    /// Solr core base URL, e.g. `http://localhost:8983/solr/courses`. Env var: `SOLR_URL`.
    pub solr_url: Url,
    /// TCP port for the HTTP server (default 8080). Env var: `CATALOG_PORT`.
    pub catalog_port: u16,
    /// Identity token lifetime (default 24h). Env var: `TOKEN_TTL_SECS`.
    pub token_ttl: Duration,
    /// Upper bound on any single database call (default 5s). Env var: `STORE_TIMEOUT_MS`.
    pub store_timeout: Duration,
    /// Upper bound on any single search index call (default 5s). Env var: `INDEX_TIMEOUT_MS`.
    pub index_timeout: Duration,
    /// Connection pool size (default 10). Env var: `DB_MAX_CONNECTIONS`.
    pub db_max_connections: u32,
    /// Rebuild the search index in the background at startup (default true).
    pub reindex_on_start: bool,
    /// Browser origin allowed by CORS; unset disables the CORS layer.
    pub cors_allow_origin: Option<String>,
    /// Registrations with these emails are created as `admin`. Comma-separated.
    pub admin_emails: Vec<String>,
    /// Let any authenticated user create courses (default false: admin only).
    pub open_course_writes: bool,
    /// Mark the login cookie `Secure` (default true). Turn off for a plain-http frontend.
    pub cookie_secure: bool,
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

impl CatalogConfig {
    pub fn from_env() -> Self {
        let solr_url = std::env::var("SOLR_URL").expect("SOLR_URL");
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            jwt_secret: std::env::var("JWT_SECRET").expect("JWT_SECRET"),
            solr_url: Url::parse(&solr_url).expect("invalid SOLR_URL"),
            catalog_port: env_or("CATALOG_PORT", 8080),
            token_ttl: Duration::from_secs(env_or("TOKEN_TTL_SECS", 86_400)),
            store_timeout: Duration::from_millis(env_or("STORE_TIMEOUT_MS", 5_000)),
            index_timeout: Duration::from_millis(env_or("INDEX_TIMEOUT_MS", 5_000)),
            db_max_connections: env_or("DB_MAX_CONNECTIONS", 10),
            reindex_on_start: env_or("REINDEX_ON_START", true),
            cors_allow_origin: std::env::var("CORS_ALLOW_ORIGIN")
                .ok()
                .filter(|v| !v.trim().is_empty()),
            admin_emails: std::env::var("ADMIN_EMAILS")
                .map(|v| parse_list(&v))
                .unwrap_or_default(),
            open_course_writes: env_or("OPEN_COURSE_WRITES", false),
            cookie_secure: env_or("COOKIE_SECURE", true),
        }
    }
}
