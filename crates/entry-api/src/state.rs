//! Application state shared across all handlers and middleware.

use std::sync::Arc;
use std::time::Duration;

use entry_auth::jwt::{JwtDecoder, JwtEncoder};
use entry_auth::password::{PasswordHasher, PasswordValidator};
use entry_core::config::AppConfig;
use entry_database::DatabasePool;
use entry_database::repositories::{
    EntryRepository, EntryStore, PermissionRepository, PermissionStore, UserRepository, UserStore,
};
use entry_service::{EntryService, UserService};

use crate::middleware::rate_limit::RateLimiter;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// PostgreSQL connection pool
    pub db: DatabasePool,
    /// Per-client request limiter, when enabled
    pub rate_limiter: Option<RateLimiter>,

    // ── Auth ─────────────────────────────────────────────────
    /// Authentication token validation
    pub jwt_decoder: Arc<JwtDecoder>,

    // ── Services ─────────────────────────────────────────────
    /// Entry use cases
    pub entry_service: Arc<EntryService>,
    /// Registration and authentication
    pub user_service: Arc<UserService>,
}

impl AppState {
    /// Wire the Postgres repositories, auth components, and services over `db`.
    pub fn new(config: AppConfig, db: DatabasePool) -> Self {
        let query_timeout = Duration::from_secs(config.database.query_timeout_seconds);
        let pool = db.pool().clone();

        let entries = Arc::new(EntryRepository::new(pool.clone(), query_timeout));
        let users = Arc::new(UserRepository::new(pool.clone(), query_timeout));
        let permissions = Arc::new(PermissionRepository::new(pool, query_timeout));

        Self::with_stores(config, db, entries, users, permissions)
    }

    /// Wire auth components and services over the given stores.
    pub fn with_stores(
        config: AppConfig,
        db: DatabasePool,
        entries: Arc<dyn EntryStore>,
        users: Arc<dyn UserStore>,
        permissions: Arc<dyn PermissionStore>,
    ) -> Self {
        let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth));
        let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));
        let password_hasher = Arc::new(PasswordHasher::new());
        let password_validator = Arc::new(PasswordValidator::new(&config.auth));

        let entry_service = Arc::new(EntryService::new(entries));
        let user_service = Arc::new(UserService::new(
            users,
            permissions,
            password_hasher,
            password_validator,
            jwt_encoder,
            config.auth.default_permissions.clone(),
        ));

        let limits = &config.server.rate_limit;
        let rate_limiter = limits
            .enabled
            .then(|| RateLimiter::new(limits.burst, limits.requests_per_second));

        Self {
            config: Arc::new(config),
            db,
            rate_limiter,
            jwt_decoder,
            entry_service,
            user_service,
        }
    }
}
