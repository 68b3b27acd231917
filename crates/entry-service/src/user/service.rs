//! User registration and token issuance.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Deserialize;
use tracing::{info, warn};
use validator::Validate;

use entry_auth::jwt::{AuthToken, JwtEncoder};
use entry_auth::password::{PasswordHasher, PasswordValidator};
use entry_core::error::{AppError, field_messages};
use entry_database::repositories::{PermissionStore, UserStore};
use entry_entity::user::{NewUser, User};

/// Registration payload.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct RegisterUser {
    /// Display name.
    #[validate(length(min = 1, max = 500, message = "must be provided and at most 500 characters"))]
    pub name: String,
    /// E-mail address used to sign in.
    #[validate(
        length(min = 1, message = "must be provided"),
        email(message = "must be a valid email address")
    )]
    pub email: String,
    /// Plaintext password; hashed before storage.
    pub password: String,
}

/// Handles user registration and authentication.
#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserStore>,
    permissions: Arc<dyn PermissionStore>,
    hasher: Arc<PasswordHasher>,
    validator: Arc<PasswordValidator>,
    encoder: Arc<JwtEncoder>,
    default_permissions: Vec<String>,
}

impl std::fmt::Debug for UserService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserService")
            .field("default_permissions", &self.default_permissions)
            .finish_non_exhaustive()
    }
}

fn invalid_credentials() -> AppError {
    AppError::unauthorized("invalid authentication credentials")
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        users: Arc<dyn UserStore>,
        permissions: Arc<dyn PermissionStore>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
        encoder: Arc<JwtEncoder>,
        default_permissions: Vec<String>,
    ) -> Self {
        Self {
            users,
            permissions,
            hasher,
            validator,
            encoder,
            default_permissions,
        }
    }

    /// Register an activated user holding the default permissions.
    pub async fn register(&self, req: RegisterUser) -> Result<User, AppError> {
        let mut fields = match req.validate() {
            Ok(()) => BTreeMap::new(),
            Err(errors) => field_messages(&errors),
        };
        if let Some(message) = self.validator.check(&req.password) {
            fields.insert("password".to_string(), message);
        }
        if !fields.is_empty() {
            return Err(AppError::failed_validation(fields));
        }

        let password_hash = self.hasher.hash_password(&req.password)?;
        let user = self
            .users
            .insert(
                NewUser {
                    name: req.name,
                    email: req.email,
                    password_hash,
                    activated: true,
                },
                &self.default_permissions,
            )
            .await?;

        info!(user_id = user.id, "User registered");
        Ok(user)
    }

    /// Exchange e-mail and password for an authentication token.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<AuthToken, AppError> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(invalid_credentials)?;

        if !self.hasher.verify_password(password, &user.password_hash)? {
            warn!(user_id = user.id, "Authentication failed: wrong password");
            return Err(invalid_credentials());
        }

        if !user.activated {
            return Err(AppError::forbidden(
                "your user account must be activated to access this resource",
            ));
        }

        let permissions = self.permissions.get_all_for_user(user.id).await?;
        let token = self
            .encoder
            .generate_token(user.id, &user.email, permissions)?;

        info!(user_id = user.id, "Authentication token issued");
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};

    use async_trait::async_trait;
    use chrono::Utc;
    use tokio::sync::Mutex;

    use entry_auth::jwt::JwtDecoder;
    use entry_core::config::AuthConfig;
    use entry_core::error::ErrorKind;
    use entry_core::result::AppResult;
    use entry_database::repositories::user::duplicate_email;
    use entry_entity::permission::{Permission, Permissions};

    use super::*;

    /// Users and grants in one place so an insert is all or nothing.
    #[derive(Default)]
    struct MemoryAccounts {
        rows: Mutex<Vec<User>>,
        grants: Mutex<Vec<(i64, String)>>,
        fail_next_insert: AtomicBool,
    }

    #[async_trait]
    impl UserStore for MemoryAccounts {
        async fn insert(&self, user: NewUser, permissions: &[String]) -> AppResult<User> {
            let mut rows = self.rows.lock().await;
            if rows.iter().any(|u| u.email.eq_ignore_ascii_case(&user.email)) {
                return Err(duplicate_email());
            }
            if self.fail_next_insert.swap(false, Ordering::SeqCst) {
                return Err(AppError::timeout("insert user timed out"));
            }
            let stored = User {
                id: rows.len() as i64 + 1,
                created_at: Utc::now(),
                name: user.name,
                email: user.email,
                password_hash: user.password_hash,
                activated: user.activated,
                version: 1,
            };
            rows.push(stored.clone());
            self.grants
                .lock()
                .await
                .extend(permissions.iter().map(|c| (stored.id, c.clone())));
            Ok(stored)
        }

        async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
            Ok(self
                .rows
                .lock()
                .await
                .iter()
                .find(|u| u.email.eq_ignore_ascii_case(email))
                .cloned())
        }
    }

    #[async_trait]
    impl PermissionStore for MemoryAccounts {
        async fn get_all_for_user(&self, user_id: i64) -> AppResult<Permissions> {
            let codes = self
                .grants
                .lock()
                .await
                .iter()
                .filter(|(id, _)| *id == user_id)
                .map(|(_, code)| code.clone())
                .collect();
            Ok(Permissions::new(codes))
        }
    }

    fn auth_config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "user-service-test-secret".to_string(),
            ..AuthConfig::default()
        }
    }

    fn service() -> UserService {
        service_over(Arc::new(MemoryAccounts::default()))
    }

    fn service_over(accounts: Arc<MemoryAccounts>) -> UserService {
        let config = auth_config();
        UserService::new(
            accounts.clone(),
            accounts,
            Arc::new(PasswordHasher::new()),
            Arc::new(PasswordValidator::new(&config)),
            Arc::new(JwtEncoder::new(&config)),
            config.default_permissions.clone(),
        )
    }

    fn registration(email: &str) -> RegisterUser {
        RegisterUser {
            name: "Alice".to_string(),
            email: email.to_string(),
            password: "violet-kettle-harbor-93".to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_then_authenticate() {
        let svc = service();
        let user = svc.register(registration("alice@example.com")).await.unwrap();
        assert!(user.activated);
        assert_ne!(user.password_hash, "violet-kettle-harbor-93");

        let token = svc
            .authenticate("alice@example.com", "violet-kettle-harbor-93")
            .await
            .unwrap();
        assert!(token.expiry > Utc::now());

        let claims = JwtDecoder::new(&auth_config()).decode(&token.token).unwrap();
        assert_eq!(claims.sub, user.id);
        assert!(claims.has_permission(Permission::EntriesRead));
        assert!(!claims.has_permission(Permission::EntriesWrite));
    }

    #[tokio::test]
    async fn test_register_collects_field_errors() {
        let err = service()
            .register(RegisterUser {
                name: String::new(),
                email: "nope".to_string(),
                password: "short".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        let details = err.details.unwrap();
        assert!(details.get("name").is_some());
        assert!(details.get("email").is_some());
        assert!(details.get("password").is_some());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_validation_error() {
        let svc = service();
        svc.register(registration("bob@example.com")).await.unwrap();
        let err = svc
            .register(registration("BOB@example.com"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(
            err.details.unwrap()["email"],
            "a user with this email address already exists"
        );
    }

    #[tokio::test]
    async fn test_bad_credentials_are_unauthorized() {
        let svc = service();
        svc.register(registration("carol@example.com")).await.unwrap();

        let wrong_password = svc
            .authenticate("carol@example.com", "not-the-password")
            .await
            .unwrap_err();
        assert_eq!(wrong_password.kind, ErrorKind::Unauthorized);

        let unknown = svc
            .authenticate("dave@example.com", "violet-kettle-harbor-93")
            .await
            .unwrap_err();
        assert_eq!(unknown.kind, ErrorKind::Unauthorized);
        assert_eq!(unknown.message, wrong_password.message);
    }

    #[tokio::test]
    async fn test_failed_registration_leaves_nothing_behind() {
        let accounts = Arc::new(MemoryAccounts::default());
        let svc = service_over(accounts.clone());

        accounts.fail_next_insert.store(true, Ordering::SeqCst);
        let err = svc
            .register(registration("erin@example.com"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Timeout);
        assert!(accounts.rows.lock().await.is_empty());
        assert!(accounts.grants.lock().await.is_empty());

        let user = svc.register(registration("erin@example.com")).await.unwrap();
        let granted = accounts.get_all_for_user(user.id).await.unwrap();
        assert_eq!(granted.codes(), ["entries:read".to_string()]);
    }
}
