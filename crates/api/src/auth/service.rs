//! Registration, login and token authorization.
//!
//! [`AuthService`] owns no storage of its own: it is wired with a
//! [`CredentialStore`], a [`PasswordHasher`] and a [`TokenService`] at
//! startup, so tests can substitute the in-memory store.

use std::sync::Arc;

use clinique_core::clinical::{validate_email, validate_password, validate_required};
use clinique_core::error::CoreError;
use clinique_core::roles::Role;
use clinique_core::types::DbId;
use clinique_db::models::user::{CreateUser, User};
use clinique_db::store::CredentialStore;
use serde::Deserialize;

use crate::auth::jwt::TokenService;
use crate::auth::password::{PasswordHasher, DUMMY_HASH};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;

/// Request body for `POST /auth/register`.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

pub struct AuthService {
    users: Arc<dyn CredentialStore>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: TokenService,
    password_min_length: usize,
}

/// Emails are compared case-insensitively by storing them lowercased.
fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl AuthService {
    pub fn new(
        users: Arc<dyn CredentialStore>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: TokenService,
        password_min_length: usize,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
            password_min_length,
        }
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    /// Self-service registration. The new account always gets the default role.
    pub async fn register(&self, input: &RegisterRequest) -> AppResult<User> {
        self.create_account(input, Role::default()).await
    }

    /// Create an account with an explicit role. Only administrators may do this.
    pub async fn register_with_role(
        &self,
        actor: &AuthUser,
        input: &RegisterRequest,
        role: Role,
    ) -> AppResult<User> {
        if !actor.role.satisfies(Role::Admin) {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin role required to assign roles".into(),
            )));
        }
        self.create_account(input, role).await
    }

    async fn create_account(&self, input: &RegisterRequest, role: Role) -> AppResult<User> {
        validate_required("name", &input.name)?;
        let email = normalize_email(&input.email);
        validate_email(&email)?;
        validate_password(&input.password, self.password_min_length)?;

        let password_hash = self.hash_password(&input.password).await?;

        let user = self
            .users
            .create(&CreateUser {
                name: input.name.trim().to_string(),
                email,
                password_hash,
                role,
            })
            .await?;

        tracing::info!(user_id = user.id, role = %user.role, "User registered");
        Ok(user)
    }

    /// Authenticate with email + password and issue a fresh token.
    ///
    /// An unknown email and a wrong password produce the same
    /// [`CoreError::InvalidCredentials`].
    pub async fn login(&self, email: &str, password: &str) -> AppResult<(String, User)> {
        let email = normalize_email(email);
        let Some(user) = self.users.find_by_email(&email).await? else {
            // Same Argon2 cost as a wrong password; the outcome is ignored.
            let _ = self.verify_password(password, DUMMY_HASH).await;
            tracing::debug!("Login rejected");
            return Err(AppError::Core(CoreError::InvalidCredentials));
        };

        let password_valid = self.verify_password(password, &user.password_hash).await?;

        if !password_valid {
            tracing::debug!(user_id = user.id, "Login rejected");
            return Err(AppError::Core(CoreError::InvalidCredentials));
        }

        let token = self.issue_token(&user)?;
        tracing::info!(user_id = user.id, role = %user.role, "User logged in");
        Ok((token, user))
    }

    /// Argon2 is CPU-bound; run it on the blocking pool, off the async workers.
    async fn hash_password(&self, password: &str) -> AppResult<String> {
        let hasher = Arc::clone(&self.hasher);
        let password = password.to_owned();
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AppError::InternalError(format!("Password hashing task failed: {e}")))?
            .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))
    }

    async fn verify_password(&self, password: &str, hash: &str) -> AppResult<bool> {
        let hasher = Arc::clone(&self.hasher);
        let password = password.to_owned();
        let hash = hash.to_owned();
        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| AppError::InternalError(format!("Password verification task failed: {e}")))?
            .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))
    }

    pub fn issue_token(&self, user: &User) -> AppResult<String> {
        self.tokens
            .issue(user.id, user.role)
            .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))
    }

    /// Verify `token` and, when `required` is set, check the role it carries.
    ///
    /// Invalid, malformed or expired tokens yield `Unauthorized`; a valid token
    /// with an insufficient role yields `Forbidden`.
    pub fn authorize(&self, token: &str, required: Option<Role>) -> AppResult<AuthUser> {
        let claims = self.tokens.verify(token).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        if let Some(required) = required {
            if !claims.role.satisfies(required) {
                return Err(AppError::Core(CoreError::Forbidden(format!(
                    "Role '{required}' required"
                ))));
            }
        }

        Ok(AuthUser {
            user_id: claims.sub,
            role: claims.role,
        })
    }

    pub async fn current_user(&self, id: DbId) -> AppResult<User> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))
    }

    pub async fn list_users(&self) -> AppResult<Vec<User>> {
        Ok(self.users.list().await?)
    }

    /// Change a user's role. Tokens already issued keep their role until expiry.
    pub async fn set_role(&self, id: DbId, role: Role) -> AppResult<User> {
        let user = self
            .users
            .update_role(id, role)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
        tracing::info!(user_id = user.id, role = %user.role, "User role changed");
        Ok(user)
    }

    /// Create the bootstrap administrator if no account uses `email` yet.
    ///
    /// Returns `true` when an account was created.
    pub async fn ensure_admin(&self, name: &str, email: &str, password: &str) -> AppResult<bool> {
        if let Some(existing) = self.users.find_by_email(&normalize_email(email)).await? {
            if existing.role != Role::Admin {
                tracing::warn!(
                    user_id = existing.id,
                    "Bootstrap admin email belongs to a non-admin account"
                );
            }
            return Ok(false);
        }

        let input = RegisterRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        self.create_account(&input, Role::Admin).await?;
        Ok(true)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use assert_matches::assert_matches;
    use clinique_db::store::MemoryStore;

    use super::*;
    use crate::auth::jwt::JwtConfig;
    use crate::auth::password::Argon2Hasher;

    fn service() -> AuthService {
        let tokens = TokenService::new(JwtConfig {
            secret: "unit-test-secret".to_string(),
            expiry_mins: 60,
        });
        AuthService::new(Arc::new(MemoryStore::new()), Arc::new(Argon2Hasher), tokens, 3)
    }

    /// Cheap reversible hasher that records how often `verify` runs.
    #[derive(Default)]
    struct CountingHasher {
        verifies: AtomicUsize,
    }

    impl PasswordHasher for CountingHasher {
        fn hash(&self, password: &str) -> Result<String, argon2::password_hash::Error> {
            Ok(format!("plain:{password}"))
        }

        fn verify(&self, password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
            self.verifies.fetch_add(1, Ordering::SeqCst);
            Ok(hash == format!("plain:{password}"))
        }
    }

    fn request(name: &str, email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn register_assigns_default_role_and_hashes() {
        let auth = service();
        let user = auth.register(&request("Dr. A", "a@x.com", "pw1")).await.unwrap();

        assert_eq!(user.role, Role::Medecin);
        assert_ne!(user.password_hash, "pw1");
        assert!(user.password_hash.starts_with("$argon2id$"));
    }

    #[tokio::test]
    async fn register_duplicate_email_fails() {
        let auth = service();
        auth.register(&request("Dr. A", "a@x.com", "pw1")).await.unwrap();

        let err = auth
            .register(&request("Dr. B", "A@X.com ", "pw2"))
            .await
            .unwrap_err();
        assert_matches!(err, AppError::Core(CoreError::DuplicateEmail(_)));
    }

    #[tokio::test]
    async fn register_validates_input() {
        let auth = service();
        let bad_email = auth.register(&request("Dr. A", "nope", "pw1")).await.unwrap_err();
        assert_matches!(bad_email, AppError::Core(CoreError::Validation(_)));

        let short = auth.register(&request("Dr. A", "a@x.com", "pw")).await.unwrap_err();
        assert_matches!(short, AppError::Core(CoreError::Validation(_)));

        let no_name = auth.register(&request(" ", "a@x.com", "pw1")).await.unwrap_err();
        assert_matches!(no_name, AppError::Core(CoreError::Validation(_)));
    }

    #[tokio::test]
    async fn login_failures_are_indistinguishable() {
        let auth = service();
        auth.register(&request("Dr. A", "a@x.com", "pw1")).await.unwrap();

        let wrong_password = auth.login("a@x.com", "bad").await.unwrap_err();
        let unknown_email = auth.login("ghost@x.com", "pw1").await.unwrap_err();

        assert_matches!(wrong_password, AppError::Core(CoreError::InvalidCredentials));
        assert_matches!(unknown_email, AppError::Core(CoreError::InvalidCredentials));
    }

    #[tokio::test]
    async fn both_login_failures_run_the_hasher() {
        let hasher = Arc::new(CountingHasher::default());
        let tokens = TokenService::new(JwtConfig {
            secret: "unit-test-secret".to_string(),
            expiry_mins: 60,
        });
        let auth = AuthService::new(Arc::new(MemoryStore::new()), hasher.clone(), tokens, 1);
        auth.register(&request("Dr. A", "a@x.com", "pw1")).await.unwrap();

        auth.login("a@x.com", "bad").await.unwrap_err();
        assert_eq!(hasher.verifies.load(Ordering::SeqCst), 1);

        auth.login("ghost@x.com", "pw1").await.unwrap_err();
        assert_eq!(hasher.verifies.load(Ordering::SeqCst), 2);

        auth.login("a@x.com", "pw1").await.unwrap();
        assert_eq!(hasher.verifies.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn login_token_is_accepted_by_authorize() {
        let auth = service();
        let registered = auth.register(&request("Dr. A", "a@x.com", "pw1")).await.unwrap();

        let (token, user) = auth.login("a@x.com", "pw1").await.unwrap();
        assert_eq!(user.id, registered.id);

        let caller = auth.authorize(&token, None).unwrap();
        assert_eq!(caller.user_id, registered.id);
        assert_eq!(caller.role, Role::Medecin);
    }

    #[tokio::test]
    async fn expired_token_is_unauthorized() {
        let auth = service();
        let user = auth.register(&request("Dr. A", "a@x.com", "pw1")).await.unwrap();
        let issued_at = chrono::Utc::now().timestamp() - auth.tokens().expires_in() - 1;
        let token = auth.tokens().issue_at(user.id, user.role, issued_at).unwrap();

        let err = auth.authorize(&token, None).unwrap_err();
        assert_matches!(err, AppError::Core(CoreError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn insufficient_role_is_forbidden_not_unauthorized() {
        let auth = service();
        let user = auth.register(&request("Dr. A", "a@x.com", "pw1")).await.unwrap();
        let token = auth.issue_token(&user).unwrap();

        let err = auth.authorize(&token, Some(Role::Admin)).unwrap_err();
        assert_matches!(err, AppError::Core(CoreError::Forbidden(_)));
        assert!(auth.authorize(&token, Some(Role::Medecin)).is_ok());
    }

    #[tokio::test]
    async fn only_admin_may_assign_roles() {
        let auth = service();
        let medecin = AuthUser {
            user_id: 1,
            role: Role::Medecin,
        };
        let err = auth
            .register_with_role(&medecin, &request("X", "x@x.com", "pw1"), Role::Admin)
            .await
            .unwrap_err();
        assert_matches!(err, AppError::Core(CoreError::Forbidden(_)));

        let admin = AuthUser {
            user_id: 1,
            role: Role::Admin,
        };
        let created = auth
            .register_with_role(&admin, &request("X", "x@x.com", "pw1"), Role::Admin)
            .await
            .unwrap();
        assert_eq!(created.role, Role::Admin);
    }

    #[tokio::test]
    async fn ensure_admin_is_idempotent() {
        let auth = service();
        assert!(auth.ensure_admin("Dr. Admin", "admin@clinic.com", "admin123").await.unwrap());
        assert!(!auth.ensure_admin("Dr. Admin", "admin@clinic.com", "admin123").await.unwrap());

        let (_, admin) = auth.login("admin@clinic.com", "admin123").await.unwrap();
        assert_eq!(admin.role, Role::Admin);
        assert_eq!(auth.list_users().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn set_role_on_missing_user_is_not_found() {
        let auth = service();
        let err = auth.set_role(99, Role::Admin).await.unwrap_err();
        assert_matches!(err, AppError::Core(CoreError::NotFound { entity: "User", id: 99 }));
    }
}
