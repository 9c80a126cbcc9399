use std::sync::Arc;
use std::time::Duration;

use argon2::{
    password_hash::{self, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, PasswordHash,
};
use rand::rngs::OsRng;
use secrecy::ExposeSecret;
use tracing::{error, info, instrument, warn};

use super::domain::{LoginInput, RegisterInput};
use super::errors::{AuthError, StorageError};
use super::repository::{AppProvider, UserProvider, UserSaver};
use super::token;

/// Auth service configuration
#[derive(Clone, Debug)]
pub struct AuthConfig {
    /// Lifetime of issued session tokens.
    pub token_ttl: Duration,
}

/// Auth business service independent of the transport.
///
/// Holds no mutable state; share it behind an `Arc` across concurrent requests.
pub struct AuthService {
    user_saver: Arc<dyn UserSaver>,
    user_provider: Arc<dyn UserProvider>,
    app_provider: Arc<dyn AppProvider>,
    cfg: AuthConfig,
}

impl AuthService {
    pub fn new(
        user_saver: Arc<dyn UserSaver>,
        user_provider: Arc<dyn UserProvider>,
        app_provider: Arc<dyn AppProvider>,
        cfg: AuthConfig,
    ) -> Self {
        Self { user_saver, user_provider, app_provider, cfg }
    }

    /// Wire all three storage contracts to one repository.
    pub fn with_repository<R>(repo: Arc<R>, cfg: AuthConfig) -> Self
    where
        R: UserSaver + UserProvider + AppProvider + 'static,
    {
        Self::new(repo.clone(), repo.clone(), repo, cfg)
    }

    /// Verify credentials and issue a session token for `app_id`.
    ///
    /// Unknown email and wrong password both yield [`AuthError::InvalidCredentials`].
    ///
    /// # Examples
    /// ```
    /// use service::auth::{AuthService, AuthConfig, repository::mock::MockAuthRepository};
    /// use service::auth::domain::{RegisterInput, LoginInput};
    /// use std::{sync::Arc, time::Duration};
    /// let repo = Arc::new(MockAuthRepository::default());
    /// repo.insert_app(1, "web", "app-secret");
    /// let svc = AuthService::with_repository(repo, AuthConfig { token_ttl: Duration::from_secs(3600) });
    /// let _ = tokio_test::block_on(svc.register(RegisterInput::new("u@e.com", "Passw0rd")));
    /// let token = tokio_test::block_on(svc.login(LoginInput::new("u@e.com", "Passw0rd", 1))).unwrap();
    /// assert_eq!(token.split('.').count(), 3);
    /// ```
    #[instrument(skip(self, input), fields(op = "auth.login", email = %input.email, app_id = input.app_id))]
    pub async fn login(&self, input: LoginInput) -> Result<String, AuthError> {
        const OP: &str = "auth.login";
        info!("attempting to login user");

        let user = match self.user_provider.user(&input.email).await {
            Ok(user) => user,
            Err(StorageError::UserNotFound) => {
                // burn the same argon2 work as a real mismatch
                let _ = verify_password(input.password.expose_secret(), DUMMY_PASSWORD_HASH);
                warn!("user not found");
                return Err(AuthError::InvalidCredentials);
            }
            Err(e) => {
                error!(error = %e, "failed to fetch user");
                return Err(AuthError::internal(OP, e));
            }
        };

        verify_password(input.password.expose_secret(), &user.password_hash).map_err(|e| match e {
            password_hash::Error::Password => {
                info!("invalid credentials");
                AuthError::InvalidCredentials
            }
            other => {
                error!(error = %other, user_id = %user.id, "stored password hash is unusable");
                AuthError::internal(OP, other)
            }
        })?;

        let app = match self.app_provider.app(input.app_id).await {
            Ok(app) => app,
            Err(StorageError::AppNotFound) => {
                warn!("app not found");
                return Err(AuthError::AppNotFound);
            }
            Err(e) => {
                error!(error = %e, "failed to fetch app");
                return Err(AuthError::internal(OP, e));
            }
        };

        let token = token::issue(&user, &app, self.cfg.token_ttl).map_err(|e| {
            error!(error = %e, "failed to generate token");
            AuthError::internal(OP, e)
        })?;

        info!(user_id = %user.id, "user logged in successfully");
        Ok(token)
    }

    /// Register a new user with a hashed password and return its id.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{AuthService, AuthConfig, AuthError, repository::mock::MockAuthRepository};
    /// use service::auth::domain::RegisterInput;
    /// use std::{sync::Arc, time::Duration};
    /// let repo = Arc::new(MockAuthRepository::default());
    /// let svc = AuthService::with_repository(repo, AuthConfig { token_ttl: Duration::from_secs(60) });
    /// let id = tokio_test::block_on(svc.register(RegisterInput::new("user@example.com", "Secret123"))).unwrap();
    /// assert!(!id.is_empty());
    /// let again = tokio_test::block_on(svc.register(RegisterInput::new("user@example.com", "Secret123")));
    /// assert!(matches!(again, Err(AuthError::UserAlreadyExists)));
    /// ```
    #[instrument(skip(self, input), fields(op = "auth.register", email = %input.email))]
    pub async fn register(&self, input: RegisterInput) -> Result<String, AuthError> {
        const OP: &str = "auth.register";
        info!("registering user");

        let hash = hash_password(input.password.expose_secret()).map_err(|e| {
            error!(error = %e, "failed to generate password hash");
            AuthError::internal(OP, e)
        })?;

        match self.user_saver.save_user(&input.email, &hash).await {
            Ok(user_id) => {
                info!(%user_id, "user registered");
                Ok(user_id)
            }
            Err(StorageError::UserExists) => {
                warn!("user already exists");
                Err(AuthError::UserAlreadyExists)
            }
            Err(e) => {
                error!(error = %e, "failed to save user");
                Err(AuthError::internal(OP, e))
            }
        }
    }

    /// Report whether `user_id` has admin rights.
    ///
    /// The caller is trusted to pass an authenticated id; unknown ids are internal errors.
    #[instrument(skip(self), fields(op = "auth.is_admin"))]
    pub async fn is_admin(&self, user_id: &str) -> Result<bool, AuthError> {
        const OP: &str = "auth.is_admin";

        let is_admin = self.user_provider.is_admin(user_id).await.map_err(|e| {
            error!(error = %e, "failed to check admin status");
            AuthError::internal(OP, e)
        })?;

        info!(is_admin, "user admin status checked");
        Ok(is_admin)
    }
}

/// Well-formed argon2id hash (default params) that matches no password.
const DUMMY_PASSWORD_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

fn hash_password(password: &str) -> Result<String, password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default().hash_password(password.as_bytes(), &salt)?.to_string())
}

fn verify_password(password: &str, hash: &str) -> Result<(), password_hash::Error> {
    let parsed = PasswordHash::new(hash)?;
    Argon2::default().verify_password(password.as_bytes(), &parsed)
}
