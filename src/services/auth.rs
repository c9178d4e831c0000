//! Authentication and user account service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration, Utc};
use validator::Validate;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::user::{CreateUser, LoginResponse, UpdateUser, UserAccount, UserClaims},
    repository::Repository,
};

#[derive(Clone)]
pub struct AuthService {
    repository: Repository,
    config: AuthConfig,
}

impl AuthService {
    pub fn new(repository: Repository, config: AuthConfig) -> Self {
        Self { repository, config }
    }

    /// Authenticate by login/password and issue a JWT.
    ///
    /// Stored credentials are argon2 hashes; accounts created before
    /// hashing was introduced still carry plaintext and are upgraded in
    /// place on their first successful login.
    pub async fn login(&self, login: &str, password: &str) -> AppResult<LoginResponse> {
        let user = self
            .repository
            .users
            .get_by_login(login)
            .await?
            .ok_or_else(|| AppError::Authentication("Invalid login or password".to_string()))?;

        if !user.is_active {
            return Err(AppError::Authentication("Account is disabled".to_string()));
        }

        if user.password.starts_with("$argon2") {
            let parsed = PasswordHash::new(&user.password)
                .map_err(|e| AppError::Internal(format!("Corrupt password hash: {}", e)))?;
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .map_err(|_| {
                    AppError::Authentication("Invalid login or password".to_string())
                })?;
        } else {
            if user.password != password {
                return Err(AppError::Authentication(
                    "Invalid login or password".to_string(),
                ));
            }
            // Legacy plaintext credential; migrate to argon2 now.
            let hash = Self::hash_password(password)?;
            self.repository.users.set_password(user.id, &hash).await?;
            tracing::info!(user_id = user.id, "migrated legacy password to argon2");
        }

        let token = self.issue_token(&user)?;
        Ok(LoginResponse { token, user })
    }

    /// The authenticated account behind a set of claims
    pub async fn me(&self, claims: &UserClaims) -> AppResult<UserAccount> {
        self.repository.users.get_by_id(claims.user_id).await
    }

    fn issue_token(&self, user: &UserAccount) -> AppResult<String> {
        let now = Utc::now();
        let claims = UserClaims {
            sub: user.login.clone(),
            user_id: user.id,
            role: user.role,
            can_approve: user.can_approve,
            can_execute: user.can_execute,
            iat: now.timestamp(),
            exp: (now + Duration::hours(self.config.jwt_expiration_hours as i64)).timestamp(),
        };
        claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Token creation failed: {}", e)))
    }

    pub fn hash_password(password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))
    }

    // -- User management (admin surface) -------------------------------------

    pub async fn list_users(&self) -> AppResult<Vec<UserAccount>> {
        self.repository.users.list().await
    }

    pub async fn get_user(&self, id: i32) -> AppResult<UserAccount> {
        self.repository.users.get_by_id(id).await
    }

    pub async fn create_user(&self, data: CreateUser) -> AppResult<UserAccount> {
        data.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        let hash = Self::hash_password(&data.password)?;
        self.repository.users.create(&data, &hash).await
    }

    pub async fn update_user(&self, id: i32, data: UpdateUser) -> AppResult<UserAccount> {
        data.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        let password_hash = match &data.password {
            Some(password) => Some(Self::hash_password(password)?),
            None => None,
        };
        self.repository.users.update(id, &data, password_hash).await
    }

    pub async fn delete_user(&self, id: i32) -> AppResult<()> {
        self.repository.users.delete(id).await
    }
}
