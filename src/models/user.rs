//! User account model, roles and JWT claims

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, FromRow, Postgres};
use utoipa::ToSchema;
use validator::Validate;

use crate::error::AppError;

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Manager,
    Viewer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::Viewer => "viewer",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "manager" => Ok(Role::Manager),
            "viewer" => Ok(Role::Viewer),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}

impl sqlx::Type<Postgres> for Role {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for Role {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for Role {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        let s: String = self.as_str().to_string();
        <String as Encode<Postgres>>::encode(s, buf)
    }
}

/// User account from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct UserAccount {
    pub id: i32,
    pub login: String,
    /// Argon2 hash, or a legacy plaintext value migrated on next login
    #[serde(skip_serializing)]
    pub password: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Role,
    /// Segregation of duties: may select the winning quotation
    pub can_approve: bool,
    /// Segregation of duties: may authorize, pay and receive orders
    pub can_execute: bool,
    pub is_active: bool,
    pub crea_date: Option<DateTime<Utc>>,
    pub modif_date: Option<DateTime<Utc>>,
}

/// Create user request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    #[validate(length(min = 3, message = "Login must be at least 3 characters"))]
    pub login: String,
    #[validate(length(min = 4, message = "Password must be at least 4 characters"))]
    pub password: String,
    pub name: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    pub role: Option<Role>,
    pub can_approve: Option<bool>,
    pub can_execute: Option<bool>,
}

/// Update user request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateUser {
    pub login: Option<String>,
    #[validate(length(min = 4, message = "Password must be at least 4 characters"))]
    pub password: Option<String>,
    pub name: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    pub role: Option<Role>,
    pub can_approve: Option<bool>,
    pub can_execute: Option<bool>,
    pub is_active: Option<bool>,
}

/// Login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Login is required"))]
    pub login: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Login response with bearer token
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserAccount,
}

/// JWT claims for authenticated users
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserClaims {
    pub sub: String,
    pub user_id: i32,
    pub role: Role,
    pub can_approve: bool,
    pub can_execute: bool,
    pub exp: i64,
    pub iat: i64,
}

impl UserClaims {
    /// Create a new JWT token
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse JWT token
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Any authenticated account may read
    pub fn require_read(&self) -> Result<(), AppError> {
        Ok(())
    }

    /// Record writes require manager or admin
    pub fn require_write(&self) -> Result<(), AppError> {
        match self.role {
            Role::Admin | Role::Manager => Ok(()),
            Role::Viewer => Err(AppError::Authorization(
                "Insufficient rights to modify records".to_string(),
            )),
        }
    }

    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::Authorization(
                "Administrator privileges required".to_string(),
            ))
        }
    }

    /// Quotation approval capability (segregation of duties)
    pub fn require_can_approve(&self) -> Result<(), AppError> {
        if self.can_approve || self.is_admin() {
            Ok(())
        } else {
            Err(AppError::Authorization(
                "Account lacks purchase approval capability".to_string(),
            ))
        }
    }

    /// Order execution capability (authorize, pay, receive)
    pub fn require_can_execute(&self) -> Result<(), AppError> {
        if self.can_execute || self.is_admin() {
            Ok(())
        } else {
            Err(AppError::Authorization(
                "Account lacks purchase execution capability".to_string(),
            ))
        }
    }
}
