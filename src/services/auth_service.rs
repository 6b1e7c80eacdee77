//! Authentication service - student registration, login and token checks.
//!
//! Tokens are issued and verified here; only `/api/auth/me` requires one.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

use super::student_service::insert_student;
use crate::config::{Config, MSG_REGISTER_EMAIL_EXISTS, SECONDS_PER_HOUR, TOKEN_TYPE_BEARER};
use crate::domain::{NewStudent, Password, Student};
use crate::errors::{AppError, AppResult};
use crate::infra::Database;

/// JWT claims payload
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub exp: i64,
    pub iat: i64,
}

/// Signed credential returned after register/login
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    /// JWT access token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    /// Token type (always "Bearer")
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Token lifetime in seconds
    #[schema(example = 604800)]
    pub expires_in: i64,
}

/// An authenticated student together with their fresh token
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub student: Student,
    pub token: TokenResponse,
}

/// Authentication service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new student and issue a token
    async fn register(&self, input: NewStudent) -> AppResult<AuthSession>;

    /// Check credentials and issue a token
    async fn login(&self, email: String, password: String) -> AppResult<AuthSession>;

    /// Verify JWT token and extract claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;
}

fn generate_token(student: &Student, config: &Config) -> AppResult<TokenResponse> {
    let now = Utc::now();
    let expires_at = now + Duration::hours(config.jwt_expiration_hours);

    let claims = Claims {
        sub: student.id,
        email: student.email.clone(),
        exp: expires_at.timestamp(),
        iat: now.timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret_bytes()),
    )?;

    Ok(TokenResponse {
        access_token: token,
        token_type: TOKEN_TYPE_BEARER.to_string(),
        expires_in: config.jwt_expiration_hours * SECONDS_PER_HOUR,
    })
}

/// Concrete AuthService over the in-memory database.
pub struct Authenticator {
    db: Arc<Database>,
    config: Config,
}

impl Authenticator {
    pub fn new(db: Arc<Database>, config: Config) -> Self {
        Self { db, config }
    }
}

#[async_trait]
impl AuthService for Authenticator {
    async fn register(&self, input: NewStudent) -> AppResult<AuthSession> {
        let student = insert_student(&self.db, input, MSG_REGISTER_EMAIL_EXISTS).await?;
        let token = generate_token(&student, &self.config)?;
        tracing::info!(student_id = %student.id, "Student registered");
        Ok(AuthSession { student, token })
    }

    async fn login(&self, email: String, password: String) -> AppResult<AuthSession> {
        let student = self.db.read().await.student_by_email(&email).cloned();

        // Verify against a dummy hash when the email is unknown so both
        // failure paths cost the same.
        let password_valid = match &student {
            Some(student) => student.compare_password(&password),
            None => {
                Password::from_hash(
                    "$argon2id$v=19$m=19456,t=2,p=1$ZHVtbXlzYWx0MTIzNDU2$ZHVtbXloYXNoMTIzNDU2Nzg5MDEyMzQ1Njc4OTAxMg"
                        .to_string(),
                )
                .verify(&password);
                false
            }
        };

        match student {
            Some(student) if password_valid => {
                let token = generate_token(&student, &self.config)?;
                tracing::info!(student_id = %student.id, "Student logged in");
                Ok(AuthSession { student, token })
            }
            _ => Err(AppError::InvalidCredentials),
        }
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }
}
