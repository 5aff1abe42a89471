use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use utoipa::ToSchema;
use validator::Validate;

use super::repository::UserStore;
use crate::config::AuthConfig;
use crate::db::StoreError;

/// JWT Claims structure
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String, // Subject (user id as string)
    pub username: String,
    pub exp: usize, // Expiration time (as UTC timestamp)
    pub iat: usize, // Issued at
}

/// Identity attached to requests that passed the bearer-token gate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: i64,
    pub username: String,
}

/// User Registration Request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[serde(default)]
    #[validate(length(min = 1))]
    #[schema(example = "listener1")]
    pub username: String,
    #[serde(default)]
    #[validate(length(min = 1))]
    #[schema(example = "password123")]
    pub password: String,
}

/// User Login Request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(length(min = 1))]
    #[schema(example = "listener1")]
    pub username: String,
    #[serde(default)]
    #[validate(length(min = 1))]
    #[schema(example = "password123")]
    pub password: String,
}

/// Auth Response (JWT)
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
}

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Username and password are required")]
    MissingCredentials,

    /// Unknown user and wrong password are deliberately the same error
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Username already taken")]
    UsernameTaken,

    #[error("Token is required")]
    MissingToken,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error("Failed to generate token: {0}")]
    TokenIssue(#[from] jsonwebtoken::errors::Error),

    #[error("Store failure: {0}")]
    Store(StoreError),
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict(_) => AuthError::UsernameTaken,
            other => AuthError::Store(other),
        }
    }
}

pub struct UserAuthService {
    store: Arc<dyn UserStore>,
    jwt_secret: String,
    token_ttl: Duration,
    hash_params: Params,
}

impl UserAuthService {
    pub fn new(
        store: Arc<dyn UserStore>,
        jwt_secret: String,
        config: &AuthConfig,
    ) -> Result<Self, AuthError> {
        let hash_params = Params::new(
            Params::DEFAULT_M_COST,
            config.hash_time_cost,
            Params::DEFAULT_P_COST,
            None,
        )
        .map_err(|e| AuthError::Hashing(e.to_string()))?;

        Ok(Self {
            store,
            jwt_secret,
            token_ttl: Duration::seconds(config.token_ttl_secs),
            hash_params,
        })
    }

    fn hasher(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.hash_params.clone())
    }

    /// Register a new user
    pub async fn register(&self, req: RegisterRequest) -> Result<i64, AuthError> {
        req.validate().map_err(|_| AuthError::MissingCredentials)?;

        // 1. Hash password
        let salt = SaltString::generate(&mut OsRng);
        let password_hash = self
            .hasher()
            .hash_password(req.password.as_bytes(), &salt)
            .map_err(|e| AuthError::Hashing(e.to_string()))?
            .to_string();

        // 2. Insert into DB
        let user_id = self.store.create(&req.username, &password_hash).await?;
        tracing::info!(user_id, username = %req.username, "User registered");
        Ok(user_id)
    }

    /// Login user and issue JWT
    pub async fn login(&self, req: LoginRequest) -> Result<AuthResponse, AuthError> {
        req.validate().map_err(|_| AuthError::MissingCredentials)?;

        // 1. Find user by username
        let user = self
            .store
            .find_by_username(&req.username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        // 2. Verify password
        let parsed_hash = PasswordHash::new(&user.password_hash).map_err(|e| {
            tracing::error!(user_id = user.id, "Stored password hash is unreadable: {}", e);
            AuthError::InvalidCredentials
        })?;

        self.hasher()
            .verify_password(req.password.as_bytes(), &parsed_hash)
            .map_err(|_| AuthError::InvalidCredentials)?;

        // 3. Generate JWT
        let token = self.issue_token(user.id, &user.username, Utc::now())?;
        Ok(AuthResponse { token })
    }

    /// Sign a token for `user_id` valid for the configured TTL from `issued_at`
    pub fn issue_token(
        &self,
        user_id: i64,
        username: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<String, AuthError> {
        let expiration = issued_at + self.token_ttl;

        let claims = Claims {
            sub: user_id.to_string(),
            username: username.to_string(),
            exp: expiration.timestamp().max(0) as usize,
            iat: issued_at.timestamp().max(0) as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )?)
    }

    /// Verify JWT token signature and expiry
    pub fn verify_token(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let decoding_key = DecodingKey::from_secret(self.jwt_secret.as_bytes());
        let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
        // A token is dead the second it expires
        validation.leeway = 0;
        let token_data = decode::<Claims>(token, &decoding_key, &validation)
            .map_err(|_| AuthError::InvalidToken)?;

        let id = token_data
            .claims
            .sub
            .parse::<i64>()
            .map_err(|_| AuthError::InvalidToken)?;

        Ok(AuthenticatedUser {
            id,
            username: token_data.claims.username,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user_auth::repository::mock::InMemoryUserStore;

    const SECRET: &str = "test-secret";

    fn service() -> (Arc<InMemoryUserStore>, UserAuthService) {
        let store = Arc::new(InMemoryUserStore::new());
        let config = AuthConfig {
            token_ttl_secs: 3600,
            hash_time_cost: 1,
        };
        let svc = UserAuthService::new(store.clone(), SECRET.to_string(), &config).unwrap();
        (store, svc)
    }

    fn register_req(username: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    fn login_req(username: &str, password: &str) -> LoginRequest {
        LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_stores_hash_not_plaintext() {
        let (store, svc) = service();
        svc.register(register_req("alice", "s3cret!")).await.unwrap();

        let stored = store.stored_hash("alice").unwrap();
        assert_ne!(stored, "s3cret!");
        assert!(!stored.contains("s3cret!"));
        assert!(stored.starts_with("$argon2id$"));
    }

    #[tokio::test]
    async fn test_register_rejects_empty_fields() {
        let (_, svc) = service();
        assert!(matches!(
            svc.register(register_req("", "pw")).await,
            Err(AuthError::MissingCredentials)
        ));
        assert!(matches!(
            svc.register(register_req("bob", "")).await,
            Err(AuthError::MissingCredentials)
        ));
    }

    #[tokio::test]
    async fn test_register_duplicate_username() {
        let (store, svc) = service();
        svc.register(register_req("alice", "first")).await.unwrap();
        let first_hash = store.stored_hash("alice").unwrap();

        assert!(matches!(
            svc.register(register_req("alice", "second")).await,
            Err(AuthError::UsernameTaken)
        ));
        assert_eq!(store.stored_hash("alice").unwrap(), first_hash);
    }

    #[tokio::test]
    async fn test_login_issues_verifiable_token() {
        let (_, svc) = service();
        let id = svc.register(register_req("alice", "pw")).await.unwrap();
        let resp = svc.login(login_req("alice", "pw")).await.unwrap();

        let user = svc.verify_token(&resp.token).unwrap();
        assert_eq!(user.id, id);
        assert_eq!(user.username, "alice");
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let (_, svc) = service();
        svc.register(register_req("alice", "pw")).await.unwrap();

        let wrong_password = svc.login(login_req("alice", "nope")).await.unwrap_err();
        let unknown_user = svc.login(login_req("mallory", "pw")).await.unwrap_err();

        assert!(matches!(wrong_password, AuthError::InvalidCredentials));
        assert!(matches!(unknown_user, AuthError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_user.to_string());
    }

    #[tokio::test]
    async fn test_store_failure_is_not_reported_as_bad_credentials() {
        let (store, svc) = service();
        svc.register(register_req("alice", "pw")).await.unwrap();
        store.set_fail(true);

        assert!(matches!(
            svc.login(login_req("alice", "pw")).await,
            Err(AuthError::Store(_))
        ));
    }

    #[test]
    fn test_token_claims_expire_after_ttl() {
        let (_, svc) = service();
        let now = Utc::now();
        let token = svc.issue_token(3, "carol", now).unwrap();

        let key = DecodingKey::from_secret(SECRET.as_bytes());
        let data = decode::<Claims>(
            &token,
            &key,
            &Validation::new(jsonwebtoken::Algorithm::HS256),
        )
        .unwrap();
        assert_eq!(data.claims.exp - data.claims.iat, 3600);
        assert_eq!(data.claims.sub, "3");
    }

    #[test]
    fn test_expired_token_rejected() {
        let (_, svc) = service();
        let token = svc
            .issue_token(1, "alice", Utc::now() - Duration::hours(2))
            .unwrap();
        assert!(matches!(
            svc.verify_token(&token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_token_rejected_seconds_after_expiry() {
        let (_, svc) = service();
        let token = svc
            .issue_token(1, "alice", Utc::now() - Duration::seconds(3605))
            .unwrap();
        assert!(matches!(
            svc.verify_token(&token),
            Err(AuthError::InvalidToken)
        ));

        let fresh = svc
            .issue_token(1, "alice", Utc::now() - Duration::seconds(3500))
            .unwrap();
        assert!(svc.verify_token(&fresh).is_ok());
    }

    #[test]
    fn test_token_signed_with_other_secret_rejected() {
        let (store, _) = service();
        let other = UserAuthService::new(store, "other".to_string(), &AuthConfig::default()).unwrap();
        let (_, svc) = service();

        let token = other.issue_token(1, "alice", Utc::now()).unwrap();
        assert!(matches!(
            svc.verify_token(&token),
            Err(AuthError::InvalidToken)
        ));
        assert!(matches!(
            svc.verify_token("not-a-jwt"),
            Err(AuthError::InvalidToken)
        ));
    }
}
