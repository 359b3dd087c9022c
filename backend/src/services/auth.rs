//! Registration and login
//!
//! Both flows validate the request, resolve the identifier triple into a
//! selector plus normalized credential, and then talk to the store, password
//! and token capabilities. The service only sees those traits, so tests run
//! it against an in-memory store.

use crate::auth::{JwtService, PasswordHasher, PasswordService, PasswordVerifier, TokenIssuer};
use crate::error::ApiError;
use crate::repositories::{NewUser, StoreError, UserRecord, UserStore};
use auth_api_shared::validation::{validate_login, validate_register};
use auth_api_shared::{
    resolve, AuthError, AuthResponse, LoginRequest, NormalizedCredential, RegisterRequest,
};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, Span};

const REGISTER_COUNTER: &str = "auth_register_total";
const LOGIN_COUNTER: &str = "auth_login_total";

/// Auth business service independent of the web framework
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    hasher: Arc<dyn PasswordHasher>,
    verifier: Arc<dyn PasswordVerifier>,
    tokens: Arc<dyn TokenIssuer>,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserStore>,
        hasher: Arc<dyn PasswordHasher>,
        verifier: Arc<dyn PasswordVerifier>,
        tokens: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            users,
            hasher,
            verifier,
            tokens,
        }
    }

    /// Argon2 passwords and the given JWT service over `users`
    pub fn with_store(users: Arc<dyn UserStore>, jwt: JwtService) -> Self {
        Self::new(
            users,
            Arc::new(PasswordService),
            Arc::new(PasswordService),
            Arc::new(jwt),
        )
    }

    /// Register a new user.
    ///
    /// Fails with `DuplicateUser` when any stored identifier equals the
    /// selector, and with `CreationFailed` when the store cannot complete
    /// the write.
    #[instrument(skip_all, fields(channel = tracing::field::Empty))]
    pub async fn register(&self, req: RegisterRequest) -> Result<AuthResponse, ApiError> {
        let result = self.try_register(req).await;
        record_outcome(REGISTER_COUNTER, &result);
        result
    }

    /// Authenticate an existing user.
    ///
    /// Unknown users and wrong passwords both fail with
    /// `InvalidCredentials`.
    #[instrument(skip_all, fields(channel = tracing::field::Empty))]
    pub async fn login(&self, req: LoginRequest) -> Result<AuthResponse, ApiError> {
        let result = self.try_login(req).await;
        record_outcome(LOGIN_COUNTER, &result);
        result
    }

    async fn try_register(&self, req: RegisterRequest) -> Result<AuthResponse, ApiError> {
        validate_register(&req)?;
        let (selector, credential) = resolve(&req.identifiers)?;
        Span::current().record("channel", selector.kind().as_str());

        let existing = self
            .users
            .find_by_any_identifier(selector.value())
            .await
            .map_err(creation_failed)?;
        if existing.is_some() {
            debug!("identifier already registered");
            return Err(AuthError::DuplicateUser.into());
        }

        let password_hash = self
            .hasher
            .hash(&req.password)
            .await
            .map_err(|e| creation_failed(StoreError::Backend(e)))?;

        let user = self
            .users
            .create(NewUser {
                name: req.name,
                credential: credential.clone(),
                password_hash,
            })
            .await
            .map_err(|e| match e {
                // Lost a race with a concurrent registration
                StoreError::Conflict => ApiError::Auth(AuthError::DuplicateUser),
                other => creation_failed(other),
            })?;

        info!(user_id = %user.id, "user registered");
        self.respond(credential, user)
    }

    async fn try_login(&self, req: LoginRequest) -> Result<AuthResponse, ApiError> {
        validate_login(&req)?;
        let (selector, credential) = resolve(&req.identifiers)?;
        Span::current().record("channel", selector.kind().as_str());

        let Some(user) = self.users.find_by_any_identifier(selector.value()).await? else {
            debug!("login rejected: no matching user");
            return Err(AuthError::InvalidCredentials.into());
        };
        if !self.verifier.matches(&user, &req.password).await? {
            debug!(user_id = %user.id, "login rejected: password mismatch");
            return Err(AuthError::InvalidCredentials.into());
        }

        info!(user_id = %user.id, "user logged in");
        self.respond(credential, user)
    }

    fn respond(
        &self,
        credential: NormalizedCredential,
        user: UserRecord,
    ) -> Result<AuthResponse, ApiError> {
        let token = self.tokens.issue(&user)?;
        Ok(AuthResponse::new(
            credential,
            user.name,
            user.created_at,
            user.id,
            token,
        ))
    }
}

fn creation_failed(err: StoreError) -> ApiError {
    error!("registration failed: {:?}", err);
    ApiError::Auth(AuthError::CreationFailed)
}

fn record_outcome(counter: &'static str, result: &Result<AuthResponse, ApiError>) {
    let outcome = match result {
        Ok(_) => "success",
        Err(ApiError::Auth(err)) => err.code(),
        Err(ApiError::Validation(_)) => "VALIDATION_ERROR",
        Err(_) => "INTERNAL_ERROR",
    };
    metrics::counter!(counter, "outcome" => outcome).increment(1);
}
