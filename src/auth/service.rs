use crate::{
    auth::{hashing::CredentialHasher, token::TokenCodec},
    db::{User, UserStore},
    types::{AppError, AuthData, LoginRequest, Result, SignupRequest},
};
use std::sync::Arc;
use uuid::Uuid;

/// Registers new principals and authenticates login attempts.
///
/// Successful registration and login both end in a signed bearer token; every
/// failure is reported through the error taxonomy, never silently swallowed.
pub struct AuthenticationService {
    store: Arc<UserStore>,
    hasher: CredentialHasher,
    codec: Arc<TokenCodec>,
}

impl AuthenticationService {
    pub fn new(store: Arc<UserStore>, codec: Arc<TokenCodec>) -> Self {
        Self {
            store,
            hasher: CredentialHasher::new(),
            codec,
        }
    }

    /// Registers a new principal and issues its first token.
    ///
    /// Uniqueness checks run before the password-confirmation check; the
    /// storage-level unique indexes remain the backstop against concurrent
    /// signups racing past the checks.
    pub async fn register(&self, input: &SignupRequest) -> Result<AuthData> {
        validate_signup(input)?;

        if self.store.find_by_email(&input.email).await?.is_some() {
            return Err(AppError::Conflict("Email already exists".to_string()));
        }
        if self
            .store
            .find_by_business_name(&input.business_name)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(
                "businessName has already been used for another business. Kindly use another name"
                    .to_string(),
            ));
        }

        // Case-sensitive, unlike the upstream behavior this replaces.
        if input.password != input.confirm_password {
            return Err(AppError::Validation(
                "confirmPassword: passwords do not match. Kindly check and try again".to_string(),
            ));
        }

        let password_hash = self.hasher.hash(&input.password)?;
        let user = User::new(
            Uuid::new_v4().to_string(),
            input.email.clone(),
            password_hash,
            input.business_name.clone(),
            input.cac_number.clone(),
        );
        self.store.create_user(&user).await?;

        tracing::debug!(user_id = %user.id, "registered new user");
        self.issue_token(&user)
    }

    /// Authenticates an email/password pair and issues a token.
    ///
    /// Both failure modes map to 401; the messages differ, matching the
    /// upstream contract.
    pub async fn login(&self, input: &LoginRequest) -> Result<AuthData> {
        let user = self
            .store
            .find_by_email(&input.email)
            .await?
            .ok_or_else(|| AppError::Auth("No account found for this email".to_string()))?;

        if !self.hasher.verify(&input.password, &user.password_hash) {
            return Err(AppError::Auth("Incorrect password".to_string()));
        }

        tracing::debug!(user_id = %user.id, "user logged in");
        self.issue_token(&user)
    }

    fn issue_token(&self, user: &User) -> Result<AuthData> {
        let access_token =
            self.codec
                .sign(&user.id, &user.email, &user.role, &user.business_name)?;

        Ok(AuthData { access_token })
    }
}

fn validate_signup(input: &SignupRequest) -> Result<()> {
    if input.email.is_empty() || !input.email.contains('@') {
        return Err(AppError::Validation(
            "email: a valid email address is required".to_string(),
        ));
    }
    if input.password.len() < 8 {
        return Err(AppError::Validation(
            "password: must be at least 8 characters".to_string(),
        ));
    }

    Ok(())
}
