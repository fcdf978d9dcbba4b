use crate::types::{AppError, Claims, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

/// Signs and verifies compact bearer tokens against a shared secret.
///
/// Tokens are HS256 JWTs carrying the configured issuer and audience plus the
/// subject's identity claims. Validity is stateless: a function of signature
/// and registered-claim checks at verification time only.
pub struct TokenCodec {
    secret: String,
    issuer: String,
    audience: String,
    ttl_seconds: i64,
    leeway_seconds: u64,
}

impl TokenCodec {
    /// Creates a codec from configuration.
    ///
    /// Fails with a configuration error when the signing secret is empty, so a
    /// misconfigured process never starts serving.
    pub fn new(
        secret: String,
        issuer: String,
        audience: String,
        ttl_seconds: i64,
        leeway_seconds: u64,
    ) -> Result<Self> {
        if secret.is_empty() {
            return Err(AppError::Config(
                "JWT signing secret is not set".to_string(),
            ));
        }

        Ok(Self {
            secret,
            issuer,
            audience,
            ttl_seconds,
            leeway_seconds,
        })
    }

    /// Signs identity claims into a token valid for the configured TTL.
    pub fn sign(&self, sub: &str, email: &str, role: &str, name: &str) -> Result<String> {
        self.sign_with_ttl(sub, email, role, name, self.ttl_seconds)
    }

    /// Signs identity claims with an explicit TTL in seconds.
    pub fn sign_with_ttl(
        &self,
        sub: &str,
        email: &str,
        role: &str,
        name: &str,
        ttl_seconds: i64,
    ) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: sub.to_string(),
            email: email.to_string(),
            role: role.to_string(),
            name: name.to_string(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            exp: (now + Duration::seconds(ttl_seconds)).timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))
    }

    /// Verifies a token and returns its claims.
    ///
    /// Fails with an authentication error when the signature is invalid, the
    /// issuer or audience does not match, or the token is expired. Expiry is
    /// strict: the configured leeway defaults to zero.
    pub fn verify(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);
        validation.leeway = self.leeway_seconds;

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|_| AppError::Auth("Invalid Token".to_string()))
    }
}
