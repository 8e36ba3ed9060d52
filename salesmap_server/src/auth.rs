use std::future::{ready, Ready};

use actix_web::{dev::Payload, FromRequest, HttpMessage, HttpRequest};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use salesmap_engine::db_types::Roles;
use serde::{Deserialize, Serialize};

use crate::{
    config::AuthConfig,
    errors::{AuthError, ServerError},
};

/// Claims carried by a control-panel access token. The ticketing platform issues these (HS256,
/// shared secret) for users that may open an event's order views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtClaims {
    /// The platform's identifier for the user.
    pub sub: String,
    pub roles: Roles,
    /// Expiry time as Unix timestamp.
    pub exp: usize,
}

/// Extracts the validated claims that [`crate::middleware::JwtMiddlewareFactory`] stored on the
/// request. Handlers taking a `JwtClaims` argument therefore only run behind that middleware.
impl FromRequest for JwtClaims {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let claims = req
            .extensions()
            .get::<JwtClaims>()
            .cloned()
            .ok_or_else(|| ServerError::AuthenticationError(AuthError::MissingToken).into());
        ready(claims)
    }
}

pub fn decode_claims(token: &str, config: &AuthConfig) -> Result<JwtClaims, AuthError> {
    let key = DecodingKey::from_secret(config.jwt_secret.reveal().as_bytes());
    let data = decode::<JwtClaims>(token, &key, &Validation::default()).map_err(|e| match e.kind() {
        ErrorKind::InvalidToken | ErrorKind::Base64(_) | ErrorKind::Json(_) | ErrorKind::Utf8(_) => {
            AuthError::PoorlyFormattedToken(e.to_string())
        },
        _ => AuthError::ValidationError(e.to_string()),
    })?;
    Ok(data.claims)
}

/// Issues access tokens. The server itself only needs this for tests and local development; in
/// production the ticketing platform signs tokens with the same shared secret.
pub struct TokenIssuer {
    key: EncodingKey,
}

impl TokenIssuer {
    pub fn new(config: &AuthConfig) -> Self {
        let key = EncodingKey::from_secret(config.jwt_secret.reveal().as_bytes());
        Self { key }
    }

    pub fn issue_token(&self, sub: &str, roles: Roles, duration: Option<Duration>) -> Result<String, AuthError> {
        let duration = duration.unwrap_or_else(|| Duration::hours(24));
        let exp = (Utc::now() + duration).timestamp().max(0) as usize;
        let claims = JwtClaims { sub: sub.to_string(), roles, exp };
        encode(&Header::default(), &claims, &self.key).map_err(|e| AuthError::ValidationError(e.to_string()))
    }
}

#[cfg(test)]
mod test {
    use salesmap_engine::db_types::Role;
    use smp_common::Secret;

    use super::*;

    fn test_config() -> AuthConfig {
        AuthConfig { jwt_secret: Secret::new("super-secret-test-signing-key-000001".to_string()) }
    }

    #[test]
    fn token_round_trip() {
        let config = test_config();
        let issuer = TokenIssuer::new(&config);
        let token = issuer.issue_token("alice", vec![Role::ViewOrders], None).unwrap();
        let claims = decode_claims(&token, &config).unwrap();
        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.roles, vec![Role::ViewOrders]);
    }

    #[test]
    fn expired_token_is_rejected() {
        let config = test_config();
        let issuer = TokenIssuer::new(&config);
        let token = issuer.issue_token("alice", vec![Role::ViewOrders], Some(Duration::hours(-2))).unwrap();
        let err = decode_claims(&token, &config).unwrap_err();
        assert!(matches!(err, AuthError::ValidationError(_)));
    }

    #[test]
    fn tampered_token_is_rejected() {
        let config = test_config();
        let issuer = TokenIssuer::new(&config);
        let mut token = issuer.issue_token("alice", vec![Role::Admin], None).unwrap();
        token.replace_range(token.len() - 6..token.len() - 1, "AAAAA");
        assert!(decode_claims(&token, &config).is_err());
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let issuer = TokenIssuer::new(&test_config());
        let token = issuer.issue_token("alice", vec![Role::ViewOrders], None).unwrap();
        let other = AuthConfig { jwt_secret: Secret::new("a-completely-different-secret-000001".to_string()) };
        let err = decode_claims(&token, &other).unwrap_err();
        assert!(matches!(err, AuthError::ValidationError(_)));
    }
}
