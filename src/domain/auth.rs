//! Bearer-credential resolution.
//!
//! The identity provider issues HS256 JWTs; the extractor below turns the
//! `Authorization: Bearer` header into an [`AuthenticatedUser`] before any
//! handler code runs. A missing or invalid credential is answered with 401.

use std::future::{Ready, ready};

use actix_web::error::{ErrorInternalServerError, ErrorUnauthorized};
use actix_web::{Error, FromRequest, HttpRequest, dev::Payload, http::header, web};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::models::config::ServerConfig;

/// Identity of the caller, decoded from the bearer token claims.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AuthenticatedUser {
    /// Stable user identifier.
    pub sub: String,
    /// Expiry of the credential as a unix timestamp.
    pub exp: usize,
}

impl AuthenticatedUser {
    /// Encode the claims into a signed token.
    pub fn to_jwt(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Decode and verify a token into claims.
    pub fn from_jwt(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .map(|data| data.claims)
    }
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, Error> {
    let config = req
        .app_data::<web::Data<ServerConfig>>()
        .ok_or_else(|| ErrorInternalServerError("server configuration missing"))?;

    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| ErrorUnauthorized("missing bearer token"))?;

    let token = header_value
        .strip_prefix("Bearer ")
        .ok_or_else(|| ErrorUnauthorized("missing bearer token"))?;

    AuthenticatedUser::from_jwt(token, &config.secret)
        .map_err(|_| ErrorUnauthorized("invalid bearer token"))
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    const SECRET: &str = "test-secret";

    fn claims() -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "u1".to_string(),
            exp: 4_102_444_800, // 2100-01-01
        }
    }

    #[test]
    fn jwt_round_trip() {
        let token = claims().to_jwt(SECRET).unwrap();
        let decoded = AuthenticatedUser::from_jwt(&token, SECRET).unwrap();
        assert_eq!(decoded.sub, "u1");
    }

    #[test]
    fn expired_token_is_rejected() {
        let expired = AuthenticatedUser {
            sub: "u1".to_string(),
            exp: 1, // 1970
        };
        let token = expired.to_jwt(SECRET).unwrap();
        assert!(AuthenticatedUser::from_jwt(&token, SECRET).is_err());
    }

    #[actix_web::test]
    async fn extractor_accepts_a_valid_bearer_token() {
        let token = claims().to_jwt(SECRET).unwrap();
        let req = TestRequest::default()
            .app_data(web::Data::new(ServerConfig {
                secret: SECRET.to_string(),
            }))
            .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
            .to_http_request();

        let user = AuthenticatedUser::from_request(&req, &mut Payload::None)
            .await
            .expect("expected extraction to succeed");
        assert_eq!(user.sub, "u1");
    }

    #[actix_web::test]
    async fn extractor_rejects_a_missing_header() {
        let req = TestRequest::default()
            .app_data(web::Data::new(ServerConfig {
                secret: SECRET.to_string(),
            }))
            .to_http_request();

        let result = AuthenticatedUser::from_request(&req, &mut Payload::None).await;
        assert!(result.is_err());
    }
}
