//! HS256 JWT session tokens.
//!
//! Implements both `SessionIssuer` and `SessionValidator` with a shared
//! secret. Claims carry everything needed to rebuild the `Actor`, so
//! validation never touches the database.

use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Actor, AuthError, MemberId, Role, UserId};
use crate::ports::{SessionIssuer, SessionToken, SessionValidator};

const ISSUER: &str = "gym-house";

#[derive(Debug, Serialize, Deserialize)]
struct SessionClaims {
    /// User id.
    sub: String,
    iss: String,
    iat: u64,
    exp: u64,
    username: String,
    role: String,
    #[serde(default)]
    member_id: Option<i64>,
}

pub struct JwtSessions {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_secs: u64,
}

impl JwtSessions {
    pub fn new(secret: &SecretString, ttl_secs: u64) -> Self {
        let bytes = secret.expose_secret().as_bytes();
        Self {
            encoding_key: EncodingKey::from_secret(bytes),
            decoding_key: DecodingKey::from_secret(bytes),
            ttl_secs,
        }
    }

    fn now_secs() -> Result<u64, AuthError> {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .map_err(|e| AuthError::service_unavailable(format!("system clock error: {}", e)))
    }

    fn sign(&self, claims: &SessionClaims) -> Result<String, AuthError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key).map_err(|e| {
            tracing::error!("Failed to sign session token: {}", e);
            AuthError::service_unavailable("could not sign session token")
        })
    }
}

impl SessionIssuer for JwtSessions {
    fn issue(&self, actor: &Actor) -> Result<SessionToken, AuthError> {
        let now = Self::now_secs()?;
        let claims = SessionClaims {
            sub: actor.user_id.to_string(),
            iss: ISSUER.to_string(),
            iat: now,
            exp: now + self.ttl_secs,
            username: actor.username.clone(),
            role: actor.role.as_str().to_string(),
            member_id: actor.member_id.map(|id| id.value()),
        };

        Ok(SessionToken {
            token: self.sign(&claims)?,
            expires_in: self.ttl_secs,
        })
    }
}

#[async_trait]
impl SessionValidator for JwtSessions {
    async fn validate(&self, token: &str) -> Result<Actor, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[ISSUER]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);

        let data = decode::<SessionClaims>(token, &self.decoding_key, &validation).map_err(|e| {
            use jsonwebtoken::errors::ErrorKind;
            match e.kind() {
                ErrorKind::ExpiredSignature => {
                    tracing::debug!("Token expired");
                    AuthError::TokenExpired
                }
                _ => {
                    tracing::warn!("Token validation failed: {}", e);
                    AuthError::InvalidToken
                }
            }
        })?;
        let claims = data.claims;

        let user_id = claims.sub.parse::<UserId>().map_err(|_| {
            tracing::warn!("Invalid user ID in token: {}", claims.sub);
            AuthError::InvalidToken
        })?;
        let role = claims.role.parse::<Role>().map_err(|e| {
            tracing::warn!("Token carries unknown role: {}", claims.role);
            AuthError::UnknownRole(e)
        })?;

        Ok(Actor::new(
            user_id,
            claims.username,
            role,
            claims.member_id.map(MemberId::new),
        ))
    }
}

impl std::fmt::Debug for JwtSessions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtSessions")
            .field("ttl_secs", &self.ttl_secs)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sessions() -> JwtSessions {
        JwtSessions::new(&SecretString::new("test-secret-test-secret-test-secret".to_string()), 3600)
    }

    fn member_actor() -> Actor {
        Actor::new(UserId::new(7), "sam", Role::SubscriptionMember, Some(MemberId::new(3)))
    }

    #[tokio::test]
    async fn issued_token_validates_back_to_actor() {
        let s = sessions();
        let token = s.issue(&member_actor()).unwrap();

        assert_eq!(token.expires_in, 3600);
        assert_eq!(s.validate(&token.token).await.unwrap(), member_actor());
    }

    #[tokio::test]
    async fn token_from_other_secret_is_rejected() {
        let other = JwtSessions::new(&SecretString::new("another-secret-another-secret".to_string()), 3600);
        let token = other.issue(&member_actor()).unwrap();

        assert!(matches!(
            sessions().validate(&token.token).await,
            Err(AuthError::InvalidToken)
        ));
    }

    #[tokio::test]
    async fn expired_token_is_reported_as_expired() {
        let s = sessions();
        let now = JwtSessions::now_secs().unwrap();
        let token = s
            .sign(&SessionClaims {
                sub: "7".to_string(),
                iss: ISSUER.to_string(),
                iat: now - 7200,
                exp: now - 3600,
                username: "sam".to_string(),
                role: "subscription".to_string(),
                member_id: None,
            })
            .unwrap();

        assert!(matches!(s.validate(&token).await, Err(AuthError::TokenExpired)));
    }

    #[tokio::test]
    async fn unknown_role_is_rejected_at_session_time() {
        let s = sessions();
        let now = JwtSessions::now_secs().unwrap();
        let token = s
            .sign(&SessionClaims {
                sub: "7".to_string(),
                iss: ISSUER.to_string(),
                iat: now,
                exp: now + 60,
                username: "sam".to_string(),
                role: "trainer".to_string(),
                member_id: None,
            })
            .unwrap();

        assert!(matches!(s.validate(&token).await, Err(AuthError::UnknownRole(_))));
    }

    #[tokio::test]
    async fn garbage_is_invalid() {
        assert!(matches!(
            sessions().validate("not.a.jwt").await,
            Err(AuthError::InvalidToken)
        ));
    }
}
