use jsonwebtoken::{decode, DecodingKey, TokenData, Validation};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::{AppError, AppResult};

/// Claims carried by a session token from the identity provider. `sub` is
/// the provider's opaque user id; tokens are issued elsewhere and only
/// verified here.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,
    pub exp: i64,
}

pub fn verify_session_token(token: &str, config: &Config) -> AppResult<TokenData<Claims>> {
    let mut validation = Validation::default();
    validation.validate_exp = true;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.session_secret.as_bytes()),
        &validation,
    )
    .map_err(|_| AppError::Unauthorized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn test_config(secret: &str) -> Config {
        Config {
            database_url: "postgres://localhost/test".into(),
            host: "127.0.0.1".into(),
            port: 0,
            frontend_url: "http://localhost:3000".into(),
            session_secret: secret.into(),
        }
    }

    fn make_token(sub: &str, exp: i64, secret: &str) -> String {
        let claims = Claims {
            sub: sub.into(),
            exp,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_verify_accepts_valid_token() {
        let config = test_config("test-secret");
        let exp = (Utc::now() + Duration::hours(1)).timestamp();
        let token = make_token("user-123", exp, "test-secret");

        let data = verify_session_token(&token, &config).unwrap();
        assert_eq!(data.claims.sub, "user-123");
    }

    #[test]
    fn test_verify_rejects_expired_token() {
        let config = test_config("test-secret");
        // Well past the default leeway
        let exp = (Utc::now() - Duration::hours(2)).timestamp();
        let token = make_token("user-123", exp, "test-secret");

        assert!(verify_session_token(&token, &config).is_err());
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let config = test_config("test-secret");
        let exp = (Utc::now() + Duration::hours(1)).timestamp();
        let token = make_token("user-123", exp, "another-secret");

        assert!(verify_session_token(&token, &config).is_err());
    }

    #[test]
    fn test_verify_rejects_garbage() {
        let config = test_config("test-secret");
        assert!(verify_session_token("not-a-token", &config).is_err());
    }
}
