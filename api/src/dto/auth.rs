use serde::{Deserialize, Serialize};
use validator::Validate;

use dl_core::domain::entities::TokenPair;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,

    /// Optional display name
    #[validate(length(max = 255))]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

/// Body form of the refresh request; the cookie takes precedence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String, // always "bearer"
}

impl From<TokenPair> for TokenResponse {
    fn from(tokens: TokenPair) -> Self {
        Self {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            token_type: tokens.token_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signup_request_validation() {
        let valid = SignupRequest {
            email: "u@x.com".to_string(),
            password: "pw1".to_string(),
            name: None,
        };
        assert!(valid.validate().is_ok());

        let bad_email = SignupRequest {
            email: "not-an-email".to_string(),
            ..valid.clone()
        };
        let errors = bad_email.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));

        let empty_password = SignupRequest {
            password: String::new(),
            ..valid
        };
        assert!(empty_password.validate().is_err());
    }

    #[test]
    fn test_token_response_from_pair() {
        let response = TokenResponse::from(TokenPair::new("a".into(), "r".into()));
        let json = serde_json::to_value(response).unwrap();
        assert_eq!(json["token_type"], "bearer");
        assert_eq!(json["access_token"], "a");
        assert_eq!(json["refresh_token"], "r");
    }
}
