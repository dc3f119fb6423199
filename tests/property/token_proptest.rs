//! Property-based tests for tokens

use std::time::Duration;

use chrono::Utc;
use ecom::backend::auth::TokenService;
use ecom::backend::store::User;
use proptest::prelude::*;

fn service(secret: &str) -> TokenService {
    TokenService::new(secret, Duration::from_secs(600), Duration::from_secs(600))
}

fn user(id: i64, username: &str) -> User {
    User {
        id,
        username: username.to_string(),
        email: format!("{}@example.com", username),
        password_hash: String::new(),
        is_verified: false,
        join_date: Utc::now(),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn test_access_token_keeps_identity(id in 1i64..1_000_000, username in "[a-z0-9_]{1,20}") {
        let tokens = service("proptest-secret");
        let token = tokens.issue_access_token(&user(id, &username)).unwrap();
        let claims = tokens.verify_access_token(&token).unwrap();
        prop_assert_eq!(claims.id, id);
        prop_assert_eq!(claims.username, username);
    }

    #[test]
    fn test_other_secret_rejects(secret in "[a-z]{8,16}") {
        prop_assume!(secret != "proptest-secret");
        let token = service("proptest-secret").issue_access_token(&user(1, "alice")).unwrap();
        prop_assert!(service(&secret).verify_access_token(&token).is_err());
    }

    #[test]
    fn test_verification_token_is_not_an_access_token(email in "[a-z]{1,10}@[a-z]{1,10}\\.com") {
        let tokens = service("proptest-secret");
        let token = tokens.issue_verification_token(&email).unwrap();
        prop_assert!(tokens.verify_access_token(&token).is_err());
        prop_assert_eq!(tokens.verify_verification_token(&token).unwrap().email, email);
    }
}
