// ============================================================================
// SESSION SERVICE - Authentication lifecycle and the persisted token
// ============================================================================

use std::rc::Rc;

use crate::error::Result;
use crate::models::{AuthResponse, LoginRequest, RegisterRequest, User};
use crate::services::ApiClient;
use crate::utils::TokenStore;

pub struct SessionService {
    api: ApiClient,
    tokens: Rc<dyn TokenStore>,
}

impl SessionService {
    pub fn new(api: ApiClient, tokens: Rc<dyn TokenStore>) -> Self {
        Self { api, tokens }
    }

    /// Registers a new account and persists the returned token
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<AuthResponse> {
        let request = RegisterRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        log::info!("📝 Registering account for {}", email);
        let response: AuthResponse = self.api.post(&["register"], &request).await?;
        self.tokens.save(&response.token)?;
        Ok(response)
    }

    /// Logs in and persists the returned token
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        log::info!("🔐 Logging in {}", email);
        let response: AuthResponse = self.api.post(&["login"], &request).await?;
        self.tokens.save(&response.token)?;
        Ok(response)
    }

    /// Forgets the token. No request is made.
    pub fn logout(&self) {
        log::info!("👋 Clearing session token");
        self.tokens.clear();
    }

    pub fn is_authenticated(&self) -> bool {
        self.tokens.has_token()
    }

    /// Identity behind the current token
    pub async fn current_user(&self) -> Result<User> {
        self.api.get(&["me"], &[]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::services::http::Method;
    use crate::testing::{user, Harness};
    use crate::utils::MemoryTokenStore;

    #[tokio::test]
    async fn register_persists_token() {
        let h = Harness::new();
        h.transport.push_value(
            201,
            &AuthResponse {
                user: user("Ana"),
                token: "tok-ana".to_string(),
            },
        );

        let response = h.session.register("Ana", "ana@x.com", "pw").await.unwrap();
        assert_eq!(response.user.name, "Ana");
        assert_eq!(h.tokens.load().as_deref(), Some("tok-ana"));
        assert!(h.session.is_authenticated());

        let request = h.transport.last_request().unwrap();
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.url, "http://localhost:3000/api/register");
        assert_eq!(
            request.body,
            Some(serde_json::json!({"name": "Ana", "email": "ana@x.com", "password": "pw"}))
        );
    }

    #[tokio::test]
    async fn failed_login_keeps_no_token() {
        let h = Harness::new();
        h.transport.push_json(401, r#"{"error": "Invalid credentials"}"#);

        let err = h.session.login("ana@x.com", "wrong").await.unwrap_err();
        assert!(matches!(err, ApiError::Auth { .. }));
        assert!(!h.session.is_authenticated());

        let request = h.transport.last_request().unwrap();
        assert_eq!(request.url, "http://localhost:3000/api/login");
        assert_eq!(
            request.body,
            Some(serde_json::json!({"email": "ana@x.com", "password": "wrong"}))
        );
    }

    #[tokio::test]
    async fn duplicate_email_is_a_validation_error() {
        let h = Harness::new();
        h.transport.push_json(409, r#"{"error": "Email already in use"}"#);

        let err = h.session.register("Ana", "ana@x.com", "pw").await.unwrap_err();
        assert!(matches!(err, ApiError::Validation { status: 409, .. }));
        assert_eq!(err.server_message(), Some("Email already in use"));
        assert!(!h.session.is_authenticated());
    }

    #[test]
    fn logout_is_idempotent_and_offline() {
        let h = Harness::with_tokens(MemoryTokenStore::with_token("tok"));
        assert!(h.session.is_authenticated());

        h.session.logout();
        h.session.logout();
        assert!(!h.session.is_authenticated());
        assert!(h.transport.requests().is_empty());
    }

    #[tokio::test]
    async fn current_user_sends_bearer_token() {
        let h = Harness::with_tokens(MemoryTokenStore::with_token("tok"));
        h.transport.push_value(200, &user("Ana"));

        let me = h.session.current_user().await.unwrap();
        assert_eq!(me, user("Ana"));

        let request = h.transport.last_request().unwrap();
        assert_eq!(request.url, "http://localhost:3000/api/me");
        assert_eq!(request.header("Authorization"), Some("Bearer tok"));
    }
}
