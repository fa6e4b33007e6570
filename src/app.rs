// ============================================================================
// APP - Explicitly wired application context
// ============================================================================

use std::rc::Rc;

use crate::config::AppConfig;
use crate::error::Result;
use crate::router::Router;
use crate::services::{ApiClient, HttpTransport, SessionService, TripService};
use crate::state::{AuthStore, TripStore};
use crate::utils::TokenStore;

/// Services, stores and router sharing one token store and transport.
/// Passed to whichever layer needs it instead of global lookups.
pub struct AppContext {
    pub config: AppConfig,
    pub session: Rc<SessionService>,
    pub auth: Rc<AuthStore>,
    pub trips: Rc<TripStore>,
    pub router: Router,
}

impl AppContext {
    /// Wires everything and validates any persisted session
    pub async fn bootstrap(
        config: AppConfig,
        transport: Rc<dyn HttpTransport>,
        tokens: Rc<dyn TokenStore>,
    ) -> Result<Self> {
        let api = ApiClient::new(config.backend_url(), transport, tokens.clone())?;
        log::info!("🌐 API at {}", api.base_url());

        let session = Rc::new(SessionService::new(api.clone(), tokens));
        let auth = Rc::new(AuthStore::bootstrap(session.clone()).await);
        let trips = Rc::new(TripStore::new(TripService::new(api)));
        let router = Router::new(session.clone());

        Ok(Self {
            config,
            session,
            auth,
            trips,
            router,
        })
    }

    /// Context for the browser: fetch transport and localStorage token
    #[cfg(target_arch = "wasm32")]
    pub async fn browser(config: AppConfig) -> Result<Self> {
        use crate::services::GlooTransport;
        use crate::utils::LocalStorageTokenStore;

        Self::bootstrap(
            config,
            Rc::new(GlooTransport::new()),
            Rc::new(LocalStorageTokenStore::new()),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TripStatus;
    use crate::testing::{trip, user, MockTransport};
    use crate::utils::MemoryTokenStore;

    fn config() -> AppConfig {
        AppConfig {
            backend_url_development: "http://localhost:3000/api".to_string(),
            ..AppConfig::default()
        }
    }

    #[tokio::test]
    async fn bootstrap_restores_session() {
        let transport = Rc::new(MockTransport::new());
        let tokens = Rc::new(MemoryTokenStore::with_token("tok"));
        transport.push_value(200, &user("Ana"));

        let app = AppContext::bootstrap(config(), transport.clone(), tokens)
            .await
            .unwrap();
        assert_eq!(app.auth.current_user(), Some(user("Ana")));
        assert_eq!(app.router.resolve("/login"), "/");
        assert_eq!(
            transport.last_request().unwrap().url,
            "http://localhost:3000/api/me"
        );
    }

    #[tokio::test]
    async fn rejected_session_sends_user_to_login() {
        let transport = Rc::new(MockTransport::new());
        let tokens = Rc::new(MemoryTokenStore::with_token("stale"));
        transport.push_json(401, r#"{"error": "Unauthorized"}"#);

        let app = AppContext::bootstrap(config(), transport, tokens.clone())
            .await
            .unwrap();
        assert!(!app.auth.is_authenticated());
        assert_eq!(tokens.load(), None);
        assert_eq!(app.router.resolve("/trips/new"), "/login?redirect=%2Ftrips%2Fnew");
    }

    #[tokio::test]
    async fn stores_share_the_token() {
        let transport = Rc::new(MockTransport::new());
        let tokens = Rc::new(MemoryTokenStore::new());
        let app = AppContext::bootstrap(config(), transport.clone(), tokens)
            .await
            .unwrap();
        assert!(transport.requests().is_empty());

        transport.push_json(
            200,
            &serde_json::json!({"user": user("Ana"), "token": "tok-ana"}).to_string(),
        );
        app.auth.login("ana@x.com", "pw").await.unwrap();

        transport.push_value(200, &vec![trip("t-1", TripStatus::Requested)]);
        app.trips.fetch_trips(None).await.unwrap();
        assert_eq!(
            transport.last_request().unwrap().header("Authorization"),
            Some("Bearer tok-ana")
        );
        assert_eq!(app.router.resolve("/trips"), "/trips");
    }

    #[tokio::test]
    async fn invalid_backend_url_fails_bootstrap() {
        let transport = Rc::new(MockTransport::new());
        let tokens = Rc::new(MemoryTokenStore::new());
        let config = AppConfig {
            backend_url_development: "::".to_string(),
            ..AppConfig::default()
        };
        assert!(AppContext::bootstrap(config, transport, tokens).await.is_err());
    }
}
