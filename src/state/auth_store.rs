// ============================================================================
// AUTH STORE - Current identity + loading/error flags
// ============================================================================

use std::cell::Cell;
use std::rc::Rc;

use crate::error::{ApiError, Result};
use crate::models::User;
use crate::services::SessionService;
use crate::state::reactivity::{LoadingGuard, Observable, Watch};

pub struct AuthStore {
    session: Rc<SessionService>,
    user: Observable<Option<User>>,
    loading: Observable<bool>,
    error: Observable<Option<String>>,
    initialized: Cell<bool>,
}

impl AuthStore {
    pub fn new(session: Rc<SessionService>) -> Self {
        Self {
            session,
            user: Observable::new(None),
            loading: Observable::new(false),
            error: Observable::new(None),
            initialized: Cell::new(false),
        }
    }

    /// Builds the store and validates any persisted session
    pub async fn bootstrap(session: Rc<SessionService>) -> Self {
        let store = Self::new(session);
        store.initialize_store().await;
        store
    }

    // Getters

    /// Token presence, not local user presence: true right after startup,
    /// before the identity has been hydrated.
    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn current_user(&self) -> Option<User> {
        self.user.get()
    }

    pub fn loading(&self) -> bool {
        self.loading.get()
    }

    pub fn error(&self) -> Option<String> {
        self.error.get()
    }

    pub fn watch_user(&self) -> Watch<Option<User>> {
        self.user.watch()
    }

    pub fn watch_loading(&self) -> Watch<bool> {
        self.loading.watch()
    }

    pub fn watch_error(&self) -> Watch<Option<String>> {
        self.error.watch()
    }

    // Actions

    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<User> {
        let _loading = self.begin_action();
        match self.session.register(name, email, password).await {
            Ok(response) => {
                log::info!("✅ Registered as {}", response.user.email);
                self.user.set(Some(response.user.clone()));
                Ok(response.user)
            }
            Err(e) => Err(self.fail(e, "Failed to register")),
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        let _loading = self.begin_action();
        match self.session.login(email, password).await {
            Ok(response) => {
                log::info!("✅ Logged in as {}", response.user.email);
                self.user.set(Some(response.user.clone()));
                Ok(response.user)
            }
            Err(e) => Err(self.fail(e, "Failed to login")),
        }
    }

    pub fn logout(&self) {
        self.session.logout();
        self.user.set(None);
    }

    /// Hydrates the user from a persisted token. Runs once; a rejected token
    /// is treated as a dead session and removed.
    pub async fn initialize_store(&self) {
        if self.initialized.replace(true) {
            log::debug!("Auth store already initialized");
            return;
        }
        if !self.session.is_authenticated() {
            return;
        }

        let _loading = LoadingGuard::engage(&self.loading);
        match self.session.current_user().await {
            Ok(user) => {
                log::info!("✅ Session restored for {}", user.email);
                self.user.set(Some(user));
            }
            Err(e) => {
                log::error!("❌ Failed to fetch user information: {}", e);
                self.logout();
            }
        }
    }

    fn begin_action(&self) -> LoadingGuard {
        let guard = LoadingGuard::engage(&self.loading);
        self.error.set(None);
        guard
    }

    fn fail(&self, error: ApiError, fallback: &str) -> ApiError {
        log::error!("❌ {}: {}", fallback, error);
        self.error.set(Some(error.user_message(fallback)));
        error
    }
}
