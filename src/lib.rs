// ============================================================================
// TRIP APPROVAL PWA - Client-side session and state layer
// ============================================================================
// - Services: API communication only (session, trips)
// - State: stores with observable fields (auth, trips)
// - Router: route table + navigation guard
// - Models: structures shared with the backend
// ============================================================================

pub mod app;
pub mod config;
pub mod error;
pub mod models;
pub mod router;
pub mod services;
pub mod state;
pub mod utils;

#[cfg(test)]
mod testing;

pub use app::AppContext;
pub use config::{AppConfig, CONFIG};
pub use error::{ApiError, Result, StorageError};

#[cfg(target_arch = "wasm32")]
mod web {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;

    use crate::app::AppContext;
    use crate::config::CONFIG;
    use crate::router::history::BrowserHistory;

    thread_local! {
        static APP: RefCell<Option<Rc<AppContext>>> = RefCell::new(None);
    }

    /// Runs `f` with the application context once bootstrap has finished
    pub fn with_app<R>(f: impl FnOnce(&AppContext) -> R) -> Option<R> {
        let app = APP.with(|cell| cell.borrow().clone())?;
        Some(f(&app))
    }

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();

        if CONFIG.is_logging_enabled() {
            wasm_logger::init(wasm_logger::Config::new(CONFIG.log_level()));
        }
        log::info!("🚀 Trip approval client starting ({})", CONFIG.environment);

        wasm_bindgen_futures::spawn_local(async {
            let app = match AppContext::browser(CONFIG.clone()).await {
                Ok(app) => Rc::new(app),
                Err(e) => {
                    log::error!("❌ Could not start the client: {}", e);
                    return;
                }
            };

            match BrowserHistory::new().and_then(|history| history.guard_current(&app.router)) {
                Ok(path) => log::info!("✅ Ready at {}", path),
                Err(e) => log::error!("❌ Initial navigation failed: {:?}", e),
            }

            APP.with(|cell| *cell.borrow_mut() = Some(app));
        });

        Ok(())
    }

    /// Guarded navigation callable from JavaScript; returns the path shown
    #[wasm_bindgen]
    pub fn navigate(path: &str) -> Result<String, JsValue> {
        let history = BrowserHistory::new()?;
        with_app(|app| history.navigate(&app.router, path))
            .unwrap_or_else(|| Err(JsValue::from_str("App is not initialized")))
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::with_app;
