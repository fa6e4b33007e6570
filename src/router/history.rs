// ============================================================================
// BROWSER HISTORY - Applies the guard to History API navigation (wasm only)
// ============================================================================

use wasm_bindgen::JsValue;

use crate::router::Router;

pub struct BrowserHistory {
    window: web_sys::Window,
}

impl BrowserHistory {
    pub fn new() -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window available"))?;
        Ok(Self { window })
    }

    /// Path plus query string of the current location
    pub fn current_path(&self) -> Result<String, JsValue> {
        let location = self.window.location();
        Ok(format!("{}{}", location.pathname()?, location.search()?))
    }

    /// Guards `full_path` and pushes the resulting entry. Returns the path
    /// actually shown.
    pub fn navigate(&self, router: &Router, full_path: &str) -> Result<String, JsValue> {
        let target = router.resolve(full_path);
        self.window
            .history()?
            .push_state_with_url(&JsValue::NULL, "", Some(&target))?;
        Ok(target)
    }

    /// Guards the location the page was opened at, replacing it when redirected
    pub fn guard_current(&self, router: &Router) -> Result<String, JsValue> {
        let current = self.current_path()?;
        let target = router.resolve(&current);
        if target != current {
            self.window
                .history()?
                .replace_state_with_url(&JsValue::NULL, "", Some(&target))?;
        }
        Ok(target)
    }
}
