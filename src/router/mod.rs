// ============================================================================
// ROUTER - Route table and navigation guard
// ============================================================================

#[cfg(target_arch = "wasm32")]
pub mod history;

use std::rc::Rc;

use url::form_urlencoded;

use crate::services::SessionService;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    RequiresAuth,
    GuestOnly,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Register,
    Trips,
    NewTrip,
    TripDetails { id: String },
    NotFound,
}

pub struct RouteRecord {
    pub name: &'static str,
    pub pattern: &'static str,
    pub access: Access,
}

/// Declared routes, matched top to bottom. Anything else is `NotFound`.
pub const ROUTES: &[RouteRecord] = &[
    RouteRecord { name: "Home", pattern: "/", access: Access::RequiresAuth },
    RouteRecord { name: "Login", pattern: "/login", access: Access::GuestOnly },
    RouteRecord { name: "Register", pattern: "/register", access: Access::GuestOnly },
    RouteRecord { name: "Trips", pattern: "/trips", access: Access::RequiresAuth },
    RouteRecord { name: "NewTrip", pattern: "/trips/new", access: Access::RequiresAuth },
    RouteRecord { name: "TripDetails", pattern: "/trips/:id", access: Access::RequiresAuth },
];

static NOT_FOUND: RouteRecord = RouteRecord {
    name: "NotFound",
    pattern: "/:path*",
    access: Access::Public,
};

impl Route {
    /// Matches a full path (query string and fragment are ignored)
    pub fn recognize(full_path: &str) -> Route {
        let path = strip_query(full_path);
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        for record in ROUTES {
            if let Some(id) = match_pattern(record.pattern, &segments) {
                return Route::from_record(record.name, id);
            }
        }
        Route::NotFound
    }

    fn from_record(name: &str, id: Option<String>) -> Route {
        match (name, id) {
            ("Home", _) => Route::Home,
            ("Login", _) => Route::Login,
            ("Register", _) => Route::Register,
            ("Trips", _) => Route::Trips,
            ("NewTrip", _) => Route::NewTrip,
            ("TripDetails", Some(id)) => Route::TripDetails { id },
            _ => Route::NotFound,
        }
    }

    pub fn record(&self) -> &'static RouteRecord {
        let name = self.name();
        ROUTES
            .iter()
            .find(|record| record.name == name)
            .unwrap_or(&NOT_FOUND)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::Login => "Login",
            Route::Register => "Register",
            Route::Trips => "Trips",
            Route::NewTrip => "NewTrip",
            Route::TripDetails { .. } => "TripDetails",
            Route::NotFound => "NotFound",
        }
    }

    pub fn access(&self) -> Access {
        self.record().access
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::Trips => "/trips".to_string(),
            Route::NewTrip => "/trips/new".to_string(),
            Route::TripDetails { id } => format!("/trips/{}", id),
            Route::NotFound => "/404".to_string(),
        }
    }
}

fn strip_query(full_path: &str) -> &str {
    full_path
        .split(|c: char| c == '?' || c == '#')
        .next()
        .unwrap_or_default()
}

// `:name` captures one segment; only `:id` is kept.
fn match_pattern(pattern: &str, segments: &[&str]) -> Option<Option<String>> {
    let expected: Vec<&str> = pattern.split('/').filter(|s| !s.is_empty()).collect();
    if expected.len() != segments.len() {
        return None;
    }

    let mut id = None;
    for (want, got) in expected.iter().zip(segments) {
        if let Some(param) = want.strip_prefix(':') {
            if param == "id" {
                id = Some((*got).to_string());
            }
        } else if want != got {
            return None;
        }
    }
    Some(id)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Redirect {
    /// Login view, remembering where the user was going
    Login { redirect: String },
    Home,
}

impl Redirect {
    pub fn path(&self) -> String {
        match self {
            Redirect::Login { redirect } => {
                let query = form_urlencoded::Serializer::new(String::new())
                    .append_pair("redirect", redirect)
                    .finish();
                format!("{}?{}", Route::Login.path(), query)
            }
            Redirect::Home => Route::Home.path(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Allow,
    Redirect(Redirect),
}

/// Pure navigation decision for a route's access requirement
pub fn guard(access: Access, is_authenticated: bool, full_path: &str) -> Navigation {
    match access {
        Access::RequiresAuth if !is_authenticated => Navigation::Redirect(Redirect::Login {
            redirect: full_path.to_string(),
        }),
        Access::GuestOnly if is_authenticated => Navigation::Redirect(Redirect::Home),
        _ => Navigation::Allow,
    }
}

/// Where to go after a successful login: the `redirect` parameter of the
/// login URL when it is a local path, otherwise home.
pub fn return_target(login_path: &str) -> String {
    let query = login_path
        .split_once('?')
        .map(|(_, query)| query.split('#').next().unwrap_or_default())
        .unwrap_or_default();

    form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "redirect")
        .map(|(_, value)| value.into_owned())
        .filter(|target| target.starts_with('/') && !target.starts_with("//"))
        .unwrap_or_else(|| Route::Home.path())
}

pub struct Router {
    session: Rc<SessionService>,
}

impl Router {
    pub fn new(session: Rc<SessionService>) -> Self {
        Self { session }
    }

    /// Evaluated before every navigation
    pub fn before_each(&self, full_path: &str) -> Navigation {
        let route = Route::recognize(full_path);
        let decision = guard(route.access(), self.session.is_authenticated(), full_path);
        if let Navigation::Redirect(redirect) = &decision {
            log::info!("🔀 {} ({}) -> {}", full_path, route.name(), redirect.path());
        }
        decision
    }

    /// Final path for a navigation attempt, after at most one redirect
    pub fn resolve(&self, full_path: &str) -> String {
        match self.before_each(full_path) {
            Navigation::Allow => full_path.to_string(),
            Navigation::Redirect(redirect) => redirect.path(),
        }
    }
}
