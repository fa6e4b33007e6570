pub mod api_client;
#[cfg(target_arch = "wasm32")]
pub mod gloo_transport;
pub mod http;
pub mod session_service;
pub mod trip_service;

pub use api_client::ApiClient;
#[cfg(target_arch = "wasm32")]
pub use gloo_transport::GlooTransport;
pub use http::{HttpRequest, HttpResponse, HttpTransport, Method};
pub use session_service::SessionService;
pub use trip_service::TripService;
