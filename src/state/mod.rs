// ============================================================================
// STATE MODULE - Stores built on Rc<RefCell> observables
// ============================================================================

pub mod auth_store;
pub mod reactivity;
pub mod trip_store;

pub use auth_store::AuthStore;
pub use reactivity::{LoadingGuard, Observable, Watch};
pub use trip_store::TripStore;
