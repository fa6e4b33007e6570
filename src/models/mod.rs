pub mod trip;
pub mod user;

pub use trip::{
    CancelTripRequest, CreateTripRequest, Trip, TripFilters, TripStatus, UpdateTripStatusRequest,
};
pub use user::{AuthResponse, LoginRequest, RegisterRequest, User};
