// ============================================================================
// TRIP STORE - Trip collection + current trip
// ============================================================================
// Local state only changes after the server answered. The collection keeps
// the server's order; mutations apply the single response to both the
// collection entry and the current trip.
// ============================================================================

use crate::error::{ApiError, Result};
use crate::models::{CreateTripRequest, Trip, TripFilters, UpdateTripStatusRequest};
use crate::services::TripService;
use crate::state::reactivity::{LoadingGuard, Observable, Watch};

pub struct TripStore {
    service: TripService,
    trips: Observable<Vec<Trip>>,
    current_trip: Observable<Option<Trip>>,
    loading: Observable<bool>,
    error: Observable<Option<String>>,
}

impl TripStore {
    pub fn new(service: TripService) -> Self {
        Self {
            service,
            trips: Observable::new(Vec::new()),
            current_trip: Observable::new(None),
            loading: Observable::new(false),
            error: Observable::new(None),
        }
    }

    // Getters

    pub fn all_trips(&self) -> Vec<Trip> {
        self.trips.get()
    }

    pub fn trip_by_id(&self, id: &str) -> Option<Trip> {
        self.trips
            .with(|trips| trips.iter().find(|trip| trip.id == id).cloned())
    }

    pub fn current_trip(&self) -> Option<Trip> {
        self.current_trip.get()
    }

    pub fn loading(&self) -> bool {
        self.loading.get()
    }

    pub fn error(&self) -> Option<String> {
        self.error.get()
    }

    pub fn watch_trips(&self) -> Watch<Vec<Trip>> {
        self.trips.watch()
    }

    pub fn watch_current_trip(&self) -> Watch<Option<Trip>> {
        self.current_trip.watch()
    }

    pub fn watch_loading(&self) -> Watch<bool> {
        self.loading.watch()
    }

    pub fn watch_error(&self) -> Watch<Option<String>> {
        self.error.watch()
    }

    // Actions

    /// Replaces the collection with the server's result for `filters`
    pub async fn fetch_trips(&self, filters: Option<&TripFilters>) -> Result<Vec<Trip>> {
        let _loading = self.begin_action();
        match self.service.get_trips(filters).await {
            Ok(trips) => {
                log::info!("📋 {} trips loaded", trips.len());
                self.trips.set(trips.clone());
                Ok(trips)
            }
            Err(e) => Err(self.fail(e, "Failed to fetch trips")),
        }
    }

    pub async fn fetch_trip_by_id(&self, id: &str) -> Result<Trip> {
        let _loading = self.begin_action();
        match self.service.get_trip_by_id(id).await {
            Ok(trip) => {
                self.current_trip.set(Some(trip.clone()));
                Ok(trip)
            }
            Err(e) => Err(self.fail(e, "Failed to fetch trip")),
        }
    }

    pub async fn create_trip(&self, data: &CreateTripRequest) -> Result<Trip> {
        let _loading = self.begin_action();
        match self.service.create_trip(data).await {
            Ok(trip) => {
                log::info!("✅ Trip {} created ({})", trip.id, trip.destination);
                self.trips.update(|trips| trips.push(trip.clone()));
                Ok(trip)
            }
            Err(e) => Err(self.fail(e, "Failed to create trip")),
        }
    }

    pub async fn update_trip_status(&self, id: &str, data: &UpdateTripStatusRequest) -> Result<Trip> {
        let _loading = self.begin_action();
        match self.service.update_trip_status(id, data).await {
            Ok(trip) => {
                log::info!("✅ Trip {} is now {}", id, trip.status);
                self.apply_server_trip(id, &trip);
                Ok(trip)
            }
            Err(e) => Err(self.fail(e, "Failed to update trip status")),
        }
    }

    pub async fn cancel_trip(&self, id: &str, force: bool) -> Result<Trip> {
        let _loading = self.begin_action();
        match self.service.cancel_trip(id, force).await {
            Ok(trip) => {
                log::info!("✅ Trip {} canceled{}", id, if force { " (forced)" } else { "" });
                self.apply_server_trip(id, &trip);
                Ok(trip)
            }
            Err(e) => Err(self.fail(e, "Failed to cancel trip")),
        }
    }

    // An id missing from the collection is not an error: the server already
    // accepted the change.
    fn apply_server_trip(&self, id: &str, updated: &Trip) {
        let in_collection = self.trips.with(|trips| trips.iter().any(|trip| trip.id == id));
        if in_collection {
            self.trips.update(|trips| {
                if let Some(slot) = trips.iter_mut().find(|trip| trip.id == id) {
                    *slot = updated.clone();
                }
            });
        }

        let is_current = self
            .current_trip
            .with(|current| current.as_ref().map_or(false, |trip| trip.id == id));
        if is_current {
            self.current_trip.set(Some(updated.clone()));
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
