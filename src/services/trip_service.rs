use crate::error::Result;
use crate::models::{CancelTripRequest, CreateTripRequest, Trip, TripFilters, UpdateTripStatusRequest};
use crate::services::ApiClient;

/// Trip endpoints, one request per call. Transition rules (including the
/// 7-day cancellation window) are enforced by the API.
#[derive(Clone)]
pub struct TripService {
    api: ApiClient,
}

impl TripService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn create_trip(&self, data: &CreateTripRequest) -> Result<Trip> {
        self.api.post(&["trips"], data).await
    }

    pub async fn get_trips(&self, filters: Option<&TripFilters>) -> Result<Vec<Trip>> {
        let query = filters.map(TripFilters::to_query).unwrap_or_default();
        self.api.get(&["trips"], &query).await
    }

    pub async fn get_trip_by_id(&self, id: &str) -> Result<Trip> {
        self.api.get(&["trips", id], &[]).await
    }

    pub async fn update_trip_status(&self, id: &str, data: &UpdateTripStatusRequest) -> Result<Trip> {
        self.api.patch(&["trips", id, "status"], data).await
    }

    /// `force` asks the API to skip its 7-day guard; it is only forwarded.
    pub async fn cancel_trip(&self, id: &str, force: bool) -> Result<Trip> {
        self.api
            .post(&["trips", id, "cancel"], &CancelTripRequest { force })
            .await
    }
}
