use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ============================================================================
// TRIP - Travel request and its payloads
// ============================================================================

/// Lifecycle of a trip. The API speaks Portuguese on the wire; the English
/// names are accepted when decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TripStatus {
    #[serde(rename = "solicitado", alias = "requested")]
    Requested,
    #[serde(rename = "aprovado", alias = "approved")]
    Approved,
    #[serde(rename = "cancelado", alias = "canceled", alias = "cancelled")]
    Canceled,
}

impl TripStatus {
    /// Value sent to the API (body and query string)
    pub fn as_str(&self) -> &'static str {
        match self {
            TripStatus::Requested => "solicitado",
            TripStatus::Approved => "aprovado",
            TripStatus::Canceled => "cancelado",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TripStatus::Requested => "Requested",
            TripStatus::Approved => "Approved",
            TripStatus::Canceled => "Canceled",
        }
    }
}

impl fmt::Display for TripStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Dates and timestamps are kept exactly as the server sent them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Trip {
    pub id: String,
    pub requester_id: String,
    pub destination: String,
    pub start_date: String,
    pub end_date: String,
    pub status: TripStatus,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CreateTripRequest {
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UpdateTripStatusRequest {
    pub status: TripStatus,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CancelTripRequest {
    pub force: bool,
}

/// Filters for `GET /trips`. `None` leaves the dimension unconstrained.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TripFilters {
    pub status: Option<TripStatus>,
    pub destination: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl TripFilters {
    pub fn with_status(status: TripStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// Query parameters for the filters that are set, in a stable order
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(status) = self.status {
            query.push(("status", status.as_str().to_string()));
        }
        if let Some(destination) = &self.destination {
            query.push(("destination", destination.clone()));
        }
        if let Some(start) = self.start_date {
            query.push(("start_date", start.format("%Y-%m-%d").to_string()));
        }
        if let Some(end) = self.end_date {
            query.push(("end_date", end.format("%Y-%m-%d").to_string()));
        }
        query
    }
}
