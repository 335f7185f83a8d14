use serde::{Deserialize, Serialize};

use crate::models::domain::{ConcreteSlot, Interview, ScoredInterviewer};

/// Response for the find-match endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindMatchResponse {
    #[serde(rename = "match")]
    pub winner: ScoredInterviewer,
    #[serde(rename = "candidatesConsidered")]
    pub candidates_considered: usize,
}

/// Response for the booking confirmation endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingResponse {
    pub interview: Interview,
}

/// Response for the availability listing endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    #[serde(rename = "interviewerId")]
    pub interviewer_id: String,
    pub slots: Vec<ConcreteSlot>,
    pub count: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
