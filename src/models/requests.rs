use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::CandidateRequest;

/// Request to find the best interviewer for a candidate
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FindMatchRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "candidate_id", rename = "candidateId")]
    pub candidate_id: String,
    #[serde(default)]
    #[serde(alias = "skill_categories", rename = "skillCategories")]
    pub skill_categories: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(alias = "experience_years", rename = "experienceYears")]
    pub experience_years: u8,
    #[serde(default)]
    #[serde(alias = "experience_months", rename = "experienceMonths")]
    pub experience_months: u8,
    #[serde(default)]
    #[serde(alias = "preferred_at", rename = "preferredAt")]
    pub preferred_at: Option<NaiveDateTime>,
    #[serde(default)]
    #[serde(alias = "exclude_interviewer_id", rename = "excludeInterviewerId")]
    pub exclude_interviewer_id: Option<String>,
    #[validate(range(min = 15, max = 240))]
    #[serde(default)]
    #[serde(alias = "duration_minutes", rename = "durationMinutes")]
    pub duration_minutes: Option<u16>,
}

fn default_duration() -> u16 {
    60
}

impl FindMatchRequest {
    /// Convert into the engine's request type, filling in the configured
    /// session length when the caller omitted one
    pub fn into_candidate_request(self, default_duration: u16) -> CandidateRequest {
        CandidateRequest {
            candidate_id: self.candidate_id,
            skill_categories: self.skill_categories,
            skills: self.skills,
            experience_years: self.experience_years,
            experience_months: self.experience_months,
            preferred_at: self.preferred_at,
            exclude_interviewer_id: self.exclude_interviewer_id,
            duration_minutes: self.duration_minutes.unwrap_or(default_duration),
        }
    }
}

/// Request to confirm a booking for a previously offered slot
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ConfirmBookingRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "interviewer_id", rename = "interviewerId")]
    pub interviewer_id: String,
    #[validate(length(min = 1))]
    #[serde(alias = "candidate_id", rename = "candidateId")]
    pub candidate_id: String,
    pub date: NaiveDate,
    pub start: String,
    #[validate(range(min = 15, max = 240))]
    #[serde(default = "default_duration")]
    #[serde(alias = "duration_minutes", rename = "durationMinutes")]
    pub duration_minutes: u16,
}

/// Query parameters for the availability listing endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityQuery {
    #[serde(default)]
    #[serde(alias = "duration_minutes", rename = "durationMinutes")]
    pub duration_minutes: Option<u16>,
}
