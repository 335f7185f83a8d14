//! PrepMatch Algo - Interviewer matching and slot allocation service
//!
//! This library provides the matching engine used by the PrepMatch
//! interview marketplace: weighted interviewer scoring, recurring-schedule
//! availability resolution, and conflict-guarded slot booking.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{
    AvailabilityResolver, InterviewerContext, MatchError, Matcher, MinuteSpan, TimeslotError,
};
pub use crate::models::{
    CandidateRequest, ConcreteSlot, Interview, InterviewerProfile, ScoredInterviewer,
    ScoringWeights, SkillTier, TimeBlock, TimeRange, WeeklyAvailability,
};
