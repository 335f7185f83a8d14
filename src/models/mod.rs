// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    BlockReason, CandidateRequest, ConcreteSlot, Interview, InterviewStatus, InterviewerProfile,
    ScoredInterviewer, ScoringWeights, SkillTier, TimeBlock, TimeRange, WeeklyAvailability,
    weekday_name,
};
pub use requests::{AvailabilityQuery, ConfirmBookingRequest, FindMatchRequest};
pub use responses::{
    AvailabilityResponse, BookingResponse, ErrorResponse, FindMatchResponse, HealthResponse,
};
