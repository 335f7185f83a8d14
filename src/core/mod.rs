// Core algorithm exports
pub mod availability;
pub mod booking;
pub mod filters;
pub mod matcher;
pub mod scoring;
pub mod timeslots;

pub use availability::{AvailabilityResolver, ResolvedSlots};
pub use booking::{build_booking, conflicts_with_existing, ensure_bookable, BookingError};
pub use filters::{is_eligible, skill_overlap, SkillOverlap};
pub use matcher::{InterviewerContext, MatchError, Matcher};
pub use scoring::calculate_match_score;
pub use timeslots::{subtract_interval, to_clock, to_minutes, MinuteSpan, TimeslotError};
