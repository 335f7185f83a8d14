use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};

/// One recurring availability window inside a weekday's list.
///
/// Times are `HH:MM` clock strings; the window is half-open `[start, end)`.
/// Invariant: within one weekday's list no two ranges overlap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub id: String,
    pub start: String,
    pub end: String,
}

impl TimeRange {
    pub fn new(id: impl Into<String>, start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            start: start.into(),
            end: end.into(),
        }
    }
}

/// Recurring weekly availability template.
///
/// Modeled as a fixed-arity record rather than a keyed map so that "all
/// seven weekdays present" holds by construction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeeklyAvailability {
    #[serde(default)]
    pub monday: Vec<TimeRange>,
    #[serde(default)]
    pub tuesday: Vec<TimeRange>,
    #[serde(default)]
    pub wednesday: Vec<TimeRange>,
    #[serde(default)]
    pub thursday: Vec<TimeRange>,
    #[serde(default)]
    pub friday: Vec<TimeRange>,
    #[serde(default)]
    pub saturday: Vec<TimeRange>,
    #[serde(default)]
    pub sunday: Vec<TimeRange>,
}

impl WeeklyAvailability {
    /// Ranges declared for the given weekday. An empty list simply yields
    /// no slots for that weekday.
    pub fn ranges_for(&self, weekday: Weekday) -> &[TimeRange] {
        match weekday {
            Weekday::Mon => &self.monday,
            Weekday::Tue => &self.tuesday,
            Weekday::Wed => &self.wednesday,
            Weekday::Thu => &self.thursday,
            Weekday::Fri => &self.friday,
            Weekday::Sat => &self.saturday,
            Weekday::Sun => &self.sunday,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.monday.is_empty()
            && self.tuesday.is_empty()
            && self.wednesday.is_empty()
            && self.thursday.is_empty()
            && self.friday.is_empty()
            && self.saturday.is_empty()
            && self.sunday.is_empty()
    }
}

/// Interviewer profile with declared skills and the recurring weekly
/// availability template
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewerProfile {
    #[serde(rename = "interviewerId")]
    pub interviewer_id: String,
    pub name: String,
    #[serde(rename = "skillCategories", default)]
    pub skill_categories: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(rename = "experienceYears")]
    pub experience_years: u8,
    #[serde(rename = "isActive", default = "default_true")]
    pub is_active: bool,
    #[serde(rename = "weeklyAvailability", default)]
    pub weekly_availability: WeeklyAvailability,
}

fn default_true() -> bool {
    true
}

/// A candidate's matching request, ephemeral per attempt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateRequest {
    #[serde(rename = "candidateId")]
    pub candidate_id: String,
    #[serde(rename = "skillCategories", default)]
    pub skill_categories: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(rename = "experienceYears")]
    pub experience_years: u8,
    #[serde(rename = "experienceMonths", default)]
    pub experience_months: u8,
    #[serde(rename = "preferredAt", default)]
    pub preferred_at: Option<NaiveDateTime>,
    #[serde(rename = "excludeInterviewerId", default)]
    pub exclude_interviewer_id: Option<String>,
    #[serde(rename = "durationMinutes")]
    pub duration_minutes: u16,
}

/// Why an interval is excluded on a concrete date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockReason {
    ManualBlock,
    InterviewScheduled,
    Other,
}

/// A concrete-date exclusion layered on top of the weekly template
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeBlock {
    #[serde(rename = "interviewerId")]
    pub interviewer_id: String,
    pub date: NaiveDate,
    pub start: String,
    pub end: String,
    pub reason: BlockReason,
    #[serde(rename = "interviewId", default)]
    pub interview_id: Option<String>,
}

/// Interview lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterviewStatus {
    Scheduled,
    Completed,
    Cancelled,
}

/// A booked interview. A `scheduled` interview acts as an implicit
/// time block for future matching.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interview {
    #[serde(rename = "interviewId")]
    pub interview_id: String,
    #[serde(rename = "interviewerId")]
    pub interviewer_id: String,
    #[serde(rename = "candidateId")]
    pub candidate_id: String,
    pub date: NaiveDate,
    pub start: String,
    #[serde(rename = "durationMinutes")]
    pub duration_minutes: u16,
    pub status: InterviewStatus,
}

/// A materialized (interviewer, date) interval. Derived per request,
/// never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConcreteSlot {
    pub date: NaiveDate,
    pub weekday: String,
    pub start: String,
    pub end: String,
    pub label: String,
}

impl ConcreteSlot {
    pub fn new(date: NaiveDate, start: impl Into<String>, end: impl Into<String>) -> Self {
        let start = start.into();
        let end = end.into();
        let weekday = weekday_name(date.weekday()).to_string();
        let label = format!("{}, {} {}-{}", weekday, date.format("%d/%m/%Y"), start, end);
        Self {
            date,
            weekday,
            start,
            end,
            label,
        }
    }
}

/// English weekday name used in slot labels
pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Coarse classification of how well an interviewer's declared skills
/// cover a candidate's request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillTier {
    None,
    Poor,
    Good,
    Excellent,
}

/// Scored interviewer result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredInterviewer {
    #[serde(rename = "interviewerId")]
    pub interviewer_id: String,
    pub name: String,
    #[serde(rename = "experienceYears")]
    pub experience_years: u8,
    #[serde(rename = "matchScore")]
    pub match_score: f64,
    #[serde(rename = "skillTier")]
    pub skill_tier: SkillTier,
    #[serde(rename = "exactTimeMatch")]
    pub exact_time_match: bool,
    #[serde(rename = "exactSlot", default)]
    pub exact_slot: Option<ConcreteSlot>,
    #[serde(rename = "alternativeSlots", default)]
    pub alternative_slots: Vec<ConcreteSlot>,
    pub blocked: bool,
    #[serde(default)]
    pub reasons: Vec<String>,
}

/// Scoring weights and thresholds
///
/// Point values are on the 0-100 scale: skill + experience + time sum to
/// the maximum score. `min_skill_score` is a hard cutoff, not a
/// tie-breaker.
#[derive(Debug, Clone, Copy)]
pub struct ScoringWeights {
    pub skill_max: f64,
    pub experience_max: f64,
    pub time_max: f64,
    pub alternative_bonus: f64,
    pub min_skill_score: f64,
    pub exact_time_tolerance_min: u16,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            skill_max: 60.0,
            experience_max: 25.0,
            time_max: 15.0,
            alternative_bonus: 3.0,
            min_skill_score: 20.0,
            exact_time_tolerance_min: 60,
        }
    }
}
