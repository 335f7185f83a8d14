use chrono::NaiveDate;
use thiserror::Error;

use crate::core::availability::AvailabilityResolver;
use crate::core::filters::is_eligible;
use crate::core::scoring::calculate_match_score;
use crate::core::timeslots::TimeslotError;
use crate::models::{
    CandidateRequest, Interview, InterviewerProfile, ScoredInterviewer, ScoringWeights, TimeBlock,
};

/// Distinguished matching failures, all recoverable at the call-site
#[derive(Debug, Error)]
pub enum MatchError {
    /// Empty candidate pool, or every interviewer fell below the skill
    /// cutoff. Surfaced as "no match, try different criteria".
    #[error("No eligible interviewers for this request")]
    NoEligibleInterviewers,

    /// Somebody cleared the cutoff but nobody has a free interval in the
    /// horizon. Surfaced as "try a later date".
    #[error("No interviewer has a free slot within the horizon")]
    NoAvailableSlot,

    #[error(transparent)]
    Timeslot(#[from] TimeslotError),
}

/// One interviewer's profile together with the concrete-date exclusions
/// the caller fetched for the horizon
#[derive(Debug, Clone)]
pub struct InterviewerContext {
    pub profile: InterviewerProfile,
    pub blocks: Vec<TimeBlock>,
    pub interviews: Vec<Interview>,
}

/// Main matching orchestrator
///
/// # Pipeline Stages
/// 1. Eligibility filtering (active flag, excluded id)
/// 2. Per-interviewer availability resolution
/// 3. Weighted scoring with the hard skill cutoff
/// 4. Ranking and tie-break selection
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: ScoringWeights,
    resolver: AvailabilityResolver,
}

impl Matcher {
    pub fn new(weights: ScoringWeights, resolver: AvailabilityResolver) -> Self {
        Self { weights, resolver }
    }

    pub fn with_defaults() -> Self {
        let weights = ScoringWeights::default();
        Self {
            resolver: AvailabilityResolver::new(14, 5, weights.exact_time_tolerance_min),
            weights,
        }
    }

    /// Find the best interviewer for a candidate request.
    ///
    /// Ranking policy, in order: a blocked interviewer is never selected;
    /// an exact-time match with an excellent or good skill tier wins; then
    /// any exact-time match; then interviewers offering alternative slots,
    /// ordered by tier, score and earliest slot; otherwise the match fails
    /// with a distinguished error.
    pub fn find_match(
        &self,
        request: &CandidateRequest,
        candidates: Vec<InterviewerContext>,
        today: NaiveDate,
    ) -> Result<ScoredInterviewer, MatchError> {
        let scored = self.score_candidates(request, candidates, today)?;

        let mut ranked: Vec<ScoredInterviewer> =
            scored.into_iter().filter(|s| !s.blocked).collect();
        if ranked.is_empty() {
            return Err(MatchError::NoEligibleInterviewers);
        }

        // Exact-time matches first; tier dominates score so an excellent
        // interviewer at 90 beats a good one at 95
        let mut exact: Vec<ScoredInterviewer> = ranked
            .iter()
            .filter(|s| s.exact_time_match)
            .cloned()
            .collect();
        exact.sort_by(|a, b| {
            b.skill_tier.cmp(&a.skill_tier).then_with(|| {
                b.match_score
                    .partial_cmp(&a.match_score)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
        });
        if let Some(winner) = exact.into_iter().next() {
            return Ok(winner);
        }

        // No exact match anywhere: rank by tier, score, earliest slot
        ranked.retain(|s| !s.alternative_slots.is_empty());
        if ranked.is_empty() {
            return Err(MatchError::NoAvailableSlot);
        }

        ranked.sort_by(|a, b| {
            b.skill_tier
                .cmp(&a.skill_tier)
                .then_with(|| {
                    b.match_score
                        .partial_cmp(&a.match_score)
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
                .then_with(|| earliest_slot_key(a).cmp(&earliest_slot_key(b)))
        });

        Ok(ranked.swap_remove(0))
    }

    /// Score every eligible interviewer. Blocked interviewers are kept in
    /// the output with `blocked = true` so callers can inspect cutoff
    /// failures; they never win.
    pub fn score_candidates(
        &self,
        request: &CandidateRequest,
        candidates: Vec<InterviewerContext>,
        today: NaiveDate,
    ) -> Result<Vec<ScoredInterviewer>, MatchError> {
        let eligible: Vec<InterviewerContext> = candidates
            .into_iter()
            .filter(|ctx| is_eligible(&ctx.profile, request))
            .collect();

        if eligible.is_empty() {
            return Err(MatchError::NoEligibleInterviewers);
        }

        let mut scored = Vec::with_capacity(eligible.len());
        for ctx in eligible {
            let resolved = self.resolver.resolve(
                &ctx.profile.weekly_availability,
                &ctx.blocks,
                &ctx.interviews,
                today,
                request.preferred_at,
                request.duration_minutes,
            )?;

            let exact_time_match = resolved.exact_match.is_some();
            let has_alternatives = !resolved.alternatives.is_empty();

            let breakdown = calculate_match_score(
                &ctx.profile,
                request,
                exact_time_match,
                has_alternatives,
                &self.weights,
            );

            scored.push(ScoredInterviewer {
                interviewer_id: ctx.profile.interviewer_id,
                name: ctx.profile.name,
                experience_years: ctx.profile.experience_years,
                match_score: breakdown.total,
                skill_tier: breakdown.skill_tier,
                exact_time_match,
                exact_slot: resolved.exact_match,
                alternative_slots: resolved.alternatives,
                blocked: breakdown.blocked,
                reasons: breakdown.reasons,
            });
        }

        Ok(scored)
    }

    pub fn resolver(&self) -> &AvailabilityResolver {
        &self.resolver
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Chronological key for an interviewer's earliest offered slot
fn earliest_slot_key(scored: &ScoredInterviewer) -> (NaiveDate, String) {
    scored
        .alternative_slots
        .iter()
        .map(|slot| (slot.date, slot.start.clone()))
        .min()
        .unwrap_or_else(|| (NaiveDate::MAX, String::new()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SkillTier, TimeRange, WeeklyAvailability};
    use chrono::NaiveTime;

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
    }

    fn weekly_monday(start: &str, end: &str) -> WeeklyAvailability {
        let mut weekly = WeeklyAvailability::default();
        weekly.monday.push(TimeRange::new("r1", start, end));
        weekly
    }

    fn context(
        id: &str,
        categories: Vec<&str>,
        skills: Vec<&str>,
        years: u8,
        weekly: WeeklyAvailability,
    ) -> InterviewerContext {
        InterviewerContext {
            profile: InterviewerProfile {
                interviewer_id: id.to_string(),
                name: format!("Interviewer {}", id),
                skill_categories: categories.into_iter().map(String::from).collect(),
                skills: skills.into_iter().map(String::from).collect(),
                experience_years: years,
                is_active: true,
                weekly_availability: weekly,
            },
            blocks: vec![],
            interviews: vec![],
        }
    }

    fn request_monday_ten() -> CandidateRequest {
        CandidateRequest {
            candidate_id: "c1".to_string(),
            skill_categories: vec!["Frontend Developer".to_string()],
            skills: vec!["React".to_string()],
            experience_years: 2,
            experience_months: 0,
            preferred_at: Some(monday().and_time(NaiveTime::from_hms_opt(10, 0, 0).unwrap())),
            exclude_interviewer_id: None,
            duration_minutes: 60,
        }
    }

    #[test]
    fn test_end_to_end_exact_match_wins() {
        let matcher = Matcher::with_defaults();
        let candidates = vec![
            context(
                "a",
                vec!["Frontend Developer"],
                vec!["React", "TypeScript"],
                4,
                weekly_monday("09:00", "12:00"),
            ),
            context(
                "b",
                vec!["Data Engineer"],
                vec!["Spark"],
                6,
                weekly_monday("09:00", "12:00"),
            ),
        ];

        let winner = matcher
            .find_match(&request_monday_ten(), candidates, monday())
            .unwrap();

        assert_eq!(winner.interviewer_id, "a");
        assert!(winner.exact_time_match);
        assert!(winner.skill_tier >= SkillTier::Good);
        assert!(winner.match_score >= 75.0);
    }

    #[test]
    fn test_blocked_never_selected() {
        let matcher = Matcher::with_defaults();
        // Only candidate has no skill overlap at all
        let candidates = vec![context(
            "b",
            vec!["Data Engineer"],
            vec!["Spark"],
            6,
            weekly_monday("09:00", "12:00"),
        )];

        let result = matcher.find_match(&request_monday_ten(), candidates, monday());
        assert!(matches!(result, Err(MatchError::NoEligibleInterviewers)));
    }

    #[test]
    fn test_empty_pool_is_no_eligible() {
        let matcher = Matcher::with_defaults();
        let result = matcher.find_match(&request_monday_ten(), vec![], monday());
        assert!(matches!(result, Err(MatchError::NoEligibleInterviewers)));
    }

    #[test]
    fn test_no_slots_is_no_available_slot() {
        let matcher = Matcher::with_defaults();
        // Skill match but an empty weekly template
        let candidates = vec![context(
            "a",
            vec!["Frontend Developer"],
            vec!["React"],
            4,
            WeeklyAvailability::default(),
        )];

        let result = matcher.find_match(&request_monday_ten(), candidates, monday());
        assert!(matches!(result, Err(MatchError::NoAvailableSlot)));
    }

    #[test]
    fn test_exact_tier_beats_higher_score() {
        let matcher = Matcher::with_defaults();
        // "excellent" tier (category + skill) vs "good" tier (category
        // only) with more experience credit; both exact matches
        let candidates = vec![
            context(
                "good_95",
                vec!["Frontend Developer"],
                vec!["Angular"],
                4,
                weekly_monday("09:00", "12:00"),
            ),
            context(
                "excellent_90",
                vec!["Frontend Developer"],
                vec!["React"],
                9,
                weekly_monday("09:00", "12:00"),
            ),
        ];

        let winner = matcher
            .find_match(&request_monday_ten(), candidates, monday())
            .unwrap();

        assert_eq!(winner.interviewer_id, "excellent_90");
        assert_eq!(winner.skill_tier, SkillTier::Excellent);
    }

    #[test]
    fn test_alternatives_ranked_by_earliest_slot() {
        let matcher = Matcher::with_defaults();
        let mut request = request_monday_ten();
        // Preferred time nobody can satisfy exactly
        request.preferred_at =
            Some(monday().and_time(NaiveTime::from_hms_opt(20, 0, 0).unwrap()));

        let mut late = WeeklyAvailability::default();
        late.wednesday.push(TimeRange::new("r1", "09:00", "10:00"));
        let mut early = WeeklyAvailability::default();
        early.tuesday.push(TimeRange::new("r1", "09:00", "10:00"));

        let candidates = vec![
            context("late", vec!["Frontend Developer"], vec!["React"], 4, late),
            context("early", vec!["Frontend Developer"], vec!["React"], 4, early),
        ];

        let winner = matcher.find_match(&request, candidates, monday()).unwrap();
        assert_eq!(winner.interviewer_id, "early");
        assert!(!winner.exact_time_match);
        assert!(!winner.alternative_slots.is_empty());
    }

    #[test]
    fn test_excluded_interviewer_skipped() {
        let matcher = Matcher::with_defaults();
        let mut request = request_monday_ten();
        request.exclude_interviewer_id = Some("a".to_string());

        let candidates = vec![context(
            "a",
            vec!["Frontend Developer"],
            vec!["React"],
            4,
            weekly_monday("09:00", "12:00"),
        )];

        let result = matcher.find_match(&request, candidates, monday());
        assert!(matches!(result, Err(MatchError::NoEligibleInterviewers)));
    }
}
