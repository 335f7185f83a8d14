use crate::core::filters::{skill_overlap, SkillOverlap};
use crate::models::{CandidateRequest, InterviewerProfile, ScoringWeights, SkillTier};

/// Skill tier point values as fractions of the skill weight
const GOOD_TIER_FACTOR: f64 = 0.75;
const POOR_TIER_FACTOR: f64 = 1.0 / 3.0;

/// Partial experience credit for a moderate seniority gap
const MODERATE_GAP_FACTOR: f64 = 0.6;

/// Experience gaps (years) for full vs partial credit
const FULL_CREDIT_GAP: u8 = 2;
const PARTIAL_CREDIT_GAP: u8 = 5;

/// Score breakdown for one interviewer
#[derive(Debug, Clone)]
pub struct ScoreBreakdown {
    pub total: f64,
    pub skill_tier: SkillTier,
    pub blocked: bool,
    pub reasons: Vec<String>,
}

/// Calculate a match score (0-100) for an interviewer against a request
///
/// Scoring formula:
/// score = skill_score          # weight 60, tiered, hard minimum cutoff
///       + experience_score     # weight 25, gap-based credit
///       + time_score           # weight 15 exact, flat bonus for alternatives
///
/// A skill score below `weights.min_skill_score` marks the interviewer
/// `blocked` with total 0; blocked interviewers never enter the ranking.
pub fn calculate_match_score(
    profile: &InterviewerProfile,
    request: &CandidateRequest,
    exact_time_match: bool,
    has_alternatives: bool,
    weights: &ScoringWeights,
) -> ScoreBreakdown {
    let overlap = skill_overlap(request, profile);
    let (skill_score, skill_tier) = calculate_skill_score(&overlap, weights);

    // Hard cutoff, not a tie-breaker
    if skill_score < weights.min_skill_score {
        return ScoreBreakdown {
            total: 0.0,
            skill_tier,
            blocked: true,
            reasons: vec![],
        };
    }

    let experience_score = calculate_experience_score(
        profile.experience_years,
        request.experience_years,
        weights.experience_max,
    );

    let time_score = calculate_time_score(exact_time_match, has_alternatives, weights);

    let mut reasons = Vec::new();
    if overlap.has_category_match() || overlap.has_skill_match() {
        reasons.push("Skills match".to_string());
    }
    if experience_score > 0.0 {
        reasons.push("Appropriate experience level".to_string());
    }
    if exact_time_match {
        reasons.push("Perfect time match".to_string());
    } else if has_alternatives {
        reasons.push("Alternative times available".to_string());
    }

    let total = (skill_score + experience_score + time_score).clamp(0.0, 100.0);

    ScoreBreakdown {
        total,
        skill_tier,
        blocked: false,
        reasons,
    }
}

/// Calculate the skill score and its quality tier
///
/// Category plus specific-skill coverage is excellent, category-only is
/// good, specific-skill-only is poor, nothing is none.
#[inline]
pub fn calculate_skill_score(overlap: &SkillOverlap, weights: &ScoringWeights) -> (f64, SkillTier) {
    match (overlap.has_category_match(), overlap.has_skill_match()) {
        (true, true) => (weights.skill_max, SkillTier::Excellent),
        (true, false) => (weights.skill_max * GOOD_TIER_FACTOR, SkillTier::Good),
        (false, true) => (weights.skill_max * POOR_TIER_FACTOR, SkillTier::Poor),
        (false, false) => (0.0, SkillTier::None),
    }
}

/// Calculate the experience score (0 to `experience_max`)
///
/// Full credit when the interviewer meets the requirement with a small
/// gap, partial credit for a moderate gap, zero otherwise. An interviewer
/// below the candidate's requirement scores zero regardless of gap.
#[inline]
pub fn calculate_experience_score(
    interviewer_years: u8,
    candidate_years: u8,
    experience_max: f64,
) -> f64 {
    if interviewer_years < candidate_years {
        return 0.0;
    }

    let gap = interviewer_years - candidate_years;
    if gap <= FULL_CREDIT_GAP {
        experience_max
    } else if gap <= PARTIAL_CREDIT_GAP {
        experience_max * MODERATE_GAP_FACTOR
    } else {
        0.0
    }
}

/// Calculate the time score: full weight for an exact match, a small flat
/// bonus when only alternative slots exist
#[inline]
pub fn calculate_time_score(
    exact_time_match: bool,
    has_alternatives: bool,
    weights: &ScoringWeights,
) -> f64 {
    if exact_time_match {
        weights.time_max
    } else if has_alternatives {
        weights.alternative_bonus
    } else {
        0.0
    }
}
