use crate::models::{CandidateRequest, InterviewerProfile};

/// Skill coverage computed for one interviewer against a request
#[derive(Debug, Clone, Default)]
pub struct SkillOverlap {
    pub matched_categories: Vec<String>,
    pub matched_skills: Vec<String>,
}

impl SkillOverlap {
    pub fn has_category_match(&self) -> bool {
        !self.matched_categories.is_empty()
    }

    pub fn has_skill_match(&self) -> bool {
        !self.matched_skills.is_empty()
    }
}

/// Check whether an interviewer may participate in matching at all.
///
/// Inactive interviewers and an explicitly excluded id (retry after a
/// failed confirmation) are filtered before scoring.
#[inline]
pub fn is_eligible(profile: &InterviewerProfile, request: &CandidateRequest) -> bool {
    if !profile.is_active {
        return false;
    }

    if let Some(excluded) = &request.exclude_interviewer_id {
        if excluded == &profile.interviewer_id {
            return false;
        }
    }

    true
}

/// Case-insensitive substring match in both directions.
///
/// "Frontend Developer" matches "frontend", and "react" matches
/// "React Native".
#[inline]
fn terms_match(a: &str, b: &str) -> bool {
    let a = a.trim().to_lowercase();
    let b = b.trim().to_lowercase();

    if a.is_empty() || b.is_empty() {
        return false;
    }

    a.contains(&b) || b.contains(&a)
}

/// Compute which of the candidate's requested categories and specific
/// skills the interviewer declares
pub fn skill_overlap(request: &CandidateRequest, profile: &InterviewerProfile) -> SkillOverlap {
    let mut overlap = SkillOverlap::default();

    for wanted in &request.skill_categories {
        if profile
            .skill_categories
            .iter()
            .any(|declared| terms_match(wanted, declared))
        {
            overlap.matched_categories.push(wanted.clone());
        }
    }

    for wanted in &request.skills {
        if profile
            .skills
            .iter()
            .any(|declared| terms_match(wanted, declared))
        {
            overlap.matched_skills.push(wanted.clone());
        }
    }

    overlap
}
