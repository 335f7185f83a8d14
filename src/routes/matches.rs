use actix_web::{web, HttpResponse, Responder};
use chrono::{Duration, NaiveDate};
use std::sync::Arc;
use validator::Validate;

use crate::core::{InterviewerContext, MatchError, Matcher};
use crate::models::{
    AvailabilityQuery, AvailabilityResponse, CandidateRequest, ErrorResponse, FindMatchRequest,
    FindMatchResponse, HealthResponse, Interview, TimeBlock,
};
use crate::services::{CacheManager, PostgresClient, PostgresError};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub postgres: Arc<PostgresClient>,
    pub cache: Arc<CacheManager>,
    pub matcher: Matcher,
    pub default_session_minutes: u16,
}

/// Configure match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/matches/find", web::post().to(find_match))
        .route(
            "/interviewers/{id}/availability",
            web::get().to(get_availability),
        );
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let pg_healthy = state.postgres.health_check().await.unwrap_or(false);

    let status = if pg_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Find the best interviewer for a candidate
///
/// POST /api/v1/matches/find
///
/// Request body:
/// ```json
/// {
///   "candidateId": "string",
///   "skillCategories": ["Frontend Developer"],
///   "skills": ["React"],
///   "experienceYears": 2,
///   "preferredAt": "2026-03-02T10:00:00",
///   "durationMinutes": 60
/// }
/// ```
async fn find_match(
    state: web::Data<AppState>,
    req: web::Json<FindMatchRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for find_match request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let request: CandidateRequest = req
        .into_inner()
        .into_candidate_request(state.default_session_minutes);

    tracing::info!(
        "Finding match for candidate {}: {} categories, {} skills, {} min",
        request.candidate_id,
        request.skill_categories.len(),
        request.skills.len(),
        request.duration_minutes
    );

    // Eligible interviewer list, cache first
    let profiles = match state.cache.get_interviewers().await {
        Some(profiles) => profiles,
        None => match state.postgres.get_eligible_interviewers().await {
            Ok(profiles) => {
                state.cache.put_interviewers(&profiles).await;
                profiles
            }
            Err(e) => {
                tracing::error!("Failed to fetch interviewers: {}", e);
                return HttpResponse::InternalServerError().json(ErrorResponse {
                    error: "Failed to fetch interviewers".to_string(),
                    message: e.to_string(),
                    status_code: 500,
                });
            }
        },
    };

    let today = chrono::Utc::now().date_naive();
    let horizon_end = today + Duration::days(i64::from(state.matcher.resolver().horizon_days()));

    // Per-interviewer concrete-date exclusions for the horizon
    let mut candidates = Vec::with_capacity(profiles.len());
    for profile in profiles {
        let (blocks, interviews) =
            match load_schedule(&state, &profile.interviewer_id, today, horizon_end).await {
                Ok(pair) => pair,
                Err(e) => {
                    tracing::error!(
                        "Failed to fetch schedule for {}: {}",
                        profile.interviewer_id,
                        e
                    );
                    return HttpResponse::InternalServerError().json(ErrorResponse {
                        error: "Failed to fetch schedule".to_string(),
                        message: e.to_string(),
                        status_code: 500,
                    });
                }
            };

        candidates.push(InterviewerContext {
            profile,
            blocks,
            interviews,
        });
    }

    let considered = candidates.len();

    match state.matcher.find_match(&request, candidates, today) {
        Ok(winner) => {
            tracing::info!(
                "Matched candidate {} with interviewer {} (score {:.1}, exact: {})",
                request.candidate_id,
                winner.interviewer_id,
                winner.match_score,
                winner.exact_time_match
            );
            HttpResponse::Ok().json(FindMatchResponse {
                winner,
                candidates_considered: considered,
            })
        }
        Err(MatchError::NoEligibleInterviewers) => HttpResponse::NotFound().json(ErrorResponse {
            error: "no_eligible_interviewers".to_string(),
            message: "No interviewer matches these criteria; try different skills".to_string(),
            status_code: 404,
        }),
        Err(MatchError::NoAvailableSlot) => HttpResponse::NotFound().json(ErrorResponse {
            error: "no_available_slot".to_string(),
            message: "No free interval within the scheduling horizon; try a later date"
                .to_string(),
            status_code: 404,
        }),
        Err(MatchError::Timeslot(e)) => HttpResponse::BadRequest().json(ErrorResponse {
            error: "malformed_time".to_string(),
            message: e.to_string(),
            status_code: 400,
        }),
    }
}

/// Blocks and interviews for one interviewer's horizon, cache first.
///
/// Serves matching reads only; the booking transaction always re-reads
/// the store, so a stale snapshot cannot cause a double booking.
async fn load_schedule(
    state: &AppState,
    interviewer_id: &str,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<(Vec<TimeBlock>, Vec<Interview>), PostgresError> {
    let blocks = match state.cache.get_blocks(interviewer_id).await {
        Some(blocks) => blocks,
        None => {
            let blocks = state
                .postgres
                .get_time_blocks(interviewer_id, from, to)
                .await?;
            state.cache.put_blocks(interviewer_id, &blocks).await;
            blocks
        }
    };

    let interviews = match state.cache.get_interviews(interviewer_id).await {
        Some(interviews) => interviews,
        None => {
            let interviews = state
                .postgres
                .get_interviews(interviewer_id, from, to)
                .await?;
            state.cache.put_interviews(interviewer_id, &interviews).await;
            interviews
        }
    };

    Ok((blocks, interviews))
}

/// List an interviewer's free concrete slots
///
/// GET /api/v1/interviewers/{id}/availability?durationMinutes=60
async fn get_availability(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<AvailabilityQuery>,
) -> impl Responder {
    let interviewer_id = path.into_inner();

    let profile = match state.postgres.get_interviewer(&interviewer_id).await {
        Ok(profile) => profile,
        Err(PostgresError::NotFound(message)) => {
            return HttpResponse::NotFound().json(ErrorResponse {
                error: "interviewer_not_found".to_string(),
                message,
                status_code: 404,
            });
        }
        Err(e) => {
            tracing::error!("Failed to fetch interviewer {}: {}", interviewer_id, e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch interviewer".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    let today = chrono::Utc::now().date_naive();
    let horizon_end = today + Duration::days(i64::from(state.matcher.resolver().horizon_days()));

    let (blocks, interviews) =
        match load_schedule(&state, &interviewer_id, today, horizon_end).await {
            Ok(pair) => pair,
            Err(e) => {
                tracing::error!("Failed to fetch schedule for {}: {}", interviewer_id, e);
                return HttpResponse::InternalServerError().json(ErrorResponse {
                    error: "Failed to fetch schedule".to_string(),
                    message: e.to_string(),
                    status_code: 500,
                });
            }
        };

    let resolved = match state.matcher.resolver().resolve(
        &profile.weekly_availability,
        &blocks,
        &interviews,
        today,
        None,
        query
            .duration_minutes
            .unwrap_or(state.default_session_minutes),
    ) {
        Ok(resolved) => resolved,
        Err(e) => {
            // Stored clock strings failed to parse
            tracing::error!("Malformed availability data for {}: {}", interviewer_id, e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "malformed_availability".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    let count = resolved.alternatives.len();
    HttpResponse::Ok().json(AvailabilityResponse {
        interviewer_id,
        slots: resolved.alternatives,
        count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_check_response() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            version: "0.1.0".to_string(),
            timestamp: chrono::Utc::now(),
        };

        assert_eq!(response.status, "healthy");
    }
}
