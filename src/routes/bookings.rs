use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::core::build_booking;
use crate::models::{BookingResponse, ConfirmBookingRequest, ErrorResponse};
use crate::routes::matches::AppState;
use crate::services::PostgresError;

/// Configure booking routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/bookings/confirm", web::post().to(confirm_booking));
}

/// Confirm a booking for a previously offered slot
///
/// POST /api/v1/bookings/confirm
///
/// Request body:
/// ```json
/// {
///   "interviewerId": "string",
///   "candidateId": "string",
///   "date": "2026-03-02",
///   "start": "10:00",
///   "durationMinutes": 60
/// }
/// ```
///
/// Returns 409 with `slot_no_longer_available` when the interval was
/// taken between matching and confirmation; the client should re-run
/// matching, optionally excluding this interviewer.
async fn confirm_booking(
    state: web::Data<AppState>,
    req: web::Json<ConfirmBookingRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let (interview, block) = match build_booking(
        &req.interviewer_id,
        &req.candidate_id,
        req.date,
        &req.start,
        req.duration_minutes,
    ) {
        Ok(pair) => pair,
        Err(e) => {
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "malformed_time".to_string(),
                message: e.to_string(),
                status_code: 400,
            });
        }
    };

    match state.postgres.book_interview(&interview, &block).await {
        Ok(booked) => {
            // Stale availability snapshots must not offer this interval
            if let Err(e) = state.cache.invalidate_interviewer(&req.interviewer_id).await {
                tracing::warn!("Failed to invalidate cache after booking: {}", e);
            }

            tracing::info!(
                "Confirmed interview {} for candidate {} with interviewer {}",
                booked.interview_id,
                booked.candidate_id,
                booked.interviewer_id
            );

            HttpResponse::Ok().json(BookingResponse { interview: booked })
        }
        Err(PostgresError::SlotConflict) => {
            tracing::info!(
                "Booking conflict for interviewer {} on {} {}",
                req.interviewer_id,
                req.date,
                req.start
            );
            HttpResponse::Conflict().json(ErrorResponse {
                error: "slot_no_longer_available".to_string(),
                message: "The chosen slot was just booked; please pick another slot".to_string(),
                status_code: 409,
            })
        }
        Err(e) => {
            tracing::error!("Failed to book interview: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to book interview".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}
