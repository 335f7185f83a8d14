use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use crate::core::timeslots::{to_clock, to_minutes, MinuteSpan, TimeslotError};
use crate::models::{
    BlockReason, Interview, InterviewStatus, TimeBlock,
};

/// Booking failures
#[derive(Debug, Error)]
pub enum BookingError {
    /// A conflicting block or interview appeared between matching and
    /// confirmation. The caller should re-run matching.
    #[error("Slot is no longer available")]
    SlotNoLongerAvailable,

    #[error(transparent)]
    Timeslot(#[from] TimeslotError),
}

/// Conflict re-check run immediately before persisting a booking.
///
/// Half-open overlap against every block and scheduled interview on the
/// target date. Must happen-after the matching decision and happen-before
/// the interview/block writes.
pub fn conflicts_with_existing(
    blocks: &[TimeBlock],
    interviews: &[Interview],
    date: NaiveDate,
    requested: MinuteSpan,
) -> Result<bool, TimeslotError> {
    for block in blocks {
        if block.date != date {
            continue;
        }
        let busy = MinuteSpan::from_clock(&block.start, &block.end)?;
        if requested.overlaps(&busy) {
            return Ok(true);
        }
    }

    for interview in interviews {
        if interview.date != date || interview.status != InterviewStatus::Scheduled {
            continue;
        }
        let start = to_minutes(&interview.start)?;
        let busy = MinuteSpan::new(start, start.saturating_add(interview.duration_minutes));
        if requested.overlaps(&busy) {
            return Ok(true);
        }
    }

    Ok(false)
}

/// Guard wrapper: error instead of a boolean, for use at the commit point
pub fn ensure_bookable(
    blocks: &[TimeBlock],
    interviews: &[Interview],
    date: NaiveDate,
    requested: MinuteSpan,
) -> Result<(), BookingError> {
    if conflicts_with_existing(blocks, interviews, date, requested)? {
        return Err(BookingError::SlotNoLongerAvailable);
    }
    Ok(())
}

/// Build the interview row and its `interview_scheduled` block for a
/// confirmed slot.
///
/// The block row is what hides the interval from the availability
/// resolver on every later request; the recurring weekly template itself
/// stays untouched.
pub fn build_booking(
    interviewer_id: &str,
    candidate_id: &str,
    date: NaiveDate,
    start: &str,
    duration_minutes: u16,
) -> Result<(Interview, TimeBlock), TimeslotError> {
    let start_min = to_minutes(start)?;
    let end = to_clock(start_min.saturating_add(duration_minutes))?;
    let interview_id = Uuid::new_v4().to_string();

    let interview = Interview {
        interview_id: interview_id.clone(),
        interviewer_id: interviewer_id.to_string(),
        candidate_id: candidate_id.to_string(),
        date,
        start: start.to_string(),
        duration_minutes,
        status: InterviewStatus::Scheduled,
    };

    let block = TimeBlock {
        interviewer_id: interviewer_id.to_string(),
        date,
        start: start.to_string(),
        end,
        reason: BlockReason::InterviewScheduled,
        interview_id: Some(interview_id),
    };

    Ok((interview, block))
}
