use std::collections::HashMap;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Timelike};

use crate::core::timeslots::{subtract_interval, to_clock, to_minutes, MinuteSpan, TimeslotError};
use crate::models::{ConcreteSlot, Interview, InterviewStatus, TimeBlock, WeeklyAvailability};

/// Free slots materialized for one interviewer over the horizon
#[derive(Debug, Clone, Default)]
pub struct ResolvedSlots {
    /// Slot covering the candidate's preferred moment, when one exists
    pub exact_match: Option<ConcreteSlot>,
    /// Remaining free slots, preferred date first, then chronological
    pub alternatives: Vec<ConcreteSlot>,
}

impl ResolvedSlots {
    pub fn is_empty(&self) -> bool {
        self.exact_match.is_none() && self.alternatives.is_empty()
    }
}

/// Resolves an interviewer's recurring weekly template against concrete
/// blocks and scheduled interviews into free (date, start, end) slots.
///
/// Read-only; the only failure mode is malformed clock input.
#[derive(Debug, Clone)]
pub struct AvailabilityResolver {
    horizon_days: u16,
    max_slots: usize,
    exact_time_tolerance_min: u16,
}

impl AvailabilityResolver {
    pub fn new(horizon_days: u16, max_slots: usize, exact_time_tolerance_min: u16) -> Self {
        Self {
            horizon_days,
            max_slots,
            exact_time_tolerance_min,
        }
    }

    /// Materialize free slots from `from` over the configured horizon.
    ///
    /// Blocks and scheduled interviews on each concrete date are
    /// iteratively subtracted from that weekday's template ranges. When
    /// `duration_min` exceeds a single free range, adjacent ranges whose
    /// endpoints touch are greedily combined; a run that cannot reach the
    /// duration is discarded.
    pub fn resolve(
        &self,
        weekly: &WeeklyAvailability,
        blocks: &[TimeBlock],
        interviews: &[Interview],
        from: NaiveDate,
        preferred: Option<NaiveDateTime>,
        duration_min: u16,
    ) -> Result<ResolvedSlots, TimeslotError> {
        let duration_min = duration_min.max(1);
        let busy = busy_spans_by_date(blocks, interviews)?;

        let mut resolved = ResolvedSlots::default();

        for date in self.date_order(from, preferred) {
            let ranges = weekly.ranges_for(date.weekday());
            if ranges.is_empty() {
                continue;
            }

            let mut free: Vec<MinuteSpan> = Vec::new();
            for range in ranges {
                let mut residuals = vec![MinuteSpan::from_clock(&range.start, &range.end)?];
                if let Some(busy_today) = busy.get(&date) {
                    for block in busy_today {
                        residuals = residuals
                            .into_iter()
                            .flat_map(|span| subtract_interval(span, *block))
                            .collect();
                    }
                }
                free.extend(residuals);
            }

            free.sort_by_key(|span| span.start);

            for span in combine_for_duration(&free, duration_min) {
                let slot = ConcreteSlot::new(date, to_clock(span.start)?, to_clock(span.end)?);

                if resolved.exact_match.is_none()
                    && self.is_exact_match(date, span, preferred, duration_min)
                {
                    resolved.exact_match = Some(slot);
                } else if resolved.alternatives.len() < self.max_slots {
                    resolved.alternatives.push(slot);
                }
            }

            if resolved.exact_match.is_some() && resolved.alternatives.len() >= self.max_slots {
                break;
            }
        }

        Ok(resolved)
    }

    pub fn horizon_days(&self) -> u16 {
        self.horizon_days
    }

    /// Horizon dates with the preferred date materialized first
    fn date_order(&self, from: NaiveDate, preferred: Option<NaiveDateTime>) -> Vec<NaiveDate> {
        let mut dates: Vec<NaiveDate> = (0..i64::from(self.horizon_days))
            .map(|offset| from + Duration::days(offset))
            .collect();

        if let Some(preferred) = preferred {
            let preferred_date = preferred.date();
            if let Some(pos) = dates.iter().position(|d| *d == preferred_date) {
                let date = dates.remove(pos);
                dates.insert(0, date);
            }
        }

        dates
    }

    /// A slot is an exact match when it covers the requested interval, or
    /// when its start lies within the configured tolerance of the
    /// preferred start and the slot still fits the duration
    fn is_exact_match(
        &self,
        date: NaiveDate,
        span: MinuteSpan,
        preferred: Option<NaiveDateTime>,
        duration_min: u16,
    ) -> bool {
        let Some(preferred) = preferred else {
            return false;
        };
        if date != preferred.date() {
            return false;
        }

        let pref_start = (preferred.time().hour() * 60 + preferred.time().minute()) as u16;
        let requested = MinuteSpan::new(pref_start, pref_start.saturating_add(duration_min));

        if span.contains(&requested) {
            return true;
        }

        let start_gap = span.start.abs_diff(pref_start);
        start_gap <= self.exact_time_tolerance_min && span.len() >= duration_min
    }
}

/// Group block and scheduled-interview intervals by concrete date
fn busy_spans_by_date(
    blocks: &[TimeBlock],
    interviews: &[Interview],
) -> Result<HashMap<NaiveDate, Vec<MinuteSpan>>, TimeslotError> {
    let mut busy: HashMap<NaiveDate, Vec<MinuteSpan>> = HashMap::new();

    for block in blocks {
        let span = MinuteSpan::from_clock(&block.start, &block.end)?;
        busy.entry(block.date).or_default().push(span);
    }

    for interview in interviews {
        if interview.status != InterviewStatus::Scheduled {
            continue;
        }
        let start = to_minutes(&interview.start)?;
        let span = MinuteSpan::new(start, start.saturating_add(interview.duration_minutes));
        busy.entry(interview.date).or_default().push(span);
    }

    Ok(busy)
}

/// Combine sorted free spans to satisfy the requested duration.
///
/// A span already long enough is emitted as-is. Shorter spans are merged
/// with strictly adjacent successors (end == next start) until the running
/// length meets the requirement; runs that fall short are dropped.
fn combine_for_duration(free: &[MinuteSpan], duration_min: u16) -> Vec<MinuteSpan> {
    let mut combined = Vec::new();
    let mut i = 0;

    while i < free.len() {
        let run_start = free[i].start;
        let mut run_end = free[i].end;
        let mut j = i;

        while run_end - run_start < duration_min
            && j + 1 < free.len()
            && free[j + 1].start == run_end
        {
            j += 1;
            run_end = free[j].end;
        }

        if run_end - run_start >= duration_min {
            combined.push(MinuteSpan::new(run_start, run_end));
        }

        i = j + 1;
    }

    combined
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BlockReason, TimeRange};
    use chrono::NaiveTime;

    fn monday() -> NaiveDate {
        // 2026-03-02 is a Monday
        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
    }

    fn weekly_monday(ranges: Vec<(&str, &str)>) -> WeeklyAvailability {
        let mut weekly = WeeklyAvailability::default();
        weekly.monday = ranges
            .into_iter()
            .enumerate()
            .map(|(i, (start, end))| TimeRange::new(format!("r{}", i), start, end))
            .collect();
        weekly
    }

    fn block(date: NaiveDate, start: &str, end: &str) -> TimeBlock {
        TimeBlock {
            interviewer_id: "i1".to_string(),
            date,
            start: start.to_string(),
            end: end.to_string(),
            reason: BlockReason::ManualBlock,
            interview_id: None,
        }
    }

    fn resolver() -> AvailabilityResolver {
        AvailabilityResolver::new(14, 10, 60)
    }

    #[test]
    fn test_open_day_yields_slot() {
        let weekly = weekly_monday(vec![("09:00", "12:00")]);
        let resolved = resolver()
            .resolve(&weekly, &[], &[], monday(), None, 60)
            .unwrap();

        assert!(resolved.exact_match.is_none());
        // The Monday range recurs on both Mondays inside the horizon
        assert_eq!(resolved.alternatives.len(), 2);
        assert_eq!(resolved.alternatives[0].start, "09:00");
        assert_eq!(resolved.alternatives[0].end, "12:00");
    }

    #[test]
    fn test_block_splits_slot() {
        let weekly = weekly_monday(vec![("09:00", "12:00")]);
        let blocks = vec![block(monday(), "10:00", "11:00")];

        let resolved = resolver()
            .resolve(&weekly, &blocks, &[], monday(), None, 30)
            .unwrap();

        let first_monday: Vec<_> = resolved
            .alternatives
            .iter()
            .filter(|slot| slot.date == monday())
            .collect();
        assert_eq!(first_monday.len(), 2);
        assert_eq!(first_monday[0].start, "09:00");
        assert_eq!(first_monday[0].end, "10:00");
        assert_eq!(first_monday[1].start, "11:00");
        assert_eq!(first_monday[1].end, "12:00");
    }

    #[test]
    fn test_no_slot_overlaps_blocks() {
        let weekly = weekly_monday(vec![("09:00", "17:00")]);
        let blocks = vec![
            block(monday(), "09:30", "10:30"),
            block(monday(), "12:00", "13:00"),
            block(monday(), "15:45", "16:15"),
        ];

        let resolved = resolver()
            .resolve(&weekly, &blocks, &[], monday(), None, 15)
            .unwrap();

        for slot in &resolved.alternatives {
            if slot.date != monday() {
                continue;
            }
            let span = MinuteSpan::from_clock(&slot.start, &slot.end).unwrap();
            for b in &blocks {
                let busy = MinuteSpan::from_clock(&b.start, &b.end).unwrap();
                assert!(!span.overlaps(&busy), "slot {:?} overlaps block {:?}", slot, b);
            }
        }
    }

    #[test]
    fn test_scheduled_interview_blocks_slot() {
        let weekly = weekly_monday(vec![("09:00", "10:00")]);
        let interviews = vec![Interview {
            interview_id: "iv1".to_string(),
            interviewer_id: "i1".to_string(),
            candidate_id: "c1".to_string(),
            date: monday(),
            start: "09:00".to_string(),
            duration_minutes: 60,
            status: InterviewStatus::Scheduled,
        }];

        let resolved = resolver()
            .resolve(&weekly, &[], &interviews, monday(), None, 60)
            .unwrap();

        assert!(resolved
            .alternatives
            .iter()
            .all(|slot| slot.date != monday()));
    }

    #[test]
    fn test_cancelled_interview_ignored() {
        let weekly = weekly_monday(vec![("09:00", "10:00")]);
        let interviews = vec![Interview {
            interview_id: "iv1".to_string(),
            interviewer_id: "i1".to_string(),
            candidate_id: "c1".to_string(),
            date: monday(),
            start: "09:00".to_string(),
            duration_minutes: 60,
            status: InterviewStatus::Cancelled,
        }];

        let resolved = resolver()
            .resolve(&weekly, &[], &interviews, monday(), None, 60)
            .unwrap();

        assert!(resolved
            .alternatives
            .iter()
            .any(|slot| slot.date == monday()));
    }

    #[test]
    fn test_duration_combination_merges_adjacent() {
        let weekly = weekly_monday(vec![("09:00", "09:30"), ("09:30", "10:00")]);

        let resolved = resolver()
            .resolve(&weekly, &[], &[], monday(), None, 60)
            .unwrap();

        let first_monday: Vec<_> = resolved
            .alternatives
            .iter()
            .filter(|slot| slot.date == monday())
            .collect();
        assert_eq!(first_monday.len(), 1);
        assert_eq!(first_monday[0].start, "09:00");
        assert_eq!(first_monday[0].end, "10:00");
    }

    #[test]
    fn test_duration_combination_no_merge_when_fits() {
        let weekly = weekly_monday(vec![("09:00", "09:30"), ("09:30", "10:00")]);

        let resolved = resolver()
            .resolve(&weekly, &[], &[], monday(), None, 30)
            .unwrap();

        let first_monday: Vec<_> = resolved
            .alternatives
            .iter()
            .filter(|slot| slot.date == monday())
            .collect();
        assert_eq!(first_monday.len(), 2);
    }

    #[test]
    fn test_short_run_discarded() {
        // 30 free minutes with a gap before the next range: cannot satisfy
        // a 60-minute session
        let weekly = weekly_monday(vec![("09:00", "09:30"), ("10:00", "10:30")]);

        let resolved = resolver()
            .resolve(&weekly, &[], &[], monday(), None, 60)
            .unwrap();

        assert!(resolved.is_empty());
    }

    #[test]
    fn test_exact_match_detected() {
        let weekly = weekly_monday(vec![("09:00", "12:00")]);
        let preferred = monday().and_time(NaiveTime::from_hms_opt(10, 0, 0).unwrap());

        let resolved = resolver()
            .resolve(&weekly, &[], &[], monday(), Some(preferred), 60)
            .unwrap();

        let exact = resolved.exact_match.expect("expected exact match");
        assert_eq!(exact.date, monday());
        assert_eq!(exact.start, "09:00");
    }

    #[test]
    fn test_preferred_inside_block_not_exact() {
        let weekly = weekly_monday(vec![("09:00", "12:00")]);
        let blocks = vec![block(monday(), "09:00", "12:00")];
        let preferred = monday().and_time(NaiveTime::from_hms_opt(10, 0, 0).unwrap());

        let resolved = resolver()
            .resolve(&weekly, &blocks, &[], monday(), Some(preferred), 60)
            .unwrap();

        assert!(resolved.exact_match.is_none());
        // Next Monday is still offered as an alternative
        assert!(resolved
            .alternatives
            .iter()
            .all(|slot| slot.date != monday()));
    }

    #[test]
    fn test_slot_cap_respected() {
        let weekly = weekly_monday(vec![
            ("08:00", "09:00"),
            ("10:00", "11:00"),
            ("12:00", "13:00"),
            ("14:00", "15:00"),
        ]);
        let resolver = AvailabilityResolver::new(14, 3, 60);

        let resolved = resolver
            .resolve(&weekly, &[], &[], monday(), None, 60)
            .unwrap();

        assert_eq!(resolved.alternatives.len(), 3);
    }

    #[test]
    fn test_block_outside_horizon_ignored() {
        let weekly = weekly_monday(vec![("09:00", "10:00")]);
        let far_away = NaiveDate::from_ymd_opt(2027, 1, 4).unwrap();
        let blocks = vec![block(far_away, "09:00", "10:00")];

        let resolved = resolver()
            .resolve(&weekly, &blocks, &[], monday(), None, 60)
            .unwrap();

        assert!(resolved
            .alternatives
            .iter()
            .any(|slot| slot.date == monday()));
    }
}
