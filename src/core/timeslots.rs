use thiserror::Error;

/// Minutes in one day; all clock arithmetic stays within `[0, 1440)`.
pub const MINUTES_PER_DAY: u16 = 1440;

/// Errors for malformed clock-time input
///
/// Always a caller bug, never retried.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimeslotError {
    #[error("Malformed clock time '{0}': expected HH:MM")]
    MalformedTime(String),

    #[error("Clock time '{0}' out of range")]
    OutOfRange(String),
}

/// Parse an `HH:MM` clock string into its minute offset from midnight
pub fn to_minutes(clock: &str) -> Result<u16, TimeslotError> {
    let (hours, minutes) = clock
        .split_once(':')
        .ok_or_else(|| TimeslotError::MalformedTime(clock.to_string()))?;

    let hours: u16 = hours
        .parse()
        .map_err(|_| TimeslotError::MalformedTime(clock.to_string()))?;
    let minutes: u16 = minutes
        .parse()
        .map_err(|_| TimeslotError::MalformedTime(clock.to_string()))?;

    if hours >= 24 || minutes >= 60 {
        return Err(TimeslotError::OutOfRange(clock.to_string()));
    }

    Ok(hours * 60 + minutes)
}

/// Format a minute offset as an `HH:MM` clock string
pub fn to_clock(minutes: u16) -> Result<String, TimeslotError> {
    if minutes >= MINUTES_PER_DAY {
        return Err(TimeslotError::OutOfRange(minutes.to_string()));
    }

    Ok(format!("{:02}:{:02}", minutes / 60, minutes % 60))
}

/// Half-open minute interval `[start, end)` within one day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinuteSpan {
    pub start: u16,
    pub end: u16,
}

impl MinuteSpan {
    pub fn new(start: u16, end: u16) -> Self {
        Self { start, end }
    }

    /// Parse a span from `HH:MM` start/end clock strings
    pub fn from_clock(start: &str, end: &str) -> Result<Self, TimeslotError> {
        Ok(Self {
            start: to_minutes(start)?,
            end: to_minutes(end)?,
        })
    }

    pub fn len(&self) -> u16 {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Half-open overlap test; touching endpoints do not overlap
    #[inline]
    pub fn overlaps(&self, other: &MinuteSpan) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// True when `other` lies entirely within this span
    #[inline]
    pub fn contains(&self, other: &MinuteSpan) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

/// Remove the portion of `slot` that intersects `block`.
///
/// Returns the 0, 1 or 2 residual sub-ranges:
/// - no overlap: the slot unchanged
/// - block covers the slot: nothing
/// - partial overlap on one side: one residual
/// - block strictly inside: before and after residuals
pub fn subtract_interval(slot: MinuteSpan, block: MinuteSpan) -> Vec<MinuteSpan> {
    if !slot.overlaps(&block) {
        return vec![slot];
    }

    let mut residuals = Vec::with_capacity(2);

    if block.start > slot.start {
        residuals.push(MinuteSpan::new(slot.start, block.start));
    }
    if block.end < slot.end {
        residuals.push(MinuteSpan::new(block.end, slot.end));
    }

    residuals
}
