use chrono::NaiveDate;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use std::time::Duration;
use thiserror::Error;

use crate::core::booking::ensure_bookable;
use crate::core::timeslots::{to_minutes, MinuteSpan};
use crate::core::BookingError;
use crate::models::{
    BlockReason, Interview, InterviewStatus, InterviewerProfile, TimeBlock, WeeklyAvailability,
};

/// Errors that can occur when interacting with PostgreSQL
#[derive(Debug, Error)]
pub enum PostgresError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The requested interval overlaps an existing block or interview
    #[error("Slot is no longer available")]
    SlotConflict,
}

impl From<BookingError> for PostgresError {
    fn from(value: BookingError) -> Self {
        match value {
            BookingError::SlotNoLongerAvailable => PostgresError::SlotConflict,
            BookingError::Timeslot(e) => PostgresError::InvalidInput(e.to_string()),
        }
    }
}

fn block_reason_str(reason: BlockReason) -> &'static str {
    match reason {
        BlockReason::ManualBlock => "manual_block",
        BlockReason::InterviewScheduled => "interview_scheduled",
        BlockReason::Other => "other",
    }
}

fn parse_block_reason(raw: &str) -> BlockReason {
    match raw {
        "manual_block" => BlockReason::ManualBlock,
        "interview_scheduled" => BlockReason::InterviewScheduled,
        _ => BlockReason::Other,
    }
}

fn status_str(status: InterviewStatus) -> &'static str {
    match status {
        InterviewStatus::Scheduled => "scheduled",
        InterviewStatus::Completed => "completed",
        InterviewStatus::Cancelled => "cancelled",
    }
}

fn parse_status(raw: &str) -> Result<InterviewStatus, PostgresError> {
    match raw {
        "scheduled" => Ok(InterviewStatus::Scheduled),
        "completed" => Ok(InterviewStatus::Completed),
        "cancelled" => Ok(InterviewStatus::Cancelled),
        other => Err(PostgresError::InvalidInput(format!(
            "Unknown interview status '{}'",
            other
        ))),
    }
}

/// PostgreSQL client for interviewer profiles, time blocks and interviews
///
/// Block and interview rows are the single source of truth for carved-out
/// intervals; the weekly template column is read but never rewritten by
/// the engine.
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Create a new PostgreSQL client from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, PostgresError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(5))
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new PostgreSQL client from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
    ) -> Result<Self, PostgresError> {
        tracing::info!("Connecting to PostgreSQL with URL: {}", url);

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
        )
        .await
    }

    /// Fetch every active interviewer profile
    pub async fn get_eligible_interviewers(
        &self,
    ) -> Result<Vec<InterviewerProfile>, PostgresError> {
        let query = r#"
            SELECT interviewer_id, name, skill_categories, skills,
                   experience_years, is_active, weekly_availability
            FROM interviewer_profiles
            WHERE is_active = TRUE
            ORDER BY interviewer_id
        "#;

        let rows = sqlx::query(query).fetch_all(&self.pool).await?;

        let mut profiles = Vec::with_capacity(rows.len());
        for row in rows {
            let weekly_json: serde_json::Value = row.get("weekly_availability");
            let weekly: WeeklyAvailability = serde_json::from_value(weekly_json)?;

            profiles.push(InterviewerProfile {
                interviewer_id: row.get("interviewer_id"),
                name: row.get("name"),
                skill_categories: row.get("skill_categories"),
                skills: row.get("skills"),
                experience_years: row.get::<i16, _>("experience_years") as u8,
                is_active: row.get("is_active"),
                weekly_availability: weekly,
            });
        }

        tracing::debug!("Fetched {} eligible interviewer profiles", profiles.len());

        Ok(profiles)
    }

    /// Fetch one interviewer profile, active or not
    pub async fn get_interviewer(
        &self,
        interviewer_id: &str,
    ) -> Result<InterviewerProfile, PostgresError> {
        let query = r#"
            SELECT interviewer_id, name, skill_categories, skills,
                   experience_years, is_active, weekly_availability
            FROM interviewer_profiles
            WHERE interviewer_id = $1
        "#;

        let row = sqlx::query(query)
            .bind(interviewer_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| {
                PostgresError::NotFound(format!("Interviewer {} not found", interviewer_id))
            })?;

        let weekly_json: serde_json::Value = row.get("weekly_availability");
        let weekly: WeeklyAvailability = serde_json::from_value(weekly_json)?;

        Ok(InterviewerProfile {
            interviewer_id: row.get("interviewer_id"),
            name: row.get("name"),
            skill_categories: row.get("skill_categories"),
            skills: row.get("skills"),
            experience_years: row.get::<i16, _>("experience_years") as u8,
            is_active: row.get("is_active"),
            weekly_availability: weekly,
        })
    }

    /// Time blocks for one interviewer within a date range (inclusive)
    pub async fn get_time_blocks(
        &self,
        interviewer_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<TimeBlock>, PostgresError> {
        let query = r#"
            SELECT interviewer_id, block_date, start_time, end_time, reason, interview_id
            FROM time_blocks
            WHERE interviewer_id = $1 AND block_date BETWEEN $2 AND $3
            ORDER BY block_date, start_time
        "#;

        let rows = sqlx::query(query)
            .bind(interviewer_id)
            .bind(from)
            .bind(to)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(row_to_block).collect())
    }

    /// Interviews for one interviewer within a date range (inclusive)
    pub async fn get_interviews(
        &self,
        interviewer_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Interview>, PostgresError> {
        let query = r#"
            SELECT interview_id, interviewer_id, candidate_id, interview_date,
                   start_time, duration_minutes, status
            FROM interviews
            WHERE interviewer_id = $1 AND interview_date BETWEEN $2 AND $3
            ORDER BY interview_date, start_time
        "#;

        let rows = sqlx::query(query)
            .bind(interviewer_id)
            .bind(from)
            .bind(to)
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(row_to_interview).collect()
    }

    /// Insert a manual block for an interviewer
    pub async fn add_time_block(&self, block: &TimeBlock) -> Result<(), PostgresError> {
        let query = r#"
            INSERT INTO time_blocks (interviewer_id, block_date, start_time, end_time, reason, interview_id)
            VALUES ($1, $2, $3, $4, $5, $6)
        "#;

        let result = sqlx::query(query)
            .bind(&block.interviewer_id)
            .bind(block.date)
            .bind(&block.start)
            .bind(&block.end)
            .bind(block_reason_str(block.reason))
            .bind(&block.interview_id)
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation(&e) => Err(PostgresError::SlotConflict),
            Err(e) => Err(e.into()),
        }
    }

    /// Remove a block by its exact (interviewer, date, start) key.
    ///
    /// Only the explicit unblock surface calls this; matching never
    /// deletes blocks.
    pub async fn remove_time_block(
        &self,
        interviewer_id: &str,
        date: NaiveDate,
        start: &str,
    ) -> Result<bool, PostgresError> {
        let query = r#"
            DELETE FROM time_blocks
            WHERE interviewer_id = $1 AND block_date = $2 AND start_time = $3
        "#;

        let result = sqlx::query(query)
            .bind(interviewer_id)
            .bind(date)
            .bind(start)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Commit a booking: conflict re-check, interview insert and block
    /// insert in one transaction.
    ///
    /// The re-check happens after the matching decision and before any
    /// write. Existing rows for the target date are locked, so two
    /// concurrent confirmations of the same interval serialize; the
    /// unique `(interviewer_id, block_date, start_time)` index backstops
    /// identical-start races. Either way exactly one attempt succeeds and
    /// the other sees `SlotConflict` with nothing written.
    pub async fn book_interview(
        &self,
        interview: &Interview,
        block: &TimeBlock,
    ) -> Result<Interview, PostgresError> {
        let mut tx = self.pool.begin().await?;

        let block_rows = sqlx::query(
            r#"
            SELECT interviewer_id, block_date, start_time, end_time, reason, interview_id
            FROM time_blocks
            WHERE interviewer_id = $1 AND block_date = $2
            FOR UPDATE
            "#,
        )
        .bind(&interview.interviewer_id)
        .bind(interview.date)
        .fetch_all(&mut *tx)
        .await?;

        let interview_rows = sqlx::query(
            r#"
            SELECT interview_id, interviewer_id, candidate_id, interview_date,
                   start_time, duration_minutes, status
            FROM interviews
            WHERE interviewer_id = $1 AND interview_date = $2
            FOR UPDATE
            "#,
        )
        .bind(&interview.interviewer_id)
        .bind(interview.date)
        .fetch_all(&mut *tx)
        .await?;

        let existing_blocks: Vec<TimeBlock> = block_rows.iter().map(row_to_block).collect();
        let existing_interviews: Vec<Interview> = interview_rows
            .iter()
            .map(row_to_interview)
            .collect::<Result<_, _>>()?;

        let start = to_minutes(&interview.start)
            .map_err(|e| PostgresError::InvalidInput(e.to_string()))?;
        let requested = MinuteSpan::new(start, start.saturating_add(interview.duration_minutes));

        ensure_bookable(
            &existing_blocks,
            &existing_interviews,
            interview.date,
            requested,
        )?;

        sqlx::query(
            r#"
            INSERT INTO interviews (interview_id, interviewer_id, candidate_id,
                                    interview_date, start_time, duration_minutes, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(&interview.interview_id)
        .bind(&interview.interviewer_id)
        .bind(&interview.candidate_id)
        .bind(interview.date)
        .bind(&interview.start)
        .bind(i32::from(interview.duration_minutes))
        .bind(status_str(interview.status))
        .execute(&mut *tx)
        .await?;

        let block_insert = sqlx::query(
            r#"
            INSERT INTO time_blocks (interviewer_id, block_date, start_time, end_time, reason, interview_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(&block.interviewer_id)
        .bind(block.date)
        .bind(&block.start)
        .bind(&block.end)
        .bind(block_reason_str(block.reason))
        .bind(&block.interview_id)
        .execute(&mut *tx)
        .await;

        if let Err(e) = block_insert {
            // Rolls back the interview insert as well
            tx.rollback().await.ok();
            if is_unique_violation(&e) {
                return Err(PostgresError::SlotConflict);
            }
            return Err(e.into());
        }

        tx.commit().await?;

        tracing::info!(
            "Booked interview {} for interviewer {} on {} {}",
            interview.interview_id,
            interview.interviewer_id,
            interview.date,
            interview.start
        );

        Ok(interview.clone())
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, PostgresError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

fn row_to_block(row: &sqlx::postgres::PgRow) -> TimeBlock {
    let reason: String = row.get("reason");
    TimeBlock {
        interviewer_id: row.get("interviewer_id"),
        date: row.get("block_date"),
        start: row.get("start_time"),
        end: row.get("end_time"),
        reason: parse_block_reason(&reason),
        interview_id: row.get("interview_id"),
    }
}

fn row_to_interview(row: &sqlx::postgres::PgRow) -> Result<Interview, PostgresError> {
    let status: String = row.get("status");
    Ok(Interview {
        interview_id: row.get("interview_id"),
        interviewer_id: row.get("interviewer_id"),
        candidate_id: row.get("candidate_id"),
        date: row.get("interview_date"),
        start: row.get("start_time"),
        duration_minutes: row.get::<i32, _>("duration_minutes") as u16,
        status: parse_status(&status)?,
    })
}

fn is_unique_violation(error: &sqlx::Error) -> bool {
    matches!(
        error,
        sqlx::Error::Database(db) if db.code().as_deref() == Some("23505")
    )
}
