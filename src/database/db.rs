use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::adzuna::SortPreference;
use crate::preferences::{FormAnswers, JobPreferences};

/// What a reminder carries: static text, or a regenerated job digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "reminder_kind", rename_all = "snake_case")]
pub enum ReminderKind {
    Custom,
    JobAlert,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "reminder_repeat", rename_all = "lowercase")]
pub enum Repeat {
    None,
    Daily,
    Weekly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "delivery_mode", rename_all = "lowercase")]
pub enum DeliveryMode {
    Public,
    Private,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "reminder_status", rename_all = "lowercase")]
pub enum ReminderStatus {
    Scheduled,
    Dispatching,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Reminder {
    pub id: Uuid,
    pub owner: i64,
    pub kind: ReminderKind,
    pub content: String,
    pub expires: DateTime<Utc>,
    pub repeat: Repeat,
    pub mode: DeliveryMode,
    pub filter_by: Option<SortPreference>,
    pub email: Option<String>,
    pub status: ReminderStatus,
}

const REMINDER_COLUMNS: &str =
    "id, owner, kind, content, expires, repeat, mode, filter_by, email, status";

pub async fn insert_reminder(pool: &PgPool, reminder: &Reminder) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO reminders (id, owner, kind, content, expires, repeat, mode, filter_by, email, status)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, 'scheduled');",
    )
    .bind(reminder.id)
    .bind(reminder.owner)
    .bind(reminder.kind)
    .bind(&reminder.content)
    .bind(reminder.expires)
    .bind(reminder.repeat)
    .bind(reminder.mode)
    .bind(reminder.filter_by)
    .bind(&reminder.email)
    .execute(pool)
    .await?;

    Ok(())
}

/// Inserts a job alert, replacing the owner's existing one if present.
/// Returns whether an old alert was replaced.
pub async fn replace_job_alert(pool: &PgPool, reminder: &Reminder) -> Result<bool, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let removed = sqlx::query("DELETE FROM reminders WHERE owner = $1 AND kind = 'job_alert';")
        .bind(reminder.owner)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    sqlx::query(
        "INSERT INTO reminders (id, owner, kind, content, expires, repeat, mode, filter_by, email, status)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, 'scheduled');",
    )
    .bind(reminder.id)
    .bind(reminder.owner)
    .bind(reminder.kind)
    .bind(&reminder.content)
    .bind(reminder.expires)
    .bind(reminder.repeat)
    .bind(reminder.mode)
    .bind(reminder.filter_by)
    .bind(&reminder.email)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(removed > 0)
}

pub async fn reminders_for_owner(pool: &PgPool, owner: i64) -> Result<Vec<Reminder>, sqlx::Error> {
    sqlx::query_as::<_, Reminder>(&format!(
        "SELECT {REMINDER_COLUMNS} FROM reminders WHERE owner = $1 ORDER BY expires;"
    ))
    .bind(owner)
    .fetch_all(pool)
    .await
}

pub async fn delete_reminder(pool: &PgPool, id: Uuid, owner: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM reminders WHERE id = $1 AND owner = $2;")
        .bind(id)
        .bind(owner)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Atomically claims every due reminder: rows move from `scheduled` to
/// `dispatching` in the same statement that selects them, so overlapping
/// ticks never dispatch the same reminder twice. Claims older than five
/// minutes are treated as stuck and reclaimed.
pub async fn claim_due_reminders(pool: &PgPool) -> Result<Vec<Reminder>, sqlx::Error> {
    sqlx::query_as::<_, Reminder>(&format!(
        "UPDATE reminders
         SET status = 'dispatching', claimed_at = now()
         WHERE id IN (
             SELECT id FROM reminders
             WHERE expires <= now()
               AND (status = 'scheduled' OR claimed_at <= now() - INTERVAL '5 minutes')
             FOR UPDATE SKIP LOCKED
         )
         RETURNING {REMINDER_COLUMNS};"
    ))
    .fetch_all(pool)
    .await
}

/// Replaces a dispatched repeating reminder with its next occurrence; all
/// fields other than the expiry survive unchanged.
pub async fn reschedule_reminder(
    pool: &PgPool,
    id: Uuid,
    next_expires: DateTime<Utc>,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE reminders SET expires = $2, status = 'scheduled', claimed_at = NULL WHERE id = $1;",
    )
    .bind(id)
    .bind(next_expires)
    .execute(pool)
    .await?;

    Ok(())
}

/// Removes a one-off reminder once it has been dispatched.
pub async fn delete_dispatched(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM reminders WHERE id = $1;")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(())
}

/// Upserts form answers for a user. Only the provided fields change;
/// everything else keeps its stored value.
pub async fn upsert_preferences(
    pool: &PgPool,
    discord_id: i64,
    answers: &FormAnswers,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO job_preferences (discord_id, city, work_type, employment_type, travel_distance, interests, last_updated)
         VALUES ($1, $2, $3, $4, $5, $6, now())
         ON CONFLICT (discord_id) DO UPDATE SET
             city = COALESCE(EXCLUDED.city, job_preferences.city),
             work_type = COALESCE(EXCLUDED.work_type, job_preferences.work_type),
             employment_type = COALESCE(EXCLUDED.employment_type, job_preferences.employment_type),
             travel_distance = COALESCE(EXCLUDED.travel_distance, job_preferences.travel_distance),
             interests = CASE WHEN cardinality(EXCLUDED.interests) > 0
                              THEN EXCLUDED.interests
                              ELSE job_preferences.interests END,
             last_updated = now();",
    )
    .bind(discord_id)
    .bind(&answers.city)
    .bind(&answers.work_type)
    .bind(&answers.employment_type)
    .bind(&answers.travel_distance)
    .bind(&answers.interests)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn get_preferences(
    pool: &PgPool,
    discord_id: i64,
) -> Result<Option<JobPreferences>, sqlx::Error> {
    sqlx::query_as::<_, JobPreferences>(
        "SELECT discord_id, city, work_type, employment_type, travel_distance, interests, last_updated
         FROM job_preferences WHERE discord_id = $1;",
    )
    .bind(discord_id)
    .fetch_optional(pool)
    .await
}

pub async fn delete_preferences(pool: &PgPool, discord_id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM job_preferences WHERE discord_id = $1;")
        .bind(discord_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
