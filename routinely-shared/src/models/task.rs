/// Task model and database operations
///
/// This module provides the Task model: one-off and recurring to-do items
/// with a due date. Completing a recurring task creates the next occurrence
/// with the due date advanced by one interval.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tasks (
///     id INTEGER PRIMARY KEY AUTOINCREMENT,
///     user_id INTEGER NOT NULL REFERENCES users(id),
///     title TEXT NOT NULL,
///     date TEXT NOT NULL,
///     freq INTEGER NOT NULL DEFAULT 0,
///     complete BOOLEAN NOT NULL DEFAULT 0
/// );
/// ```
///
/// The `date` column holds ISO-8601 date text. Whatever the client submits
/// is stored as-is; parsing happens at display and recurrence time.
///
/// # Example
///
/// ```no_run
/// use routinely_shared::models::task::{Task, CreateTask};
/// use routinely_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let task = Task::create(&pool, CreateTask {
///     user_id: 1,
///     title: "Pay rent".to_string(),
///     date: "2024-01-01".to_string(),
///     freq: 2,
/// })
/// .await?;
///
/// // Mark it done; a weekly task spawns its next occurrence
/// Task::toggle_complete(&pool, task.id).await?;
/// Task::spawn_successor(&pool, task.id).await?;
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Days, Months, NaiveDate, Utc};
use serde::Serialize;
use sqlx::SqlitePool;

use super::StoreResult;

/// Recurrence interval selected by the stored frequency code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    /// Non-recurring (code 0)
    None,

    /// Repeats every day (code 1)
    Daily,

    /// Repeats every week (code 2)
    Weekly,

    /// Repeats every calendar month (code 3)
    Monthly,

    /// Repeats every calendar year (code 4)
    Yearly,
}

impl Frequency {
    /// Decodes a stored frequency code
    ///
    /// Returns `None` for codes outside the defined set. The store does not
    /// reject out-of-range codes on write; they simply never recur.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Frequency::None),
            1 => Some(Frequency::Daily),
            2 => Some(Frequency::Weekly),
            3 => Some(Frequency::Monthly),
            4 => Some(Frequency::Yearly),
            _ => None,
        }
    }

    /// The stored integer code for this frequency
    pub fn code(&self) -> i64 {
        match self {
            Frequency::None => 0,
            Frequency::Daily => 1,
            Frequency::Weekly => 2,
            Frequency::Monthly => 3,
            Frequency::Yearly => 4,
        }
    }

    /// Due date of the occurrence after one at `date`
    ///
    /// Calendar arithmetic: months and years clamp at month end
    /// (Jan 31 + 1 month = Feb 29/28). `Frequency::None` has no successor.
    pub fn next_date(&self, date: NaiveDate) -> Option<NaiveDate> {
        match self {
            Frequency::None => None,
            Frequency::Daily => date.checked_add_days(Days::new(1)),
            Frequency::Weekly => date.checked_add_days(Days::new(7)),
            Frequency::Monthly => date.checked_add_months(Months::new(1)),
            Frequency::Yearly => date.checked_add_months(Months::new(12)),
        }
    }
}

/// Task model representing a to-do item
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task ID
    pub id: i64,

    /// Owning user; tasks are never shared or transferred
    pub user_id: i64,

    /// Free-text title
    pub title: String,

    /// Due date as ISO-8601 text, stored as submitted
    pub date: String,

    /// Raw frequency code (see [`Frequency::from_code`])
    pub freq: i64,

    /// Completion flag
    pub complete: bool,
}

/// Input for creating a new task
#[derive(Debug, Clone)]
pub struct CreateTask {
    pub user_id: i64,
    pub title: String,
    pub date: String,
    pub freq: i64,
}

impl Task {
    /// Creates a new task, `complete = false`
    pub async fn create(pool: &SqlitePool, data: CreateTask) -> StoreResult<Self> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (user_id, title, date, freq)
            VALUES (?, ?, ?, ?)
            RETURNING id, user_id, title, date, freq, complete
            "#,
        )
        .bind(data.user_id)
        .bind(data.title)
        .bind(data.date)
        .bind(data.freq)
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// Finds one task scoped to its owner
    ///
    /// Returns `None` for a missing id or a task owned by someone else.
    pub async fn find_for_user(
        pool: &SqlitePool,
        user_id: i64,
        id: i64,
    ) -> StoreResult<Option<Self>> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, user_id, title, date, freq, complete
            FROM tasks
            WHERE user_id = ? AND id = ?
            "#,
        )
        .bind(user_id)
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// All incomplete tasks for a user, ordered by due date ascending
    pub async fn list_incomplete_for_user(
        pool: &SqlitePool,
        user_id: i64,
    ) -> StoreResult<Vec<Self>> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, user_id, title, date, freq, complete
            FROM tasks
            WHERE user_id = ? AND complete = 0
            ORDER BY date ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Flips the completion flag (0 ↔ 1)
    ///
    /// Keyed by task id alone; the list form posts no user context.
    ///
    /// Returns true if a row was toggled.
    pub async fn toggle_complete(pool: &SqlitePool, id: i64) -> StoreResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE tasks
            SET complete = CASE WHEN complete = 0 THEN 1 ELSE 0 END
            WHERE id = ?
            "#,
        )
        .bind(id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Inserts the next occurrence of a recurring task just marked complete
    ///
    /// Looks up the task by id where `freq > 0` and `complete = 1`; no
    /// matching row (non-recurring, still open, or gone) is an expected
    /// outcome and returns `Ok(None)`. The successor keeps the title, freq
    /// and owner, advances the date by one interval, and starts incomplete.
    /// A stored date that does not parse as a calendar date yields no
    /// successor.
    pub async fn spawn_successor(pool: &SqlitePool, id: i64) -> StoreResult<Option<Self>> {
        let row = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, user_id, title, date, freq, complete
            FROM tasks
            WHERE id = ? AND freq > 0 AND complete = 1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        let Some(task) = row else {
            return Ok(None);
        };
        let Some(freq) = Frequency::from_code(task.freq) else {
            return Ok(None);
        };
        let Ok(date) = NaiveDate::parse_from_str(&task.date, "%Y-%m-%d") else {
            return Ok(None);
        };
        let Some(next) = freq.next_date(date) else {
            return Ok(None);
        };

        let successor = Self::create(
            pool,
            CreateTask {
                user_id: task.user_id,
                title: task.title,
                date: next.format("%Y-%m-%d").to_string(),
                freq: task.freq,
            },
        )
        .await?;

        Ok(Some(successor))
    }

    /// Updates title/date/freq in place, scoped to the owner
    ///
    /// Values are stored as submitted; nothing beyond column types is
    /// enforced. Returns true if a row was updated.
    pub async fn update_fields(
        pool: &SqlitePool,
        user_id: i64,
        id: i64,
        title: &str,
        date: &str,
        freq: i64,
    ) -> StoreResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE tasks
            SET title = ?, date = ?, freq = ?
            WHERE user_id = ? AND id = ?
            "#,
        )
        .bind(title)
        .bind(date)
        .bind(freq)
        .bind(user_id)
        .bind(id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Deletes one task scoped to the owner
    pub async fn delete_for_user(pool: &SqlitePool, user_id: i64, id: i64) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM tasks WHERE user_id = ? AND id = ?")
            .bind(user_id)
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Resets `complete = false` on every task the user owns (undo-all)
    ///
    /// Returns the number of rows touched.
    pub async fn clear_completions(pool: &SqlitePool, user_id: i64) -> StoreResult<u64> {
        let result = sqlx::query("UPDATE tasks SET complete = 0 WHERE user_id = ?")
            .bind(user_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Deletes every task the user owns (account deletion)
    pub async fn delete_all_for_user(pool: &SqlitePool, user_id: i64) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM tasks WHERE user_id = ?")
            .bind(user_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected())
    }
}

/// Incomplete tasks grouped by how soon they are due
///
/// Groups are filled from a date-ascending list, so each group stays ordered
/// by raw due date.
#[derive(Debug, Default)]
pub struct TaskBuckets {
    /// Due before today
    pub overdue: Vec<Task>,

    /// Due today
    pub today: Vec<Task>,

    /// Due tomorrow
    pub tomorrow: Vec<Task>,

    /// Due within the week
    pub this_week: Vec<Task>,

    /// Due a week or more out
    pub later: Vec<Task>,
}

/// Days remaining until a task is due, fractional
///
/// Measured from `now` to midnight UTC of the due date, plus one: a task due
/// today lands in `[0, 1)`, tomorrow in `[1, 2)`, and anything overdue goes
/// negative. Returns `None` when the stored text is not a calendar date.
pub fn days_to_complete(date_text: &str, now: DateTime<Utc>) -> Option<f64> {
    let date = NaiveDate::parse_from_str(date_text, "%Y-%m-%d").ok()?;
    let due = date.and_hms_opt(0, 0, 0)?.and_utc();
    Some((due - now).num_seconds() as f64 / 86_400.0 + 1.0)
}

/// Groups incomplete tasks into the five display buckets
///
/// The week group ends below six days while "later" starts at seven; tasks
/// whose remaining time lands in `[6, 7)` appear in no group, as do tasks
/// whose stored date does not parse.
pub fn bucket_by_due(tasks: Vec<Task>, now: DateTime<Utc>) -> TaskBuckets {
    let mut buckets = TaskBuckets::default();

    for task in tasks {
        let Some(days) = days_to_complete(&task.date, now) else {
            continue;
        };
        if days < 0.0 {
            buckets.overdue.push(task);
        } else if days < 1.0 {
            buckets.today.push(task);
        } else if days < 2.0 {
            buckets.tomorrow.push(task);
        } else if (2.0..6.0).contains(&days) {
            buckets.this_week.push(task);
        } else if days >= 7.0 {
            buckets.later.push(task);
        }
    }

    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn task_due(id: i64, due: &str) -> Task {
        Task {
            id,
            user_id: 1,
            title: format!("task-{id}"),
            date: due.to_string(),
            freq: 0,
            complete: false,
        }
    }

    #[test]
    fn test_frequency_codes_round_trip() {
        for code in 0..=4 {
            let freq = Frequency::from_code(code).unwrap();
            assert_eq!(freq.code(), code);
        }
        assert!(Frequency::from_code(5).is_none());
        assert!(Frequency::from_code(-1).is_none());
    }

    #[test]
    fn test_next_date_daily_weekly() {
        assert_eq!(
            Frequency::Daily.next_date(date("2024-02-28")),
            Some(date("2024-02-29"))
        );
        assert_eq!(
            Frequency::Weekly.next_date(date("2024-01-01")),
            Some(date("2024-01-08"))
        );
    }

    #[test]
    fn test_next_date_monthly_clamps_month_end() {
        assert_eq!(
            Frequency::Monthly.next_date(date("2024-01-31")),
            Some(date("2024-02-29"))
        );
        assert_eq!(
            Frequency::Monthly.next_date(date("2023-01-31")),
            Some(date("2023-02-28"))
        );
        assert_eq!(
            Frequency::Monthly.next_date(date("2024-12-15")),
            Some(date("2025-01-15"))
        );
    }

    #[test]
    fn test_next_date_yearly_leap_day() {
        assert_eq!(
            Frequency::Yearly.next_date(date("2024-02-29")),
            Some(date("2025-02-28"))
        );
        assert_eq!(
            Frequency::Yearly.next_date(date("2024-01-01")),
            Some(date("2025-01-01"))
        );
    }

    #[test]
    fn test_next_date_none_never_recurs() {
        assert_eq!(Frequency::None.next_date(date("2024-01-01")), None);
    }

    #[test]
    fn test_days_to_complete_today_and_overdue() {
        // Noon on the due date: half a day left until midnight, plus one
        let noon = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();
        let days = days_to_complete("2024-03-10", noon).unwrap();
        assert!((days - 0.5).abs() < 1e-6);

        let days = days_to_complete("2024-03-08", noon).unwrap();
        assert!(days < 0.0);

        assert!(days_to_complete("not-a-date", noon).is_none());
    }

    #[test]
    fn test_bucket_boundaries() {
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 0, 0, 0).unwrap();
        // days_to_complete at midnight = (due - today) + 1 exactly
        let tasks = vec![
            task_due(1, "2024-03-08"), // -1 → overdue
            task_due(2, "2024-03-09"), // 0 → today
            task_due(3, "2024-03-10"), // 1 → tomorrow
            task_due(4, "2024-03-11"), // 2 → this week
            task_due(5, "2024-03-14"), // 5 → this week
            task_due(6, "2024-03-15"), // 6 → unassigned window
            task_due(7, "2024-03-16"), // 7 → later
            task_due(8, "garbage"),    // unparseable → dropped
        ];

        let buckets = bucket_by_due(tasks, now);
        assert_eq!(buckets.overdue.iter().map(|t| t.id).collect::<Vec<_>>(), [1]);
        assert_eq!(buckets.today.iter().map(|t| t.id).collect::<Vec<_>>(), [2]);
        assert_eq!(buckets.tomorrow.iter().map(|t| t.id).collect::<Vec<_>>(), [3]);
        assert_eq!(
            buckets.this_week.iter().map(|t| t.id).collect::<Vec<_>>(),
            [4, 5]
        );
        assert_eq!(buckets.later.iter().map(|t| t.id).collect::<Vec<_>>(), [7]);
    }

    #[test]
    fn test_buckets_preserve_date_order() {
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 0, 0, 0).unwrap();
        let tasks = vec![
            task_due(1, "2024-03-01"),
            task_due(2, "2024-03-05"),
            task_due(3, "2024-03-08"),
        ];

        let buckets = bucket_by_due(tasks, now);
        let ids: Vec<_> = buckets.overdue.iter().map(|t| t.id).collect();
        assert_eq!(ids, [1, 2, 3]);
    }

    // Database-backed tests are in tests/model_tests.rs
}
