//! SQLite-backed plan store.

use std::path::Path;
use std::sync::Mutex;

use jiff::Timestamp;
use rusqlite::{params, types::Type, Connection, OptionalExtension, Row};

use crate::error::{DatabaseResultExt, Result, SchedulerError};
use crate::models::{NewPlan, Plan, PlanCategory, PlanPatch, PlanStatus};
use crate::timeofday;

use super::PlanStore;

// SQL queries as const strings for compile-time optimization
const PLAN_COLUMNS: &str = "id, user_id, title, description, category, subject, duration_minutes, scheduled_time, scheduled_date, status, reminder_lead_minutes, auto_rescheduled, conflict_adjusted, related_mood_id, created_at, updated_at";
const INSERT_PLAN_SQL: &str = "INSERT INTO plans (user_id, title, description, category, subject, duration_minutes, scheduled_time, scheduled_date, status, reminder_lead_minutes, related_mood_id, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)";
const DELETE_PLAN_SQL: &str = "DELETE FROM plans WHERE id = ?1";
// Re-checking the terminal states inside the UPDATE itself makes the
// check-and-write atomic at the database level.
const ACTIVE_GUARD_SQL: &str = " AND status NOT IN ('completed', 'cancelled')";

/// Durable plan store on a single SQLite database file.
pub struct SqliteStore {
    connection: Mutex<Connection>,
}

impl SqliteStore {
    /// Opens (or creates) the database at `path` and initializes the
    /// schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection =
            Connection::open(path).db_context("Failed to open database connection")?;
        let store = Self {
            connection: Mutex::new(connection),
        };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initializes the database schema using the embedded SQL file.
    fn initialize_schema(&self) -> Result<()> {
        let conn = self.lock_connection()?;

        let schema_sql = include_str!("../../assets/schema.sql");
        conn.execute_batch(schema_sql)
            .db_context("Failed to initialize database schema")?;

        Self::apply_migrations(&conn)
    }

    /// Apply migrations for databases created before the current schema.
    fn apply_migrations(conn: &Connection) -> Result<()> {
        // Databases from before calendar support lack scheduled_date
        let has_date_column: bool = conn
            .query_row(
                "SELECT COUNT(*) FROM pragma_table_info('plans') WHERE name = 'scheduled_date'",
                [],
                |row| row.get(0),
            )
            .map(|count: i64| count > 0)
            .unwrap_or(false);

        if !has_date_column {
            conn.execute("ALTER TABLE plans ADD COLUMN scheduled_date TEXT", [])
                .map_err(|e| {
                    SchedulerError::database_error(
                        "Failed to add scheduled_date column to plans table",
                        e,
                    )
                })?;
        }

        Ok(())
    }

    fn lock_connection(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.connection
            .lock()
            .map_err(|_| SchedulerError::Configuration {
                message: "Database connection lock poisoned".to_string(),
            })
    }

    fn update_inner(&self, id: u64, patch: &PlanPatch, active_only: bool) -> Result<Option<Plan>> {
        if patch.is_empty() {
            return self.get(id);
        }

        let conn = self.lock_connection()?;

        let mut sets: Vec<&str> = Vec::new();
        let mut values: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(ref title) = patch.title {
            sets.push("title = ?");
            values.push(Box::new(title.clone()));
        }
        if let Some(ref description) = patch.description {
            sets.push("description = ?");
            values.push(Box::new(description.clone()));
        }
        if let Some(category) = patch.category {
            sets.push("category = ?");
            values.push(Box::new(category.as_str().to_string()));
        }
        if let Some(ref subject) = patch.subject {
            sets.push("subject = ?");
            values.push(Box::new(subject.clone()));
        }
        if let Some(duration) = patch.duration_minutes {
            sets.push("duration_minutes = ?");
            values.push(Box::new(duration));
        }
        if let Some(ref time) = patch.scheduled_time {
            sets.push("scheduled_time = ?");
            values.push(Box::new(time.clone()));
        }
        if let Some(ref date) = patch.scheduled_date {
            sets.push("scheduled_date = ?");
            values.push(Box::new(date.clone()));
        }
        if let Some(status) = patch.status {
            sets.push("status = ?");
            values.push(Box::new(status.as_str().to_string()));
        }
        if let Some(lead) = patch.reminder_lead_minutes {
            sets.push("reminder_lead_minutes = ?");
            values.push(Box::new(lead));
        }
        if let Some(auto) = patch.auto_rescheduled {
            sets.push("auto_rescheduled = ?");
            values.push(Box::new(auto));
        }
        if let Some(adjusted) = patch.conflict_adjusted {
            sets.push("conflict_adjusted = ?");
            values.push(Box::new(adjusted));
        }

        sets.push("updated_at = ?");
        values.push(Box::new(Timestamp::now().to_string()));

        values.push(Box::new(id as i64));

        let mut sql = format!("UPDATE plans SET {} WHERE id = ?", sets.join(", "));
        if active_only {
            sql.push_str(ACTIVE_GUARD_SQL);
        }

        let value_refs: Vec<&dyn rusqlite::ToSql> = values.iter().map(|v| &**v).collect();
        let changed = conn
            .execute(&sql, value_refs.as_slice())
            .map_err(|e| SchedulerError::database_error("Failed to update plan", e))?;

        if changed == 0 {
            return Ok(None);
        }

        Self::query_plan(&conn, id)
    }

    fn query_plan(conn: &Connection, id: u64) -> Result<Option<Plan>> {
        let sql = format!("SELECT {PLAN_COLUMNS} FROM plans WHERE id = ?1");
        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| SchedulerError::database_error("Failed to prepare query", e))?;

        stmt.query_row(params![id as i64], map_plan_row)
            .optional()
            .map_err(|e| SchedulerError::database_error("Failed to query plan", e))
    }
}

impl PlanStore for SqliteStore {
    fn create(&self, plan: NewPlan) -> Result<Plan> {
        let conn = self.lock_connection()?;

        let now = Timestamp::now();
        let now_str = now.to_string();

        // Scheduled times are stored normalized or not at all
        let scheduled_time = plan
            .scheduled_time
            .as_deref()
            .and_then(timeofday::normalize);

        conn.execute(
            INSERT_PLAN_SQL,
            params![
                plan.user_id,
                plan.title,
                plan.description,
                plan.category.as_str(),
                plan.subject,
                plan.duration_minutes,
                scheduled_time,
                plan.scheduled_date,
                plan.status.as_str(),
                plan.reminder_lead_minutes,
                plan.related_mood_id,
                &now_str,
                &now_str
            ],
        )
        .map_err(|e| SchedulerError::database_error("Failed to insert plan", e))?;

        let id = conn.last_insert_rowid() as u64;

        Ok(Plan {
            id,
            user_id: plan.user_id,
            title: plan.title,
            description: plan.description,
            category: plan.category,
            subject: plan.subject,
            duration_minutes: plan.duration_minutes,
            scheduled_time,
            scheduled_date: plan.scheduled_date,
            status: plan.status,
            reminder_lead_minutes: plan.reminder_lead_minutes,
            auto_rescheduled: false,
            conflict_adjusted: false,
            related_mood_id: plan.related_mood_id,
            created_at: now,
            updated_at: now,
        })
    }

    fn get(&self, id: u64) -> Result<Option<Plan>> {
        let conn = self.lock_connection()?;
        Self::query_plan(&conn, id)
    }

    fn list_for_user(&self, user_id: &str) -> Result<Vec<Plan>> {
        let conn = self.lock_connection()?;
        let sql = format!("SELECT {PLAN_COLUMNS} FROM plans WHERE user_id = ?1 ORDER BY id");
        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| SchedulerError::database_error("Failed to prepare query", e))?;

        let rows = stmt
            .query_map(params![user_id], map_plan_row)
            .map_err(|e| SchedulerError::database_error("Failed to query plans", e))?;

        rows.collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read plan rows")
    }

    fn list_all(&self) -> Result<Vec<Plan>> {
        let conn = self.lock_connection()?;
        let sql = format!("SELECT {PLAN_COLUMNS} FROM plans ORDER BY id");
        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| SchedulerError::database_error("Failed to prepare query", e))?;

        let rows = stmt
            .query_map([], map_plan_row)
            .map_err(|e| SchedulerError::database_error("Failed to query plans", e))?;

        rows.collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read plan rows")
    }

    fn update(&self, id: u64, patch: &PlanPatch) -> Result<Option<Plan>> {
        self.update_inner(id, patch, false)
    }

    fn update_if_active(&self, id: u64, patch: &PlanPatch) -> Result<Option<Plan>> {
        self.update_inner(id, patch, true)
    }

    fn delete(&self, id: u64) -> Result<bool> {
        let conn = self.lock_connection()?;
        let deleted = conn
            .execute(DELETE_PLAN_SQL, params![id as i64])
            .map_err(|e| SchedulerError::database_error("Failed to delete plan", e))?;
        Ok(deleted > 0)
    }
}

fn map_plan_row(row: &Row<'_>) -> rusqlite::Result<Plan> {
    let category: String = row.get(4)?;
    let category = category.parse::<PlanCategory>().map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            4,
            Type::Text,
            Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Invalid plan category: {category}"),
            )),
        )
    })?;

    let status: String = row.get(9)?;
    let status = status.parse::<PlanStatus>().map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            9,
            Type::Text,
            Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Invalid plan status: {status}"),
            )),
        )
    })?;

    Ok(Plan {
        id: row.get::<_, i64>(0)? as u64,
        user_id: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        category,
        subject: row.get(5)?,
        duration_minutes: row.get(6)?,
        scheduled_time: row.get(7)?,
        scheduled_date: row.get(8)?,
        status,
        reminder_lead_minutes: row.get(10)?,
        auto_rescheduled: row.get(11)?,
        conflict_adjusted: row.get(12)?,
        related_mood_id: row.get(13)?,
        created_at: row.get::<_, String>(14)?.parse::<Timestamp>().map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(14, Type::Text, Box::new(e))
        })?,
        updated_at: row.get::<_, String>(15)?.parse::<Timestamp>().map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(15, Type::Text, Box::new(e))
        })?,
    })
}
