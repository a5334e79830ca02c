use chrono::{Local, NaiveDate};
use rusqlite::{params, Connection, Result};
use tracing::debug;

use crate::models::{ProgressMap, Status, StudyTimeEntry};

pub const MAX_STUDY_HOURS: u32 = 24;

/// State owned by one study session: progress marks and logged study time.
///
/// Backed by an in-memory SQLite database, so everything is dropped together
/// with the session.
pub struct Session {
    conn: Connection,
}

impl Session {
    pub fn open() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let session = Self { conn };
        session.init()?;
        Ok(session)
    }

    fn init(&self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS progress (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                topic TEXT NOT NULL UNIQUE,
                status TEXT NOT NULL CHECK(status IN ('weak', 'ok', 'good')),
                updated_at TEXT NOT NULL DEFAULT (datetime('now'))
            );

            CREATE TABLE IF NOT EXISTS study_log (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                hours INTEGER NOT NULL CHECK(hours BETWEEN 0 AND 24),
                logged_on TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_progress_status ON progress(status);
            CREATE INDEX IF NOT EXISTS idx_study_log_date ON study_log(logged_on);
            "#,
        )
    }

    // Progress operations

    /// Records `status` for `topic`, replacing any earlier mark.
    pub fn set_progress(&self, topic: &str, status: Status) -> Result<()> {
        // Upsert keeps the original row id, so iteration order stays first-insertion.
        self.conn.execute(
            r#"
            INSERT INTO progress (topic, status) VALUES (?1, ?2)
            ON CONFLICT(topic) DO UPDATE SET
                status = excluded.status,
                updated_at = datetime('now')
            "#,
            params![topic, status.as_str()],
        )?;
        debug!(topic, status = status.as_str(), "progress saved");
        Ok(())
    }

    pub fn progress(&self) -> Result<ProgressMap> {
        let mut stmt = self
            .conn
            .prepare("SELECT topic, status FROM progress ORDER BY id")?;

        let rows = stmt.query_map([], |row| {
            let topic: String = row.get(0)?;
            let raw: String = row.get(1)?;
            let status = Status::from_str(&raw).ok_or_else(|| {
                rusqlite::Error::FromSqlConversionFailure(
                    1,
                    rusqlite::types::Type::Text,
                    format!("unknown status '{}'", raw).into(),
                )
            })?;
            Ok((topic, status))
        })?;

        let mut map = ProgressMap::new();
        for row in rows {
            let (topic, status) = row?;
            map.set(&topic, status);
        }
        Ok(map)
    }

    // Study time operations

    /// Logs hours studied today; anything above 24 is clamped.
    pub fn log_study_time(&self, hours: u32) -> Result<StudyTimeEntry> {
        self.log_study_time_on(hours, Local::now().date_naive())
    }

    pub fn log_study_time_on(&self, hours: u32, date: NaiveDate) -> Result<StudyTimeEntry> {
        let hours = hours.min(MAX_STUDY_HOURS);
        self.conn.execute(
            "INSERT INTO study_log (hours, logged_on) VALUES (?1, ?2)",
            params![hours, date.to_string()],
        )?;
        let id = self.conn.last_insert_rowid();
        debug!(hours, %date, "study time logged");

        Ok(StudyTimeEntry {
            id,
            hours,
            logged_on: date,
        })
    }

    pub fn study_log(&self) -> Result<Vec<StudyTimeEntry>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, hours, logged_on FROM study_log ORDER BY id")?;

        let rows = stmt.query_map([], |row| {
            let logged_on: String = row.get(2)?;
            let date = NaiveDate::parse_from_str(&logged_on, "%Y-%m-%d").map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    2,
                    rusqlite::types::Type::Text,
                    Box::new(e),
                )
            })?;
            Ok(StudyTimeEntry {
                id: row.get(0)?,
                hours: row.get(1)?,
                logged_on: date,
            })
        })?;
        let entries = rows.collect::<Result<Vec<_>>>()?;
        Ok(entries)
    }

    pub fn hours_on(&self, date: NaiveDate) -> Result<u32> {
        self.conn.query_row(
            "SELECT COALESCE(SUM(hours), 0) FROM study_log WHERE logged_on = ?1",
            params![date.to_string()],
            |row| row.get(0),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WeakTopics;
    use crate::planner::weak_topics;

    fn setup_session() -> Session {
        Session::open().unwrap()
    }

    mod init_tests {
        use super::*;

        #[test]
        fn open_creates_tables() {
            let session = setup_session();

            let tables: Vec<String> = session
                .conn
                .prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
                .unwrap()
                .query_map([], |row| row.get(0))
                .unwrap()
                .collect::<Result<Vec<_>>>()
                .unwrap();

            assert!(tables.contains(&"progress".to_string()));
            assert!(tables.contains(&"study_log".to_string()));
        }

        #[test]
        fn init_is_idempotent() {
            let session = setup_session();
            session.init().unwrap();
            session.set_progress("Algebra", Status::Ok).unwrap();
            session.init().unwrap();
            assert_eq!(session.progress().unwrap().get("Algebra"), Some(Status::Ok));
        }

        #[test]
        fn sessions_are_isolated() {
            let a = setup_session();
            let b = setup_session();
            a.set_progress("Algebra", Status::Weak).unwrap();
            assert!(b.progress().unwrap().is_empty());
        }
    }

    mod progress_tests {
        use super::*;

        #[test]
        fn new_session_has_no_progress() {
            let session = setup_session();
            assert!(session.progress().unwrap().is_empty());
            assert_eq!(session.progress().unwrap().get("Algebra"), None);
        }

        #[test]
        fn set_then_get() {
            let session = setup_session();
            session.set_progress("Physics", Status::Good).unwrap();
            assert_eq!(session.progress().unwrap().get("Physics"), Some(Status::Good));
        }

        #[test]
        fn last_write_wins() {
            let session = setup_session();
            session.set_progress("Physics", Status::Weak).unwrap();
            session.set_progress("Physics", Status::Ok).unwrap();

            let progress = session.progress().unwrap();
            assert_eq!(progress.len(), 1);
            assert_eq!(progress.get("Physics"), Some(Status::Ok));
        }

        #[test]
        fn overwrite_keeps_first_insertion_order() {
            let session = setup_session();
            session.set_progress("Algebra", Status::Weak).unwrap();
            session.set_progress("Physics", Status::Weak).unwrap();
            session.set_progress("Algebra", Status::Ok).unwrap();
            session.set_progress("Algebra", Status::Weak).unwrap();

            let topics: Vec<String> = session
                .progress()
                .unwrap()
                .iter()
                .map(|(t, _)| t.to_string())
                .collect();
            assert_eq!(topics, vec!["Algebra", "Physics"]);
        }

        #[test]
        fn accepts_topics_outside_catalog() {
            let session = setup_session();
            session.set_progress("Not A Real Topic", Status::Weak).unwrap();
            assert_eq!(
                session.progress().unwrap().get("Not A Real Topic"),
                Some(Status::Weak)
            );
        }

        #[test]
        fn unreadable_status_is_an_error() {
            let session = setup_session();
            session.set_progress("Algebra", Status::Ok).unwrap();
            session
                .conn
                .execute_batch(
                    "PRAGMA ignore_check_constraints = ON;
                     INSERT INTO progress (topic, status) VALUES ('Physics', 'meh');",
                )
                .unwrap();

            assert!(matches!(
                session.progress(),
                Err(rusqlite::Error::FromSqlConversionFailure(1, _, _))
            ));
        }

        #[test]
        fn weak_topics_follow_latest_status() {
            let session = setup_session();
            session.set_progress("Algebra", Status::Weak).unwrap();
            session.set_progress("Physics", Status::Weak).unwrap();

            assert_eq!(
                weak_topics(&session.progress().unwrap()),
                WeakTopics::Topics(vec!["Algebra".to_string(), "Physics".to_string()])
            );

            session.set_progress("Algebra", Status::Good).unwrap();
            assert_eq!(
                weak_topics(&session.progress().unwrap()),
                WeakTopics::Topics(vec!["Physics".to_string()])
            );

            session.set_progress("Physics", Status::Ok).unwrap();
            assert!(weak_topics(&session.progress().unwrap()).is_all_good());
        }
    }

    mod study_log_tests {
        use super::*;

        fn date(y: i32, m: u32, d: u32) -> NaiveDate {
            NaiveDate::from_ymd_opt(y, m, d).unwrap()
        }

        #[test]
        fn empty_log() {
            let session = setup_session();
            assert!(session.study_log().unwrap().is_empty());
            assert_eq!(session.hours_on(date(2024, 3, 1)).unwrap(), 0);
        }

        #[test]
        fn log_returns_entry() {
            let session = setup_session();
            let entry = session.log_study_time_on(3, date(2024, 3, 1)).unwrap();
            assert_eq!(entry.hours, 3);
            assert_eq!(entry.logged_on, date(2024, 3, 1));
            assert!(entry.id > 0);
        }

        #[test]
        fn clamps_above_max() {
            let session = setup_session();
            let entry = session.log_study_time_on(30, date(2024, 3, 1)).unwrap();
            assert_eq!(entry.hours, 24);
        }

        #[test]
        fn zero_hours_allowed() {
            let session = setup_session();
            let entry = session.log_study_time_on(0, date(2024, 3, 1)).unwrap();
            assert_eq!(entry.hours, 0);
        }

        #[test]
        fn sums_per_date() {
            let session = setup_session();
            session.log_study_time_on(2, date(2024, 3, 1)).unwrap();
            session.log_study_time_on(3, date(2024, 3, 1)).unwrap();
            session.log_study_time_on(5, date(2024, 3, 2)).unwrap();

            assert_eq!(session.hours_on(date(2024, 3, 1)).unwrap(), 5);
            assert_eq!(session.hours_on(date(2024, 3, 2)).unwrap(), 5);
            assert_eq!(session.hours_on(date(2024, 3, 3)).unwrap(), 0);
        }

        #[test]
        fn log_in_insertion_order() {
            let session = setup_session();
            session.log_study_time_on(1, date(2024, 3, 2)).unwrap();
            session.log_study_time_on(4, date(2024, 3, 1)).unwrap();

            let hours: Vec<u32> = session.study_log().unwrap().iter().map(|e| e.hours).collect();
            assert_eq!(hours, vec![1, 4]);
        }

        #[test]
        fn today_uses_local_date() {
            let session = setup_session();
            let entry = session.log_study_time(2).unwrap();
            assert_eq!(entry.logged_on, Local::now().date_naive());
        }
    }
}
