//! SQLite-backed preference store.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;
use tracing::debug;

use crate::error::Result;
use crate::types::{PrefFlags, PrefUpdate, UserPreferences};

/// Initialise the preference schema in `conn`. Safe to call on every
/// startup — CREATE IF NOT EXISTS means it's idempotent.
pub fn init_db(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS user_prefs (
            user_id     INTEGER PRIMARY KEY NOT NULL,
            jobs_au     INTEGER NOT NULL DEFAULT 0,
            jobs_in     INTEGER NOT NULL DEFAULT 0,
            ai_tools    INTEGER NOT NULL DEFAULT 0,
            timezone    TEXT    NOT NULL,
            created_at  TEXT    NOT NULL,
            updated_at  TEXT    NOT NULL
        );",
    )?;
    Ok(())
}

fn row_to_prefs(row: &rusqlite::Row<'_>) -> rusqlite::Result<UserPreferences> {
    Ok(UserPreferences {
        user_id: row.get(0)?,
        flags: PrefFlags {
            jobs_au: row.get::<_, i32>(1)? != 0,
            jobs_in: row.get::<_, i32>(2)? != 0,
            ai_tools: row.get::<_, i32>(3)? != 0,
        },
        timezone: row.get(4)?,
    })
}

/// The preference store. One connection behind a mutex — writes are rare
/// (a handful of button taps per user) so contention is not a concern.
pub struct PrefStore {
    conn: Arc<Mutex<Connection>>,
    default_timezone: String,
}

impl PrefStore {
    pub fn new(conn: Connection, default_timezone: &str) -> Result<Self> {
        init_db(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            default_timezone: default_timezone.to_string(),
        })
    }

    /// Fetch a user's preferences. A missing row is not an error — the
    /// all-false default record is returned instead.
    pub fn get(&self, user_id: i64) -> Result<UserPreferences> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT user_id, jobs_au, jobs_in, ai_tools, timezone
             FROM user_prefs WHERE user_id = ?1",
        )?;
        let mut rows = stmt.query_map([user_id], row_to_prefs)?;
        match rows.next() {
            Some(row) => Ok(row?),
            None => Ok(UserPreferences {
                user_id,
                flags: PrefFlags::default(),
                timezone: self.default_timezone.clone(),
            }),
        }
    }

    /// Merge `update` into the stored record, creating it if absent.
    /// Fields the update leaves as `None` keep their stored value.
    pub fn upsert(&self, user_id: i64, update: PrefUpdate) -> Result<()> {
        let current = self.get(user_id)?;

        let flags = PrefFlags {
            jobs_au: update.jobs_au.unwrap_or(current.flags.jobs_au),
            jobs_in: update.jobs_in.unwrap_or(current.flags.jobs_in),
            ai_tools: update.ai_tools.unwrap_or(current.flags.ai_tools),
        };
        let timezone = update.timezone.unwrap_or(current.timezone);
        let now = chrono::Utc::now().to_rfc3339();

        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO user_prefs
             (user_id, jobs_au, jobs_in, ai_tools, timezone, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
             ON CONFLICT(user_id) DO UPDATE SET
                jobs_au = excluded.jobs_au,
                jobs_in = excluded.jobs_in,
                ai_tools = excluded.ai_tools,
                timezone = excluded.timezone,
                updated_at = excluded.updated_at",
            rusqlite::params![
                user_id,
                flags.jobs_au as i32,
                flags.jobs_in as i32,
                flags.ai_tools as i32,
                timezone,
                now
            ],
        )?;
        debug!(user_id, "preferences upserted");
        Ok(())
    }

    /// All stored records, for digest fan-out. Order is unspecified.
    pub fn all(&self) -> Result<Vec<UserPreferences>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT user_id, jobs_au, jobs_in, ai_tools, timezone FROM user_prefs",
        )?;
        let users = stmt
            .query_map([], row_to_prefs)?
            .filter_map(|r| r.ok())
            .collect();
        Ok(users)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ToggleKey;

    fn store() -> PrefStore {
        PrefStore::new(Connection::open_in_memory().unwrap(), "Australia/Melbourne").unwrap()
    }

    #[test]
    fn get_absent_returns_default_record() {
        let store = store();
        let prefs = store.get(42).unwrap();
        assert_eq!(prefs.user_id, 42);
        assert_eq!(prefs.flags, PrefFlags::default());
        assert_eq!(prefs.timezone, "Australia/Melbourne");
        // Reading must not create a row.
        assert!(store.all().unwrap().is_empty());
    }

    #[test]
    fn upsert_creates_then_merges() {
        let store = store();
        store
            .upsert(7, PrefUpdate::flag(ToggleKey::JobsAu, true))
            .unwrap();
        store
            .upsert(7, PrefUpdate::flag(ToggleKey::AiTools, true))
            .unwrap();

        let prefs = store.get(7).unwrap();
        assert!(prefs.flags.jobs_au);
        assert!(!prefs.flags.jobs_in);
        assert!(prefs.flags.ai_tools);
    }

    #[test]
    fn timezone_update_keeps_flags() {
        let store = store();
        store
            .upsert(7, PrefUpdate::flag(ToggleKey::JobsIn, true))
            .unwrap();
        store.upsert(7, PrefUpdate::timezone("Asia/Kolkata")).unwrap();

        let prefs = store.get(7).unwrap();
        assert!(prefs.flags.jobs_in);
        assert_eq!(prefs.timezone, "Asia/Kolkata");
    }

    #[test]
    fn unsubscribe_keeps_the_row() {
        let store = store();
        store
            .upsert(
                7,
                PrefUpdate::flags(PrefFlags {
                    jobs_au: true,
                    jobs_in: true,
                    ai_tools: true,
                }),
            )
            .unwrap();
        store.upsert(7, PrefUpdate::flags(PrefFlags::default())).unwrap();

        assert_eq!(store.all().unwrap().len(), 1);
        assert!(!store.get(7).unwrap().flags.any());
    }

    #[test]
    fn all_returns_every_user() {
        let store = store();
        store.upsert(1, PrefUpdate::none()).unwrap();
        store.upsert(2, PrefUpdate::none()).unwrap();
        let mut ids: Vec<i64> = store.all().unwrap().iter().map(|p| p.user_id).collect();
        ids.sort();
        assert_eq!(ids, vec![1, 2]);
    }
}
