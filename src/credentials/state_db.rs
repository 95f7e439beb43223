//! Read-only access to Cursor's `state.vscdb` key-value store

use std::path::Path;

use rusqlite::{Connection, OpenFlags, OptionalExtension};

/// Handle to the state database, opened read-only
pub struct StateDb {
    conn: Connection,
}

impl StateDb {
    pub fn open(path: &Path) -> Result<Self, rusqlite::Error> {
        let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
        Ok(Self { conn })
    }

    /// Look up a single value from ItemTable
    pub fn get(&self, key: &str) -> Result<Option<String>, rusqlite::Error> {
        self.conn
            .query_row(
                "SELECT value FROM ItemTable WHERE key = ?1",
                [key],
                |row| row.get(0),
            )
            .optional()
    }
}
