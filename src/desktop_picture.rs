use std::error::Error;
use std::path::Path;

use rusqlite::{params, Connection, OpenFlags, OptionalExtension};

use crate::error::AppErr;

const PREFERENCE_KEY: i64 = 1;

/// The Dock's wallpaper database. The schema belongs to macOS:
///
/// - `data (value)` holds image paths
/// - `pictures` has one row per space/display that can show a wallpaper
/// - `preferences (key, data_id, picture_id)` links a picture slot to a `data` row
pub struct DesktopPictureDb {
    conn: Connection,
}

impl DesktopPictureDb {
    /// Opens an existing database. A missing file is an error, never a new empty database.
    pub fn open(path: &Path) -> Result<DesktopPictureDb, AppErr> {
        info!("Opening {}", path.display());
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        Ok(DesktopPictureDb::from_connection(conn))
    }

    pub fn from_connection(conn: Connection) -> DesktopPictureDb {
        DesktopPictureDb { conn }
    }

    /// Replaces the stored wallpaper with `image_path` on every picture slot.
    ///
    /// Runs as one transaction: old `data` and `preferences` rows are deleted,
    /// one `data` row is inserted and every `pictures` row gets a preference
    /// pointing at it, with `picture_id` being the slot's 1-based position.
    /// Returns the number of slots linked.
    pub fn set_wallpaper(&mut self, image_path: &str) -> Result<usize, AppErr> {
        let tx = self.conn.transaction()?;

        tx.execute("DELETE FROM data", [])?;
        tx.execute("DELETE FROM preferences", [])?;

        tx.execute("INSERT INTO data (value) VALUES (?1)", params![image_path])?;
        let data_id = tx.last_insert_rowid();
        debug!("Inserted data row {} for {:?}", data_id, image_path);

        let slots = {
            let mut stmt = tx.prepare("SELECT rowid FROM pictures")?;
            let rows = stmt.query_map([], |row| row.get::<_, i64>(0))?;
            rows.collect::<Result<Vec<_>, _>>()?
        };

        for (index, _) in slots.iter().enumerate() {
            tx.execute(
                "INSERT INTO preferences (key, data_id, picture_id) VALUES (?1, ?2, ?3)",
                params![PREFERENCE_KEY, data_id, index as i64 + 1],
            )?;
        }

        tx.commit()?;
        info!("Linked {} picture slot(s) to {:?}", slots.len(), image_path);
        Ok(slots.len())
    }

    /// The image path the preferences currently point at, if any.
    pub fn current_wallpaper(&self) -> Result<Option<String>, AppErr> {
        let value = self
            .conn
            .query_row(
                "SELECT data.value FROM preferences \
                 JOIN data ON data.rowid = preferences.data_id \
                 WHERE preferences.key = ?1 \
                 ORDER BY preferences.picture_id LIMIT 1",
                params![PREFERENCE_KEY],
                |row| row.get::<_, Option<String>>(0),
            )
            .optional()?;
        Ok(value.flatten())
    }

    pub fn picture_count(&self) -> Result<usize, AppErr> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM pictures", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

/// Opens the database at `db_path` and points every picture slot at `image_path`.
pub fn set_wallpaper_at(db_path: &Path, image_path: &str) -> Result<usize, AppErr> {
    let mut db = DesktopPictureDb::open(db_path)?;
    match db.current_wallpaper() {
        Ok(Some(previous)) => info!("Replacing wallpaper {:?}", previous),
        Ok(None) => {}
        Err(err) => debug!("Could not read the current wallpaper: {:?}", err.source()),
    }
    match db.picture_count() {
        Ok(count) => debug!("{} picture slot(s) in {}", count, db_path.display()),
        Err(err) => debug!("Could not count picture slots: {:?}", err.source()),
    }
    db.set_wallpaper(image_path)
}
