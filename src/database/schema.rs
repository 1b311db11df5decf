/*!
 * Schema definition and initialization for the section store.
 */

use anyhow::{Context, Result};
use rusqlite::Connection;

/// SQL statements to create the schema
const CREATE_SECTIONS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS sections (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    category TEXT NOT NULL,
    title TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    punishment TEXT NOT NULL DEFAULT '',
    bail_type TEXT NOT NULL DEFAULT '',
    bail_time_limit TEXT NOT NULL DEFAULT '',
    UNIQUE (category, title)
)
"#;

const CREATE_CATEGORY_INDEX: &str = r#"
CREATE INDEX IF NOT EXISTS idx_sections_category ON sections (category)
"#;

/// Initialize the database schema
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    conn.execute(CREATE_SECTIONS_TABLE, [])
        .context("Failed to create sections table")?;
    conn.execute(CREATE_CATEGORY_INDEX, [])
        .context("Failed to create category index")?;
    Ok(())
}
