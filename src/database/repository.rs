/*!
 * Repository layer for the section store.
 *
 * This module resolves matched category labels into section records,
 * abstracting away the SQL details. `resolve` implements the fan-out:
 * one lookup per label, issued concurrently, re-joined in label order.
 */

use anyhow::Result;
use futures::future::join_all;
use log::{debug, info, warn};
use rusqlite::params;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use super::connection::DatabaseConnection;
use super::models::CategoryRecord;
use crate::errors::RepositoryError;

/// Repository over the section store
#[derive(Clone)]
pub struct CategoryRepository {
    /// Database connection
    db: DatabaseConnection,
}

impl CategoryRepository {
    /// Create a new repository with the given database connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create a repository backed by a database file
    pub fn open<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let db = DatabaseConnection::new(db_path)?;
        Ok(Self::new(db))
    }

    /// Create a repository with an in-memory database (for testing)
    pub fn new_in_memory() -> Result<Self> {
        let db = DatabaseConnection::new_in_memory()?;
        Ok(Self::new(db))
    }

    /// Fetch all records filed under a category label, in store order
    pub async fn find_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<CategoryRecord>, RepositoryError> {
        let category = category.to_string();

        self.db
            .execute_async(move |conn| {
                let mut stmt = conn.prepare(
                    r#"
                    SELECT category, title, description, punishment, bail_type, bail_time_limit
                    FROM sections
                    WHERE category = ?1
                    ORDER BY id
                    "#,
                )?;

                let records = stmt
                    .query_map(params![category], |row| {
                        Ok(CategoryRecord {
                            category: row.get(0)?,
                            title: row.get(1)?,
                            description: row.get(2)?,
                            punishment: row.get(3)?,
                            bail_type: row.get(4)?,
                            bail_time_limit: row.get(5)?,
                        })
                    })?
                    .collect::<std::result::Result<Vec<_>, _>>()?;

                Ok(records)
            })
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))
    }

    /// Resolve a set of matched labels into a flat record sequence.
    ///
    /// Lookups run concurrently and are concatenated in label order, then
    /// store order within a label. Records are not deduplicated across
    /// labels. A failed lookup is logged and contributes nothing; the
    /// other labels still resolve.
    pub async fn resolve(&self, labels: &[String]) -> Vec<CategoryRecord> {
        let lookups = labels.iter().map(|label| self.find_by_category(label));
        let results = join_all(lookups).await;

        let mut records = Vec::new();
        for (label, result) in labels.iter().zip(results) {
            match result {
                Ok(found) => {
                    debug!("Label {:?} resolved to {} record(s)", label, found.len());
                    records.extend(found);
                }
                Err(e) => {
                    warn!("Lookup failed for label {:?}, skipping: {}", label, e);
                }
            }
        }

        records
    }

    /// Insert records, replacing any existing record with the same
    /// category and title
    pub async fn insert_records(
        &self,
        records: Vec<CategoryRecord>,
    ) -> Result<usize, RepositoryError> {
        let count = records.len();

        self.db
            .transaction_async(move |tx| {
                for record in &records {
                    tx.execute(
                        r#"
                        INSERT OR REPLACE INTO sections
                            (category, title, description, punishment, bail_type, bail_time_limit)
                        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                        "#,
                        params![
                            record.category,
                            record.title,
                            record.description,
                            record.punishment,
                            record.bail_type,
                            record.bail_time_limit,
                        ],
                    )?;
                }
                Ok(())
            })
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        Ok(count)
    }

    /// Import records from a JSON seed file containing an array of records
    pub async fn import_records<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> Result<usize, RepositoryError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            RepositoryError::SeedFile(format!("{}: {}", path.display(), e))
        })?;
        let records: Vec<CategoryRecord> = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| RepositoryError::SeedFile(format!("{}: {}", path.display(), e)))?;

        let imported = self.insert_records(records).await?;
        info!("Imported {} section record(s) from {}", imported, path.display());
        Ok(imported)
    }

    /// Total number of stored records
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        self.db
            .execute_async(|conn| {
                let count: i64 =
                    conn.query_row("SELECT COUNT(*) FROM sections", [], |row| row.get(0))?;
                Ok(count)
            })
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))
    }
}
