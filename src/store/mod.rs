//! SQLite-backed optical-depth store.
//!
//! Two tables make up the durable interface:
//!
//! ```text
//! gases(mol_id INTEGER PRIMARY KEY, mol_name TEXT NOT NULL, mol_ppm REAL NOT NULL)
//! optical_depths(mol_id INTEGER, altitude REAL NOT NULL, wave_no REAL NOT NULL,
//!                abs_coef REAL NOT NULL,
//!                PRIMARY KEY (mol_id, altitude, wave_no),
//!                FOREIGN KEY (mol_id) REFERENCES gases (mol_id))
//! ```
//!
//! All inserts are idempotent: a uniqueness conflict on either table is
//! recovered locally, never surfaced as a failure. The store is tuned for
//! single-process bulk population — journaling and synchronous writes are
//! disabled and an exclusive lock is requested, trading durability for
//! throughput. That trade is acceptable because a corrupted store can
//! always be regenerated from the line data.

mod error;

#[cfg(test)]
mod tests;

pub use error::StoreError;

use std::path::Path;

use log::info;
use rusqlite::{ffi, params, Connection};

use crate::gases::Gas;

/// Outcome of a single sample insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleOutcome {
    /// The row was written
    Inserted,
    /// A row with the same key already existed; the existing row wins
    AlreadyPresent,
    /// The insert conflicted, yet the key is absent on re-query — the
    /// sample is abandoned (logged by the caller, never retried)
    Lost,
}

/// Handle to the on-disk optical-depth store.
pub struct DepthStore {
    conn: Connection,
}

impl DepthStore {
    /// Opens (creating if needed) the store at `path` and applies the bulk
    /// population pragmas. Failure to open is fatal to the caller; there is
    /// no degraded half-open mode.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        // journal_mode and locking_mode report their new value back, so the
        // pragma helper (which discards result rows) is used throughout
        conn.pragma_update(None, "journal_mode", "OFF")?;
        // The bundled SQLite is compiled with SQLITE_DEFAULT_FOREIGN_KEYS=1;
        // pin enforcement off so orphan rows stay observable via
        // orphan_sample_count and SampleOutcome::Lost remains reachable
        conn.pragma_update(None, "foreign_keys", 0)?;
        conn.pragma_update(None, "synchronous", 0)?;
        conn.pragma_update(None, "cache_size", 1_000_000)?;
        conn.pragma_update(None, "locking_mode", "EXCLUSIVE")?;
        conn.pragma_update(None, "temp_store", "MEMORY")?;
        Ok(Self { conn })
    }

    /// Creates both tables if they do not already exist.
    pub fn ensure_schema(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS gases (
                mol_id integer PRIMARY KEY,
                mol_name text NOT NULL,
                mol_ppm real NOT NULL
            );
            CREATE TABLE IF NOT EXISTS optical_depths (
                mol_id INTEGER,
                altitude REAL NOT NULL,
                wave_no REAL NOT NULL,
                abs_coef REAL NOT NULL,
                PRIMARY KEY (mol_id, altitude, wave_no),
                FOREIGN KEY (mol_id) REFERENCES gases (mol_id)
            );",
        )?;
        Ok(())
    }

    /// Inserts a registry gas. Re-inserting an existing gas is a logged
    /// no-op: the existing row wins.
    pub fn insert_gas(&self, gas: &Gas) -> Result<(), StoreError> {
        let result = self.conn.execute(
            "INSERT INTO gases (mol_id, mol_name, mol_ppm) VALUES (?1, ?2, ?3)",
            params![gas.mol_id, gas.name, gas.ppm],
        );
        match result {
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation(&e) => {
                let existing: String = self.conn.query_row(
                    "SELECT mol_name FROM gases WHERE mol_id = ?1",
                    params![gas.mol_id],
                    |row| row.get(0),
                )?;
                info!("{existing} (mol_id {}) already in store", gas.mol_id);
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Whether any sample rows exist for the given gas/altitude pair. Used
    /// to skip a slab's entire line-shape computation on re-runs.
    pub fn has_samples(&self, mol_id: i64, altitude: f64) -> Result<bool, StoreError> {
        let exists: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM optical_depths WHERE mol_id = ?1 AND altitude = ?2)",
            params![mol_id, altitude],
            |row| row.get(0),
        )?;
        Ok(exists)
    }

    /// Inserts one sample row, committing immediately. A uniqueness
    /// conflict triggers a re-query of the exact key: if the row is there
    /// the insert is a success ([`SampleOutcome::AlreadyPresent`]);
    /// if it is not, the sample is reported as [`SampleOutcome::Lost`]
    /// and the batch moves on.
    pub fn insert_sample(
        &self,
        mol_id: i64,
        altitude: f64,
        wave_no: f64,
        abs_coef: f64,
    ) -> Result<SampleOutcome, StoreError> {
        let result = self.conn.execute(
            "INSERT INTO optical_depths (mol_id, altitude, wave_no, abs_coef)
             VALUES (?1, ?2, ?3, ?4)",
            params![mol_id, altitude, wave_no, abs_coef],
        );
        match result {
            Ok(_) => Ok(SampleOutcome::Inserted),
            Err(e) if is_unique_violation(&e) => {
                if self.sample(mol_id, altitude, wave_no)?.is_some() {
                    Ok(SampleOutcome::AlreadyPresent)
                } else {
                    Ok(SampleOutcome::Lost)
                }
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Reads back a single sample value, if present.
    pub fn sample(
        &self,
        mol_id: i64,
        altitude: f64,
        wave_no: f64,
    ) -> Result<Option<f64>, StoreError> {
        use rusqlite::OptionalExtension;
        let value = self
            .conn
            .query_row(
                "SELECT abs_coef FROM optical_depths
                 WHERE mol_id = ?1 AND altitude = ?2 AND wave_no = ?3",
                params![mol_id, altitude, wave_no],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    /// Number of rows in the `gases` table.
    pub fn gas_count(&self) -> Result<i64, StoreError> {
        Ok(self
            .conn
            .query_row("SELECT COUNT(*) FROM gases", [], |row| row.get(0))?)
    }

    /// Number of rows in the `optical_depths` table.
    pub fn sample_count(&self) -> Result<i64, StoreError> {
        Ok(self
            .conn
            .query_row("SELECT COUNT(*) FROM optical_depths", [], |row| row.get(0))?)
    }

    /// Number of sample rows whose `mol_id` has no matching gas row.
    /// Always zero for stores populated by this crate; exposed for
    /// integrity checks.
    pub fn orphan_sample_count(&self) -> Result<i64, StoreError> {
        Ok(self.conn.query_row(
            "SELECT COUNT(*) FROM optical_depths od
             LEFT JOIN gases g ON g.mol_id = od.mol_id
             WHERE g.mol_id IS NULL",
            [],
            |row| row.get(0),
        )?)
    }
}

/// Only key collisions are recoverable; other constraint failures (NOT
/// NULL, CHECK) stay hard errors.
fn is_unique_violation(error: &rusqlite::Error) -> bool {
    matches!(
        error,
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == ffi::SQLITE_CONSTRAINT_PRIMARYKEY
                || e.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}
