//! Kinship Storage Layer
//!
//! Implements the [`FamilyStore`] trait on SQLite.
//!
//! # Architecture
//!
//! - [`SqliteStore`] owns the connection and serves read-only lookups
//! - [`FamilyTransaction`] wraps one SQLite transaction; it implements
//!   [`FamilyStore`] and carries the member/edge writes of a save
//! - Dropping a [`FamilyTransaction`] without calling
//!   [`FamilyTransaction::commit`] rolls everything back
//!
//! # Examples
//!
//! ```no_run
//! use kinship_domain::Member;
//! use kinship_store::SqliteStore;
//!
//! let mut store = SqliteStore::new(":memory:").unwrap();
//! let tx = store.transaction().unwrap();
//! tx.insert_member(&Member::new("Ana", None)).unwrap();
//! tx.commit().unwrap();
//! ```

#![warn(missing_docs)]

mod queries;
mod transaction;

pub use transaction::FamilyTransaction;

use kinship_domain::{FamilyEdge, Member, MemberId};
use rusqlite::{Connection, TransactionBehavior};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Member not found
    #[error("Member not found: {0}")]
    NotFound(String),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// A row with the same key already exists
    #[error("Duplicate: {0}")]
    Duplicate(String),

    /// An edge would link a member to itself
    #[error("Member {0} cannot be linked to itself")]
    SelfLink(MemberId),
}

/// SQLite-based family store
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe. Each thread should have its own SqliteStore instance.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Create a new SqliteStore with the given database path
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let mut store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initialize the database schema
    fn initialize_schema(&mut self) -> Result<(), StoreError> {
        let schema = include_str!("schema.sql");
        self.conn.execute_batch(schema)?;
        Ok(())
    }

    /// Begin a write transaction
    ///
    /// The write lock is taken immediately so a concurrent save cannot
    /// interleave between the reads and writes of an inference run.
    pub fn transaction(&mut self) -> Result<FamilyTransaction<'_>, StoreError> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        Ok(FamilyTransaction::new(tx))
    }

    /// Get a member by ID
    pub fn get_member(&self, id: MemberId) -> Result<Option<Member>, StoreError> {
        queries::get_member(&self.conn, id)
    }

    /// List all members ordered by name
    pub fn list_members(&self) -> Result<Vec<Member>, StoreError> {
        queries::list_members(&self.conn)
    }

    /// All edges owned by a member, linked or not, in insertion order
    pub fn family_of(&self, subject_id: MemberId) -> Result<Vec<FamilyEdge>, StoreError> {
        queries::edges_of(&self.conn, subject_id, false)
    }
}
