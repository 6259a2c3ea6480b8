//! chainassets-storage: sinks for finished transfer batches.
//!
//! Backends:
//! - [`memory`]: in-memory (tests, dry runs)
//! - `sqlite`: SQLite via `sqlx` (feature `sqlite`)
//! - `postgres`: PostgreSQL via `sqlx` (feature `postgres`)
//!
//! Every backend writes a batch as one unit: all of its records plus the
//! batch's last height, or nothing.

pub mod memory;

#[cfg(any(feature = "sqlite", feature = "postgres"))]
mod rows;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "postgres")]
pub mod postgres;

pub use memory::MemorySink;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteSink;

#[cfg(feature = "postgres")]
pub use postgres::PostgresSink;
