//! SQLite transfer sink.
//!
//! Writes records to the `transfer` table and the last persisted block height
//! to `ingest_status`, both inside one transaction per batch.
//!
//! # Usage
//! ```rust,no_run
//! use chainassets_storage::sqlite::SqliteSink;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // File-backed (persistent)
//! let sink = SqliteSink::open("./assets.db").await?;
//!
//! // In-memory (tests / ephemeral)
//! let sink = SqliteSink::in_memory().await?;
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Row, SqlitePool};
use tracing::debug;

use chainassets_core::error::SinkError;
use chainassets_core::record::{CanonicalTransfer, TransferBatch};
use chainassets_core::sink::TransferSink;

use crate::rows::TransferRow;

/// SQLite-backed transfer sink.
pub struct SqliteSink {
    pool: SqlitePool,
}

impl SqliteSink {
    /// Open (or create) a SQLite database at `path`.
    ///
    /// The path may be a plain file path (`"./assets.db"`) or a full
    /// SQLite URL (`"sqlite:./assets.db?mode=rwc"`).
    pub async fn open(path: &str) -> Result<Self, SinkError> {
        let url = if path.starts_with("sqlite:") {
            path.to_string()
        } else {
            format!("sqlite:{path}?mode=rwc")
        };

        let pool = SqlitePool::connect(&url)
            .await
            .map_err(|e| SinkError::Connect(e.to_string()))?;

        let sink = Self { pool };
        sink.init_schema().await?;
        Ok(sink)
    }

    /// Open an in-memory SQLite database.
    ///
    /// Limited to one connection: every pooled connection to `:memory:`
    /// would otherwise see its own empty database.
    pub async fn in_memory() -> Result<Self, SinkError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .map_err(|e| SinkError::Connect(e.to_string()))?;

        let sink = Self { pool };
        sink.init_schema().await?;
        Ok(sink)
    }

    /// Create tables and enable WAL mode.
    async fn init_schema(&self) -> Result<(), SinkError> {
        let schema = |e: sqlx::Error| SinkError::Schema(e.to_string());

        sqlx::query("PRAGMA journal_mode=WAL;")
            .execute(&self.pool)
            .await
            .map_err(schema)?;

        // Balance is TEXT: SQLite's NUMERIC affinity would round past 2^63.
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS transfer (
                id        TEXT        PRIMARY KEY,
                asset_id  TEXT        NOT NULL,
                \"to\"    TEXT,
                \"from\"  TEXT,
                balance   TEXT        NOT NULL,
                status    VARCHAR(11) NOT NULL
            );",
        )
        .execute(&self.pool)
        .await
        .map_err(schema)?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS ingest_status (
                id     INTEGER PRIMARY KEY CHECK (id = 0),
                height INTEGER NOT NULL
            );",
        )
        .execute(&self.pool)
        .await
        .map_err(schema)?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_transfer_asset ON transfer (asset_id);")
            .execute(&self.pool)
            .await
            .map_err(schema)?;

        Ok(())
    }

    /// All stored records ordered by id, i.e. by chain position.
    pub async fn transfers(&self) -> Result<Vec<CanonicalTransfer>, SinkError> {
        self.select("SELECT id, asset_id, \"from\", \"to\", balance, status FROM transfer ORDER BY id", None)
            .await
    }

    /// Stored records of one asset ordered by id.
    pub async fn transfers_by_asset(
        &self,
        asset_id: &str,
    ) -> Result<Vec<CanonicalTransfer>, SinkError> {
        self.select(
            "SELECT id, asset_id, \"from\", \"to\", balance, status FROM transfer
             WHERE asset_id = ? ORDER BY id",
            Some(asset_id),
        )
        .await
    }

    /// Total number of stored records.
    pub async fn transfer_count(&self) -> Result<u64, SinkError> {
        let row = sqlx::query("SELECT COUNT(*) as cnt FROM transfer")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| SinkError::Read(e.to_string()))?;

        let cnt: i64 = row.get("cnt");
        Ok(cnt as u64)
    }

    async fn select(
        &self,
        sql: &str,
        asset_id: Option<&str>,
    ) -> Result<Vec<CanonicalTransfer>, SinkError> {
        let mut query = sqlx::query(sql);
        if let Some(asset_id) = asset_id {
            query = query.bind(asset_id);
        }
        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| SinkError::Read(e.to_string()))?;

        rows.into_iter()
            .map(|r| {
                CanonicalTransfer::try_from(TransferRow {
                    id: r.get("id"),
                    asset_id: r.get("asset_id"),
                    from: r.get("from"),
                    to: r.get("to"),
                    balance: r.get("balance"),
                    status: r.get("status"),
                })
            })
            .collect()
    }
}

// ─── TransferSink impl ───────────────────────────────────────────────────────

#[async_trait]
impl TransferSink for SqliteSink {
    async fn persist(&self, batch: &TransferBatch) -> Result<(), SinkError> {
        let write = |e: sqlx::Error| SinkError::Write(e.to_string());

        let mut tx = self.pool.begin().await.map_err(write)?;

        for record in &batch.records {
            sqlx::query(
                "INSERT INTO transfer (id, asset_id, \"to\", \"from\", balance, status)
                 VALUES (?, ?, ?, ?, ?, ?)
                 ON CONFLICT (id) DO UPDATE SET
                    asset_id = excluded.asset_id,
                    \"to\"   = excluded.\"to\",
                    \"from\" = excluded.\"from\",
                    balance  = excluded.balance,
                    status   = excluded.status",
            )
            .bind(record.id.as_str())
            .bind(&record.asset_id)
            .bind(&record.to)
            .bind(&record.from)
            .bind(record.balance.to_string())
            .bind(record.status.as_str())
            .execute(&mut *tx)
            .await
            .map_err(write)?;
        }

        if let Some(height) = batch.last_height {
            sqlx::query(
                "INSERT INTO ingest_status (id, height) VALUES (0, ?)
                 ON CONFLICT (id) DO UPDATE SET height = excluded.height",
            )
            .bind(height as i64)
            .execute(&mut *tx)
            .await
            .map_err(write)?;
        }

        tx.commit()
            .await
            .map_err(|e| SinkError::Write(format!("commit batch: {e}")))?;

        debug!(records = batch.len(), last_height = ?batch.last_height, "batch stored");
        Ok(())
    }

    async fn last_height(&self) -> Result<Option<u32>, SinkError> {
        let row = sqlx::query("SELECT height FROM ingest_status WHERE id = 0")
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| SinkError::Read(e.to_string()))?;

        Ok(row.map(|r| r.get::<i64, _>("height") as u32))
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chainassets_core::{AccountId, Balance, TransferId, TransferStatus};

    const ABC: &str = "0xabcabcabcabcabcabcabcabcabcabcabcabcabca";
    const DEF: &str = "0xdefdefdefdefdefdefdefdefdefdefdefdefdefd";

    fn account(hex: &str) -> String {
        hex.parse::<AccountId>().unwrap().to_hex()
    }

    fn transfer(index: u32, balance: Balance) -> CanonicalTransfer {
        CanonicalTransfer {
            id: TransferId::from_position(950_000, index),
            asset_id: "7".into(),
            from: account(ABC),
            to: account(DEF),
            balance,
            status: TransferStatus::Transferred,
        }
    }

    fn batch(records: Vec<CanonicalTransfer>) -> TransferBatch {
        TransferBatch {
            records,
            first_height: Some(950_000),
            last_height: Some(950_000),
            ..TransferBatch::default()
        }
    }

    #[tokio::test]
    async fn batch_roundtrip() {
        let sink = SqliteSink::in_memory().await.unwrap();
        assert_eq!(sink.last_height().await.unwrap(), None);

        let mut issued = transfer(1, Balance::from(1000u64));
        issued.from = String::new();
        issued.status = TransferStatus::Issued;
        let records = vec![issued, transfer(2, Balance::from(50u64))];

        sink.persist(&batch(records.clone())).await.unwrap();

        assert_eq!(sink.transfers().await.unwrap(), records);
        assert_eq!(sink.transfer_count().await.unwrap(), 2);
        assert_eq!(sink.last_height().await.unwrap(), Some(950_000));
        assert_eq!(sink.transfers_by_asset("8").await.unwrap().len(), 0);
    }

    #[tokio::test]
    async fn balance_beyond_u64_keeps_precision() {
        let sink = SqliteSink::in_memory().await.unwrap();
        let big = Balance::from(u128::MAX);
        sink.persist(&batch(vec![transfer(0, big)])).await.unwrap();
        assert_eq!(sink.transfers().await.unwrap()[0].balance, big);
    }

    #[tokio::test]
    async fn repersisting_a_batch_is_idempotent() {
        let sink = SqliteSink::in_memory().await.unwrap();
        let b = batch(vec![transfer(0, Balance::from(1u64)), transfer(1, Balance::from(2u64))]);
        sink.persist(&b).await.unwrap();
        sink.persist(&b).await.unwrap();
        assert_eq!(sink.transfer_count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn empty_batch_only_advances_height() {
        let sink = SqliteSink::in_memory().await.unwrap();
        sink.persist(&batch(vec![])).await.unwrap();
        assert_eq!(sink.transfer_count().await.unwrap(), 0);
        assert_eq!(sink.last_height().await.unwrap(), Some(950_000));
    }
}
