//! Column values → `CanonicalTransfer`.

use chainassets_core::{
    error::SinkError,
    record::{CanonicalTransfer, TransferId, TransferStatus},
    types::Balance,
};

pub(crate) struct TransferRow {
    pub id: String,
    pub asset_id: String,
    pub from: Option<String>,
    pub to: Option<String>,
    pub balance: String,
    pub status: String,
}

impl TryFrom<TransferRow> for CanonicalTransfer {
    type Error = SinkError;

    fn try_from(row: TransferRow) -> Result<Self, SinkError> {
        let corrupt = |column: &str, value: &str| {
            SinkError::Read(format!("row {}: bad {column} '{value}'", row.id))
        };
        Ok(CanonicalTransfer {
            id: TransferId::parse(&row.id).ok_or_else(|| corrupt("id", &row.id))?,
            status: TransferStatus::parse(&row.status)
                .ok_or_else(|| corrupt("status", &row.status))?,
            balance: row
                .balance
                .parse::<Balance>()
                .map_err(|_| corrupt("balance", &row.balance))?,
            asset_id: row.asset_id,
            from: row.from.unwrap_or_default(),
            to: row.to.unwrap_or_default(),
        })
    }
}
