use std::io;

use serde::Serialize;

use super::domain::Transaction;

/// Sort newest first; equal timestamps keep insertion order.
pub(crate) fn newest_first(transactions: &mut [Transaction]) {
    transactions.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}

const HEADER: [&str; 11] = [
    "id",
    "type",
    "project_id",
    "project_name",
    "from",
    "to",
    "quantity",
    "price_per_credit",
    "total_value",
    "timestamp",
    "status",
];

#[derive(Serialize)]
struct LedgerRow<'a> {
    id: &'a str,
    #[serde(rename = "type")]
    kind: &'a str,
    project_id: &'a str,
    project_name: &'a str,
    from: &'a str,
    to: &'a str,
    quantity: u64,
    price_per_credit: Option<u32>,
    total_value: Option<u64>,
    timestamp: String,
    status: &'a str,
}

/// Write transactions as CSV with a header row, one line per transaction.
/// An empty ledger still gets its header.
pub fn write_csv<W: io::Write>(transactions: &[Transaction], writer: W) -> Result<(), csv::Error> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv_writer.write_record(HEADER)?;
    for transaction in transactions {
        csv_writer.serialize(LedgerRow {
            id: &transaction.id,
            kind: transaction.kind.label(),
            project_id: &transaction.project_id.0,
            project_name: &transaction.project_name,
            from: &transaction.from,
            to: &transaction.to,
            quantity: transaction.quantity,
            price_per_credit: transaction.price_per_credit,
            total_value: transaction.total_value,
            timestamp: transaction.timestamp.to_rfc3339(),
            status: transaction.status.label(),
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}
