//! Database queries for lists of transactions.

use rusqlite::Connection;

use crate::{Error, pagination::Page};

use super::core::{SELECT_TRANSACTION, Transaction, map_transaction_row};

/// Matches every transaction when the label parameter is NULL, otherwise only
/// transactions with a label of that name. Uses a subquery so that a
/// transaction with the same label twice is still returned once.
const LABEL_FILTER: &str = "WHERE (?1 IS NULL OR t.transactionsTableID IN (
        SELECT transactionIDLabels FROM LABELSTABLE WHERE labelName = ?1
    ))";

/// Count the transactions, or only those with the label `label`.
///
/// # Errors
/// Returns [Error::SqlError] if there is an SQL error.
pub(crate) fn count_transactions(label: Option<&str>, connection: &Connection) -> Result<u64, Error> {
    let count: i64 = connection.query_row(
        &format!("SELECT COUNT(*) FROM TRANSACTIONSTABLE t {LABEL_FILTER}"),
        [label],
        |row| row.get(0),
    )?;

    Ok(count as u64)
}

/// Get one page of transactions, newest first.
///
/// Transactions without a date come after all dated transactions. Ties are
/// broken by ID, newest first, to keep the order stable between pages.
///
/// # Errors
/// Returns [Error::SqlError] if there is an SQL error.
pub(crate) fn get_page_of_transactions(
    label: Option<&str>,
    page: &Page,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    let query = format!(
        "{SELECT_TRANSACTION} {LABEL_FILTER}
         ORDER BY t.date IS NULL, t.date DESC, t.transactionsTableID DESC
         LIMIT ?2 OFFSET ?3"
    );

    connection
        .prepare(&query)?
        .query_map(
            (label, page.size as i64, page.offset() as i64),
            map_transaction_row,
        )?
        .map(|transaction_result| transaction_result.map_err(Error::from))
        .collect()
}

/// Get every transaction, or only those with the label `label`, oldest first.
///
/// Transactions without a date come first.
///
/// # Errors
/// Returns [Error::SqlError] if there is an SQL error.
pub(crate) fn get_transactions_for_export(
    label: Option<&str>,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    let query = format!(
        "{SELECT_TRANSACTION} {LABEL_FILTER}
         ORDER BY t.date ASC, t.transactionsTableID ASC"
    );

    connection
        .prepare(&query)?
        .query_map([label], map_transaction_row)?
        .map(|transaction_result| transaction_result.map_err(Error::from))
        .collect()
}
