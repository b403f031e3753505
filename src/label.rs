//! Labels attached to transactions.
//!
//! Bluecoins stores one row per label per transaction, so a label "name" is
//! just the text shared by those rows.

use std::collections::HashMap;

use rusqlite::{Connection, params_from_iter};

use crate::{Error, database_id::TransactionId};

/// Get the distinct, non-empty label names in alphabetical order.
///
/// # Errors
/// Returns an [Error::SqlError] if there is an SQL error.
pub fn get_label_names(connection: &Connection) -> Result<Vec<String>, Error> {
    connection
        .prepare(
            "SELECT DISTINCT labelName FROM LABELSTABLE
             WHERE labelName IS NOT NULL AND labelName != ''
             ORDER BY labelName",
        )?
        .query_map([], |row| row.get(0))?
        .map(|maybe_name| maybe_name.map_err(Error::from))
        .collect()
}

/// Get the label names for each of `transaction_ids` in a single query.
///
/// Transactions without labels are not included in the map.
pub fn get_labels_for_transactions(
    transaction_ids: &[TransactionId],
    connection: &Connection,
) -> Result<HashMap<TransactionId, Vec<String>>, Error> {
    let mut labels: HashMap<TransactionId, Vec<String>> = HashMap::new();

    if transaction_ids.is_empty() {
        return Ok(labels);
    }

    let placeholders = vec!["?"; transaction_ids.len()].join(", ");
    let query = format!(
        "SELECT transactionIDLabels, labelName FROM LABELSTABLE
         WHERE transactionIDLabels IN ({placeholders}) AND labelName IS NOT NULL
         ORDER BY labelName"
    );

    let mut statement = connection.prepare(&query)?;
    let rows = statement.query_map(params_from_iter(transaction_ids), |row| {
        Ok((row.get::<_, TransactionId>(0)?, row.get::<_, String>(1)?))
    })?;

    for row in rows {
        let (transaction_id, label_name) = row?;
        labels.entry(transaction_id).or_default().push(label_name);
    }

    Ok(labels)
}

/// Get the label names of a single transaction.
pub fn get_transaction_labels(
    transaction_id: TransactionId,
    connection: &Connection,
) -> Result<Vec<String>, Error> {
    Ok(get_labels_for_transactions(&[transaction_id], connection)?
        .remove(&transaction_id)
        .unwrap_or_default())
}
