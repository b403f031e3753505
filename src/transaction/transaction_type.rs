//! Transaction types, e.g. "Expense", "Income" and "Transfer".

use rusqlite::Connection;

use crate::{Error, database_id::TransactionTypeId};

/// A row of the Bluecoins transaction type table.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionType {
    pub id: TransactionTypeId,
    pub name: Option<String>,
}

/// Get all transaction types ordered by ID.
pub fn get_all_transaction_types(connection: &Connection) -> Result<Vec<TransactionType>, Error> {
    connection
        .prepare(
            "SELECT transactionTypeTableID, transactionTypeName FROM TRANSACTIONTYPETABLE
             ORDER BY transactionTypeTableID",
        )?
        .query_map([], |row| {
            Ok(TransactionType {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })?
        .map(|maybe_type| maybe_type.map_err(Error::from))
        .collect()
}

/// Whether `id` refers to a row in the transaction type table.
pub fn transaction_type_exists(
    id: TransactionTypeId,
    connection: &Connection,
) -> Result<bool, Error> {
    connection
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM TRANSACTIONTYPETABLE WHERE transactionTypeTableID = ?1)",
            [id],
            |row| row.get(0),
        )
        .map_err(Error::from)
}
