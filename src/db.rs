//! The Bluecoins database schema.
//!
//! The schema belongs to the Bluecoins mobile app, so the server only checks
//! that the tables it needs exist. [create_schema] builds an empty database
//! with the same shape for tests and local development.

use rusqlite::Connection;

use crate::Error;

/// The tables that the server reads or writes.
pub const REQUIRED_TABLES: [&str; 9] = [
    "ACCOUNTTYPETABLE",
    "ACCOUNTSTABLE",
    "PARENTCATEGORYTABLE",
    "CHILDCATEGORYTABLE",
    "ITEMTABLE",
    "TRANSACTIONTYPETABLE",
    "TRANSACTIONSTABLE",
    "LABELSTABLE",
    "PICTURETABLE",
];

/// Check that `connection` has every table in [REQUIRED_TABLES].
///
/// # Errors
/// Returns [Error::MissingTable] naming the first table that is not found, or
/// [Error::SqlError] if the schema could not be queried.
pub fn verify_schema(connection: &Connection) -> Result<(), Error> {
    let mut statement =
        connection.prepare("SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1")?;

    for table in REQUIRED_TABLES {
        let count: i64 = statement.query_row([table], |row| row.get(0))?;

        if count == 0 {
            tracing::error!("The database does not have the table {table}");
            return Err(Error::MissingTable(table.to_owned()));
        }
    }

    Ok(())
}

/// Create the Bluecoins tables that do not exist yet.
///
/// Only the columns used by this app are created, plus the few defaults the
/// mobile app expects on new transactions.
pub fn create_schema(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS ACCOUNTTYPETABLE (
            accountTypeTableID INTEGER PRIMARY KEY,
            accountTypeName TEXT,
            accountingGroupID INTEGER
        );

        CREATE TABLE IF NOT EXISTS ACCOUNTSTABLE (
            accountsTableID INTEGER PRIMARY KEY,
            accountName TEXT,
            accountTypeID INTEGER REFERENCES ACCOUNTTYPETABLE(accountTypeTableID),
            accountHidden INTEGER,
            accountCurrency TEXT,
            accountConversionRateNew REAL
        );

        CREATE TABLE IF NOT EXISTS PARENTCATEGORYTABLE (
            parentCategoryTableID INTEGER PRIMARY KEY,
            parentCategoryName TEXT
        );

        CREATE TABLE IF NOT EXISTS CHILDCATEGORYTABLE (
            categoryTableID INTEGER PRIMARY KEY,
            childCategoryName TEXT,
            parentCategoryID INTEGER REFERENCES PARENTCATEGORYTABLE(parentCategoryTableID)
        );

        CREATE TABLE IF NOT EXISTS ITEMTABLE (
            itemTableID INTEGER PRIMARY KEY,
            itemName TEXT,
            itemAutoFillVisibility INTEGER
        );

        CREATE TABLE IF NOT EXISTS TRANSACTIONTYPETABLE (
            transactionTypeTableID INTEGER PRIMARY KEY,
            transactionTypeName TEXT
        );

        CREATE TABLE IF NOT EXISTS TRANSACTIONSTABLE (
            transactionsTableID INTEGER PRIMARY KEY,
            itemID INTEGER REFERENCES ITEMTABLE(itemTableID),
            amount INTEGER,
            transactionCurrency TEXT,
            conversionRateNew REAL,
            date TEXT,
            transactionTypeID INTEGER REFERENCES TRANSACTIONTYPETABLE(transactionTypeTableID),
            categoryID INTEGER REFERENCES CHILDCATEGORYTABLE(categoryTableID),
            accountID INTEGER REFERENCES ACCOUNTSTABLE(accountsTableID),
            notes TEXT,
            status INTEGER,
            deletedTransaction INTEGER
        );

        CREATE TABLE IF NOT EXISTS LABELSTABLE (
            labelsTableID INTEGER PRIMARY KEY,
            labelName TEXT,
            transactionIDLabels INTEGER REFERENCES TRANSACTIONSTABLE(transactionsTableID)
        );

        CREATE TABLE IF NOT EXISTS PICTURETABLE (
            pictureTableID INTEGER PRIMARY KEY,
            pictureFileName TEXT,
            transactionID INTEGER REFERENCES TRANSACTIONSTABLE(transactionsTableID)
        );

        CREATE TABLE IF NOT EXISTS NOTIFICATIONTABLE (
            smsTableID INTEGER PRIMARY KEY,
            notificationPackageName TEXT,
            notificationAppName TEXT,
            notificationDefaultName TEXT,
            notificationSenderAccountID INTEGER,
            notificationSenderCategoryID INTEGER,
            notificationSenderAmountOrder INTEGER
        );",
    )
}
