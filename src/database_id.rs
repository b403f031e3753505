//! Database ID type definitions.
//!
//! The Bluecoins schema uses SQLite integer primary keys for every table.

/// Alias for the integer type used for mapping to database IDs.
pub type DatabaseId = i64;
/// The primary key of a row in `TRANSACTIONSTABLE`.
pub type TransactionId = DatabaseId;
/// The primary key of a row in `ACCOUNTSTABLE`.
pub type AccountId = DatabaseId;
/// The primary key of a row in `CHILDCATEGORYTABLE`.
pub type CategoryId = DatabaseId;
/// The primary key of a row in `TRANSACTIONTYPETABLE`.
pub type TransactionTypeId = DatabaseId;
/// The primary key of a row in `ITEMTABLE`.
pub type ItemId = DatabaseId;
