use rusqlite::{Connection, Row};

use crate::{Error, database_id::AccountId};

/// An account from the Bluecoins accounts table, e.g. a bank account or a wallet.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    /// The id for the account.
    pub id: AccountId,
    /// The name of the account.
    pub name: Option<String>,
    /// The name of the account type, e.g. "Bank" or "Cash".
    pub type_name: Option<String>,
    /// The ISO currency code of the account, e.g. "EUR".
    pub currency: Option<String>,
    /// Whether the account is hidden in the Bluecoins app.
    pub hidden: bool,
}

const SELECT_ACCOUNT: &str = "SELECT a.accountsTableID, a.accountName, t.accountTypeName,
        a.accountCurrency, COALESCE(a.accountHidden, 0)
    FROM ACCOUNTSTABLE a
    LEFT JOIN ACCOUNTTYPETABLE t ON t.accountTypeTableID = a.accountTypeID";

pub fn map_row_to_account(row: &Row) -> Result<Account, rusqlite::Error> {
    let id = row.get(0)?;
    let name = row.get(1)?;
    let type_name = row.get(2)?;
    let currency = row.get(3)?;
    let hidden: i64 = row.get(4)?;

    Ok(Account {
        id,
        name,
        type_name,
        currency,
        hidden: hidden != 0,
    })
}

/// Get all accounts, ordered by name.
///
/// # Errors
/// Returns an [Error::SqlError] if there is an SQL error.
pub fn get_all_accounts(connection: &Connection) -> Result<Vec<Account>, Error> {
    connection
        .prepare(&format!(
            "{SELECT_ACCOUNT} ORDER BY a.accountName COLLATE NOCASE ASC, a.accountsTableID ASC"
        ))?
        .query_map([], map_row_to_account)?
        .map(|account_result| account_result.map_err(Error::from))
        .collect()
}

/// Get the account with `id`.
///
/// # Errors
/// Returns [Error::NotFound] if `id` does not refer to an account, or
/// [Error::SqlError] if there is some other SQL error.
pub fn get_account(id: AccountId, connection: &Connection) -> Result<Account, Error> {
    connection
        .prepare(&format!("{SELECT_ACCOUNT} WHERE a.accountsTableID = ?1"))?
        .query_one([id], map_row_to_account)
        .map_err(Error::from)
}

/// Count the transactions that belong to the account with `id`.
pub fn count_account_transactions(id: AccountId, connection: &Connection) -> Result<u64, Error> {
    connection
        .query_row(
            "SELECT COUNT(*) FROM TRANSACTIONSTABLE WHERE accountID = ?1",
            [id],
            |row| row.get(0),
        )
        .map_err(Error::from)
}

/// Whether `id` refers to a row in the accounts table.
pub fn account_exists(id: AccountId, connection: &Connection) -> Result<bool, Error> {
    connection
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM ACCOUNTSTABLE WHERE accountsTableID = ?1)",
            [id],
            |row| row.get(0),
        )
        .map_err(Error::from)
}
