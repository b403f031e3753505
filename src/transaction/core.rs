//! Defines the core data models and database queries for transactions.

use rusqlite::{Connection, Row};
use time::{
    Date, PrimitiveDateTime, format_description::BorrowedFormatItem, macros::format_description,
};

use crate::{
    Error,
    account::account_exists,
    category::category_exists,
    database_id::{AccountId, CategoryId, ItemId, TransactionId, TransactionTypeId},
};

use super::{item::find_or_create_item, transaction_type::transaction_type_exists};

// ============================================================================
// AMOUNTS AND DATES
// ============================================================================

/// Bluecoins stores amounts as integers in millionths of a currency unit.
pub const MICROS_PER_UNIT: f64 = 1_000_000.0;

/// Convert a stored amount in micro-units to currency units, e.g. `-12_500_000` to `-12.5`.
pub fn micros_to_units(amount: i64) -> f64 {
    amount as f64 / MICROS_PER_UNIT
}

/// The largest amount, in micro-units, that a transaction may have: one billion units.
///
/// Sums over many transactions must still fit in an `i64`.
pub const MAX_AMOUNT_MICROS: i64 = 1_000_000_000 * 1_000_000;

/// Convert an amount in currency units to micro-units, rounding to the nearest micro-unit.
///
/// # Errors
/// Returns [Error::InvalidAmount] if `amount` is infinite, NaN or larger in
/// magnitude than [MAX_AMOUNT_MICROS].
pub fn units_to_micros(amount: f64) -> Result<i64, Error> {
    if !amount.is_finite() || amount.abs() > micros_to_units(MAX_AMOUNT_MICROS) {
        return Err(Error::InvalidAmount);
    }

    Ok((amount * MICROS_PER_UNIT).round() as i64)
}

/// Format an amount in micro-units as a decimal number without losing precision.
///
/// Trailing zeros are dropped, keeping at least two decimal places,
/// e.g. `-2_500_000` is "-2.50" and `12_345_000` is "12.345".
pub fn format_micros(amount: i64) -> String {
    let sign = if amount < 0 { "-" } else { "" };
    let magnitude = amount.unsigned_abs();
    let micros_per_unit = MICROS_PER_UNIT as u64;
    let fraction = format!("{:06}", magnitude % micros_per_unit);
    let fraction = fraction.trim_end_matches('0');

    format!("{sign}{}.{fraction:0<2}", magnitude / micros_per_unit)
}

const DATE_TIME_FORMAT: &[BorrowedFormatItem] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

/// Parse a Bluecoins date, e.g. "2025-01-05 13:45:00".
///
/// Anything after the seconds is ignored. A bare date is read as midnight.
pub fn parse_date_time(text: &str) -> Option<PrimitiveDateTime> {
    let text = text.trim();

    text.get(..19)
        .and_then(|date_time| PrimitiveDateTime::parse(date_time, DATE_TIME_FORMAT).ok())
        .or_else(|| {
            text.get(..10)
                .and_then(|date| Date::parse(date, DATE_FORMAT).ok())
                .map(Date::midnight)
        })
}

/// Format a date and time the way Bluecoins stores them.
pub fn format_date_time(date_time: PrimitiveDateTime) -> String {
    date_time
        .format(DATE_TIME_FORMAT)
        .unwrap_or_else(|_| date_time.to_string())
}

// ============================================================================
// MODELS
// ============================================================================

/// What a transaction does with money, derived from its transaction type name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    Expense,
    Transfer,
    Income,
    Other,
}

impl TransactionKind {
    /// Match a transaction type name in English or Spanish, ignoring case.
    ///
    /// For example, "Expense", "Gastos" and "Nuevo gasto" are all expenses.
    pub fn from_type_name(type_name: Option<&str>) -> Self {
        let Some(type_name) = type_name else {
            return TransactionKind::Other;
        };

        let type_name = type_name.to_lowercase();
        let contains_any = |words: &[&str]| words.iter().any(|word| type_name.contains(word));

        if contains_any(&["expense", "gasto"]) {
            TransactionKind::Expense
        } else if contains_any(&["transfer", "transferencia"]) {
            TransactionKind::Transfer
        } else if contains_any(&["income", "ingreso"]) {
            TransactionKind::Income
        } else {
            TransactionKind::Other
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TransactionKind::Expense => "Expense",
            TransactionKind::Transfer => "Transfer",
            TransactionKind::Income => "Income",
            TransactionKind::Other => "Other",
        }
    }
}

/// A row of the Bluecoins transactions table with the names of the rows it refers to.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// The ID of the item, i.e. the transaction's name.
    pub item_id: Option<ItemId>,
    pub item_name: Option<String>,
    /// The amount in micro-units. Negative for money going out.
    pub amount: i64,
    /// The ISO currency code, e.g. "EUR".
    pub currency: Option<String>,
    /// When the transaction happened, in the phone's local time.
    pub date: Option<PrimitiveDateTime>,
    pub transaction_type_id: Option<TransactionTypeId>,
    pub transaction_type_name: Option<String>,
    pub category_id: Option<CategoryId>,
    pub category_name: Option<String>,
    pub account_id: Option<AccountId>,
    pub account_name: Option<String>,
    pub notes: Option<String>,
}

impl Transaction {
    /// The amount in currency units.
    pub fn amount_units(&self) -> f64 {
        micros_to_units(self.amount)
    }

    pub fn kind(&self) -> TransactionKind {
        TransactionKind::from_type_name(self.transaction_type_name.as_deref())
    }
}

/// The user editable fields of a transaction.
///
/// The date is set when a transaction is created and cannot be changed afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionFields {
    /// The name of the item. Matched to an existing item by name, or created.
    pub item_name: String,
    /// The amount in micro-units.
    pub amount: i64,
    pub currency: Option<String>,
    pub notes: Option<String>,
    pub transaction_type_id: Option<TransactionTypeId>,
    pub category_id: Option<CategoryId>,
    pub account_id: Option<AccountId>,
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// The columns read by [map_transaction_row], with the joins for the names.
pub(crate) const SELECT_TRANSACTION: &str = "SELECT t.transactionsTableID, t.itemID, i.itemName,
        t.amount, t.transactionCurrency, t.date, t.transactionTypeID, tt.transactionTypeName,
        t.categoryID, c.childCategoryName, t.accountID, a.accountName, t.notes
    FROM TRANSACTIONSTABLE t
    LEFT JOIN ITEMTABLE i ON i.itemTableID = t.itemID
    LEFT JOIN TRANSACTIONTYPETABLE tt ON tt.transactionTypeTableID = t.transactionTypeID
    LEFT JOIN CHILDCATEGORYTABLE c ON c.categoryTableID = t.categoryID
    LEFT JOIN ACCOUNTSTABLE a ON a.accountsTableID = t.accountID";

/// Map a row selected with [SELECT_TRANSACTION] to a [Transaction].
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id: TransactionId = row.get(0)?;
    let date_text: Option<String> = row.get(5)?;
    let date = date_text.as_deref().and_then(|text| {
        let date = parse_date_time(text);

        if date.is_none() {
            tracing::warn!("Could not parse the date \"{text}\" of transaction {id}");
        }

        date
    });

    Ok(Transaction {
        id,
        item_id: row.get(1)?,
        item_name: row.get(2)?,
        amount: row.get::<_, Option<i64>>(3)?.unwrap_or(0),
        currency: row.get(4)?,
        date,
        transaction_type_id: row.get(6)?,
        transaction_type_name: row.get(7)?,
        category_id: row.get(8)?,
        category_name: row.get(9)?,
        account_id: row.get(10)?,
        account_name: row.get(11)?,
        notes: row.get(12)?,
    })
}

/// Retrieve a transaction from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid transaction,
/// - or [Error::SqlError] there is some other SQL error.
pub fn get_transaction(id: TransactionId, connection: &Connection) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(&format!(
            "{SELECT_TRANSACTION} WHERE t.transactionsTableID = ?1"
        ))?
        .query_one([id], map_transaction_row)?;

    Ok(transaction)
}

fn transaction_exists(id: TransactionId, connection: &Connection) -> Result<bool, Error> {
    connection
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM TRANSACTIONSTABLE WHERE transactionsTableID = ?1)",
            [id],
            |row| row.get(0),
        )
        .map_err(Error::from)
}

/// Check that the item name is not blank and that the IDs refer to existing rows.
///
/// # Errors
/// Returns [Error::EmptyItemName], [Error::InvalidAmount],
/// [Error::InvalidTransactionType], [Error::InvalidCategory] or
/// [Error::InvalidAccount] for the first field that is invalid.
pub fn validate_fields(fields: &TransactionFields, connection: &Connection) -> Result<(), Error> {
    if fields.item_name.trim().is_empty() {
        return Err(Error::EmptyItemName);
    }

    if fields.amount.unsigned_abs() > MAX_AMOUNT_MICROS.unsigned_abs() {
        return Err(Error::InvalidAmount);
    }

    if let Some(type_id) = fields.transaction_type_id {
        if !transaction_type_exists(type_id, connection)? {
            return Err(Error::InvalidTransactionType(type_id));
        }
    }

    if let Some(category_id) = fields.category_id {
        if !category_exists(category_id, connection)? {
            return Err(Error::InvalidCategory(category_id));
        }
    }

    if let Some(account_id) = fields.account_id {
        if !account_exists(account_id, connection)? {
            return Err(Error::InvalidAccount(account_id));
        }
    }

    Ok(())
}

/// Create a new transaction and return its ID.
///
/// New transactions get the same defaults as transactions created in the
/// Bluecoins app: a conversion rate of 1, status 0 and deleted flag 6.
///
/// # Errors
/// Returns the errors from [validate_fields], or [Error::SqlError] if there is
/// some other SQL error. Nothing is written if an error is returned.
pub fn create_transaction(
    fields: &TransactionFields,
    date: Option<PrimitiveDateTime>,
    connection: &Connection,
) -> Result<TransactionId, Error> {
    let sql_transaction = connection.unchecked_transaction()?;

    validate_fields(fields, &sql_transaction)?;
    let item_id = find_or_create_item(fields.item_name.trim(), &sql_transaction)?;

    sql_transaction.execute(
        "INSERT INTO TRANSACTIONSTABLE
            (itemID, amount, transactionCurrency, conversionRateNew, date, transactionTypeID,
             categoryID, accountID, notes, status, deletedTransaction)
         VALUES (?1, ?2, ?3, 1.0, ?4, ?5, ?6, ?7, ?8, 0, 6)",
        (
            item_id,
            fields.amount,
            &fields.currency,
            date.map(format_date_time),
            fields.transaction_type_id,
            fields.category_id,
            fields.account_id,
            &fields.notes,
        ),
    )?;
    let id = sql_transaction.last_insert_rowid();

    sql_transaction.commit()?;

    Ok(id)
}

/// Update the editable fields of the transaction with `id`.
///
/// # Errors
/// Returns [Error::UpdateMissingTransaction] if `id` does not refer to a
/// transaction, the errors from [validate_fields], or [Error::SqlError] if
/// there is some other SQL error. Nothing is written if an error is returned.
pub fn update_transaction(
    id: TransactionId,
    fields: &TransactionFields,
    connection: &Connection,
) -> Result<(), Error> {
    let sql_transaction = connection.unchecked_transaction()?;

    if !transaction_exists(id, &sql_transaction)? {
        return Err(Error::UpdateMissingTransaction);
    }

    validate_fields(fields, &sql_transaction)?;
    let item_id = find_or_create_item(fields.item_name.trim(), &sql_transaction)?;

    sql_transaction.execute(
        "UPDATE TRANSACTIONSTABLE
         SET itemID = ?1, amount = ?2, transactionCurrency = ?3, notes = ?4,
             transactionTypeID = ?5, categoryID = ?6, accountID = ?7
         WHERE transactionsTableID = ?8",
        (
            item_id,
            fields.amount,
            &fields.currency,
            &fields.notes,
            fields.transaction_type_id,
            fields.category_id,
            fields.account_id,
            id,
        ),
    )?;

    sql_transaction.commit()?;

    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod conversion_tests {
    use time::macros::datetime;

    use crate::Error;

    use super::{
        MAX_AMOUNT_MICROS, format_date_time, format_micros, micros_to_units, parse_date_time,
        units_to_micros,
    };

    #[test]
    fn converts_micro_units() {
        assert_eq!(micros_to_units(-12_500_000), -12.5);
        assert_eq!(micros_to_units(0), 0.0);
        assert_eq!(units_to_micros(19.99), Ok(19_990_000));
        assert_eq!(units_to_micros(-0.1), Ok(-100_000));
        assert_eq!(units_to_micros(-1_000_000_000.0), Ok(-MAX_AMOUNT_MICROS));
    }

    #[test]
    fn rejects_amounts_that_cannot_be_stored() {
        for amount in [
            f64::INFINITY,
            f64::NEG_INFINITY,
            f64::NAN,
            1e300,
            -1e300,
            1_000_000_000.5,
        ] {
            assert_eq!(
                units_to_micros(amount),
                Err(Error::InvalidAmount),
                "{amount} should be rejected"
            );
        }
    }

    #[test]
    fn formats_micro_units_without_rounding() {
        assert_eq!(format_micros(-2_500_000), "-2.50");
        assert_eq!(format_micros(12_345_000), "12.345");
        assert_eq!(format_micros(-1), "-0.000001");
        assert_eq!(format_micros(0), "0.00");
        assert_eq!(format_micros(1_000_000_000_000), "1000000.00");
        assert_eq!(format_micros(i64::MIN), "-9223372036854.775808");
    }

    #[test]
    fn parses_bluecoins_dates() {
        assert_eq!(
            parse_date_time("2025-01-05 13:45:00"),
            Some(datetime!(2025-01-05 13:45:00))
        );
        assert_eq!(
            parse_date_time("2025-01-05 13:45:00.123"),
            Some(datetime!(2025-01-05 13:45:00))
        );
        assert_eq!(parse_date_time("2025-01-05"), Some(datetime!(2025-01-05 0:00)));
        assert_eq!(parse_date_time("yesterday"), None);
        assert_eq!(parse_date_time(""), None);
    }

    #[test]
    fn formats_dates_like_bluecoins() {
        assert_eq!(
            format_date_time(datetime!(2024-12-31 08:05:09)),
            "2024-12-31 08:05:09"
        );
    }
}
