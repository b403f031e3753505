use rusqlite::Connection;

use crate::{
    database_id::{AccountId, CategoryId, TransactionId, TransactionTypeId},
    db::create_schema,
};

pub(crate) const CHECKING_ACCOUNT_ID: AccountId = 1;
pub(crate) const CASH_ACCOUNT_ID: AccountId = 2;
pub(crate) const HIDDEN_ACCOUNT_ID: AccountId = 3;

pub(crate) const FOOD_CATEGORY_ID: CategoryId = 10;
pub(crate) const TRANSPORT_CATEGORY_ID: CategoryId = 11;
pub(crate) const SALARY_CATEGORY_ID: CategoryId = 20;

pub(crate) const EXPENSE_TYPE_ID: TransactionTypeId = 3;
pub(crate) const INCOME_TYPE_ID: TransactionTypeId = 4;
pub(crate) const TRANSFER_TYPE_ID: TransactionTypeId = 5;

/// An in-memory database with the Bluecoins tables and no rows.
pub(crate) fn get_test_connection() -> Connection {
    let connection =
        Connection::open_in_memory().expect("Could not initialise in-memory SQLite database");
    create_schema(&connection).expect("Could not create the Bluecoins tables");
    connection
}

/// An in-memory database with accounts, categories and transaction types, but
/// no transactions.
pub(crate) fn get_seeded_connection() -> Connection {
    let connection = get_test_connection();

    connection
        .execute_batch(
            "INSERT INTO ACCOUNTTYPETABLE (accountTypeTableID, accountTypeName)
                VALUES (1, 'Bank'), (2, 'Cash');
             INSERT INTO ACCOUNTSTABLE
                (accountsTableID, accountName, accountTypeID, accountHidden, accountCurrency)
                VALUES
                (1, 'Cuenta corriente', 1, 0, 'EUR'),
                (2, 'Efectivo', 2, 0, 'EUR'),
                (3, 'Antigua', 1, 1, 'USD');
             INSERT INTO PARENTCATEGORYTABLE (parentCategoryTableID, parentCategoryName)
                VALUES (1, 'Gastos'), (2, 'Ingresos');
             INSERT INTO CHILDCATEGORYTABLE (categoryTableID, childCategoryName, parentCategoryID)
                VALUES (10, 'Comida', 1), (11, 'Transporte', 1), (20, 'Salario', 2);
             INSERT INTO TRANSACTIONTYPETABLE (transactionTypeTableID, transactionTypeName)
                VALUES (3, 'Expense'), (4, 'Income'), (5, 'Transfer');",
        )
        .expect("Could not seed the test database");

    connection
}

/// A transaction row to insert directly with SQL.
#[derive(Debug, Clone)]
pub(crate) struct TestTransaction<'a> {
    pub item_name: &'a str,
    pub amount: i64,
    pub date: Option<&'a str>,
    pub transaction_type_id: Option<TransactionTypeId>,
    pub category_id: Option<CategoryId>,
    pub account_id: Option<AccountId>,
}

impl<'a> TestTransaction<'a> {
    pub(crate) fn expense(item_name: &'a str, amount: i64, date: &'a str) -> Self {
        Self {
            item_name,
            amount,
            date: Some(date),
            transaction_type_id: Some(EXPENSE_TYPE_ID),
            category_id: Some(FOOD_CATEGORY_ID),
            account_id: Some(CHECKING_ACCOUNT_ID),
        }
    }
}

/// Insert `transaction`, reusing the item row if one with the same name exists.
#[track_caller]
pub(crate) fn insert_test_transaction(
    transaction: &TestTransaction,
    connection: &Connection,
) -> TransactionId {
    let existing_item: Option<i64> = connection
        .query_row(
            "SELECT itemTableID FROM ITEMTABLE WHERE itemName = ?1",
            [transaction.item_name],
            |row| row.get(0),
        )
        .ok();

    let item_id = match existing_item {
        Some(item_id) => item_id,
        None => {
            connection
                .execute(
                    "INSERT INTO ITEMTABLE (itemName) VALUES (?1)",
                    [transaction.item_name],
                )
                .expect("Could not insert item");
            connection.last_insert_rowid()
        }
    };

    connection
        .execute(
            "INSERT INTO TRANSACTIONSTABLE
                (itemID, amount, transactionCurrency, conversionRateNew, date,
                 transactionTypeID, categoryID, accountID, notes, status, deletedTransaction)
             VALUES (?1, ?2, 'EUR', 1.0, ?3, ?4, ?5, ?6, NULL, 0, 6)",
            (
                item_id,
                transaction.amount,
                transaction.date,
                transaction.transaction_type_id,
                transaction.category_id,
                transaction.account_id,
            ),
        )
        .expect("Could not insert transaction");

    connection.last_insert_rowid()
}

#[track_caller]
pub(crate) fn insert_label(transaction_id: TransactionId, label: &str, connection: &Connection) {
    connection
        .execute(
            "INSERT INTO LABELSTABLE (labelName, transactionIDLabels) VALUES (?1, ?2)",
            (label, transaction_id),
        )
        .expect("Could not insert label");
}
