use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;

use bluecoins_web::create_schema;

/// A utility for creating a sample Bluecoins database for bluecoins_web.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'bluecoins.fydb').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'bluecoins.fydb').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    create_schema(&conn)?;

    println!("Creating accounts, categories and transaction types...");

    conn.execute_batch(
        "INSERT INTO ACCOUNTTYPETABLE (accountTypeTableID, accountTypeName, accountingGroupID)
            VALUES (1, 'Bank', 1), (2, 'Cash', 1);
         INSERT INTO ACCOUNTSTABLE
            (accountsTableID, accountName, accountTypeID, accountHidden, accountCurrency,
             accountConversionRateNew)
            VALUES
            (1, 'Checking', 1, 0, 'EUR', 1.0),
            (2, 'Wallet', 2, 0, 'EUR', 1.0),
            (3, 'Savings', 1, 1, 'EUR', 1.0);
         INSERT INTO PARENTCATEGORYTABLE (parentCategoryTableID, parentCategoryName)
            VALUES (1, 'Expenses'), (2, 'Income');
         INSERT INTO CHILDCATEGORYTABLE (categoryTableID, childCategoryName, parentCategoryID)
            VALUES (10, 'Groceries', 1), (11, 'Transport', 1), (12, 'Eating out', 1),
                   (20, 'Salary', 2);
         INSERT INTO TRANSACTIONTYPETABLE (transactionTypeTableID, transactionTypeName)
            VALUES (2, 'New Account'), (3, 'Expense'), (4, 'Income'), (5, 'Transfer');",
    )?;

    println!("Creating transactions...");

    // (item, amount in micro-units, date, type, category, account, labels)
    let transactions: [(&str, i64, &str, i64, i64, i64, &[&str]); 8] = [
        ("Salary", 2_500_000_000, "2025-01-01 09:00:00", 4, 20, 1, &["work"]),
        ("Supermarket", -64_350_000, "2025-01-03 18:12:00", 3, 10, 1, &[]),
        ("Bus pass", -40_000_000, "2025-01-05 08:00:00", 3, 11, 2, &["commute"]),
        ("Pizza", -23_500_000, "2025-01-18 21:30:00", 3, 12, 2, &["holiday", "friends"]),
        ("Savings", -500_000_000, "2025-01-28 10:00:00", 5, 10, 1, &[]),
        ("Savings", 500_000_000, "2025-01-28 10:00:00", 5, 10, 3, &[]),
        ("Salary", 2_500_000_000, "2025-02-01 09:00:00", 4, 20, 1, &["work"]),
        ("Supermarket", -51_200_000, "2025-02-04 17:45:00", 3, 10, 1, &[]),
    ];

    for (item_name, amount, date, type_id, category_id, account_id, labels) in transactions {
        let item_id = get_or_create_item(item_name, &conn)?;

        conn.execute(
            "INSERT INTO TRANSACTIONSTABLE
                (itemID, amount, transactionCurrency, conversionRateNew, date,
                 transactionTypeID, categoryID, accountID, notes, status, deletedTransaction)
             VALUES (?1, ?2, 'EUR', 1.0, ?3, ?4, ?5, ?6, '', 0, 6)",
            (item_id, amount, date, type_id, category_id, account_id),
        )?;
        let transaction_id = conn.last_insert_rowid();

        for label in labels {
            conn.execute(
                "INSERT INTO LABELSTABLE (labelName, transactionIDLabels) VALUES (?1, ?2)",
                (label, transaction_id),
            )?;
        }

        if item_name == "Pizza" {
            conn.execute(
                "INSERT INTO PICTURETABLE (pictureFileName, transactionID) VALUES (?1, ?2)",
                ("receipt_pizza.jpg", transaction_id),
            )?;
        }
    }

    println!("Success!");

    Ok(())
}

fn get_or_create_item(item_name: &str, conn: &Connection) -> Result<i64, rusqlite::Error> {
    let existing = conn.query_row(
        "SELECT itemTableID FROM ITEMTABLE WHERE itemName = ?1",
        [item_name],
        |row| row.get(0),
    );

    match existing {
        Ok(item_id) => Ok(item_id),
        Err(rusqlite::Error::QueryReturnedNoRows) => {
            conn.execute(
                "INSERT INTO ITEMTABLE (itemName, itemAutoFillVisibility) VALUES (?1, 0)",
                [item_name],
            )?;
            Ok(conn.last_insert_rowid())
        }
        Err(error) => Err(error),
    }
}
