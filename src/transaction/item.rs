//! Items are the names Bluecoins gives to transactions, e.g. "Supermercado".
//!
//! Transactions refer to an item by ID, and the same item is shared by every
//! transaction with that name.

use rusqlite::{Connection, OptionalExtension};

use crate::{Error, database_id::ItemId};

/// Get the ID of the item called `name`, creating the item if it does not exist.
///
/// Names are matched exactly. If there are several items with the same name,
/// the oldest one is used.
pub fn find_or_create_item(name: &str, connection: &Connection) -> Result<ItemId, Error> {
    let existing_item = connection
        .query_row(
            "SELECT itemTableID FROM ITEMTABLE WHERE itemName = ?1 ORDER BY itemTableID LIMIT 1",
            [name],
            |row| row.get(0),
        )
        .optional()?;

    if let Some(item_id) = existing_item {
        return Ok(item_id);
    }

    connection.execute(
        "INSERT INTO ITEMTABLE (itemName, itemAutoFillVisibility) VALUES (?1, 0)",
        [name],
    )?;

    let item_id = connection.last_insert_rowid();
    tracing::debug!("Created item {item_id} for \"{name}\"");

    Ok(item_id)
}

#[cfg(test)]
mod tests {
    use crate::test_utils::get_test_connection;

    use super::find_or_create_item;

    #[test]
    fn creates_missing_item() {
        let connection = get_test_connection();

        let item_id = find_or_create_item("Supermercado", &connection).unwrap();

        let name: String = connection
            .query_row(
                "SELECT itemName FROM ITEMTABLE WHERE itemTableID = ?1",
                [item_id],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(name, "Supermercado");
    }

    #[test]
    fn reuses_existing_item() {
        let connection = get_test_connection();
        let first_id = find_or_create_item("Supermercado", &connection).unwrap();

        let second_id = find_or_create_item("Supermercado", &connection).unwrap();

        assert_eq!(first_id, second_id);
        let item_count: i64 = connection
            .query_row("SELECT COUNT(*) FROM ITEMTABLE", [], |row| row.get(0))
            .unwrap();
        assert_eq!(item_count, 1);
    }

    #[test]
    fn names_are_case_sensitive() {
        let connection = get_test_connection();
        let first_id = find_or_create_item("Café", &connection).unwrap();

        let second_id = find_or_create_item("café", &connection).unwrap();

        assert_ne!(first_id, second_id);
    }
}
