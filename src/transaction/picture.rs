//! Pictures (receipts) attached to transactions in the Bluecoins app.
//!
//! Only the file names are stored in the database; the images stay on the phone.

use rusqlite::Connection;

use crate::{Error, database_id::TransactionId};

/// Get the file names of the pictures attached to a transaction.
pub fn get_picture_file_names(
    transaction_id: TransactionId,
    connection: &Connection,
) -> Result<Vec<String>, Error> {
    connection
        .prepare(
            "SELECT pictureFileName FROM PICTURETABLE
             WHERE transactionID = ?1 AND pictureFileName IS NOT NULL
             ORDER BY pictureTableID",
        )?
        .query_map([transaction_id], |row| row.get(0))?
        .map(|maybe_name| maybe_name.map_err(Error::from))
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::test_utils::get_test_connection;

    use super::get_picture_file_names;

    #[test]
    fn gets_pictures_for_transaction() {
        let connection = get_test_connection();
        connection
            .execute_batch(
                "INSERT INTO PICTURETABLE (pictureFileName, transactionID) VALUES
                    ('ticket.jpg', 1), ('factura.png', 1), ('otro.jpg', 2), (NULL, 1);",
            )
            .unwrap();

        let names = get_picture_file_names(1, &connection).unwrap();

        assert_eq!(names, ["ticket.jpg", "factura.png"]);
    }
}
