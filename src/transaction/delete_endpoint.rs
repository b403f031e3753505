use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use rusqlite::Connection;

use crate::{Error, database_id::TransactionId, endpoints};

use super::detail_page::TransactionState;

/// A route handler for deleting a transaction, redirects to the transactions
/// page on success or responds with an alert.
pub async fn delete_transaction_endpoint(
    State(state): State<TransactionState>,
    Path(transaction_id): Path<TransactionId>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    if let Err(error) = delete_transaction(transaction_id, &connection) {
        tracing::error!("Could not delete transaction {transaction_id}: {error}");
        return error.into_alert_response();
    }

    tracing::info!("Deleted transaction {transaction_id}");

    (
        HxRedirect(endpoints::TRANSACTIONS_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}

/// Delete the transaction with `id` along with its labels.
///
/// Pictures are kept but no longer refer to the transaction.
///
/// # Errors
/// Returns [Error::DeleteMissingTransaction] if `id` does not refer to a
/// transaction, or [Error::SqlError] if there is some other SQL error.
/// Nothing is changed if an error is returned.
pub(crate) fn delete_transaction(id: TransactionId, connection: &Connection) -> Result<(), Error> {
    let sql_transaction = connection.unchecked_transaction()?;

    sql_transaction.execute("DELETE FROM LABELSTABLE WHERE transactionIDLabels = ?1", [id])?;
    sql_transaction.execute(
        "UPDATE PICTURETABLE SET transactionID = NULL WHERE transactionID = ?1",
        [id],
    )?;
    let rows_affected = sql_transaction.execute(
        "DELETE FROM TRANSACTIONSTABLE WHERE transactionsTableID = ?1",
        [id],
    )?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingTransaction);
    }

    sql_transaction.commit()?;

    Ok(())
}
