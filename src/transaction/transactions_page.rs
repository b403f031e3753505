//! The transactions page: a paged list of transactions, newest first, that can
//! be filtered by label.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use axum_htmx::HxRequest;
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error,
    label::{get_label_names, get_labels_for_transactions},
    pagination::{Page, PaginationConfig},
};

use super::{
    query::{count_transactions, get_page_of_transactions},
    view::{
        TransactionTableRow, TransactionsPage, transaction_rows_view, transactions_url,
        transactions_view,
    },
};

/// The state needed for the transactions page.
#[derive(Debug, Clone)]
pub struct TransactionsViewState {
    /// The database connection for reading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// Controls how many transactions are shown per page.
    pub pagination_config: PaginationConfig,
}

impl FromRef<AppState> for TransactionsViewState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            pagination_config: state.pagination_config.clone(),
        }
    }
}

/// The query parameters for the transactions page.
#[derive(Debug, Default, Deserialize)]
pub struct TransactionsQuery {
    /// The 1-based page number. Kept as text so that invalid numbers give the first page.
    pub page: Option<String>,
    /// Only show transactions with this label. Empty means no filter.
    pub label: Option<String>,
}

/// Render a page of transactions.
///
/// HTMX requests get just the table rows, so that the next page can be
/// appended to the table as the user scrolls.
pub async fn get_transactions_page(
    State(state): State<TransactionsViewState>,
    HxRequest(is_htmx_request): HxRequest,
    Query(query): Query<TransactionsQuery>,
) -> Result<Response, Error> {
    let label = query.label.as_deref().filter(|label| !label.is_empty());

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let transaction_count = count_transactions(label, &connection)
        .inspect_err(|error| tracing::error!("could not count transactions: {error}"))?;
    let page = Page::resolve(
        query.page.as_deref(),
        transaction_count,
        state.pagination_config.page_size,
    );

    let transactions = get_page_of_transactions(label, &page, &connection)
        .inspect_err(|error| tracing::error!("could not get transactions: {error}"))?;
    let transaction_ids: Vec<_> = transactions.iter().map(|transaction| transaction.id).collect();
    let mut labels = get_labels_for_transactions(&transaction_ids, &connection)?;

    let rows: Vec<TransactionTableRow> = transactions
        .into_iter()
        .map(|transaction| {
            let transaction_labels = labels.remove(&transaction.id).unwrap_or_default();
            TransactionTableRow::new(transaction, transaction_labels)
        })
        .collect();

    if is_htmx_request {
        let next_page_url = page
            .has_next()
            .then(|| transactions_url(Some(page.number + 1), label));

        return Ok(transaction_rows_view(&rows, next_page_url.as_deref()).into_response());
    }

    let label_names = get_label_names(&connection)?;

    Ok(transactions_view(TransactionsPage {
        rows: &rows,
        label_names: &label_names,
        selected_label: label,
        page,
        max_pages: state.pagination_config.max_pages,
        transaction_count,
    })
    .into_response())
}
