//! The page asking the user to confirm deleting a transaction.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    Error,
    database_id::TransactionId,
    endpoints::{self, format_endpoint},
    html::{BUTTON_DELETE_STYLE, FORM_CONTAINER_STYLE, amount_class, base, format_amount, link},
    label::get_transaction_labels,
    locale::day_heading,
    navigation::NavBar,
};

use super::{
    core::{Transaction, get_transaction},
    detail_page::TransactionState,
};

fn delete_transaction_view(transaction: &Transaction, label_count: usize) -> Markup {
    let nav_bar = NavBar::new(endpoints::TRANSACTIONS_VIEW).into_html();
    let delete_url = format_endpoint(endpoints::TRANSACTION_API, transaction.id);
    let transaction_url = format_endpoint(endpoints::TRANSACTION_VIEW, transaction.id);
    let name = transaction.item_name.as_deref().unwrap_or("(no name)");
    let amount = transaction.amount_units();

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            section class="w-full space-y-4"
            {
                h2 class="text-xl font-bold" { "Delete Transaction" }

                p
                {
                    "Delete \"" (name) "\" on "
                    (day_heading(transaction.date.map(|date_time| date_time.date())))
                    " for "
                    span class=(amount_class(amount)) { (format_amount(amount)) }
                    "?"
                }

                @if label_count > 0 {
                    p data-label-warning class="text-sm"
                    {
                        "Its " (label_count) " label(s) will also be deleted."
                    }
                }

                button
                    type="button"
                    hx-delete=(delete_url)
                    hx-target-error="#alert-container"
                    class=(BUTTON_DELETE_STYLE)
                {
                    "Delete"
                }

                p { (link(&transaction_url, "Cancel")) }
            }
        }
    };

    base("Delete Transaction", &[], &content)
}

/// Renders the confirmation page for deleting a transaction, or the 404 page
/// if it does not exist.
pub async fn get_delete_transaction_page(
    State(state): State<TransactionState>,
    Path(transaction_id): Path<TransactionId>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let transaction = get_transaction(transaction_id, &connection)?;
    let labels = get_transaction_labels(transaction_id, &connection)?;

    Ok(delete_transaction_view(&transaction, labels.len()).into_response())
}
