//! Defines the route handler for the page for editing a transaction.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    Error,
    database_id::TransactionId,
    endpoints::{self, format_endpoint},
    html::{BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, base, link, loading_spinner},
    navigation::NavBar,
};

use super::{
    core::{Transaction, get_transaction},
    detail_page::TransactionState,
    form::{FormChoices, TransactionFormDefaults, get_form_choices, transaction_form_fields},
};

fn edit_transaction_view(transaction: &Transaction, choices: &FormChoices) -> Markup {
    let nav_bar = NavBar::new(endpoints::TRANSACTIONS_VIEW).into_html();
    let edit_url = format_endpoint(endpoints::EDIT_TRANSACTION_VIEW, transaction.id);
    let transaction_url = format_endpoint(endpoints::TRANSACTION_VIEW, transaction.id);
    let spinner = loading_spinner();
    let defaults = TransactionFormDefaults {
        item_name: transaction.item_name.as_deref(),
        amount: Some(transaction.amount),
        currency: transaction.currency.as_deref(),
        notes: transaction.notes.as_deref(),
        transaction_type_id: transaction.transaction_type_id,
        category_id: transaction.category_id,
        account_id: transaction.account_id,
        date: None,
    };

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            form
                hx-put=(edit_url)
                hx-target-error="#alert-container"
                class="w-full space-y-4 md:space-y-6"
            {
                h2 class="text-xl font-bold" { "Edit Transaction" }

                (transaction_form_fields(&defaults, choices))

                button type="submit" id="submit-button" tabindex="0" class=(BUTTON_PRIMARY_STYLE)
                {
                    span
                        id="indicator"
                        class="inline htmx-indicator"
                    {
                        (spinner)
                    }
                    " Update Transaction"
                }
            }

            p class="mt-4" { (link(&transaction_url, "Cancel")) }
        }
    };

    base("Edit Transaction", &[], &content)
}

/// Renders the page for editing a transaction, or the 404 page if it does not exist.
pub async fn get_edit_transaction_page(
    State(state): State<TransactionState>,
    Path(transaction_id): Path<TransactionId>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let transaction = get_transaction(transaction_id, &connection)?;
    let choices = get_form_choices(&connection).inspect_err(|error| {
        tracing::error!("Failed to retrieve form options for edit transaction page: {error}")
    })?;

    Ok(edit_transaction_view(&transaction, &choices).into_response())
}
