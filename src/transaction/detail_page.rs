//! Displays a single transaction with its labels and pictures.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    database_id::TransactionId,
    endpoints::{self, format_endpoint},
    html::{
        LABEL_BADGE_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE, amount_class, base, format_amount,
        link,
    },
    label::get_transaction_labels,
    locale::day_heading,
    navigation::NavBar,
};

use super::{
    core::{Transaction, get_transaction},
    picture::get_picture_file_names,
};

/// The state needed for the pages that show a single transaction.
#[derive(Debug, Clone)]
pub struct TransactionState {
    /// The database connection for reading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for TransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

fn optional_text(text: Option<&str>) -> &str {
    text.unwrap_or("")
}

fn transaction_view(transaction: &Transaction, labels: &[String], pictures: &[String]) -> Markup {
    let nav_bar = NavBar::new(endpoints::TRANSACTIONS_VIEW).into_html();
    let name = match transaction.item_name.as_deref() {
        Some(name) if !name.is_empty() => name,
        _ => "(no name)",
    };
    let amount = transaction.amount_units();
    let edit_url = format_endpoint(endpoints::EDIT_TRANSACTION_VIEW, transaction.id);
    let delete_url = format_endpoint(endpoints::DELETE_TRANSACTION_VIEW, transaction.id);

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="w-full max-w-md space-y-4"
            {
                h1 class="text-xl font-bold" { (name) }

                dl class="grid grid-cols-2 gap-2 text-sm"
                {
                    dt class="font-medium" { "Date" }
                    dd data-date
                    {
                        (day_heading(transaction.date.map(|date_time| date_time.date())))
                    }

                    dt class="font-medium" { "Amount" }
                    dd data-amount class=(amount_class(amount))
                    {
                        (format_amount(amount))
                        @if let Some(currency) = &transaction.currency {
                            " " (currency)
                        }
                    }

                    dt class="font-medium" { "Kind" }
                    dd data-kind { (transaction.kind().label()) }

                    dt class="font-medium" { "Type" }
                    dd { (optional_text(transaction.transaction_type_name.as_deref())) }

                    dt class="font-medium" { "Category" }
                    dd { (optional_text(transaction.category_name.as_deref())) }

                    dt class="font-medium" { "Account" }
                    dd
                    {
                        @match (transaction.account_id, &transaction.account_name) {
                            (Some(account_id), Some(account_name)) => {
                                (link(&format_endpoint(endpoints::ACCOUNT_VIEW, account_id), account_name))
                            }
                            _ => {}
                        }
                    }

                    dt class="font-medium" { "Notes" }
                    dd { (optional_text(transaction.notes.as_deref())) }
                }

                @if !labels.is_empty() {
                    div
                    {
                        h2 class="font-semibold mb-1" { "Labels" }

                        ul class="flex flex-wrap gap-1" data-labels
                        {
                            @for label in labels {
                                li class=(LABEL_BADGE_STYLE) { (label) }
                            }
                        }
                    }
                }

                @if !pictures.is_empty() {
                    div
                    {
                        h2 class="font-semibold mb-1" { "Pictures" }

                        ul class="list-disc list-inside text-sm" data-pictures
                        {
                            @for picture in pictures {
                                li { (picture) }
                            }
                        }
                    }
                }

                div class="flex gap-4"
                {
                    a href=(edit_url) class=(LINK_STYLE) { "Edit" }
                    a href=(delete_url) class=(LINK_STYLE) { "Delete" }
                    a href=(endpoints::TRANSACTIONS_VIEW) class=(LINK_STYLE) { "Back to transactions" }
                }
            }
        }
    );

    base(name, &[], &content)
}

/// Renders the page for the transaction with `transaction_id`, or the 404 page
/// if it does not exist.
pub async fn get_transaction_page(
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
    let pictures = get_picture_file_names(transaction_id, &connection)?;

    Ok(transaction_view(&transaction, &labels, &pictures).into_response())
}
