//! Displays a single account.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    Error,
    account::{Account, accounts_page::AccountState, count_account_transactions, get_account},
    database_id::AccountId,
    endpoints,
    html::{PAGE_CONTAINER_STYLE, base, link},
    navigation::NavBar,
};

fn account_view(account: &Account, transaction_count: u64) -> Markup {
    let nav_bar = NavBar::new(endpoints::ACCOUNTS_VIEW).into_html();
    let name = account.name.as_deref().unwrap_or("Unnamed account");

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="w-full max-w-md space-y-4"
            {
                h1 class="text-xl font-bold" { (name) }

                dl class="grid grid-cols-2 gap-2 text-sm"
                {
                    dt class="font-medium" { "Type" }
                    dd { (account.type_name.as_deref().unwrap_or("")) }

                    dt class="font-medium" { "Currency" }
                    dd { (account.currency.as_deref().unwrap_or("")) }

                    dt class="font-medium" { "Hidden" }
                    dd { @if account.hidden { "Yes" } @else { "No" } }

                    dt class="font-medium" { "Transactions" }
                    dd data-transaction-count { (transaction_count) }
                }

                p { (link(endpoints::ACCOUNTS_VIEW, "Back to accounts")) }
            }
        }
    );

    base(name, &[], &content)
}

/// Renders the page for the account with `account_id`, or the 404 page if it does not exist.
pub async fn get_account_page(
    State(state): State<AccountState>,
    Path(account_id): Path<AccountId>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let account = get_account(account_id, &connection)?;
    let transaction_count = count_account_transactions(account_id, &connection)?;

    Ok(account_view(&account, transaction_count).into_response())
}
