//! Defines the endpoint for updating a transaction.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;

use crate::{
    Error,
    database_id::TransactionId,
    endpoints::{self, format_endpoint},
};

use super::{core::update_transaction, detail_page::TransactionState, form::TransactionForm};

/// A route handler for updating a transaction, redirects to the transaction's
/// page on success.
///
/// The form's date is ignored: the date of an existing transaction is not editable.
pub async fn edit_transaction_endpoint(
    State(state): State<TransactionState>,
    Path(transaction_id): Path<TransactionId>,
    Form(form): Form<TransactionForm>,
) -> Response {
    let fields = match form.to_fields() {
        Ok(fields) => fields,
        Err(error) => {
            tracing::debug!("Rejected transaction form: {error}");
            return error.into_alert_response();
        }
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    if let Err(error) = update_transaction(transaction_id, &fields, &connection) {
        tracing::error!("Could not update transaction {transaction_id}: {error}");
        return error.into_alert_response();
    }

    (
        HxRedirect(format_endpoint(endpoints::TRANSACTION_VIEW, transaction_id)),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Path, State},
        http::StatusCode,
    };
    use axum_extra::extract::Form;
    use scraper::Selector;
    use time::macros::{date, datetime};

    use crate::{
        test_utils::{
            CASH_ACCOUNT_ID, CHECKING_ACCOUNT_ID, EXPENSE_TYPE_ID, FOOD_CATEGORY_ID,
            INCOME_TYPE_ID, SALARY_CATEGORY_ID, TestTransaction, assert_hx_redirect,
            get_seeded_connection, insert_test_transaction, must_get_form, parse_html_document,
        },
        transaction::{
            TransactionForm, detail_page::TransactionState, edit_page::get_edit_transaction_page,
            get_transaction,
        },
    };

    use super::edit_transaction_endpoint;

    fn form() -> TransactionForm {
        TransactionForm {
            item_name: "Nómina".to_owned(),
            amount: 1500.0,
            date: Some(date!(2030 - 12 - 31)),
            currency: Some("EUR".to_owned()),
            notes: Some("Enero".to_owned()),
            transaction_type_id: Some(INCOME_TYPE_ID),
            category_id: Some(SALARY_CATEGORY_ID),
            account_id: Some(CASH_ACCOUNT_ID),
        }
    }

    fn state_with_transaction() -> (TransactionState, i64) {
        let connection = get_seeded_connection();
        let id = insert_test_transaction(
            &TestTransaction::expense("Pan", -2_500_000, "2025-01-06 09:30:00"),
            &connection,
        );

        let state = TransactionState {
            db_connection: Arc::new(Mutex::new(connection)),
        };

        (state, id)
    }

    #[tokio::test]
    async fn updates_transaction_but_not_date() {
        let (state, id) = state_with_transaction();

        let response = edit_transaction_endpoint(State(state.clone()), Path(id), Form(form())).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(&response, &format!("/transactions/{id}"));
        let connection = state.db_connection.lock().unwrap();
        let transaction = get_transaction(id, &connection).unwrap();
        assert_eq!(transaction.item_name.as_deref(), Some("Nómina"));
        assert_eq!(transaction.amount, 1_500_000_000);
        assert_eq!(transaction.notes.as_deref(), Some("Enero"));
        assert_eq!(transaction.transaction_type_id, Some(INCOME_TYPE_ID));
        assert_eq!(transaction.category_id, Some(SALARY_CATEGORY_ID));
        assert_eq!(transaction.account_id, Some(CASH_ACCOUNT_ID));
        assert_eq!(transaction.date, Some(datetime!(2025 - 01 - 06 09:30:00)));
    }

    #[tokio::test]
    async fn saving_prefilled_amount_keeps_sub_cent_precision() {
        let connection = get_seeded_connection();
        let id = insert_test_transaction(
            &TestTransaction::expense("Gasolina", -12_345_000, "2025-01-06 09:30:00"),
            &connection,
        );
        let state = TransactionState {
            db_connection: Arc::new(Mutex::new(connection)),
        };
        let response = get_edit_transaction_page(State(state.clone()), Path(id))
            .await
            .unwrap();
        let document = parse_html_document(response).await;
        let amount = must_get_form(&document)
            .select(&Selector::parse("input[name=amount]").unwrap())
            .next()
            .and_then(|input| input.value().attr("value"))
            .expect("Could not find amount value")
            .to_owned();
        let form = TransactionForm {
            item_name: "Gasolina".to_owned(),
            amount: amount.parse().unwrap(),
            date: None,
            currency: Some("EUR".to_owned()),
            notes: Some("Repsol".to_owned()),
            transaction_type_id: Some(EXPENSE_TYPE_ID),
            category_id: Some(FOOD_CATEGORY_ID),
            account_id: Some(CHECKING_ACCOUNT_ID),
        };

        let response = edit_transaction_endpoint(State(state.clone()), Path(id), Form(form)).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let connection = state.db_connection.lock().unwrap();
        let transaction = get_transaction(id, &connection).unwrap();
        assert_eq!(transaction.notes.as_deref(), Some("Repsol"));
        assert_eq!(transaction.amount, -12_345_000);
    }

    #[tokio::test]
    async fn infinite_amount_is_rejected() {
        let (state, id) = state_with_transaction();
        let form = TransactionForm {
            amount: f64::INFINITY,
            ..form()
        };

        let response = edit_transaction_endpoint(State(state.clone()), Path(id), Form(form)).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let connection = state.db_connection.lock().unwrap();
        let transaction = get_transaction(id, &connection).unwrap();
        assert_eq!(transaction.amount, -2_500_000);
    }

    #[tokio::test]
    async fn missing_transaction_gives_404_alert() {
        let (state, _) = state_with_transaction();

        let response = edit_transaction_endpoint(State(state), Path(999), Form(form())).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn unknown_category_is_rejected() {
        let (state, id) = state_with_transaction();
        let form = TransactionForm {
            category_id: Some(999),
            ..form()
        };

        let response = edit_transaction_endpoint(State(state.clone()), Path(id), Form(form)).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let connection = state.db_connection.lock().unwrap();
        let transaction = get_transaction(id, &connection).unwrap();
        assert_eq!(transaction.item_name.as_deref(), Some("Pan"));
    }
}
