//! Defines the endpoint for creating a new transaction.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use rusqlite::Connection;
use time::{PrimitiveDateTime, Time};

use crate::{
    AppState, Error,
    endpoints::{self, format_endpoint},
    timezone::local_today,
};

use super::{core::create_transaction, form::TransactionForm};

/// The state needed to create a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The timezone used to pick the date when the form does not have one.
    pub local_timezone: String,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// A route handler for creating a new transaction, redirects to the new
/// transaction's page on success.
///
/// Transactions without a date are given today's date in the local timezone.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    Form(form): Form<TransactionForm>,
) -> Response {
    let date = match form.date {
        Some(date) => date,
        None => match local_today(&state.local_timezone) {
            Ok(today) => today,
            Err(error) => return error.into_alert_response(),
        },
    };
    let date_time = PrimitiveDateTime::new(date, Time::MIDNIGHT);
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

    let transaction_id = match create_transaction(&fields, Some(date_time), &connection) {
        Ok(transaction_id) => transaction_id,
        Err(error) => {
            tracing::error!("Could not create transaction: {error}");
            return error.into_alert_response();
        }
    };

    tracing::info!("Created transaction {transaction_id}");

    (
        HxRedirect(format_endpoint(endpoints::TRANSACTION_VIEW, transaction_id)),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}
