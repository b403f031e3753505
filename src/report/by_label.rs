//! The Excel export of transactions, optionally filtered by label, with one
//! sheet per month.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use axum::{
    extract::{FromRef, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use rust_xlsxwriter::{Format, Workbook};
use serde::Deserialize;
use time::{format_description::BorrowedFormatItem, macros::format_description};

use crate::{
    AppState, Error,
    database_id::ItemId,
    endpoints,
    html::{PAGE_CONTAINER_STYLE, base, link},
    locale::month_sheet_name,
    navigation::NavBar,
    transaction::{Transaction, get_transactions_for_export},
};

/// The MIME type of an .xlsx file.
pub(crate) const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

const HEADER_ROW: [&str; 6] = [
    "ID Transaction",
    "Date",
    "Transaction name",
    "Income",
    "Expense",
    "Transaction type",
];

const CELL_DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[day]/[month]/[year]");

/// The state needed for the label report.
#[derive(Debug, Clone)]
pub struct LabelReportState {
    /// The database connection for reading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for LabelReportState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The query parameters for the label report.
#[derive(Debug, Default, Deserialize)]
pub struct LabelReportQuery {
    /// Only export transactions with this label. Blank means every transaction.
    pub label: Option<String>,
}

/// Drop the positive leg of transfers.
///
/// Bluecoins stores a transfer as two transactions with the same item, one
/// negative and one positive. When an item appears more than once, only its
/// negative and zero amount transactions are kept.
pub(crate) fn suppress_duplicate_transfers(transactions: Vec<Transaction>) -> Vec<Transaction> {
    let mut item_counts: HashMap<ItemId, usize> = HashMap::new();

    for item_id in transactions.iter().filter_map(|transaction| transaction.item_id) {
        *item_counts.entry(item_id).or_default() += 1;
    }

    transactions
        .into_iter()
        .filter(|transaction| {
            let is_duplicated = transaction
                .item_id
                .and_then(|item_id| item_counts.get(&item_id))
                .is_some_and(|count| *count > 1);

            !(is_duplicated && transaction.amount > 0)
        })
        .collect()
}

/// Group transactions by the Spanish name of their month, e.g. "enero 2025",
/// keeping the order in which each month first appears.
pub(crate) fn group_by_month(transactions: &[Transaction]) -> Vec<(String, Vec<&Transaction>)> {
    let mut months: Vec<(String, Vec<&Transaction>)> = Vec::new();

    for transaction in transactions {
        let sheet_name = month_sheet_name(transaction.date.map(|date_time| date_time.date()));

        match months.iter_mut().find(|(name, _)| *name == sheet_name) {
            Some((_, month)) => month.push(transaction),
            None => months.push((sheet_name, vec![transaction])),
        }
    }

    months
}

/// The value of one cell of an exported row.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Cell {
    Number(f64),
    Text(String),
    Blank,
}

/// The cells of the row for `transaction`, in the order of [HEADER_ROW].
///
/// Income goes in the income column and expenses, as positive numbers, in the
/// expense column. A zero amount leaves both blank.
///
/// # Errors
/// Returns an [Error::SpreadsheetError] if the date could not be formatted.
pub(crate) fn sheet_row(transaction: &Transaction) -> Result<[Cell; 6], Error> {
    let amount = transaction.amount_units();

    let date = match transaction.date {
        Some(date_time) => Cell::Text(date_time.format(CELL_DATE_FORMAT).map_err(|error| {
            Error::SpreadsheetError(format!("could not format date: {error}"))
        })?),
        None => Cell::Blank,
    };

    let item_name = match (&transaction.item_name, transaction.item_id) {
        (Some(item_name), _) => Cell::Text(item_name.clone()),
        (None, Some(item_id)) => Cell::Text(format!("Item {item_id}")),
        (None, None) => Cell::Blank,
    };

    let (income, expense) = if amount > 0.0 {
        (Cell::Number(amount), Cell::Blank)
    } else if amount < 0.0 {
        (Cell::Blank, Cell::Number(-amount))
    } else {
        (Cell::Blank, Cell::Blank)
    };

    let transaction_type = transaction
        .transaction_type_name
        .clone()
        .map_or(Cell::Blank, Cell::Text);

    Ok([
        Cell::Number(transaction.id as f64),
        date,
        item_name,
        income,
        expense,
        transaction_type,
    ])
}

/// Write one sheet per month and return the bytes of the .xlsx file.
///
/// # Errors
/// Returns an [Error::SpreadsheetError] if the workbook could not be written.
pub(crate) fn build_workbook(months: &[(String, Vec<&Transaction>)]) -> Result<Vec<u8>, Error> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    for (sheet_name, transactions) in months {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet_name)?;

        for (column, title) in HEADER_ROW.iter().enumerate() {
            worksheet.write_string_with_format(0, column as u16, *title, &header_format)?;
        }

        for (index, transaction) in transactions.iter().enumerate() {
            let row = index as u32 + 1;

            for (column, cell) in sheet_row(transaction)?.into_iter().enumerate() {
                let column = column as u16;

                match cell {
                    Cell::Number(number) => {
                        worksheet.write_number(row, column, number)?;
                    }
                    Cell::Text(text) => {
                        worksheet.write_string(row, column, text)?;
                    }
                    Cell::Blank => {}
                }
            }
        }

        worksheet.autofit();
    }

    Ok(workbook.save_to_buffer()?)
}

/// The name of the downloaded file, e.g. "report_by_label_viaje.xlsx".
///
/// Characters that are not safe in a header value or file name are replaced
/// with underscores.
pub(crate) fn export_file_name(label: Option<&str>) -> String {
    let label: String = label
        .unwrap_or("all")
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    format!("report_by_label_{label}.xlsx")
}

fn no_transactions_view(label: Option<&str>) -> Markup {
    let nav_bar = NavBar::new(endpoints::LABEL_REPORT).into_html();

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="w-full max-w-md space-y-4"
            {
                h1 class="text-xl font-bold" { "Nothing to export" }

                p data-no-transactions
                {
                    @match label {
                        Some(label) => { "No transactions were found with the label \"" (label) "\"." }
                        None => { "No transactions were found." }
                    }
                }

                p { (link(endpoints::TRANSACTIONS_VIEW, "Back to transactions")) }
            }
        }
    );

    base("Nothing to export", &[], &content)
}

/// Responds with an Excel file of the transactions with the label in the
/// query, or of every transaction if there is no label.
///
/// Responds with an HTML page instead if there are no transactions to export.
pub async fn get_label_report(
    State(state): State<LabelReportState>,
    Query(query): Query<LabelReportQuery>,
) -> Result<Response, Error> {
    let label = query
        .label
        .as_deref()
        .filter(|label| !label.trim().is_empty());

    let transactions = {
        let connection = state
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        get_transactions_for_export(label, &connection)
            .inspect_err(|error| tracing::error!("could not get transactions to export: {error}"))?
    };

    let transactions = suppress_duplicate_transfers(transactions);

    if transactions.is_empty() {
        return Ok(no_transactions_view(label).into_response());
    }

    let months = group_by_month(&transactions);
    let workbook = build_workbook(&months)
        .inspect_err(|error| tracing::error!("could not build workbook: {error}"))?;

    tracing::info!(
        "Exporting {} transactions in {} sheets",
        transactions.len(),
        months.len()
    );

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_owned()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", export_file_name(label)),
            ),
        ],
        workbook,
    )
        .into_response())
}
