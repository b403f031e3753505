//! HTML rendering for the transactions page.

use maud::{Markup, html};
use serde::Serialize;
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};
use unicode_segmentation::UnicodeSegmentation;

use crate::{
    database_id::TransactionId,
    endpoints::{self, format_endpoint},
    html::{
        BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, LABEL_BADGE_STYLE,
        LINK_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE,
        amount_class, base, format_amount, loading_spinner,
    },
    navigation::NavBar,
    pagination::{Page, pagination_view},
};

use super::{Transaction, grouping::group_by_day};

/// The max number of graphemes to display in the transaction table rows before
/// truncating and displaying ellipses.
const MAX_ITEM_NAME_GRAPHEMES: usize = 40;

/// The number of columns in the transactions table.
const COLUMN_COUNT: usize = 5;

/// The transaction data to display in the transactions table.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TransactionTableRow {
    pub(crate) id: TransactionId,
    pub(crate) item_name: String,
    /// The amount in currency units.
    pub(crate) amount: f64,
    pub(crate) currency: Option<String>,
    pub(crate) date: Option<Date>,
    pub(crate) category_name: Option<String>,
    pub(crate) account_name: Option<String>,
    pub(crate) labels: Vec<String>,
    pub(crate) view_url: String,
}

impl TransactionTableRow {
    pub(crate) fn new(transaction: Transaction, labels: Vec<String>) -> Self {
        Self {
            id: transaction.id,
            amount: transaction.amount_units(),
            item_name: transaction.item_name.unwrap_or_default(),
            currency: transaction.currency,
            date: transaction.date.map(|date_time| date_time.date()),
            category_name: transaction.category_name,
            account_name: transaction.account_name,
            labels,
            view_url: format_endpoint(endpoints::TRANSACTION_VIEW, transaction.id),
        }
    }
}

#[derive(Serialize)]
struct TransactionsParams<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    page: Option<u64>,
}

#[derive(Serialize)]
struct ExportParams<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<&'a str>,
}

fn with_query<T: Serialize>(path: &str, params: &T) -> String {
    match serde_urlencoded::to_string(params) {
        Ok(query) if !query.is_empty() => format!("{path}?{query}"),
        Ok(_) => path.to_owned(),
        Err(error) => {
            tracing::error!("could not encode query parameters for {path}: {error}");
            path.to_owned()
        }
    }
}

/// The URL of a page of the transactions list, keeping the label filter.
pub(crate) fn transactions_url(page: Option<u64>, label: Option<&str>) -> String {
    with_query(endpoints::TRANSACTIONS_VIEW, &TransactionsParams { label, page })
}

/// The URL of the Excel export for `label`, or for all transactions.
pub(crate) fn export_url(label: Option<&str>) -> String {
    with_query(endpoints::LABEL_REPORT, &ExportParams { label })
}

/// Everything needed to render the full transactions page.
pub(crate) struct TransactionsPage<'a> {
    pub(crate) rows: &'a [TransactionTableRow],
    pub(crate) label_names: &'a [String],
    pub(crate) selected_label: Option<&'a str>,
    pub(crate) page: Page,
    pub(crate) max_pages: u64,
    pub(crate) transaction_count: u64,
}

pub(crate) fn transactions_view(data: TransactionsPage<'_>) -> Markup {
    let nav_bar = NavBar::new(endpoints::TRANSACTIONS_VIEW).into_html();
    let selected_label = data.selected_label;
    let next_page_url = data
        .page
        .has_next()
        .then(|| transactions_url(Some(data.page.number + 1), selected_label));
    let pagination = pagination_view(&data.page, data.max_pages, |page_number| {
        transactions_url(Some(page_number), selected_label)
    });

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="space-y-4 w-full lg:max-w-5xl"
            {
                header class="flex justify-between flex-wrap items-end gap-4"
                {
                    h1 class="text-xl font-bold"
                    {
                        "Transactions"
                        span class="ms-2 text-sm font-normal text-gray-500 dark:text-gray-400"
                        {
                            "(" (data.transaction_count) ")"
                        }
                    }

                    a href=(endpoints::NEW_TRANSACTION_VIEW) class=(LINK_STYLE)
                    {
                        "Create Transaction"
                    }

                    a href=(export_url(selected_label)) class=(LINK_STYLE) data-export-link
                    {
                        "Export to Excel"
                    }
                }

                (label_filter_view(data.label_names, selected_label))

                div class="w-full overflow-x-auto dark:bg-gray-800"
                {
                    table class="w-full my-2 text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
                    {
                        thead class=(TABLE_HEADER_STYLE)
                        {
                            tr
                            {
                                th scope="col" class=(TABLE_CELL_STYLE) { "Name" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Account" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Labels" }
                                th scope="col" class="px-6 py-4 text-right" { "Amount" }
                            }
                        }

                        tbody id="transaction-rows"
                        {
                            @if data.rows.is_empty() {
                                tr
                                {
                                    td
                                        colspan=(COLUMN_COUNT)
                                        class="px-6 py-4 text-center"
                                        data-empty-message
                                    {
                                        "No transactions found."
                                    }
                                }
                            } @else {
                                (transaction_rows_view(data.rows, next_page_url.as_deref()))
                            }
                        }
                    }
                }

                (pagination)
            }
        }
    };

    base("Transactions", &[], &content)
}

fn label_filter_view(label_names: &[String], selected_label: Option<&str>) -> Markup {
    html! {
        form
            method="get"
            action=(endpoints::TRANSACTIONS_VIEW)
            class="flex flex-wrap items-end gap-2"
            data-label-filter
        {
            div
            {
                label for="label" class=(FORM_LABEL_STYLE) { "Label" }

                select id="label" name="label" class=(FORM_TEXT_INPUT_STYLE)
                {
                    option value="" selected[selected_label.is_none()] { "All labels" }

                    @for label_name in label_names {
                        option
                            value=(label_name)
                            selected[selected_label == Some(label_name.as_str())]
                        {
                            (label_name)
                        }
                    }
                }
            }

            div
            {
                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Filter" }
            }
        }
    }
}

/// The table rows for a page of transactions, grouped under a heading per day.
///
/// When `next_page_url` is given, the rows end with a row that loads the next
/// page in its place when it is scrolled into view.
pub(crate) fn transaction_rows_view(
    rows: &[TransactionTableRow],
    next_page_url: Option<&str>,
) -> Markup {
    let days = group_by_day(rows, |row| row.date);

    html! {
        @for day in days {
            (day_header_row_view(day.date, &day.heading))

            @for row in day.items {
                (transaction_row_view(row))
            }
        }

        @if let Some(next_page_url) = next_page_url {
            tr
                hx-get=(next_page_url)
                hx-trigger="revealed"
                hx-swap="outerHTML"
                data-next-page
            {
                td colspan=(COLUMN_COUNT) class="px-6 py-4 text-center"
                {
                    span class="htmx-indicator" { (loading_spinner()) }
                    "Loading more transactions..."
                }
            }
        }
    }
}

const DATE_ATTRIBUTE_FORMAT: &[BorrowedFormatItem] =
    format_description!("[year]-[month repr:numerical padding:zero]-[day padding:zero]");

fn date_datetime_attr(date: Date) -> String {
    date.format(DATE_ATTRIBUTE_FORMAT)
        .unwrap_or_else(|_| date.to_string())
}

fn day_header_row_view(date: Option<Date>, heading: &str) -> Markup {
    html! {
        tr class="bg-gray-50 dark:bg-gray-800" data-day-header="true"
        {
            td
                colspan=(COLUMN_COUNT)
                class="px-6 py-2 text-xs font-semibold text-gray-600 dark:text-gray-300"
            {
                @if let Some(date) = date {
                    time datetime=(date_datetime_attr(date)) { (heading) }
                } @else {
                    (heading)
                }
            }
        }
    }
}

fn transaction_row_view(row: &TransactionTableRow) -> Markup {
    let (item_name, tooltip) = format_item_name(&row.item_name);

    html! {
        tr class=(TABLE_ROW_STYLE) data-transaction-row="true" data-transaction-id=(row.id)
        {
            td class=(TABLE_CELL_STYLE) title=[tooltip]
            {
                a href=(row.view_url) class=(LINK_STYLE) { (item_name) }
            }
            td class=(TABLE_CELL_STYLE) { (row.category_name.as_deref().unwrap_or("-")) }
            td class=(TABLE_CELL_STYLE) { (row.account_name.as_deref().unwrap_or("-")) }
            td class=(TABLE_CELL_STYLE)
            {
                div class="flex flex-wrap gap-1"
                {
                    @for label in &row.labels {
                        span class=(LABEL_BADGE_STYLE) { (label) }
                    }
                }
            }
            td class={ "px-6 py-4 text-right whitespace-nowrap " (amount_class(row.amount)) }
            {
                (format_amount(row.amount))
                @if let Some(currency) = &row.currency {
                    " " (currency)
                }
            }
        }
    }
}

fn format_item_name(item_name: &str) -> (String, Option<&str>) {
    if item_name.is_empty() {
        return ("(no name)".to_owned(), None);
    }

    let length = item_name.graphemes(true).count();

    if length <= MAX_ITEM_NAME_GRAPHEMES {
        (item_name.to_owned(), None)
    } else {
        let truncated: String = item_name
            .graphemes(true)
            .take(MAX_ITEM_NAME_GRAPHEMES - 3)
            .collect();
        (truncated + "...", Some(item_name))
    }
}

#[cfg(test)]
mod url_tests {
    use super::{export_url, transactions_url};

    #[test]
    fn builds_transactions_urls() {
        assert_eq!(transactions_url(None, None), "/transactions");
        assert_eq!(transactions_url(Some(2), None), "/transactions?page=2");
        assert_eq!(
            transactions_url(Some(3), Some("viaje a Perú")),
            "/transactions?label=viaje+a+Per%C3%BA&page=3"
        );
    }

    #[test]
    fn builds_export_urls() {
        assert_eq!(export_url(None), "/reports_by_label");
        assert_eq!(export_url(Some("casa & jardín")), "/reports_by_label?label=casa+%26+jard%C3%ADn");
    }
}

#[cfg(test)]
mod view_tests {
    use scraper::{Html, Selector};
    use time::macros::date;

    use crate::{
        pagination::Page,
        test_utils::{assert_valid_html, select_text},
    };

    use super::{
        TransactionTableRow, TransactionsPage, format_item_name, transaction_rows_view,
        transactions_view,
    };

    fn row(id: i64, item_name: &str, date: Option<time::Date>) -> TransactionTableRow {
        TransactionTableRow {
            id,
            item_name: item_name.to_owned(),
            amount: -12.5,
            currency: Some("EUR".to_owned()),
            date,
            category_name: Some("Comida".to_owned()),
            account_name: None,
            labels: vec!["viaje".to_owned()],
            view_url: format!("/transactions/{id}"),
        }
    }

    #[test]
    fn rows_are_grouped_under_spanish_day_headings() {
        let rows = [
            row(3, "Queso", Some(date!(2025 - 01 - 07))),
            row(2, "Leche", Some(date!(2025 - 01 - 07))),
            row(1, "Pan", None),
        ];

        let markup = transaction_rows_view(&rows, None).into_string();

        let html = Html::parse_fragment(&format!("<table>{markup}</table>"));
        assert_eq!(
            select_text(&html, "tr[data-day-header] td"),
            ["Mar, 07 de enero de 2025", "Sin fecha"]
        );
        assert_eq!(select_text(&html, "tr[data-transaction-row] a"), ["Queso", "Leche", "Pan"]);
        assert_eq!(
            select_text(&html, "tr[data-transaction-row] td:last-child"),
            ["-12.50 EUR", "-12.50 EUR", "-12.50 EUR"]
        );
        assert!(select_text(&html, "tr[data-next-page]").is_empty());
    }

    #[test]
    fn rows_end_with_next_page_loader() {
        let rows = [row(1, "Pan", Some(date!(2025 - 01 - 07)))];

        let markup = transaction_rows_view(&rows, Some("/transactions?page=2")).into_string();

        let html = Html::parse_fragment(&format!("<table>{markup}</table>"));
        let loader = html
            .select(&Selector::parse("tr[data-next-page]").unwrap())
            .next()
            .expect("Could not find next page row");
        assert_eq!(loader.value().attr("hx-get"), Some("/transactions?page=2"));
        assert_eq!(loader.value().attr("hx-trigger"), Some("revealed"));
    }

    #[test]
    fn page_selects_current_label_and_links_export() {
        let rows = [row(1, "Pan", Some(date!(2025 - 01 - 07)))];
        let label_names = ["casa".to_owned(), "viaje".to_owned()];

        let markup = transactions_view(TransactionsPage {
            rows: &rows,
            label_names: &label_names,
            selected_label: Some("viaje"),
            page: Page::resolve(None, 1, 50),
            max_pages: 5,
            transaction_count: 1,
        })
        .into_string();

        let html = Html::parse_document(&markup);
        assert_valid_html(&html);
        assert_eq!(select_text(&html, "select[name=label] option[selected]"), ["viaje"]);
        let export_link = html
            .select(&Selector::parse("a[data-export-link]").unwrap())
            .next()
            .expect("Could not find export link");
        assert_eq!(export_link.value().attr("href"), Some("/reports_by_label?label=viaje"));
        assert!(select_text(&html, "nav[aria-label=Pagination]").is_empty());
    }

    #[test]
    fn empty_page_shows_message() {
        let markup = transactions_view(TransactionsPage {
            rows: &[],
            label_names: &[],
            selected_label: None,
            page: Page::resolve(None, 0, 50),
            max_pages: 5,
            transaction_count: 0,
        })
        .into_string();

        let html = Html::parse_document(&markup);
        assert_eq!(select_text(&html, "td[data-empty-message]"), ["No transactions found."]);
        assert_eq!(select_text(&html, "select[name=label] option[selected]"), ["All labels"]);
    }

    #[test]
    fn long_names_are_truncated() {
        let name = "Compra en el supermercado del barrio con descuento";

        let (truncated, tooltip) = format_item_name(name);

        assert_eq!(truncated.chars().count(), 40);
        assert!(truncated.ends_with("..."));
        assert_eq!(tooltip, Some(name));
    }
}
