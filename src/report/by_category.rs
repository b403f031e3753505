//! The report of the total amount of transactions per category.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use charming::{
    Chart,
    component::{Axis, Grid, Title},
    element::{AxisLabel, AxisPointer, AxisPointerType, AxisType, JsFunction, Tooltip, Trigger},
    series::bar,
};
use maud::{Markup, PreEscaped, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    database_id::CategoryId,
    endpoints,
    html::{
        HeadElement, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE,
        amount_class, base, format_amount,
    },
    navigation::NavBar,
    transaction::micros_to_units,
};

/// The name shown for transactions whose category is missing.
const UNKNOWN_CATEGORY: &str = "Unknown";

/// The HTML element ID of the chart container.
const CHART_ID: &str = "category-totals-chart";

/// The state needed for the category report.
#[derive(Debug, Clone)]
pub struct CategoryReportState {
    /// The database connection for reading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CategoryReportState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The sum of the amounts of the transactions in one category.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CategoryTotal {
    /// `None` for transactions without a category.
    pub(crate) category_id: Option<CategoryId>,
    /// "Unknown" if the category does not exist.
    pub(crate) name: String,
    /// The total in micro-units.
    pub(crate) total: i64,
}

/// Sum the transaction amounts per category ID, largest total first.
///
/// # Errors
/// Returns an [Error::SqlError] if there is an SQL error.
pub(crate) fn get_category_totals(connection: &Connection) -> Result<Vec<CategoryTotal>, Error> {
    connection
        .prepare(
            "SELECT t.categoryID, c.childCategoryName, COALESCE(SUM(t.amount), 0) AS total
             FROM TRANSACTIONSTABLE t
             LEFT JOIN CHILDCATEGORYTABLE c ON c.categoryTableID = t.categoryID
             GROUP BY t.categoryID
             ORDER BY total DESC, t.categoryID",
        )?
        .query_map([], |row| {
            let name: Option<String> = row.get(1)?;

            Ok(CategoryTotal {
                category_id: row.get(0)?,
                name: name.unwrap_or_else(|| UNKNOWN_CATEGORY.to_owned()),
                total: row.get(2)?,
            })
        })?
        .map(|maybe_total| maybe_total.map_err(Error::from))
        .collect()
}

fn category_chart(totals: &[CategoryTotal]) -> Chart {
    let labels: Vec<String> = totals.iter().map(|total| total.name.clone()).collect();
    let values: Vec<f64> = totals
        .iter()
        .map(|total| micros_to_units(total.total))
        .collect();

    Chart::new()
        .title(Title::new().text("Total by category"))
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Axis)
                .value_formatter(amount_formatter())
                .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow)),
        )
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(amount_formatter())),
        )
        .series(bar::Bar::new().name("Total").data(values))
}

fn amount_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const amountFormatter = new Intl.NumberFormat('es-ES', {
              minimumFractionDigits: 2,
              maximumFractionDigits: 2
            });
            return (number) ? amountFormatter.format(number) : \"-\";",
    )
}

/// Make the chart options safe to put inside a `<script>` element.
///
/// Category names are user data and the HTML parser ends the script at the
/// first `</script`, whatever the JavaScript around it.
fn escape_script_text(text: &str) -> String {
    text.replace("</", "<\\/").replace("<!--", "<\\!--")
}

fn chart_script(chart: &Chart) -> HeadElement {
    let options = escape_script_text(&chart.to_string());
    let script = format!(
        r#"document.addEventListener('DOMContentLoaded', function() {{
            const chart = echarts.init(document.getElementById("{CHART_ID}"));
            chart.setOption({});
            window.addEventListener('resize', chart.resize);

            const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
            const updateTheme = () => {{
                chart.setTheme(darkModeMediaQuery.matches ? 'dark' : 'default');
            }}
            darkModeMediaQuery.addEventListener('change', updateTheme);
            updateTheme();
        }});"#,
        options
    );

    HeadElement::ScriptSource(PreEscaped(script))
}

fn category_report_view(totals: &[CategoryTotal]) -> Markup {
    let nav_bar = NavBar::new(endpoints::CATEGORY_REPORT_VIEW).into_html();
    let grand_total = micros_to_units(totals.iter().map(|total| total.total).sum());

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="space-y-4 w-full lg:max-w-5xl"
            {
                h1 class="text-xl font-bold" { "Categories" }

                @if !totals.is_empty() {
                    div id=(CHART_ID) class="min-h-[380px] rounded dark:bg-gray-100" {}
                }

                div class="w-full overflow-x-auto dark:bg-gray-800"
                {
                    table class="w-full my-2 text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
                    {
                        thead class=(TABLE_HEADER_STYLE)
                        {
                            tr
                            {
                                th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                                th scope="col" class="px-6 py-4 text-right" { "Total" }
                            }
                        }

                        tbody
                        {
                            @for total in totals {
                                @let amount = micros_to_units(total.total);

                                tr class=(TABLE_ROW_STYLE) data-category-row
                                {
                                    td class=(TABLE_CELL_STYLE) { (total.name) }
                                    td class={"px-6 py-4 text-right " (amount_class(amount))}
                                    {
                                        (format_amount(amount))
                                    }
                                }
                            }

                            @if totals.is_empty() {
                                tr
                                {
                                    td colspan="2" class="px-6 py-4 text-center"
                                    {
                                        "No transactions found."
                                    }
                                }
                            }
                        }

                        tfoot
                        {
                            tr class="font-semibold text-gray-900 dark:text-white" data-grand-total
                            {
                                th scope="row" class=(TABLE_CELL_STYLE) { "Total" }
                                td class="px-6 py-4 text-right" { (format_amount(grand_total)) }
                            }
                        }
                    }
                }
            }
        }
    );

    let head_elements = if totals.is_empty() {
        Vec::new()
    } else {
        vec![
            HeadElement::ScriptLink("/static/echarts.6.0.0.min.js".to_owned()),
            chart_script(&category_chart(totals)),
        ]
    };

    base("Categories", &head_elements, &content)
}

/// Renders the table and chart of the total amount per category.
pub async fn get_category_report_page(
    State(state): State<CategoryReportState>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let totals = get_category_totals(&connection)
        .inspect_err(|error| tracing::error!("could not get category totals: {error}"))?;

    Ok(category_report_view(&totals).into_response())
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::State;
    use rusqlite::Connection;

    use crate::test_utils::{
        FOOD_CATEGORY_ID, SALARY_CATEGORY_ID, TRANSPORT_CATEGORY_ID, TestTransaction,
        assert_status_ok, assert_valid_html, get_seeded_connection, insert_test_transaction,
        parse_html_document, select_text,
    };

    use crate::html::HeadElement;

    use super::{
        CategoryReportState, CategoryTotal, category_chart, chart_script, get_category_report_page,
        get_category_totals,
    };

    fn insert_transactions(connection: &Connection) {
        let in_category = |name, amount, category_id| TestTransaction {
            category_id,
            ..TestTransaction::expense(name, amount, "2025-01-06 09:00:00")
        };

        for transaction in [
            in_category("Pan", -2_000_000, Some(FOOD_CATEGORY_ID)),
            in_category("Fruta", -3_500_000, Some(FOOD_CATEGORY_ID)),
            in_category("Autobús", -1_500_000, Some(TRANSPORT_CATEGORY_ID)),
            in_category("Nómina", 1_000_000_000, Some(SALARY_CATEGORY_ID)),
            in_category("Regalo", -4_000_000, None),
            in_category("Antiguo", -250_000, Some(999)),
        ] {
            insert_test_transaction(&transaction, connection);
        }
    }

    #[test]
    fn totals_are_largest_first() {
        let connection = get_seeded_connection();
        insert_transactions(&connection);

        let totals = get_category_totals(&connection).unwrap();

        assert_eq!(
            totals,
            vec![
                CategoryTotal {
                    category_id: Some(SALARY_CATEGORY_ID),
                    name: "Salario".to_owned(),
                    total: 1_000_000_000,
                },
                CategoryTotal {
                    category_id: Some(999),
                    name: "Unknown".to_owned(),
                    total: -250_000,
                },
                CategoryTotal {
                    category_id: Some(TRANSPORT_CATEGORY_ID),
                    name: "Transporte".to_owned(),
                    total: -1_500_000,
                },
                CategoryTotal {
                    category_id: None,
                    name: "Unknown".to_owned(),
                    total: -4_000_000,
                },
                CategoryTotal {
                    category_id: Some(FOOD_CATEGORY_ID),
                    name: "Comida".to_owned(),
                    total: -5_500_000,
                },
            ]
        );
    }

    #[test]
    fn totals_sum_to_total_of_all_amounts() {
        let connection = get_seeded_connection();
        insert_transactions(&connection);

        let totals = get_category_totals(&connection).unwrap();

        let want: i64 = connection
            .query_row("SELECT SUM(amount) FROM TRANSACTIONSTABLE", [], |row| row.get(0))
            .unwrap();
        assert_eq!(totals.iter().map(|total| total.total).sum::<i64>(), want);
    }

    #[tokio::test]
    async fn page_shows_table_and_chart() {
        let connection = get_seeded_connection();
        insert_transactions(&connection);
        let state = CategoryReportState {
            db_connection: Arc::new(Mutex::new(connection)),
        };

        let response = get_category_report_page(State(state)).await.unwrap();

        assert_status_ok(&response);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        assert_eq!(
            select_text(&html, "tr[data-category-row] td:first-child"),
            ["Salario", "Unknown", "Transporte", "Unknown", "Comida"]
        );
        assert_eq!(select_text(&html, "tr[data-grand-total] td"), ["988.75"]);
        assert_eq!(select_text(&html, "#category-totals-chart").len(), 1);
        assert!(
            select_text(&html, "head script")
                .iter()
                .any(|script| script.contains("echarts.init")),
            "want a script that initialises the chart"
        );
    }

    #[tokio::test]
    async fn empty_database_has_no_chart() {
        let state = CategoryReportState {
            db_connection: Arc::new(Mutex::new(get_seeded_connection())),
        };

        let response = get_category_report_page(State(state)).await.unwrap();

        let html = parse_html_document(response).await;
        assert!(select_text(&html, "#category-totals-chart").is_empty());
        assert_eq!(select_text(&html, "tr[data-grand-total] td"), ["0.00"]);
    }

    #[test]
    fn category_names_cannot_close_the_chart_script() {
        let totals = [CategoryTotal {
            category_id: Some(FOOD_CATEGORY_ID),
            name: "</script><b>x<!--".to_owned(),
            total: -2_000_000,
        }];

        let HeadElement::ScriptSource(script) = chart_script(&category_chart(&totals)) else {
            panic!("want an inline chart script");
        };

        let script = script.into_string();
        assert!(!script.contains("</"), "got script {script}");
        assert!(!script.contains("<!--"), "got script {script}");
        assert!(script.contains(r"<\/script><b>x<\!--"), "got script {script}");
    }

    #[tokio::test]
    async fn category_name_with_markup_is_not_rendered_as_html() {
        let connection = get_seeded_connection();
        insert_transactions(&connection);
        connection
            .execute(
                "UPDATE CHILDCATEGORYTABLE SET childCategoryName = ?1 WHERE categoryTableID = ?2",
                ("</script><b>x", FOOD_CATEGORY_ID),
            )
            .unwrap();
        let state = CategoryReportState {
            db_connection: Arc::new(Mutex::new(connection)),
        };

        let response = get_category_report_page(State(state)).await.unwrap();

        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        assert!(select_text(&html, "b").is_empty(), "the name should stay text");
        assert!(
            select_text(&html, "head script")
                .iter()
                .any(|script| script.contains("setOption") && script.contains("updateTheme();")),
            "want the whole chart script inside one element"
        );
    }
}
