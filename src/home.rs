//! The landing page.

use maud::{Markup, html};

use crate::{
    endpoints,
    html::{LINK_STYLE, PAGE_CONTAINER_STYLE, base},
    navigation::NavBar,
};

fn home_view() -> Markup {
    let nav_bar = NavBar::new(endpoints::ROOT).into_html();
    let links = [
        (
            endpoints::TRANSACTIONS_VIEW,
            "Transactions",
            "Browse transactions by day and filter them by label.",
        ),
        (
            endpoints::NEW_TRANSACTION_VIEW,
            "New transaction",
            "Add a transaction to the Bluecoins database.",
        ),
        (
            endpoints::CATEGORY_REPORT_VIEW,
            "Categories",
            "See the total amount spent and earned per category.",
        ),
        (
            endpoints::ACCOUNTS_VIEW,
            "Accounts",
            "List the accounts in the database.",
        ),
        (
            endpoints::LABEL_REPORT,
            "Excel export",
            "Download every transaction as a spreadsheet with one sheet per month.",
        ),
    ];

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="w-full max-w-md space-y-4"
            {
                h1 class="text-2xl font-bold" { "Bluecoins Web" }

                ul class="space-y-3"
                {
                    @for (url, title, description) in links {
                        li
                        {
                            a href=(url) class=(LINK_STYLE) { (title) }
                            p class="text-sm text-gray-500 dark:text-gray-400" { (description) }
                        }
                    }
                }
            }
        }
    );

    base("Home", &[], &content)
}

/// Renders the landing page.
pub async fn get_home_page() -> Markup {
    home_view()
}

#[cfg(test)]
mod tests {
    use axum::response::IntoResponse;

    use crate::{
        endpoints,
        test_utils::{assert_status_ok, assert_valid_html, parse_html_document},
    };

    use super::get_home_page;

    #[tokio::test]
    async fn links_to_every_page() {
        let response = get_home_page().await.into_response();

        assert_status_ok(&response);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        let hrefs: Vec<&str> = html
            .select(&scraper::Selector::parse("main a").unwrap())
            .filter_map(|link| link.value().attr("href"))
            .collect();
        assert_eq!(
            hrefs,
            [
                endpoints::TRANSACTIONS_VIEW,
                endpoints::NEW_TRANSACTION_VIEW,
                endpoints::CATEGORY_REPORT_VIEW,
                endpoints::ACCOUNTS_VIEW,
                endpoints::LABEL_REPORT,
            ]
        );
    }
}
