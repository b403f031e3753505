//! This modules defines the common functionality for paging data.

use maud::{Markup, html};

/// The config for pagination
#[derive(Debug, Clone)]
pub struct PaginationConfig {
    /// The maximum transactions to display per page.
    pub page_size: u64,
    /// The maximum number of pages to show in the pagination indicator.
    pub max_pages: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            page_size: 50,
            max_pages: 5,
        }
    }
}

/// A page of a larger collection, with the requested page number already
/// validated against the size of the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// The 1-based page number.
    pub number: u64,
    /// The total number of pages. Always at least one, even for an empty collection.
    pub page_count: u64,
    /// The maximum number of items on a page.
    pub size: u64,
}

impl Page {
    /// Resolve the raw `page` query parameter for a collection of `item_count` items.
    ///
    /// A missing or unparseable page number, or zero, gives the first page.
    /// Page numbers past the end give the last page.
    pub fn resolve(requested: Option<&str>, item_count: u64, size: u64) -> Self {
        let size = size.max(1);
        let page_count = item_count.div_ceil(size).max(1);
        let number = requested
            .and_then(|page| page.trim().parse::<u64>().ok())
            .filter(|&page| page > 0)
            .unwrap_or(1)
            .min(page_count);

        Self {
            number,
            page_count,
            size,
        }
    }

    /// The number of items to skip to get to the first item on this page.
    pub fn offset(&self) -> u64 {
        (self.number - 1) * self.size
    }

    pub fn has_next(&self) -> bool {
        self.number < self.page_count
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum PaginationIndicator {
    Page(u64),
    CurrPage(u64),
    Ellipsis,
    NextButton(u64),
    BackButton(u64),
}

pub fn create_pagination_indicators(
    curr_page: u64,
    page_count: u64,
    max_pages: u64,
) -> Vec<PaginationIndicator> {
    let map_page = |page| {
        if page == curr_page {
            PaginationIndicator::CurrPage(page)
        } else {
            PaginationIndicator::Page(page)
        }
    };

    let half = max_pages / 2;

    let mut indicators: Vec<PaginationIndicator> = if page_count <= max_pages {
        (1..=page_count).map(map_page).collect()
    } else if curr_page <= half {
        (1..=max_pages).map(map_page).collect()
    } else if curr_page > page_count - half {
        ((page_count - max_pages + 1)..=page_count)
            .map(map_page)
            .collect()
    } else {
        ((curr_page - half)..=(curr_page + half))
            .map(map_page)
            .collect()
    };

    if page_count > max_pages {
        if curr_page > half + 1 {
            indicators.insert(0, PaginationIndicator::Page(1));
            indicators.insert(1, PaginationIndicator::Ellipsis);
        }

        if curr_page < page_count - half {
            indicators.push(PaginationIndicator::Ellipsis);
            indicators.push(PaginationIndicator::Page(page_count));
        }
    }

    if curr_page > 1 {
        indicators.insert(0, PaginationIndicator::BackButton(curr_page - 1));
    }

    if curr_page < page_count {
        indicators.push(PaginationIndicator::NextButton(curr_page + 1));
    }

    indicators
}

/// Render pagination links, using `page_url` to build the link for each page number.
///
/// Nothing is rendered when there is only one page.
pub fn pagination_view(page: &Page, max_pages: u64, page_url: impl Fn(u64) -> String) -> Markup {
    if page.page_count <= 1 {
        return html! {};
    }

    let indicators = create_pagination_indicators(page.number, page.page_count, max_pages);
    let link_style = "block px-3 py-2 leading-tight text-gray-500 bg-white \
        border border-gray-300 hover:bg-gray-100 hover:text-gray-700 \
        dark:bg-gray-800 dark:border-gray-700 dark:text-gray-400 \
        dark:hover:bg-gray-700 dark:hover:text-white";
    let current_style = "block px-3 py-2 leading-tight text-blue-600 \
        border border-blue-300 bg-blue-50 dark:border-gray-700 \
        dark:bg-gray-700 dark:text-white";

    html!(
        nav aria-label="Pagination" class="mt-4"
        {
            ul class="inline-flex -space-x-px text-sm"
            {
                @for indicator in indicators {
                    li
                    {
                        @match indicator {
                            PaginationIndicator::Page(number) => {
                                a href=(page_url(number)) class=(link_style) { (number) }
                            }
                            PaginationIndicator::CurrPage(number) => {
                                a aria-current="page" class=(current_style) { (number) }
                            }
                            PaginationIndicator::Ellipsis => {
                                span class=(link_style) { "..." }
                            }
                            PaginationIndicator::BackButton(number) => {
                                a href=(page_url(number)) class=(link_style) { "Back" }
                            }
                            PaginationIndicator::NextButton(number) => {
                                a href=(page_url(number)) class=(link_style) { "Next" }
                            }
                        }
                    }
                }
            }
        }
    )
}

#[cfg(test)]
mod page_tests {
    use super::Page;

    #[test]
    fn defaults_to_first_page() {
        let page = Page::resolve(None, 120, 50);

        assert_eq!(
            page,
            Page {
                number: 1,
                page_count: 3,
                size: 50
            }
        );
        assert_eq!(page.offset(), 0);
        assert!(page.has_next());
    }

    #[test]
    fn invalid_page_numbers_give_first_page() {
        for requested in ["abc", "0", "-3", ""] {
            let page = Page::resolve(Some(requested), 120, 50);

            assert_eq!(page.number, 1, "want page 1 for {requested:?}");
        }
    }

    #[test]
    fn clamps_to_last_page() {
        let page = Page::resolve(Some("99"), 120, 50);

        assert_eq!(page.number, 3);
        assert_eq!(page.offset(), 100);
        assert!(!page.has_next());
    }

    #[test]
    fn empty_collection_has_one_page() {
        let page = Page::resolve(Some("2"), 0, 50);

        assert_eq!(page.number, 1);
        assert_eq!(page.page_count, 1);
        assert!(!page.has_next());
    }
}
