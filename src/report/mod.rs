//! Reports over all transactions: totals per category and the Excel export by label.

mod by_category;
mod by_label;

pub use by_category::get_category_report_page;
pub use by_label::get_label_report;
