mod account_page;
mod accounts_page;
mod core;

pub use account_page::get_account_page;
pub use accounts_page::get_accounts_page;
pub use core::{Account, account_exists, count_account_transactions, get_account, get_all_accounts};
