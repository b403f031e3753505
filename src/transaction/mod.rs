//! Transactions in the Bluecoins database.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and the fields that can be created or edited
//! - Database functions for querying, creating, updating and deleting transactions
//! - View handlers for the transaction pages and the endpoints behind their forms

mod core;
mod create_endpoint;
mod create_page;
mod delete_endpoint;
mod delete_page;
mod detail_page;
mod edit_endpoint;
mod edit_page;
mod form;
mod grouping;
mod item;
mod picture;
mod query;
mod transaction_type;
mod transactions_page;
mod view;

pub use core::{Transaction, micros_to_units};
pub use create_endpoint::create_transaction_endpoint;
pub use create_page::get_create_transaction_page;
pub use delete_endpoint::delete_transaction_endpoint;
pub use delete_page::get_delete_transaction_page;
pub use detail_page::get_transaction_page;
pub use edit_endpoint::edit_transaction_endpoint;
pub use edit_page::get_edit_transaction_page;
pub use transactions_page::get_transactions_page;

pub(crate) use query::get_transactions_for_export;

#[cfg(test)]
pub(crate) use core::get_transaction;
#[cfg(test)]
pub(crate) use form::TransactionForm;
