//! The form shared by the create and edit transaction pages.

use maud::{Markup, html};
use rusqlite::Connection;
use serde::Deserialize;
use time::Date;

use crate::{
    Error,
    account::{Account, get_all_accounts},
    category::{Category, get_all_categories},
    database_id::{AccountId, CategoryId, DatabaseId, TransactionTypeId},
    html::{FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE},
};

use super::{
    core::{TransactionFields, format_micros, units_to_micros},
    transaction_type::{TransactionType, get_all_transaction_types},
};

/// The form data for creating or updating a transaction.
#[derive(Debug, Deserialize)]
pub struct TransactionForm {
    /// The name of the transaction, e.g. "Supermercado".
    pub item_name: String,
    /// The amount in currency units, negative for expenses.
    pub amount: f64,
    /// Only sent when creating a transaction.
    #[serde(default)]
    pub date: Option<Date>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub transaction_type_id: Option<TransactionTypeId>,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    #[serde(default)]
    pub account_id: Option<AccountId>,
}

impl TransactionForm {
    /// Convert the form into the fields stored in the database, with the amount in micro-units.
    ///
    /// # Errors
    /// Returns [Error::InvalidAmount] if the amount cannot be stored.
    pub fn to_fields(&self) -> Result<TransactionFields, Error> {
        Ok(TransactionFields {
            item_name: self.item_name.trim().to_owned(),
            amount: units_to_micros(self.amount)?,
            currency: non_blank(self.currency.as_deref()),
            notes: non_blank(self.notes.as_deref()),
            transaction_type_id: self.transaction_type_id,
            category_id: self.category_id,
            account_id: self.account_id,
        })
    }
}

fn non_blank(text: Option<&str>) -> Option<String> {
    text.map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_owned)
}

/// The rows that the form's select inputs choose from.
#[derive(Debug, Default)]
pub struct FormChoices {
    pub transaction_types: Vec<TransactionType>,
    pub categories: Vec<Category>,
    pub accounts: Vec<Account>,
}

/// Load the transaction types, categories and accounts for the form's selects.
pub fn get_form_choices(connection: &Connection) -> Result<FormChoices, Error> {
    Ok(FormChoices {
        transaction_types: get_all_transaction_types(connection)?,
        categories: get_all_categories(connection)?,
        accounts: get_all_accounts(connection)?,
    })
}

/// The initial values of the form inputs.
#[derive(Debug, Default)]
pub struct TransactionFormDefaults<'a> {
    pub item_name: Option<&'a str>,
    /// The amount in micro-units.
    pub amount: Option<i64>,
    pub currency: Option<&'a str>,
    pub notes: Option<&'a str>,
    pub transaction_type_id: Option<TransactionTypeId>,
    pub category_id: Option<CategoryId>,
    pub account_id: Option<AccountId>,
    /// The date input is only rendered when this is set.
    pub date: Option<Date>,
}

pub fn transaction_form_fields(
    defaults: &TransactionFormDefaults<'_>,
    choices: &FormChoices,
) -> Markup {
    let amount_str = defaults.amount.map(format_micros);

    let type_options: Vec<(DatabaseId, String)> = choices
        .transaction_types
        .iter()
        .map(|transaction_type| {
            let name = transaction_type.name.as_deref().unwrap_or("Unknown");
            (transaction_type.id, name.to_owned())
        })
        .collect();
    let category_options: Vec<(DatabaseId, String)> = choices
        .categories
        .iter()
        .map(|category| (category.id, category.display_name()))
        .collect();
    let account_options: Vec<(DatabaseId, String)> = choices
        .accounts
        .iter()
        .map(|account| {
            let name = account.name.as_deref().unwrap_or("Unnamed account");
            (account.id, name.to_owned())
        })
        .collect();

    html! {
        div
        {
            label for="item_name" class=(FORM_LABEL_STYLE) { "Name" }

            input
                name="item_name"
                id="item_name"
                type="text"
                placeholder="Supermercado"
                required
                autofocus
                value=[defaults.item_name]
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

            p class="mb-2 text-xs text-gray-500 dark:text-gray-400"
            {
                "Use a negative amount for expenses."
            }

            input
                name="amount"
                id="amount"
                type="number"
                step="any"
                placeholder="-0.00"
                required
                value=[amount_str.as_deref()]
                class=(FORM_TEXT_INPUT_STYLE);
        }

        @if let Some(date) = defaults.date {
            div
            {
                label for="date" class=(FORM_LABEL_STYLE) { "Date" }

                input
                    name="date"
                    id="date"
                    type="date"
                    required
                    value=(date)
                    class=(FORM_TEXT_INPUT_STYLE);
            }
        }

        div
        {
            label for="currency" class=(FORM_LABEL_STYLE) { "Currency" }

            input
                name="currency"
                id="currency"
                type="text"
                placeholder="EUR"
                maxlength="3"
                value=[defaults.currency]
                class=(FORM_TEXT_INPUT_STYLE);
        }

        (select_field("transaction_type_id", "Type", &type_options, defaults.transaction_type_id))
        (select_field("category_id", "Category", &category_options, defaults.category_id))
        (select_field("account_id", "Account", &account_options, defaults.account_id))

        div
        {
            label for="notes" class=(FORM_LABEL_STYLE) { "Notes" }

            textarea
                name="notes"
                id="notes"
                rows="3"
                class=(FORM_TEXT_INPUT_STYLE)
            {
                (defaults.notes.unwrap_or_default())
            }
        }
    }
}

fn select_field(
    name: &str,
    label: &str,
    options: &[(DatabaseId, String)],
    selected_id: Option<DatabaseId>,
) -> Markup {
    // A reference to a deleted row stays selected so that saving does not clear it.
    let missing_id =
        selected_id.filter(|id| !options.iter().any(|(option_id, _)| option_id == id));

    html! {
        div
        {
            label for=(name) class=(FORM_LABEL_STYLE) { (label) }

            select name=(name) id=(name) class=(FORM_TEXT_INPUT_STYLE)
            {
                option value="" selected[selected_id.is_none()] { "None" }

                @for (id, option_name) in options {
                    option value=(id) selected[selected_id == Some(*id)] { (option_name) }
                }

                @if let Some(missing_id) = missing_id {
                    option value=(missing_id) selected { "Missing (ID " (missing_id) ")" }
                }
            }
        }
    }
}
