#![allow(missing_docs)]

pub(crate) mod db;
pub(crate) mod form;
pub(crate) mod html;
pub(crate) mod http;

pub(crate) use db::{
    CASH_ACCOUNT_ID, CHECKING_ACCOUNT_ID, EXPENSE_TYPE_ID, FOOD_CATEGORY_ID, HIDDEN_ACCOUNT_ID,
    INCOME_TYPE_ID, SALARY_CATEGORY_ID, TRANSFER_TYPE_ID, TRANSPORT_CATEGORY_ID, TestTransaction,
    get_seeded_connection, get_test_connection, insert_label, insert_test_transaction,
};
pub(crate) use form::{
    assert_form_input, assert_form_input_with_value, assert_form_select,
    assert_form_submit_button, assert_hx_endpoint, must_get_form,
};
pub(crate) use html::{assert_valid_html, must_get_element, parse_html_document, select_text};
pub(crate) use http::{assert_content_type, assert_hx_redirect, assert_status_ok, get_header};
