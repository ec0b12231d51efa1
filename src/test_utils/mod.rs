#![allow(missing_docs)]

pub(crate) mod form;
pub(crate) mod html;
pub(crate) mod http;
pub(crate) mod remote;

pub(crate) use form::{
    assert_form_input, assert_form_input_with_value, assert_form_optional_input,
    assert_form_select, assert_form_submit_button_with_text, assert_hx_endpoint, must_get_form,
};
pub(crate) use html::{
    assert_valid_html, parse_html_document, parse_html_fragment, select_texts,
};
pub(crate) use http::{assert_hx_redirect, assert_status, body_text, get_header};
pub(crate) use remote::{
    FakeRemote, dashboard_routes, remote_state, rental_json, spawn_remote, test_session,
    with_dashboard_routes,
};
