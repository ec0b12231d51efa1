use maud::{DOCTYPE, Markup, PreEscaped, html};

use std::sync::OnceLock;

use numfmt::{Formatter, Precision};
use serde::Deserialize;

use crate::{
    alert::{ALERT_CONTAINER_ID, ALERT_CONTAINER_STYLE},
    navigation::NavBar,
};

// Link styles
pub const LINK_STYLE: &str = "text-blue-600 hover:text-blue-500 \
    dark:text-blue-500 dark:hover:text-blue-400 underline";

// Button styles
pub const BUTTON_PRIMARY_STYLE: &str = "w-full px-4 py-2 bg-blue-500
    dark:bg-blue-600 disabled:bg-blue-700 hover:enabled:bg-blue-600 \
    hover:enabled:dark:bg-blue-700 text-white rounded";

pub const BUTTON_SECONDARY_STYLE: &str = "py-2 px-4 text-sm font-medium \
    text-gray-900 bg-white rounded border border-gray-200 \
    hover:bg-gray-100 hover:text-blue-700 focus:z-10 dark:bg-gray-800 \
    dark:text-gray-400 dark:border-gray-600 dark:hover:text-white \
    dark:hover:bg-gray-700";

pub const BUTTON_DELETE_STYLE: &str = "text-red-600 hover:text-red-500 \
    dark:text-red-500 dark:hover:text-red-400 underline bg-transparent \
    border-none cursor-pointer";

// Form styles
pub const FORM_CONTAINER_STYLE: &str = "flex flex-col items-center px-6 py-8 \
    mx-auto lg:py-0 max-w-md text-gray-900 dark:text-white";
pub const FORM_LABEL_STYLE: &str = "block mb-2 text-sm font-medium text-gray-900 dark:text-white";
pub const FORM_TEXT_INPUT_STYLE: &str = "block w-full p-2.5 rounded text-sm \
    text-gray-900 dark:text-white disabled:text-gray-500 bg-gray-50 \
    dark:bg-gray-700 border border-gray-300 dark:border-gray-600 \
    dark:placeholder-gray-400 focus:ring-blue-600 focus:border-blue-600 \
    focus:dark:border-blue-500 focus:dark:ring-blue-500";

// Table styles
pub const TABLE_HEADER_STYLE: &str = "text-xs text-gray-700 uppercase \
    bg-gray-50 dark:bg-gray-700 dark:text-gray-400";

pub const TABLE_ROW_STYLE: &str = "bg-white border-b dark:bg-gray-800 dark:border-gray-700";

pub const TABLE_CELL_STYLE: &str = "px-6 py-4";

// Status badge style
pub const BADGE_STYLE: &str = "inline-flex items-center px-2.5 py-0.5 \
    text-xs font-semibold rounded-full";

// Page container
pub const PAGE_CONTAINER_STYLE: &str =
    "flex flex-col items-center px-6 py-8 mx-auto lg:py-5 text-gray-900 dark:text-white";

// Card container
pub const CARD_STYLE: &str = "w-full bg-white dark:bg-gray-800 rounded-lg shadow p-6";

pub enum HeadElement {
    /// The file path or URL to a JavaScript script.
    ScriptLink(String),
    /// JavaScript source code.
    ScriptSource(PreEscaped<String>),
    Style(PreEscaped<String>),
}

pub fn base(title: &str, head_elements: &[HeadElement], content: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en"
        {
            head
            {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " - RentaHub" }
                link rel="icon" type="image/png" href="/static/favicon-32x32.png" sizes="32x32";

                script src="https://cdn.jsdelivr.net/npm/@tailwindcss/browser@4" {}
                script src="https://cdn.jsdelivr.net/npm/htmx.org@2.0.8/dist/htmx.min.js" {}
                script src="https://cdn.jsdelivr.net/npm/htmx-ext-response-targets@2.0.4" {}

                style
                {
                    r#"
                    #indicator.htmx-indicator {
                        display: none;
                    }

                    #indicator.htmx-request .htmx-indicator {
                        display: inline;
                    }

                    #indicator.htmx-request.htmx-indicator {
                        display: inline;
                    }

                    /* Keep chart tooltips below the fixed bottom nav, but above page content. */
                    .echarts-tooltip {
                        z-index: 30 !important;
                    }
                    "#
                }

                @for element in head_elements
                {
                    @match element
                    {
                        HeadElement::ScriptSource(text) => script { (text) }
                        HeadElement::ScriptLink(path) => script src=(path) {}
                        HeadElement::Style(text) => style { (text) }
                    }
                }
            }

            body
                hx-ext="response-targets"
                class="container max-w-full min-h-screen bg-gray-50 dark:bg-gray-900 pb-[calc(5rem+env(safe-area-inset-bottom))] lg:pb-0"
            {
                (content)

                // Alert container for out-of-band swaps
                div id=(ALERT_CONTAINER_ID) class=(ALERT_CONTAINER_STYLE) {}
            }
        }
    }
}

/// A page for a signed-in administrator: the navigation bar with `active_endpoint`
/// highlighted, then `content`.
pub fn page(
    title: &str,
    active_endpoint: &str,
    head_elements: &[HeadElement],
    content: &Markup,
) -> Markup {
    let content = html! {
        (NavBar::new(active_endpoint).into_html())

        div class=(PAGE_CONTAINER_STYLE)
        {
            (content)
        }
    };

    base(title, head_elements, &content)
}

pub fn error_view(title: &str, header: &str, description: &str, fix: &str) -> Markup {
    // Template adapted from https://flowbite.com/blocks/marketing/404/
    let content = html!(
        section class="bg-white dark:bg-gray-900"
        {
            div class="py-8 px-4 mx-auto max-w-screen-xl lg:py-16 lg:px-6"
            {
                div class="mx-auto max-w-screen-sm text-center"
                {
                    h1
                        class="mb-4 text-7xl tracking-tight font-extrabold
                            lg:text-9xl text-blue-600 dark:text-blue-500"
                    {
                        (header)
                    }

                    p
                        class="mb-4 text-3xl md:text-4xl tracking-tight
                            font-bold text-gray-900 dark:text-white"
                    {
                        (description)
                    }

                    p
                        class="mb-4 text-1xl md:text-2xl tracking-tight
                            text-gray-900 dark:text-white"
                    {
                        (fix)
                    }

                    a
                        href="/"
                        class="inline-flex text-white bg-blue-600
                            hover:bg-blue-800 focus:ring-4 focus:outline-hidden
                            focus:ring-blue-300 font-medium rounded text-sm px-5
                            py-2.5 text-center dark:focus:ring-blue-900 my-4"
                    {
                        "Back to Homepage"
                    }
                }
            }
        }
    );

    base(title, &[], &content)
}

pub fn log_in_register(form_title: &str, form: &Markup) -> Markup {
    html! {
        div class="flex flex-col items-center justify-center px-6 py-8 mx-auto"
        {
            a href="#" class="flex items-center mb-6 text-2xl font-semibold text-gray-900 dark:text-white"
            {
                "RentaHub"
            }

            div class="w-full bg-white rounded-lg shadow dark:border md:mt-0 sm:max-w-md xl:p-0 dark:bg-gray-800 dark:border-gray-700"
            {
                div class="p-6 space-y-4 md:space-y-6 sm:p-8"
                {
                    h1 class="text-xl font-bold leading-tight tracking-tight text-gray-900 md:text-2xl dark:text-white"
                    {
                        (form_title)
                    }

                    (form)
                }
            }
        }
    }
}

pub fn password_input(password: &str, min_length: u8, error_message: Option<&str>) -> Markup {
    html! {
        div
        {
            label
                for="password"
                class=(FORM_LABEL_STYLE)
            {
                "Password"
            }

            input
                type="password"
                name="password"
                id="password"
                placeholder="••••••••"
                class=(FORM_TEXT_INPUT_STYLE)
                required
                value=(password)
                minlength=(min_length);

            @if let Some(error_message) = error_message
            {
                p class="text-red-500 text-base" { (error_message) }
            }
        }

    }
}

/// Where a record form is submitted: POST to create, PUT to update.
#[derive(Debug, Clone, Copy)]
pub enum FormTarget<'a> {
    Create(&'a str),
    Update(&'a str),
}

impl<'a> FormTarget<'a> {
    pub fn post_url(self) -> Option<&'a str> {
        match self {
            FormTarget::Create(url) => Some(url),
            FormTarget::Update(_) => None,
        }
    }

    pub fn put_url(self) -> Option<&'a str> {
        match self {
            FormTarget::Create(_) => None,
            FormTarget::Update(url) => Some(url),
        }
    }
}

/// A page with a single centred form under `heading`.
pub fn form_page(title: &str, active_endpoint: &str, heading: &str, form: &Markup) -> Markup {
    let content = html! {
        div class=(FORM_CONTAINER_STYLE)
        {
            h1 class="text-xl font-bold mb-4 self-start" { (heading) }

            (form)
        }
    };

    page(title, active_endpoint, &[currency_input_styles()], &content)
}

/// A labelled number input for an amount in KES.
pub fn amount_field(label: &str, name: &str, value: &str) -> Markup {
    html! {
        div
        {
            label for=(name) class=(FORM_LABEL_STYLE) { (label) }

            div class="input-wrapper"
            {
                input
                    type="number"
                    name=(name)
                    id=(name)
                    value=(value)
                    step="0.01"
                    min="0"
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }
        }
    }
}

/// A small rounded label, e.g. for a payment status.
pub fn badge(text: &str, colour: &str) -> Markup {
    html! {
        span class={ (BADGE_STYLE) " " (colour) } { (text) }
    }
}

/// A labelled `<input>` whose ID is its name.
pub fn input_field(label: &str, name: &str, type_: &str, value: &str, required: bool) -> Markup {
    html! {
        div
        {
            label for=(name) class=(FORM_LABEL_STYLE) { (label) }

            input
                type=(type_)
                name=(name)
                id=(name)
                value=(value)
                step=[(type_ == "number").then_some("0.01")]
                min=[(type_ == "number").then_some("0")]
                required[required]
                class=(FORM_TEXT_INPUT_STYLE);
        }
    }
}

/// A labelled `<select>` with `options` given as (value, label) pairs.
pub fn select_field(
    label: &str,
    name: &str,
    options: &[(String, String)],
    selected: &str,
    required: bool,
) -> Markup {
    html! {
        div
        {
            label for=(name) class=(FORM_LABEL_STYLE) { (label) }

            select name=(name) id=(name) required[required] class=(FORM_TEXT_INPUT_STYLE)
            {
                @if required {
                    option value="" disabled selected[selected.is_empty()] { "Choose..." }
                } @else {
                    option value="" selected[selected.is_empty()] { "None" }
                }

                @for (value, text) in options {
                    option value=(value) selected[value == selected] { (text) }
                }
            }
        }
    }
}

/// A labelled multi-line text input.
pub fn textarea_field(label: &str, name: &str, value: &str) -> Markup {
    html! {
        div
        {
            label for=(name) class=(FORM_LABEL_STYLE) { (label) }

            textarea name=(name) id=(name) rows="3" class=(FORM_TEXT_INPUT_STYLE) { (value) }
        }
    }
}

/// A checkbox that submits `value="true"` when ticked.
pub fn checkbox_field(label: &str, name: &str, checked: bool) -> Markup {
    html! {
        div class="flex items-center gap-2"
        {
            input
                type="checkbox"
                name=(name)
                id=(name)
                value="true"
                checked[checked]
                class="w-4 h-4 rounded";

            label for=(name) class="text-sm font-medium text-gray-900 dark:text-white" { (label) }
        }
    }
}

pub fn submit_button(text: &str) -> Markup {
    html! {
        button type="submit" id="submit-button" tabindex="0" class=(BUTTON_PRIMARY_STYLE)
        {
            span class="inline htmx-indicator" id="indicator"
            {
                (loading_spinner())
            }
            (text)
        }
    }
}

pub fn loading_spinner() -> Markup {
    // Spinner SVG adapted from https://flowbite.com/docs/components/spinner/
    html! {
        svg
            aria-hidden="true"
            role="status"
            class="inline text-white w-4 h-4 me-2 mb-1 animate-spin"
            viewBox="0 0 100 101"
            fill="none"
            xmlns="http://www.w3.org/2000/svg"
        {
            path
                d="M100 50.5908C100 78.2051 77.6142 100.591 50 100.591C22.3858 100.591 0 78.2051 0 50.5908C0 22.9766 22.3858 0.59082 50 0.59082C77.6142 0.59082 100 22.9766 100 50.5908ZM9.08144 50.5908C9.08144 73.1895 27.4013 91.5094 50 91.5094C72.5987 91.5094 90.9186 73.1895 90.9186 50.5908C90.9186 27.9921 72.5987 9.67226 50 9.67226C27.4013 9.67226 9.08144 27.9921 9.08144 50.5908Z"
                fill="#E5E7EB" {}
            path
                d="M93.9676 39.0409C96.393 38.4038 97.8624 35.9116 97.0079 33.5539C95.2932 28.8227 92.871 24.3692 89.8167 20.348C85.8452 15.1192 80.8826 10.7238 75.2124 7.41289C69.5422 4.10194 63.2754 1.94025 56.7698 1.05124C51.7666 0.367541 46.6976 0.446843 41.7345 1.27873C39.2613 1.69328 37.813 4.19778 38.4501 6.62326C39.0873 9.04874 41.5694 10.4717 44.0505 10.1071C47.8511 9.54855 51.7191 9.52689 55.5402 10.0491C60.8642 10.7766 65.9928 12.5457 70.6331 15.2552C75.2735 17.9648 79.3347 21.5619 82.5849 25.841C84.9175 28.9121 86.7997 32.2913 88.1811 35.8758C89.083 38.2158 91.5421 39.6781 93.9676 39.0409Z"
                fill="currentColor" {}
        }
    }
}

/// A message shown in place of data that could not be loaded.
pub fn load_error(message: &str) -> Markup {
    html! {
        p role="status" class="w-full p-3 text-sm text-red-800 bg-red-50 rounded dark:bg-gray-800 dark:text-red-400"
        {
            (message)
        }
    }
}

/// A table cell with a delete button that removes its row once the server confirms.
pub fn delete_cell(url: &str, confirm: &str) -> Markup {
    html! {
        button
            type="button"
            class=(BUTTON_DELETE_STYLE)
            hx-delete=(url)
            hx-confirm=(confirm)
            hx-target="closest tr"
            hx-target-error=(format!("#{ALERT_CONTAINER_ID}"))
            hx-swap="delete"
        {
            "Delete"
        }
    }
}

/// A table with a header row of `headers`. `empty_message` fills the body when
/// `rows` is empty.
pub fn data_table(headers: &[&str], rows: &[Markup], empty_message: &str) -> Markup {
    html! {
        div class="w-full overflow-x-auto rounded-lg shadow"
        {
            table class="w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        @for header in headers {
                            th scope="col" class=(TABLE_CELL_STYLE) { (header) }
                        }
                    }
                }

                tbody
                {
                    @for row in rows {
                        (row)
                    }

                    @if rows.is_empty() {
                        tr class=(TABLE_ROW_STYLE)
                        {
                            td colspan=(headers.len()) class="px-6 py-4 text-center"
                            {
                                (empty_message)
                            }
                        }
                    }
                }
            }
        }
    }
}

/// The edit link and delete button for a table row.
pub fn row_actions(edit_url: &str, delete_url: &str, confirm: &str) -> Markup {
    html! {
        div class="flex gap-4"
        {
            (link(edit_url, "Edit"))
            (delete_cell(delete_url, confirm))
        }
    }
}

/// A page heading with a link to add a record.
pub fn list_header(title: &str, new_url: &str, new_text: &str) -> Markup {
    html! {
        header class="w-full flex justify-between flex-wrap items-end mb-4"
        {
            h1 class="text-xl font-bold" { (title) }

            (link(new_url, new_text))
        }
    }
}

/// Label and value pairs for a details page.
pub fn detail_list(items: &[(&str, Markup)]) -> Markup {
    html! {
        dl class="grid grid-cols-1 sm:grid-cols-2 gap-4"
        {
            @for (label, value) in items {
                div
                {
                    dt class="text-sm font-medium text-gray-500 dark:text-gray-400" { (label) }
                    dd class="mt-1 text-gray-900 dark:text-white" { (value) }
                }
            }
        }
    }
}

/// The `?status=` query of a list page. An empty status shows every record.
#[derive(Debug, Default, Deserialize)]
pub struct StatusFilter {
    #[serde(default)]
    pub status: String,
}

/// Links for choosing a status filter, with `current` highlighted.
///
/// An empty value in `options` means no filter.
pub fn filter_links(base_url: &str, options: &[(&str, &str)], current: &str) -> Markup {
    html! {
        div class="flex flex-wrap gap-2 mb-4"
        {
            @for (value, text) in options {
                @let href = if value.is_empty() {
                    base_url.to_owned()
                } else {
                    format!(
                        "{base_url}?{}",
                        serde_urlencoded::to_string([("status", value)]).unwrap_or_default()
                    )
                };
                @let style = if *value == current {
                    "px-3 py-1 rounded-full text-sm bg-blue-600 text-white"
                } else {
                    "px-3 py-1 rounded-full text-sm bg-gray-200 text-gray-800 dark:bg-gray-700 dark:text-gray-200"
                };

                a href=(href) class=(style) { (text) }
            }
        }
    }
}

/// Returns the CSS styles for adding a currency prefix to number inputs.
pub fn currency_input_styles() -> HeadElement {
    HeadElement::Style(PreEscaped(
        r#"
        .input-wrapper {
            position: relative;
            display: block;
        }
        .input-wrapper input[type="number"] {
            padding-left: 3rem;
        }
        .input-wrapper::before {
            content: 'KES';
            position: absolute;
            left: 0.6rem;
            top: 50%;
            transform: translateY(-50%);
            pointer-events: none;
        }
        "#
        .to_owned(),
    ))
}

/// Format `number` as Kenyan shillings, e.g. "KES 1,234.50".
pub fn format_currency(number: f64) -> String {
    static FORMATTER: OnceLock<Option<Formatter>> = OnceLock::new();

    if !number.is_finite() {
        return format!("KES {number}");
    }

    let formatter = FORMATTER.get_or_init(|| {
        Formatter::new()
            .separator(',')
            .ok()
            .map(|formatter| formatter.precision(Precision::Decimals(2)))
    });

    let digits = match formatter {
        // Zero is hardcoded as "0" by numfmt.
        Some(formatter) if number != 0.0 => formatter.fmt_string(number.abs()),
        _ => format!("{:.2}", number.abs()),
    };

    let sign = if number < 0.0 { "-" } else { "" };

    format!("{sign}KES {}", with_two_decimals(&digits))
}

/// numfmt omits trailing zeros, e.g. "12.30" is rendered as "12.3".
fn with_two_decimals(digits: &str) -> String {
    match digits.split_once('.') {
        Some((whole, fraction)) => {
            let fraction: String = fraction.chars().chain("00".chars()).take(2).collect();
            format!("{whole}.{fraction}")
        }
        None => format!("{digits}.00"),
    }
}

/// A link with blue text for use in a <p> tag.
pub fn link(url: &str, text: &str) -> Markup {
    html! (
        a href=(url) class=(LINK_STYLE)
        {
          (text)
        }
    )
}
