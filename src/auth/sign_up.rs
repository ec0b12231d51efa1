//! The sign-up page and the endpoint that creates an account on the remote API.

use axum::{
    Form,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use zxcvbn::{Score, feedback::Feedback, zxcvbn};

use crate::{
    AppState, Error,
    alert::Alert,
    api::ApiClient,
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, LINK_STYLE, base, input_field, log_in_register, password_input,
        select_field, submit_button,
    },
};

const SIGN_UP_PATH: &str = "/api/auth/signUp";

/// The roles an account can be created with.
pub const ROLES: [&str; 2] = ["Admin", "Supervisor"];

/// A password that zxcvbn scores as hard to guess.
#[derive(Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct StrongPassword(String);

impl StrongPassword {
    /// Check `password` is strong enough, penalising passwords built from `user_inputs`.
    ///
    /// # Errors
    ///
    /// Returns [Error::TooWeak] with zxcvbn's suggestions if the score is below three.
    pub fn new(password: &str, user_inputs: &[&str]) -> Result<Self, Error> {
        let analysis = zxcvbn(password, user_inputs);

        match analysis.score() {
            Score::Three | Score::Four => Ok(Self(password.to_owned())),
            _ => Err(Error::TooWeak(
                analysis
                    .feedback()
                    .unwrap_or(&Feedback::default())
                    .to_string(),
            )),
        }
    }
}

impl std::fmt::Debug for StrongPassword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("StrongPassword(********)")
    }
}

fn sign_up_form() -> Markup {
    let roles: Vec<(String, String)> = ROLES
        .iter()
        .map(|role| ((*role).to_owned(), (*role).to_owned()))
        .collect();

    html! {
        form
            hx-post=(endpoints::SIGN_UP_API)
            hx-swap="outerHTML"
            hx-target-error="#alert-container"
            hx-indicator="#indicator"
            hx-disabled-elt="#submit-button"
            class="space-y-4 md:space-y-6"
        {
            (input_field("Name", "name", "text", "", true))
            (input_field("Email", "email", "email", "", true))
            (password_input("", 8, None))
            (select_field("Role", "role", &roles, ROLES[0], true))
            (submit_button("Sign up"))

            p class="text-sm font-light text-gray-500 dark:text-gray-400" {
                "Already have an account? "
                a href=(endpoints::LOG_IN_VIEW) tabindex="0" class=(LINK_STYLE) { "Log in here" }
            }
        }
    }
}

/// Display the sign-up page.
pub async fn get_sign_up_page() -> Response {
    let content = log_in_register("Create an account", &sign_up_form());

    base("Sign Up", &[], &content).into_response()
}

/// The state needed to sign up.
#[derive(Debug, Clone)]
pub struct SignUpState {
    pub api: ApiClient,
}

impl FromRef<AppState> for SignUpState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            api: state.api.clone(),
        }
    }
}

/// The data entered by the user in the sign-up form.
#[derive(Clone, Serialize, Deserialize)]
pub struct SignUpData {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub role: String,
}

#[derive(Debug, Serialize)]
struct NewAccount<'a> {
    name: &'a str,
    email: &'a str,
    password: StrongPassword,
    role: &'a str,
}

fn validate(data: &SignUpData) -> Result<NewAccount<'_>, Error> {
    let name = data.name.trim();
    let email = data.email.trim();
    let role = data.role.trim();

    if name.is_empty() || email.is_empty() || data.password.is_empty() || role.is_empty() {
        return Err(Error::Validation("Please fill in all fields.".to_owned()));
    }

    if !email.contains('@') {
        return Err(Error::Validation(
            "Please enter a valid email address.".to_owned(),
        ));
    }

    if !ROLES.contains(&role) {
        return Err(Error::Validation(format!(
            "Role must be one of {}.",
            ROLES.join(", ")
        )));
    }

    let password = StrongPassword::new(&data.password, &[name, email])?;

    Ok(NewAccount {
        name,
        email,
        password,
        role,
    })
}

/// Create an account with the remote API.
///
/// The form is validated before any request is sent. On success an alert with
/// a link to the log-in page is shown.
pub async fn post_sign_up(
    State(state): State<SignUpState>,
    Form(data): Form<SignUpData>,
) -> Response {
    let account = match validate(&data) {
        Ok(account) => account,
        Err(error) => return error.into_alert_response(),
    };

    if let Err(error) = state
        .api
        .submit_json(Method::POST, SIGN_UP_PATH, &account, None)
        .await
    {
        return Alert::Error {
            message: "Could not create your account".to_owned(),
            details: error.user_message(),
        }
        .into_response_with_status(StatusCode::BAD_GATEWAY);
    }

    tracing::info!("Created an account for {}", account.email);

    sign_up_success().into_response()
}

/// Replaces the sign-up form once the account exists.
fn sign_up_success() -> Markup {
    html! {
        div class="space-y-4"
        {
            (Alert::SuccessSimple { message: "Account created".to_owned() }.into_html())

            a href=(endpoints::LOG_IN_VIEW) class=(BUTTON_PRIMARY_STYLE) { "Log in" }
        }
    }
}
