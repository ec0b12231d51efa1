//! The log-in page and the endpoint that signs in with the remote API.

use axum::{
    Form,
    extract::{FromRef, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use time::Duration;

use crate::{
    AppState,
    api::ApiClient,
    auth::{
        Session,
        redirect::normalize_redirect_url,
        session::{clear_session, save_session},
    },
    endpoints,
    html::{
        FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, LINK_STYLE, base, log_in_register,
        password_input, submit_button,
    },
    store::DashboardStores,
};

const SIGN_IN_PATH: &str = "/api/auth/signIn";

/// How long the session cookie should last if the user selects "remember me" at log-in.
pub const REMEMBER_ME_COOKIE_DURATION: Duration = Duration::days(7);

pub const MISSING_CREDENTIALS_ERROR_MSG: &str = "Please enter your email and password.";

fn log_in_form(email: &str, error_message: Option<&str>, redirect_url: Option<&str>) -> Markup {
    html! {
        form
            hx-post=(endpoints::LOG_IN_API)
            hx-swap="outerHTML"
            hx-indicator="#indicator"
            hx-disabled-elt="#email, #password, #submit-button"
            class="space-y-4 md:space-y-6"
        {
            @if let Some(redirect_url) = redirect_url {
                input type="hidden" name="redirect_url" value=(redirect_url);
            }

            div
            {
                label for="email" class=(FORM_LABEL_STYLE) { "Email" }

                input
                    type="email"
                    name="email"
                    id="email"
                    placeholder="you@example.com"
                    autocomplete="username"
                    value=(email)
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            (password_input("", 0, error_message))

            div class="flex items-center gap-x-3"
            {
                input
                    type="checkbox"
                    name="remember_me"
                    id="remember_me"
                    tabindex="0"
                    class="rounded-xs";

                label
                    for="remember_me"
                    class="block text-sm font-medium text-gray-900 dark:text-white"
                {
                    "Keep me logged in for one week"
                }
            }

            (submit_button("Log in"))

            p class="text-sm font-light text-gray-500 dark:text-gray-400" {
                "Don't have an account? "
                a href=(endpoints::SIGN_UP_VIEW) tabindex="0" class=(LINK_STYLE)
                {
                    "Sign up here"
                }
            }
        }
    }
}

fn parse_redirect_url(raw_url: Option<&str>, source: &str) -> Option<String> {
    let redirect_url = raw_url.and_then(normalize_redirect_url);

    if redirect_url.is_none()
        && let Some(raw_url) = raw_url
    {
        tracing::warn!("Invalid redirect URL from {source}: {raw_url}");
    }

    redirect_url
}

#[derive(Deserialize)]
pub struct RedirectQuery {
    pub redirect_url: Option<String>,
}

/// Display the log-in page.
pub async fn get_log_in_page(Query(query): Query<RedirectQuery>) -> Response {
    let redirect_url = parse_redirect_url(query.redirect_url.as_deref(), "log-in query");
    let form = log_in_form("", None, redirect_url.as_deref());
    let content = log_in_register("Log in to your account", &form);

    base("Log In", &[], &content).into_response()
}

/// The state needed to log in.
#[derive(Debug, Clone)]
pub struct LogInState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,
    /// The duration for which session cookies are valid.
    pub cookie_duration: Duration,
    pub api: ApiClient,
    pub stores: DashboardStores,
}

impl FromRef<AppState> for LogInState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            cookie_duration: state.cookie_duration,
            api: state.api.clone(),
            stores: state.stores.clone(),
        }
    }
}

impl FromRef<LogInState> for Key {
    fn from_ref(state: &LogInState) -> Self {
        state.cookie_key.clone()
    }
}

/// The data entered by the user in the log-in form.
#[derive(Clone, Serialize, Deserialize)]
pub struct LogInData {
    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub password: String,

    /// Whether to extend the initial session duration.
    ///
    /// This value comes from a checkbox, so `Some` means checked whatever its value.
    pub remember_me: Option<String>,

    /// Optional URL to redirect to after logging in.
    pub redirect_url: Option<String>,
}

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

/// Handler for log-in requests.
///
/// On success the session cookie is set, the session's dashboard store is
/// loaded, and the client is redirected to `redirect_url` or the dashboard.
/// Otherwise the form is returned with an error message.
pub async fn post_log_in(
    State(state): State<LogInState>,
    jar: PrivateCookieJar,
    Form(data): Form<LogInData>,
) -> Response {
    let redirect_url = parse_redirect_url(data.redirect_url.as_deref(), "log-in form");
    let redirect_url = redirect_url.as_deref();
    let email = data.email.trim();

    if email.is_empty() || data.password.is_empty() {
        return log_in_form(email, Some(MISSING_CREDENTIALS_ERROR_MSG), redirect_url)
            .into_response();
    }

    let credentials = Credentials {
        email,
        password: &data.password,
    };
    let session: Session = match state
        .api
        .send_json(Method::POST, SIGN_IN_PATH, &credentials, None)
        .await
    {
        Ok(session) => session,
        Err(error) => {
            tracing::info!("Sign in failed for {email}: {error}");
            return log_in_form(email, Some(&error.user_message()), redirect_url).into_response();
        }
    };

    let cookie_duration = if data.remember_me.is_some() {
        REMEMBER_ME_COOKIE_DURATION
    } else {
        state.cookie_duration
    };

    let jar = match save_session(jar.clone(), &session, cookie_duration) {
        Ok(jar) => jar,
        Err(error) => {
            tracing::error!("Error saving the session cookie: {error}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                HxRedirect(endpoints::INTERNAL_ERROR_VIEW.to_owned()),
                clear_session(jar),
            )
                .into_response();
        }
    };

    state.stores.get_or_load(&session).await;
    tracing::info!("{} signed in", session.email);

    let redirect_url = redirect_url.unwrap_or(endpoints::DASHBOARD_VIEW);

    (
        StatusCode::SEE_OTHER,
        HxRedirect(redirect_url.to_owned()),
        jar,
    )
        .into_response()
}

#[cfg(test)]
mod log_in_tests {
    use std::time::Duration as StdDuration;

    use axum::{
        Form, Json, Router,
        extract::{Query, State},
        http::StatusCode,
        routing::post,
    };
    use axum_extra::extract::PrivateCookieJar;
    use reqwest::Method;
    use scraper::Selector;
    use serde_json::json;

    use crate::{
        api::ApiClient,
        app_state::create_cookie_key,
        auth::{COOKIE_USER_INFO, DEFAULT_COOKIE_DURATION},
        endpoints,
        store::DashboardStores,
        test_utils::{
            FakeRemote, assert_form_input, assert_hx_endpoint, assert_hx_redirect,
            assert_status, assert_valid_html, get_header, must_get_form, parse_html_document,
            parse_html_fragment, spawn_remote, with_dashboard_routes,
        },
    };

    use super::{
        LogInData, LogInState, MISSING_CREDENTIALS_ERROR_MSG, RedirectQuery, get_log_in_page,
        post_log_in,
    };

    async fn log_in_state() -> (FakeRemote, LogInState) {
        let router = Router::new().route(
            "/api/auth/signIn",
            post(|Json(body): Json<serde_json::Value>| async move {
                if body["password"] == "correct horse battery staple" {
                    (
                        StatusCode::OK,
                        Json(json!({
                            "_id": "u1",
                            "name": "Jane Wanjiru",
                            "email": body["email"],
                            "token": "abc",
                            "role": "Admin",
                            "isAdmin": true
                        })),
                    )
                } else {
                    (
                        StatusCode::UNAUTHORIZED,
                        Json(json!({"message": "Invalid Email or Password!"})),
                    )
                }
            }),
        );
        let remote = spawn_remote(with_dashboard_routes(router)).await;
        let api = ApiClient::new(&remote.base_url, StdDuration::from_secs(5)).unwrap();
        let state = LogInState {
            cookie_key: create_cookie_key("foobar"),
            cookie_duration: DEFAULT_COOKIE_DURATION,
            stores: DashboardStores::new(
                api.clone(),
                "Etc/UTC",
                StdDuration::from_secs(60),
                StdDuration::from_secs(60),
            ),
            api,
        };

        (remote, state)
    }

    fn log_in_data(email: &str, password: &str, redirect_url: Option<&str>) -> LogInData {
        LogInData {
            email: email.to_owned(),
            password: password.to_owned(),
            remember_me: None,
            redirect_url: redirect_url.map(str::to_owned),
        }
    }

    #[tokio::test]
    async fn log_in_page_displays_form() {
        let response = get_log_in_page(Query(RedirectQuery {
            redirect_url: Some("/payments".to_owned()),
        }))
        .await;

        assert_status(&response, StatusCode::OK);
        let document = parse_html_document(response).await;
        assert_valid_html(&document);
        let form = must_get_form(&document);
        assert_hx_endpoint(&form, endpoints::LOG_IN_API, "hx-post");
        assert_form_input(&form, "email", "email");
        assert_form_input(&form, "password", "password");
        let redirect = form
            .select(&Selector::parse("input[name=redirect_url]").unwrap())
            .next()
            .expect("No redirect_url input");
        assert_eq!(redirect.value().attr("value"), Some("/payments"));
    }

    #[tokio::test]
    async fn log_in_saves_session_and_loads_store() {
        let (remote, state) = log_in_state().await;
        let jar = PrivateCookieJar::new(state.cookie_key.clone());
        let stores = state.stores.clone();

        let response = post_log_in(
            State(state),
            jar,
            Form(log_in_data(
                "jane@example.com",
                "correct horse battery staple",
                Some("/rentals"),
            )),
        )
        .await;

        assert_status(&response, StatusCode::SEE_OTHER);
        assert_hx_redirect(&response, "/rentals");
        assert!(get_header(&response, "set-cookie").starts_with(COOKIE_USER_INFO));
        assert_eq!(stores.len(), 1);

        let requests = remote.log.requests();
        assert_eq!(requests[0].method, Method::POST);
        assert_eq!(requests[0].path, "/api/auth/signIn");
        assert_eq!(requests[0].authorization, None);
        assert_eq!(
            requests[0].json(),
            json!({"email": "jane@example.com", "password": "correct horse battery staple"})
        );
        assert!(
            requests[1..]
                .iter()
                .all(|request| request.authorization.as_deref() == Some("Bearer abc"))
        );
    }

    #[tokio::test]
    async fn log_in_defaults_to_dashboard() {
        let (_remote, state) = log_in_state().await;
        let jar = PrivateCookieJar::new(state.cookie_key.clone());

        let response = post_log_in(
            State(state),
            jar,
            Form(log_in_data(
                "jane@example.com",
                "correct horse battery staple",
                Some("https://evil.example.com"),
            )),
        )
        .await;

        assert_hx_redirect(&response, endpoints::DASHBOARD_VIEW);
    }

    #[tokio::test]
    async fn rejected_credentials_show_remote_message() {
        let (_remote, state) = log_in_state().await;
        let jar = PrivateCookieJar::new(state.cookie_key.clone());
        let stores = state.stores.clone();

        let response = post_log_in(
            State(state),
            jar,
            Form(log_in_data("jane@example.com", "wrong", None)),
        )
        .await;

        assert_status(&response, StatusCode::OK);
        assert!(response.headers().get("set-cookie").is_none());
        let html = parse_html_fragment(response).await;
        let message = html
            .select(&Selector::parse("p.text-red-500").unwrap())
            .next()
            .expect("No error message")
            .text()
            .collect::<String>();
        assert_eq!(message.trim(), "Invalid Email or Password!");
        assert_eq!(stores.len(), 0);
    }

    #[tokio::test]
    async fn missing_fields_are_rejected_before_any_request() {
        let (remote, state) = log_in_state().await;
        let jar = PrivateCookieJar::new(state.cookie_key.clone());

        let response = post_log_in(
            State(state),
            jar,
            Form(log_in_data("jane@example.com", "", None)),
        )
        .await;

        let html = parse_html_fragment(response).await;
        assert!(html.html().contains(MISSING_CREDENTIALS_ERROR_MSG));
        assert!(remote.log.requests().is_empty());
    }
}
