//! A client for the remote rent-collection REST API.
//!
//! Every request to the remote API is built by [ApiClient::request], which
//! attaches the session's bearer token when a session is given.

use std::time::Duration;

use reqwest::{Method, RequestBuilder, Response, StatusCode, multipart};
use serde::{Deserialize, Deserializer, Serialize, de::DeserializeOwned};

use crate::auth::Session;

/// The errors that may occur when calling the remote API.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// The remote API could not be reached or did not respond in time.
    #[error("could not reach the remote API: {0}")]
    Network(String),

    /// The remote API responded with a non-2xx status code.
    ///
    /// `message` is taken from the response body when the server provides one.
    #[error("the remote API responded with {status}: {message}")]
    Status {
        /// The status code of the response.
        status: StatusCode,
        /// The message from the server, or the reason phrase for `status`.
        message: String,
    },

    /// The response body did not have the expected shape.
    #[error("could not decode the remote API response: {0}")]
    Decode(String),

    /// The request could not be built.
    #[error("could not build the request: {0}")]
    Request(String),
}

impl ApiError {
    /// The message to show to the user for this error.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Network(_) => {
                "Could not reach the server. Check your connection and try again.".to_owned()
            }
            ApiError::Status { message, .. } => message.clone(),
            ApiError::Decode(_) => "The server sent a response that could not be read.".to_owned(),
            ApiError::Request(_) => "The request could not be sent.".to_owned(),
        }
    }
}

/// The optional error body sent by the remote API.
#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// A handle to the remote API. Cheap to clone.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the API served at `base_url`.
    ///
    /// Requests that take longer than `timeout` fail with [ApiError::Network].
    ///
    /// # Errors
    ///
    /// Returns an [ApiError::Request] if the HTTP client cannot be initialised.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|error| ApiError::Request(error.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// The base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Start building a request for `path`.
    ///
    /// If `session` is given, its token is sent in the header
    /// `Authorization: Bearer <token>`. Without a session no `Authorization`
    /// header is sent.
    pub fn request(&self, method: Method, path: &str, session: Option<&Session>) -> RequestBuilder {
        let builder = self
            .http
            .request(method, format!("{}{}", self.base_url, path));

        match session {
            Some(session) => builder.bearer_auth(&session.token),
            None => builder,
        }
    }

    /// GET `path` and decode the JSON response.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        session: Option<&Session>,
    ) -> Result<T, ApiError> {
        let request = self.request(Method::GET, path, session);
        let response = self.send(request, &Method::GET, path).await?;

        decode(response).await
    }

    /// GET `path` with `query` parameters and decode the JSON response.
    pub async fn get_with_query<T, Q>(
        &self,
        path: &str,
        query: &Q,
        session: Option<&Session>,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let request = self.request(Method::GET, path, session).query(query);
        let response = self.send(request, &Method::GET, path).await?;

        decode(response).await
    }

    /// Send `body` as JSON and decode the JSON response.
    pub async fn send_json<B, T>(
        &self,
        method: Method,
        path: &str,
        body: &B,
        session: Option<&Session>,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(method.clone(), path, session).json(body);
        let response = self.send(request, &method, path).await?;

        decode(response).await
    }

    /// Send `body` as JSON, ignoring the response body.
    pub async fn submit_json<B>(
        &self,
        method: Method,
        path: &str,
        body: &B,
        session: Option<&Session>,
    ) -> Result<(), ApiError>
    where
        B: Serialize + ?Sized,
    {
        let request = self.request(method.clone(), path, session).json(body);
        self.send(request, &method, path).await.map(|_| ())
    }

    /// Send `form` as `multipart/form-data`, ignoring the response body.
    pub async fn submit_multipart(
        &self,
        method: Method,
        path: &str,
        form: multipart::Form,
        session: Option<&Session>,
    ) -> Result<(), ApiError> {
        let request = self.request(method.clone(), path, session).multipart(form);
        self.send(request, &method, path).await.map(|_| ())
    }

    /// DELETE `path`.
    pub async fn delete(&self, path: &str, session: Option<&Session>) -> Result<(), ApiError> {
        let request = self.request(Method::DELETE, path, session);
        self.send(request, &Method::DELETE, path).await.map(|_| ())
    }

    async fn send(
        &self,
        request: RequestBuilder,
        method: &Method,
        path: &str,
    ) -> Result<Response, ApiError> {
        let response = request
            .send()
            .await
            .inspect_err(|error| tracing::error!("{method} {path} could not be sent: {error}"))
            .map_err(|error| ApiError::Network(error.to_string()))?;

        let status = response.status();

        if status.is_success() {
            tracing::debug!("{method} {path} returned {status}");
            return Ok(response);
        }

        let message = error_message(response).await;
        tracing::error!("{method} {path} returned {status}: {message}");

        Err(ApiError::Status { status, message })
    }
}

/// Deserialize a JSON null as the default value of `T`.
///
/// Use with `#[serde(default, deserialize_with = "crate::api::null_as_default")]`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let body = response
        .bytes()
        .await
        .map_err(|error| ApiError::Network(error.to_string()))?;

    serde_json::from_slice(&body)
        .inspect_err(|error| tracing::error!("Could not decode response body: {error}"))
        .map_err(|error| ApiError::Decode(error.to_string()))
}

async fn error_message(response: Response) -> String {
    let status = response.status();
    let fallback = || {
        status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_owned()
    };

    match response.bytes().await {
        Ok(body) => serde_json::from_slice::<ErrorBody>(&body)
            .ok()
            .and_then(|body| body.message)
            .filter(|message| !message.trim().is_empty())
            .unwrap_or_else(fallback),
        Err(_) => fallback(),
    }
}


#[cfg(test)]
mod response_tests {
    use std::time::Duration;

    use axum::{Json, Router, http::StatusCode, routing::get};
    use serde_json::json;

    use crate::{
        api::{ApiClient, ApiError},
        test_utils::{spawn_remote, test_session},
    };

    #[tokio::test]
    async fn decodes_json_and_records_bearer_token() {
        let router = Router::new().route(
            "/api/admin/dashboard/summary",
            get(|| async { Json(json!({"totalRenters": 3})) }),
        );
        let remote = spawn_remote(router).await;
        let client = ApiClient::new(&remote.base_url, Duration::from_secs(5)).unwrap();

        let body: serde_json::Value = client
            .get("/api/admin/dashboard/summary", Some(&test_session("abc")))
            .await
            .unwrap();

        assert_eq!(body["totalRenters"], 3);
        let requests = remote.log.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].authorization.as_deref(), Some("Bearer abc"));
    }

    #[tokio::test]
    async fn error_status_uses_server_message() {
        let router = Router::new().route(
            "/api/admin/payments",
            get(|| async {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({"message": "Invalid rental"})),
                )
            }),
        );
        let remote = spawn_remote(router).await;
        let client = ApiClient::new(&remote.base_url, Duration::from_secs(5)).unwrap();

        let result = client
            .get::<serde_json::Value>("/api/admin/payments", None)
            .await;

        assert_eq!(
            result,
            Err(ApiError::Status {
                status: StatusCode::BAD_REQUEST,
                message: "Invalid rental".to_owned(),
            })
        );
    }

    #[tokio::test]
    async fn error_status_without_message_uses_reason_phrase() {
        let router = Router::new().route(
            "/api/admin/payments",
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        );
        let remote = spawn_remote(router).await;
        let client = ApiClient::new(&remote.base_url, Duration::from_secs(5)).unwrap();

        let result = client
            .get::<serde_json::Value>("/api/admin/payments", None)
            .await;

        assert_eq!(
            result,
            Err(ApiError::Status {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: "Internal Server Error".to_owned(),
            })
        );
    }

    #[tokio::test]
    async fn unexpected_body_is_a_decode_error() {
        let router = Router::new().route("/api/admin/rentals", get(|| async { "not json" }));
        let remote = spawn_remote(router).await;
        let client = ApiClient::new(&remote.base_url, Duration::from_secs(5)).unwrap();

        let result = client
            .get::<Vec<serde_json::Value>>("/api/admin/rentals", None)
            .await;

        assert!(matches!(result, Err(ApiError::Decode(_))));
    }

    #[tokio::test]
    async fn unreachable_server_is_a_network_error() {
        let client = ApiClient::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();

        let result = client.delete("/api/admin/payment/p1", None).await;

        assert!(matches!(result, Err(ApiError::Network(_))));
    }
}
