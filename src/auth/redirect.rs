//! Where to send the administrator after they log in.
//!
//! Only same-origin paths are accepted as redirect targets so that the log-in
//! page cannot be used to bounce users to another site.

use axum::{extract::Request, http::Uri};

use crate::endpoints;

fn is_same_origin_target(path_and_query: &str) -> bool {
    if !path_and_query.starts_with('/') || path_and_query.starts_with("//") {
        return false;
    }

    let path = path_and_query
        .split_once('?')
        .map_or(path_and_query, |(path, _)| path);

    path != endpoints::LOG_IN_VIEW && path != endpoints::LOG_OUT
}

/// The path and query of `raw_url` if it is a safe redirect target.
///
/// URLs with a scheme or host are rejected.
pub fn normalize_redirect_url(raw_url: &str) -> Option<String> {
    let uri = raw_url.parse::<Uri>().ok()?;

    if uri.scheme().is_some() || uri.authority().is_some() {
        return None;
    }

    let path_and_query = uri.path_and_query()?.as_str();
    is_same_origin_target(path_and_query).then(|| path_and_query.to_owned())
}

/// The log-in page URL that returns to `target` after logging in.
pub fn log_in_url_for(target: &str) -> Option<String> {
    match serde_urlencoded::to_string([("redirect_url", target)]) {
        Ok(query) => Some(format!("{}?{query}", endpoints::LOG_IN_VIEW)),
        Err(error) => {
            tracing::error!("Could not encode redirect URL {target}: {error}");
            None
        }
    }
}

/// The log-in page URL that returns to the page `request` came from.
///
/// Page requests return to the requested URL. htmx requests to `/api` routes
/// return to the page the browser is showing, taken from `HX-Current-URL`.
pub fn log_in_url_from_request(request: &Request) -> Option<String> {
    let target = if request.uri().path().starts_with("/api") {
        htmx_current_page(request)?
    } else {
        normalize_redirect_url(request.uri().path_and_query()?.as_str())?
    };

    log_in_url_for(&target)
}

fn htmx_current_page(request: &Request) -> Option<String> {
    let headers = request.headers();
    let is_htmx = headers
        .get("hx-request")
        .and_then(|header| header.to_str().ok())
        .is_some_and(|header| header.eq_ignore_ascii_case("true"));

    if !is_htmx {
        tracing::warn!("Missing HX-Request header for /api request.");
        return None;
    }

    let Some(current_url) = headers
        .get("hx-current-url")
        .and_then(|header| header.to_str().ok())
    else {
        tracing::warn!("Missing HX-Current-URL header for /api request.");
        return None;
    };

    // HX-Current-URL is absolute, keep the path and query only.
    let target = current_url
        .parse::<Uri>()
        .ok()
        .and_then(|uri| uri.path_and_query().map(|path| path.as_str().to_owned()))
        .filter(|path| is_same_origin_target(path));

    if target.is_none() {
        tracing::warn!("Invalid HX-Current-URL header value: {current_url}");
    }

    target
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, extract::Request};

    use crate::endpoints;

    use super::{log_in_url_for, log_in_url_from_request, normalize_redirect_url};

    #[test]
    fn accepts_local_paths() {
        assert_eq!(
            normalize_redirect_url("/rentals?status=Past"),
            Some("/rentals?status=Past".to_owned())
        );
    }

    #[test]
    fn rejects_other_sites_and_auth_pages() {
        for url in [
            "https://evil.example.com/dashboard",
            "//evil.example.com",
            "dashboard",
            endpoints::LOG_IN_VIEW,
            "/log_in?redirect_url=%2Fdashboard",
            endpoints::LOG_OUT,
        ] {
            assert_eq!(normalize_redirect_url(url), None, "{url}");
        }
    }

    #[test]
    fn log_in_url_encodes_target() {
        assert_eq!(
            log_in_url_for("/payments?page=2").as_deref(),
            Some("/log_in?redirect_url=%2Fpayments%3Fpage%3D2")
        );
    }

    #[test]
    fn htmx_request_returns_to_current_page() {
        let request = Request::builder()
            .uri("/api/payments/p1")
            .header("HX-Request", "true")
            .header("HX-Current-URL", "http://localhost:3000/payments")
            .body(Body::empty())
            .unwrap();

        assert_eq!(
            log_in_url_from_request(&request).as_deref(),
            Some("/log_in?redirect_url=%2Fpayments")
        );
    }

    #[test]
    fn api_request_without_htmx_headers_has_no_target() {
        let request = Request::builder()
            .uri("/api/payments/p1")
            .body(Body::empty())
            .unwrap();

        assert_eq!(log_in_url_from_request(&request), None);
    }
}
