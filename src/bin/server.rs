use std::{env, fs::OpenOptions, net::SocketAddr, process::ExitCode, sync::Arc, time::Duration};

use axum::{
    Router,
    extract::{MatchedPath, Request},
};
use axum_server::Handle;
use clap::Parser;
use tower_http::trace::TraceLayer;

#[cfg(debug_assertions)]
use tower_livereload::LiveReloadLayer;

use tracing_subscriber::{EnvFilter, Layer, filter, layer::SubscriberExt, util::SubscriberInitExt};

use rentahub::{ApiClient, AppState, build_router, graceful_shutdown};

/// The web front end for the rental management API.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The address to serve the app from.
    #[arg(long, default_value = "127.0.0.1")]
    address: std::net::IpAddr,

    /// The port to serve the app from.
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Base URL of the remote rental management API.
    #[arg(
        long,
        env = "RENTAHUB_API_URL",
        default_value = "https://rent-collection-app-api.onrender.com"
    )]
    api_base_url: String,

    /// How long to wait for the remote API before giving up, in seconds.
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..))]
    api_timeout_secs: u64,

    /// How often each session's rentals are refreshed, in seconds.
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u64).range(1..))]
    poll_interval_secs: u64,

    /// Canonical name of the timezone used for "today", e.g. "Africa/Nairobi".
    #[arg(long, env = "RENTAHUB_TIMEZONE", default_value = "Africa/Nairobi")]
    timezone: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(error) = setup_logging() {
        eprintln!("Could not set up logging: {error}");
        return ExitCode::FAILURE;
    }

    let args = Args::parse();

    let Ok(secret) = env::var("SECRET") else {
        tracing::error!("The environment variable 'SECRET' must be set");
        return ExitCode::FAILURE;
    };

    if time_tz::timezones::get_by_name(&args.timezone).is_none() {
        tracing::error!("'{}' is not a valid timezone name", args.timezone);
        return ExitCode::FAILURE;
    }

    let api = match ApiClient::new(
        &args.api_base_url,
        Duration::from_secs(args.api_timeout_secs),
    ) {
        Ok(api) => api,
        Err(error) => {
            tracing::error!("Could not create the API client: {error}");
            return ExitCode::FAILURE;
        }
    };

    let app_state = AppState::new(
        &secret,
        &args.timezone,
        api,
        Duration::from_secs(args.poll_interval_secs),
    );

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = add_tracing_layer(build_router(app_state));

    #[cfg(debug_assertions)]
    let router = router.layer(LiveReloadLayer::new());

    let addr = SocketAddr::new(args.address, args.port);
    tracing::info!(
        "HTTP server listening on {addr}, using the API at {}",
        args.api_base_url
    );

    if let Err(error) = axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
    {
        tracing::error!("Server error: {error}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn setup_logging() -> std::io::Result<()> {
    let stdout_log = tracing_subscriber::fmt::layer().pretty();

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open("debug.log")?;

    let debug_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(Arc::new(log_file));

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("rentahub=debug,tower_http=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            stdout_log
                .with_filter(filter::LevelFilter::INFO)
                .and_then(debug_log)
                .with_filter(filter::LevelFilter::DEBUG),
        )
        .init();

    Ok(())
}

fn add_tracing_layer(router: Router) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();

            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched_path| matched_path.as_str());

            tracing::debug_span!("request", %method, %uri, matched_path)
        })
        // Errors are logged where they happen.
        .on_failure(());

    router.layer(tracing_layer)
}

#[cfg(test)]
mod args_tests {
    use clap::{CommandFactory, Parser};

    use super::Args;

    #[test]
    fn args_are_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn rejects_zero_intervals() {
        for flag in ["--poll-interval-secs", "--api-timeout-secs"] {
            let result = Args::try_parse_from(["server", flag, "0"]);

            assert!(result.is_err(), "want {flag} 0 to be rejected");
        }
    }

    #[test]
    fn defaults_to_nairobi_and_one_minute_polling() {
        let args = Args::try_parse_from(["server"]).unwrap();

        assert_eq!(args.poll_interval_secs, 60);
        assert_eq!(args.api_timeout_secs, 30);
        assert_eq!(args.timezone, "Africa/Nairobi");
    }
}
