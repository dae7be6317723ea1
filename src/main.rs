use clinic_portal::{
    config::{AppConfig, Env},
    create_supabase_router,
    router::Navigation,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// main
///
/// The entry point for the navigation shell, responsible for initializing
/// configuration, logging, the hosted-service client, and the router, then
/// dispatching the startup navigation.
#[tokio::main]
async fn main() {
    // 1. Configuration & Environment Loading (Fail-Fast)
    // Loads .env file settings before configuration can be read.
    dotenv::dotenv().ok();
    // AppConfig::load() implements the fail-fast principle for missing
    // production secrets.
    let config = AppConfig::load();

    // 2. Logging Filter Setup
    // Sets the default log level. It prioritizes the RUST_LOG environment
    // variable, falling back to sensible defaults for local development.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "clinic_portal=debug,reqwest=info".into());

    // 3. Initialize Logging based on Environment
    // The log format is dynamically selected based on APP_ENV.
    match config.env {
        Env::Local => {
            // LOCAL: Pretty print output for human readability during debugging.
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
        Env::Production => {
            // PROD: JSON format output for ingestion by centralized log
            // aggregators.
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
    }

    tracing::info!("Navigation shell starting in {:?} mode", config.env);

    // 4. Router Assembly
    // Wires the hosted-service client into the startup route table. Route
    // registration is fail-fast: a duplicate path or name in the static table
    // is a programming error.
    let mut router = match create_supabase_router(&config) {
        Ok(router) => router,
        Err(e) => {
            tracing::error!("FATAL: route table registration failed: {e}");
            std::process::exit(1);
        }
    };

    tracing::info!(routes = router.table().len(), "route table registered");

    // 5. Startup Navigation
    // Dispatch the entry navigation to '/'. With no stored session this lands
    // on the login view; the outcome is logged either way.
    match router.navigate("/").await {
        Ok(Navigation::Complete(route)) => {
            tracing::info!(path = route.path, view = ?route.view, "startup navigation complete");
        }
        Ok(Navigation::Forbidden { path }) => {
            tracing::warn!(%path, "startup navigation forbidden");
        }
        Err(e) => {
            tracing::error!("startup navigation failed: {e}");
            std::process::exit(1);
        }
    }
}
