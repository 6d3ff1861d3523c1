use std::net::SocketAddr;
use std::sync::Arc;

use clinique_db::store::{ClinicalDataStore, CredentialStore, MemoryStore, PgStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use clinique_api::auth::jwt::TokenService;
use clinique_api::auth::password::Argon2Hasher;
use clinique_api::auth::service::AuthService;
use clinique_api::config::ServerConfig;
use clinique_api::router::build_app_router;
use clinique_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "clinique_api=debug,clinique_db=debug,tower_http=debug".into());
    let json_logs = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    let registry = tracing_subscriber::registry().with(filter);
    if json_logs {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Storage ---
    let (users, clinical): (Arc<dyn CredentialStore>, Arc<dyn ClinicalDataStore>) =
        match &config.database_url {
            Some(database_url) => {
                let pool = clinique_db::create_pool(database_url)
                    .await
                    .expect("Failed to connect to database");
                tracing::info!("Database connection pool created");

                clinique_db::health_check(&pool)
                    .await
                    .expect("Database health check failed");
                tracing::info!("Database health check passed");

                clinique_db::run_migrations(&pool)
                    .await
                    .expect("Failed to run database migrations");
                tracing::info!("Database migrations applied");

                let store = Arc::new(PgStore::new(pool));
                let users: Arc<dyn CredentialStore> = store.clone();
                (users, store)
            }
            None => {
                tracing::warn!("DATABASE_URL not set, records are kept in memory only");
                let store = Arc::new(MemoryStore::new());
                let users: Arc<dyn CredentialStore> = store.clone();
                (users, store)
            }
        };

    // --- Auth ---
    let tokens = TokenService::new(config.jwt.clone());
    let auth = Arc::new(AuthService::new(
        users,
        Arc::new(Argon2Hasher),
        tokens,
        config.password_min_length,
    ));

    if let Some(seed) = &config.admin_seed {
        let created = auth
            .ensure_admin(&seed.name, &seed.email, &seed.password)
            .await
            .expect("Failed to create bootstrap admin");
        if created {
            tracing::info!(email = %seed.email, "Bootstrap admin created");
        }
    }

    // --- App state ---
    let state = AppState {
        auth,
        clinical,
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
