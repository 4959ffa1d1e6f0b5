//! Skills Console Backend
//!
//! Session-aware console service in front of the organization API, serving
//! faceted employee filter views and the admin and self-service screens.

mod api;
mod auth;
mod config;
mod errors;
mod filter;
mod models;
mod session;
mod upstream;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::{Config, LogFormat};
use session::{Role, SessionStore};
use upstream::ApiClient;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub api: ApiClient,
    pub sessions: Arc<SessionStore>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let registry = tracing_subscriber::registry().with(env_filter);
    match config.log_format {
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
    }

    tracing::info!("Starting Skills Console Backend");
    tracing::info!("Organization API: {}", config.api_base_url);
    tracing::info!("Bind address: {}", config.bind_addr);
    tracing::info!("Session idle timeout: {}s", config.session_idle.as_secs());

    // Create application state
    let sessions = Arc::new(SessionStore::new());
    sessions.start_idle_sweeper(config.session_idle);

    let state = AppState {
        api: ApiClient::new(config.api_base_url.clone()),
        sessions,
        config: Arc::new(config.clone()),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    tracing::debug!(upstream = %state.config.api_base_url, "Building router");

    // One session handle per guarded route group
    let (any_role, admins, employees) = (
        state.sessions.clone(),
        state.sessions.clone(),
        state.sessions.clone(),
    );

    // Any signed-in user
    let session_routes = Router::new()
        .route("/auth/logout", post(api::logout))
        .route("/auth/session", get(api::current_session))
        .layer(middleware::from_fn(move |req, next| {
            auth::require_session(any_role.clone(), None, req, next)
        }));

    let admin_routes = Router::new()
        // Filter views
        .route(
            "/views/{screen}",
            post(api::mount_view)
                .get(api::get_view)
                .patch(api::update_view)
                .delete(api::unmount_view),
        )
        .route("/views/{screen}/clear", post(api::clear_view))
        .route("/views/{screen}/exact-name", post(api::exact_name))
        .route("/views/{screen}/suggestions", get(api::suggestions))
        // Employees
        .route(
            "/employees",
            get(api::list_employees).post(api::create_employee),
        )
        .route("/employees/{id}", get(api::get_employee))
        // Positions
        .route(
            "/positions",
            get(api::list_positions).post(api::create_position),
        )
        .route(
            "/positions/{id}",
            put(api::update_position).delete(api::delete_position),
        )
        // Skill catalog
        .route("/skills", get(api::list_skills).post(api::create_skill))
        .route(
            "/skills/{id}",
            put(api::update_skill).delete(api::delete_skill),
        )
        // Teams
        .route("/teams", get(api::list_teams).post(api::create_team))
        .route("/teams/{id}", put(api::update_team).delete(api::delete_team))
        .route(
            "/teams/{id}/members",
            get(api::team_members).put(api::set_team_members),
        )
        // Products
        .route(
            "/products",
            get(api::list_products).post(api::create_product),
        )
        .route(
            "/products/{id}",
            put(api::update_product).delete(api::delete_product),
        )
        .route(
            "/products/{id}/members",
            get(api::product_members).put(api::set_product_members),
        )
        .layer(middleware::from_fn(move |req, next| {
            auth::require_session(admins.clone(), Some(Role::Admin), req, next)
        }));

    let employee_routes = Router::new()
        .route("/profile", get(api::get_profile))
        .route("/teams", get(api::my_teams))
        .route("/teams/{id}/join", post(api::join_team))
        .route("/teams/{id}/leave", delete(api::leave_team))
        .route("/skills", get(api::my_skills).post(api::add_my_skill))
        .route(
            "/skills/{id}",
            put(api::update_my_skill).delete(api::remove_my_skill),
        )
        .layer(middleware::from_fn(move |req, next| {
            auth::require_session(employees.clone(), Some(Role::Employee), req, next)
        }));

    let api_routes = Router::new()
        .route("/auth/login", post(api::login))
        .merge(session_routes)
        .nest("/admin", admin_routes)
        .nest("/employee", employee_routes);

    // Health check (no auth required)
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
