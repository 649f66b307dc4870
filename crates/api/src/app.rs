use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{metrics_handler, metrics_middleware};
use crate::routes::{
    break_mode, health, homes, join_requests, leaderboard, notifications, tasks, templates, users,
};
use shared::jwt::JwtConfig;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub jwt: Arc<JwtConfig>,
}

pub fn create_app(config: Config, pool: PgPool) -> Router {
    let jwt = Arc::new(JwtConfig::with_leeway(
        &config.jwt.secret,
        config.jwt.token_expiry_secs,
        config.jwt.leeway_secs,
    ));
    let config = Arc::new(config);

    let state = AppState {
        pool,
        config: config.clone(),
        jwt,
    };

    // Build CORS layer based on configuration
    let cors = if config.security.cors_origins.is_empty() {
        // Default: allow any origin (for development)
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        // Production: only allow specified origins
        use tower_http::cors::AllowOrigin;
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Authenticated routes; each handler extracts the bearer token via UserAuth.
    let api_routes = Router::new()
        // Homes and memberships
        .route("/api/v1/homes", post(homes::create_home).get(homes::list_homes))
        .route("/api/v1/homes/:home_id", get(homes::get_home))
        .route(
            "/api/v1/homes/:home_id/members",
            post(homes::add_member).get(homes::list_members),
        )
        .route(
            "/api/v1/homes/:home_id/members/:user_id",
            put(homes::update_member).delete(homes::remove_member),
        )
        // Task lifecycle
        .route("/api/v1/tasks", post(tasks::create_task))
        .route("/api/v1/tasks/assigned", get(tasks::list_assigned_tasks))
        .route("/api/v1/tasks/home/:home_id", get(tasks::list_home_tasks))
        .route(
            "/api/v1/tasks/unclaimed/:home_id",
            get(tasks::list_unclaimed_tasks),
        )
        .route(
            "/api/v1/tasks/type/:task_type/home/:home_id",
            get(tasks::list_tasks_by_type),
        )
        .route("/api/v1/tasks/assign", post(tasks::assign_task))
        .route("/api/v1/tasks/complete", put(tasks::complete_task))
        .route(
            "/api/v1/tasks/:task_id",
            get(tasks::get_task)
                .put(tasks::update_task)
                .delete(tasks::delete_task),
        )
        // Break mode
        .route(
            "/api/v1/break-mode/homes/:home_id/toggle-break",
            put(break_mode::toggle_break),
        )
        // Leaderboard
        .route(
            "/api/v1/leaderboard/homes/:home_id",
            get(leaderboard::get_home_leaderboard),
        )
        .route(
            "/api/v1/leaderboard/homes/:home_id/lowest-scorers",
            get(leaderboard::get_lowest_scorers),
        )
        .route(
            "/api/v1/leaderboard/homes/:home_id/yearly-summary",
            get(leaderboard::get_yearly_summary),
        )
        .route("/api/v1/leaderboard/me/stats", get(leaderboard::get_my_stats))
        // Notifications
        .route(
            "/api/v1/notifications",
            get(notifications::list_notifications),
        )
        .route(
            "/api/v1/notifications/count",
            get(notifications::unread_count),
        )
        .route("/api/v1/notifications/read", put(notifications::mark_read))
        .route(
            "/api/v1/notifications/read-all",
            put(notifications::mark_all_read),
        )
        .route(
            "/api/v1/notifications/:notification_id",
            delete(notifications::delete_notification),
        )
        // Join requests
        .route(
            "/api/v1/join-requests/search",
            get(join_requests::search_homes),
        )
        .route(
            "/api/v1/join-requests/mine",
            get(join_requests::my_requests),
        )
        .route(
            "/api/v1/join-requests/pending",
            get(join_requests::pending_requests),
        )
        .route(
            "/api/v1/join-requests/homes/:home_id",
            post(join_requests::create_request),
        )
        .route(
            "/api/v1/join-requests/:request_id",
            put(join_requests::respond_to_request).delete(join_requests::cancel_request),
        )
        // Templates
        .route("/api/v1/templates", get(templates::list_templates))
        .route(
            "/api/v1/templates/:template_id",
            get(templates::get_template),
        )
        .route(
            "/api/v1/templates/:template_id/create-task",
            post(templates::create_task_from_template),
        )
        // Users
        .route(
            "/api/v1/users/me",
            get(users::get_profile).put(users::update_profile),
        );

    // Public routes (no authentication required)
    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler));

    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
