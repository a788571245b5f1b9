use std::sync::Arc;
use std::time::Duration;

use axum::{middleware::from_fn, routing::get, Router};
use serde_json::{json, Value};
use sqlx::postgres::PgPoolOptions;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use verdis_api::config;
use verdis_api::handlers::{self, AppState};
use verdis_api::impact::CalculatedImpactService;
use verdis_api::middleware::jwt_auth_middleware;
use verdis_api::services::OrgService;
use verdis_api::starter::StarterService;
use verdis_api::store::{
    CalculationStatusClient, PgDataSourceStore, PgEmissionRecordStore, PgOrganizationStore,
    PgUserStore,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = config::config();
    tracing::info!("Starting Verdis API in {:?} mode", config.environment);

    let database_url = std::env::var("DATABASE_URL")
        .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?;
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .acquire_timeout(Duration::from_secs(config.database.connection_timeout))
        .connect(&database_url)
        .await?;

    let app = app(pool);

    // Allow tests or deployments to override port via env
    let port = std::env::var("VERDIS_API_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    tracing::info!("Verdis API server listening on http://{}", bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}

fn app(pool: sqlx::PgPool) -> Router {
    let config = config::config();

    let orgs = Arc::new(PgOrganizationStore::new(pool.clone()));
    let users = Arc::new(PgUserStore::new(pool.clone()));
    let emissions = Arc::new(PgEmissionRecordStore::new(pool.clone()));
    let data_sources = Arc::new(PgDataSourceStore::new(pool));
    let status_client = Arc::new(CalculationStatusClient::new(
        config.calculation.base_url.clone(),
        config.calculation.request_timeout_secs,
    ));

    let state = AppState {
        users,
        org_service: Arc::new(OrgService::new(orgs.clone())),
        impact_service: Arc::new(CalculatedImpactService::new(emissions, status_client)),
        starter_service: Arc::new(StarterService::new(orgs, data_sources)),
    };

    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .route("/auth/login", axum::routing::post(handlers::auth::login_post))
        // Protected API
        .merge(org_routes())
        .merge(impact_routes())
        .merge(starter_routes())
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn org_routes() -> Router<AppState> {
    use axum::routing::{post, put};
    use verdis_api::handlers::org;

    Router::new()
        .route("/api/orgs", post(org::org_post))
        .route("/api/orgs/:org_id", get(org::org_get))
        .route("/api/orgs/:org_id/members", post(org::member_post))
        .route(
            "/api/orgs/:org_id/members/:user_id",
            put(org::member_role_put).delete(org::member_delete),
        )
        .route_layer(from_fn(jwt_auth_middleware))
}

fn impact_routes() -> Router<AppState> {
    use verdis_api::handlers::impact;

    Router::new()
        .route("/api/orgs/:org_id/impact/summary", get(impact::summary_get))
        .route("/api/orgs/:org_id/impact/complete", get(impact::complete_get))
        .route_layer(from_fn(jwt_auth_middleware))
}

fn starter_routes() -> Router<AppState> {
    use axum::routing::post;
    use verdis_api::handlers::starter;

    Router::new()
        .route("/api/orgs/:org_id/starter", post(starter::starter_post))
        .route_layer(from_fn(jwt_auth_middleware))
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "Verdis API",
            "version": version,
            "description": "Carbon accounting backend API",
            "endpoints": {
                "home": "/ (public)",
                "login": "/auth/login (public - token acquisition)",
                "orgs": "/api/orgs[/:org_id] (protected)",
                "members": "/api/orgs/:org_id/members[/:user_id] (protected)",
                "starter": "/api/orgs/:org_id/starter (protected)",
                "impact": "/api/orgs/:org_id/impact/{summary,complete} (protected)",
            }
        }
    }))
}

async fn health() -> axum::response::Json<Value> {
    axum::response::Json(json!({
        "success": true,
        "data": {
            "status": "ok",
            "timestamp": chrono::Utc::now(),
        }
    }))
}
