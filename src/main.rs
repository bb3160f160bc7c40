//! AfriCar Server - Bus Transport Marketplace API

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use africar_server::{
    api,
    config::AppConfig,
    repository::Repository,
    services::Services,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("africar_server={},tower_http=debug", config.logging.level).into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting AfriCar Server v{}", env!("CARGO_PKG_VERSION"));

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations completed");

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create repository and services
    let repository = Repository::new(pool);
    let services = Services::new(
        repository,
        config.auth.clone(),
        config.commission.clone(),
    )
    .await
    .expect("Failed to create services");

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(
        server_host.parse().expect("Invalid host address"),
        server_port,
    );

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Authentication routes
    let auth_routes = Router::new()
        .route("/login", post(api::auth::login))
        .route("/me", get(api::auth::me))
        .with_state(state.clone());

    // Resource routes
    let api_routes = Router::new()
        // Companies
        .route("/companies", get(api::companies::list_companies))
        .route("/companies", post(api::companies::create_company))
        .route("/companies/:id", get(api::companies::get_company))
        .route("/companies/:id", put(api::companies::update_company))
        .route("/companies/:id/status", put(api::companies::update_company_status))
        // Stations
        .route("/companies/:id/stations", get(api::stations::list_stations))
        .route("/companies/:id/stations", post(api::stations::create_station))
        .route("/companies/:id/stations/:station_id", get(api::stations::get_station))
        .route("/companies/:id/stations/:station_id", put(api::stations::update_station))
        .route("/companies/:id/stations/:station_id", delete(api::stations::delete_station))
        // Routes
        .route("/companies/:id/routes", get(api::routes::list_routes))
        .route("/companies/:id/routes", post(api::routes::create_route))
        .route("/companies/:id/routes/:route_id", get(api::routes::get_route))
        .route("/companies/:id/routes/:route_id", put(api::routes::update_route))
        .route("/companies/:id/routes/:route_id", delete(api::routes::delete_route))
        // Vehicles
        .route("/companies/:id/vehicles", get(api::vehicles::list_vehicles))
        .route("/companies/:id/vehicles", post(api::vehicles::create_vehicle))
        .route("/companies/:id/vehicles/:vehicle_id", get(api::vehicles::get_vehicle))
        .route("/companies/:id/vehicles/:vehicle_id", put(api::vehicles::update_vehicle))
        .route("/companies/:id/vehicles/:vehicle_id", delete(api::vehicles::delete_vehicle))
        // Personnel
        .route("/companies/:id/personnel", get(api::personnel::list_personnel))
        .route("/companies/:id/personnel", post(api::personnel::create_personnel))
        .route("/companies/:id/personnel/:personnel_id", get(api::personnel::get_personnel))
        .route("/companies/:id/personnel/:personnel_id", put(api::personnel::update_personnel))
        .route("/companies/:id/personnel/:personnel_id", delete(api::personnel::delete_personnel))
        // Trips
        .route("/companies/:id/trips", get(api::trips::list_trips))
        .route("/companies/:id/trips", post(api::trips::create_trip))
        .route("/companies/:id/trips/:trip_id", get(api::trips::get_trip))
        .route("/companies/:id/trips/:trip_id", put(api::trips::update_trip))
        .route("/companies/:id/trips/:trip_id", delete(api::trips::delete_trip))
        .route("/companies/:id/trips/:trip_id/status", put(api::trips::update_trip_status))
        // Trip stops
        .route("/companies/:id/trips/:trip_id/stops", get(api::trips::list_stops))
        .route("/companies/:id/trips/:trip_id/stops", post(api::trips::create_stop))
        .route("/companies/:id/trips/:trip_id/stops/stats", get(api::trips::get_stop_stats))
        .route("/companies/:id/trips/:trip_id/stops/:stop_id", put(api::trips::update_stop))
        .route("/companies/:id/trips/:trip_id/stops/:stop_id", delete(api::trips::delete_stop))
        // Customers
        .route("/customers", get(api::customers::list_customers))
        .route("/customers", post(api::customers::create_customer))
        .route("/customers/:id", put(api::customers::update_customer))
        .route("/customers/:id/status", put(api::customers::update_customer_status))
        // Bookings
        .route("/bookings", get(api::bookings::list_bookings))
        .route("/bookings", post(api::bookings::create_booking))
        .route("/bookings/:id", get(api::bookings::get_booking))
        .route("/bookings/:id/status", patch(api::bookings::update_booking_status))
        // Dashboard
        .route("/dashboard/stats", get(api::stats::get_dashboard_stats))
        .route("/dashboard/customer-growth", get(api::stats::get_customer_growth))
        .route("/dashboard/company-stats", get(api::stats::get_company_stats))
        .route("/dashboard/trip-stats", get(api::stats::get_trip_stats))
        .route("/dashboard/recent-activities", get(api::stats::get_recent_activities))
        .with_state(state.clone());

    // Health checks
    let health_routes = Router::new()
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check));

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/auth", auth_routes)
        .nest("/api", api_routes)
        .merge(health_routes)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
}
