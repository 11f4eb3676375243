use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use persistence::repositories::UserParkingRepository;
use shared::jwt::{JwtConfig, JwtError};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::error::ApiError;
use crate::middleware::{metrics_handler, metrics_middleware, timeout_envelope, trace_id};
use crate::routes::{
    auth, cameras, health, parking_cameras, parking_history, parking_spots, parkings,
    user_parkings, users,
};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    /// Signing keys, derived once from `config.jwt`.
    pub jwt: Arc<JwtConfig>,
}

impl AppState {
    pub fn new(config: Config, pool: PgPool) -> Result<Self, JwtError> {
        let jwt = JwtConfig::new(
            &config.jwt.secret,
            config.jwt.token_expiry_secs,
            config.jwt.leeway_secs,
        )?;

        Ok(Self {
            pool,
            config: Arc::new(config),
            jwt: Arc::new(jwt),
        })
    }

    /// Grant lookups for the access policy.
    pub fn lot_links(&self) -> UserParkingRepository {
        UserParkingRepository::new(self.pool.clone())
    }
}

fn cors_layer(config: &Config) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if config.security.cors_origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        layer.allow_origin(AllowOrigin::list(origins))
    }
}

async fn route_not_found() -> ApiError {
    ApiError::NotFound("Route not found".to_string())
}

pub fn create_app(config: Config, pool: PgPool) -> Result<Router, JwtError> {
    let state = AppState::new(config, pool)?;
    let cors = cors_layer(&state.config);
    let request_timeout = Duration::from_secs(state.config.server.request_timeout_secs);

    let auth_routes = Router::new()
        .route("/login", post(auth::login))
        .route("/me", get(auth::me));

    let parking_routes = Router::new()
        .route("/", get(parkings::list_parkings).post(parkings::create_parking))
        .route(
            "/:id",
            get(parkings::get_parking)
                .put(parkings::update_parking)
                .delete(parkings::delete_parking),
        );

    let camera_routes = Router::new()
        .route("/", get(cameras::list_cameras).post(cameras::create_camera))
        .route(
            "/:id",
            get(cameras::get_camera)
                .put(cameras::update_camera)
                .delete(cameras::delete_camera),
        );

    let spot_routes = Router::new()
        .route(
            "/",
            get(parking_spots::list_parking_spots).post(parking_spots::create_parking_spot),
        )
        .route(
            "/:id",
            get(parking_spots::get_parking_spot)
                .put(parking_spots::update_parking_spot)
                .delete(parking_spots::delete_parking_spot),
        );

    let history_routes = Router::new()
        .route(
            "/",
            get(parking_history::list_parking_history)
                .post(parking_history::create_parking_history),
        )
        .route(
            "/:id",
            get(parking_history::get_parking_history)
                .delete(parking_history::delete_parking_history),
        );

    let user_routes = Router::new()
        .route("/", get(users::list_users).post(users::create_user))
        .route(
            "/:id",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        );

    // The static `/relation/remove` segment takes priority over `/:id`.
    let parking_camera_routes = Router::new()
        .route(
            "/",
            get(parking_cameras::list_parking_cameras)
                .post(parking_cameras::create_parking_camera),
        )
        .route(
            "/relation/remove",
            delete(parking_cameras::delete_parking_camera_by_pair),
        )
        .route(
            "/:id",
            get(parking_cameras::get_parking_camera)
                .delete(parking_cameras::delete_parking_camera),
        );

    let user_parking_routes = Router::new()
        .route(
            "/",
            get(user_parkings::list_user_parkings).post(user_parkings::create_user_parking),
        )
        .route(
            "/relation/remove",
            delete(user_parkings::delete_user_parking_by_pair),
        )
        .route(
            "/:id",
            get(user_parkings::get_user_parking).delete(user_parkings::delete_user_parking),
        );

    let api_routes = Router::new()
        .nest("/auth", auth_routes)
        .nest("/parkings", parking_routes)
        .nest("/cameras", camera_routes)
        .nest("/parking-spots", spot_routes)
        .nest("/parking-history", history_routes)
        .nest("/users", user_routes)
        .nest("/parking-cameras", parking_camera_routes)
        .nest("/user-parkings", user_parking_routes);

    // Public routes (no authentication required)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::ready))
        .route("/metrics", get(metrics_handler));

    let app = Router::new()
        .merge(public_routes)
        .nest("/api", api_routes)
        .fallback(route_not_found)
        // Global middleware (order matters: bottom layers run first)
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(request_timeout))
        .layer(middleware::from_fn(timeout_envelope))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors)
        .with_state(state);

    Ok(app)
}
