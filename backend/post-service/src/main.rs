use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpResponse, HttpServer};
use auth_core::jwt;
use db_pool::PoolSettings;
use post_service::media::MediaStore;
use post_service::{handlers, middleware};
use std::io;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

struct HealthState {
    db_pool: sqlx::Pool<sqlx::Postgres>,
}

impl HealthState {
    async fn check_postgres(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.db_pool)
            .await
            .map(|_| ())
    }
}

async fn health_summary(state: web::Data<HealthState>) -> HttpResponse {
    match state.check_postgres().await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "status": "ok",
            "service": "post-service",
            "version": env!("CARGO_PKG_VERSION")
        })),
        Err(e) => HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "status": "unhealthy",
            "error": format!("PostgreSQL connection failed: {}", e),
            "service": "post-service"
        })),
    }
}

async fn liveness_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({"alive": true}))
}

/// Post Service
///
/// Serves the Lumina social application: media uploads, the home feed,
/// like toggling, comments, and owner-gated post deletion. Token
/// issuance and user management are delegated to the identity provider;
/// this service validates bearer tokens only.
///
/// # Routes
///
/// - `POST /upload` - Create a post from a multipart upload
/// - `GET /home` - The authenticated home feed
/// - `POST /posts/{id}/like` - Toggle a like
/// - `POST /posts/{id}/comment` - Append a comment
/// - `DELETE /posts/{id}` - Delete an owned post
#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=debug,sqlx=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = match post_service::Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Configuration loading failed: {}", e);
            eprintln!("ERROR: Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Starting post-service v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.app.env);

    match jwt::load_validation_key() {
        Ok(public_key) => {
            if let Err(err) = jwt::initialize_jwt_validation_only(&public_key) {
                return Err(io::Error::new(
                    io::ErrorKind::Other,
                    format!("Failed to initialize JWT keys: {err}"),
                ));
            }
        }
        Err(err) => {
            tracing::warn!(
                "JWT public key not configured ({err}); authentication middleware will fail requests"
            );
        }
    }

    // Database pool, sized from the service configuration
    let pool_settings = PoolSettings::new(config.database.url.clone())
        .max_connections(config.database.max_connections);
    tracing::debug!("{:?}", pool_settings);
    let db_pool = match db_pool::create_pool(&pool_settings).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Database pool creation failed: {}", e);
            eprintln!("ERROR: Failed to create database pool: {}", e);
            std::process::exit(1);
        }
    };

    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .map_err(|e| {
            io::Error::new(io::ErrorKind::Other, format!("Migrations failed: {e}"))
        })?;
    tracing::info!("Database migrations completed");

    // Initialize the media store and fail fast if it is unreachable:
    // every upload depends on it.
    let media_store = MediaStore::connect(&config.media).await.map_err(|e| {
        io::Error::new(
            io::ErrorKind::Other,
            format!("Failed to initialize media store: {e}"),
        )
    })?;

    if let Err(e) = media_store.health_check().await {
        tracing::warn!("media store health check failed at startup: {}", e);
    }

    let media_store = Arc::new(media_store);

    let bind_address = format!("{}:{}", config.app.host, config.app.port);
    tracing::info!("Starting HTTP server at {}", bind_address);

    let health_state = web::Data::new(HealthState {
        db_pool: db_pool.clone(),
    });
    let media_data = web::Data::new(media_store);

    HttpServer::new(move || {
        // Build CORS configuration
        let mut cors = Cors::default();
        for origin in config.cors.allowed_origins.split(',') {
            let origin = origin.trim();
            if origin == "*" {
                cors = cors.allow_any_origin();
            } else {
                cors = cors.allowed_origin(origin);
            }
        }
        cors = cors.allow_any_method().allow_any_header().max_age(3600);

        App::new()
            .app_data(web::Data::new(db_pool.clone()))
            .app_data(media_data.clone())
            .app_data(health_state.clone())
            .wrap(cors)
            .wrap(Logger::default())
            .wrap(tracing_actix_web::TracingLogger::default())
            // Health check endpoints
            .route("/health", web::get().to(health_summary))
            .route("/health/live", web::get().to(liveness_check))
            .service(
                web::scope("")
                    .wrap(middleware::JwtAuthMiddleware)
                    .wrap(middleware::RequestTimingMiddleware)
                    .route("/upload", web::post().to(handlers::upload_post))
                    .route("/home", web::get().to(handlers::get_home))
                    .service(
                        web::scope("/posts")
                            .route("/{post_id}/like", web::post().to(handlers::toggle_like))
                            .route(
                                "/{post_id}/comment",
                                web::post().to(handlers::add_comment),
                            )
                            .route("/{post_id}", web::delete().to(handlers::delete_post)),
                    ),
            )
    })
    .bind(&bind_address)?
    .workers(4)
    .run()
    .await
}
