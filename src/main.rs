use wash_alerts::{ Config, Result };
use wash_alerts::channels::{ EmailChannel, InAppChannel, NotificationChannel };
use axum::{ Router, routing::{ get, post, put } };
use migration::{ Migrator, MigratorTrait };
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{ layer::SubscriberExt, util::SubscriberInitExt };

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber
        ::registry()
        .with(
            tracing_subscriber::EnvFilter
                ::try_from_default_env()
                .unwrap_or_else(|_| "wash_alerts=debug,tower_http=debug".into())
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().map_err(|e| wash_alerts::AppError::Config(e.to_string()))?;

    tracing::info!("Starting wash-alerts");

    // Initialize database connection
    let db = sea_orm::Database
        ::connect(&config.database_url).await
        .map_err(|e| wash_alerts::AppError::Database(e))?;

    tracing::info!("Database connected successfully");

    // Run migrations
    Migrator::up(&db, None).await.map_err(|e| wash_alerts::AppError::Database(e))?;

    tracing::info!("Migrations completed successfully");

    // Notification channels
    let email_channel: Option<Arc<dyn NotificationChannel>> = match config.email.clone() {
        Some(email_config) => Some(Arc::new(EmailChannel::new(email_config))),
        None => {
            tracing::warn!("EMAIL_API_URL not set; email channel disabled");
            None
        }
    };

    let in_app_channel: Arc<dyn NotificationChannel> = Arc::new(InAppChannel::new(db.clone()));

    // Initialize services
    let alert_service = Arc::new(wash_alerts::services::PriceAlertService::new(db.clone()));
    let history_service = Arc::new(wash_alerts::services::PriceHistoryService::new(db.clone()));
    let preference_service = Arc::new(wash_alerts::services::PreferenceService::new(db.clone()));
    let notification_service = Arc::new(
        wash_alerts::services::NotificationService::new(db.clone())
    );

    let notifier = Arc::new(
        wash_alerts::notifier::Notifier::new(
            wash_alerts::services::PriceAlertService::new(db.clone()),
            wash_alerts::services::PreferenceService::new(db.clone()),
            email_channel,
            in_app_channel
        )
    );

    let price_event_service = Arc::new(
        wash_alerts::services::PriceEventService::new(
            db.clone(),
            notifier,
            config.renotify_cooldown_secs
        )
    );

    // Background sweeper
    if config.sweep_interval_secs > 0 {
        let sweeper = wash_alerts::sweeper::Sweeper::new(
            wash_alerts::services::PriceAlertService::new(db.clone()),
            price_event_service.clone(),
            config.sweep_interval_secs
        );
        tokio::spawn(sweeper.start());
        tracing::info!("Alert sweeper running every {}s", config.sweep_interval_secs);
    } else {
        tracing::warn!("SWEEP_INTERVAL_SECS is 0; alert sweeper disabled");
    }

    // Create app state
    let app_state = wash_alerts::api::AppState::new(
        alert_service,
        history_service,
        preference_service,
        notification_service,
        price_event_service
    );

    // Build application router
    let app = Router::new()
        .route("/health", get(health_check))
        .route(
            "/api/alerts",
            post(wash_alerts::api::alerts::create_alert).get(wash_alerts::api::alerts::list_alerts)
        )
        .route(
            "/api/alerts/{id}",
            get(wash_alerts::api::alerts::get_alert)
                .patch(wash_alerts::api::alerts::update_alert)
                .delete(wash_alerts::api::alerts::delete_alert)
        )
        .route(
            "/api/services/{id}/price-history",
            get(wash_alerts::api::price_history::get_price_history)
        )
        .route(
            "/api/services/{id}/price-events",
            post(wash_alerts::api::price_events::record_price_event)
        )
        .route(
            "/api/users/{user_id}/preferences",
            get(wash_alerts::api::preferences::get_preferences).put(
                wash_alerts::api::preferences::bulk_update_preferences
            )
        )
        .route(
            "/api/users/{user_id}/preferences/{kind}",
            put(wash_alerts::api::preferences::update_preference)
        )
        .route(
            "/api/users/{user_id}/notifications",
            get(wash_alerts::api::notifications::list_notifications)
        )
        .route(
            "/api/notifications/{id}/read",
            post(wash_alerts::api::notifications::mark_notification_read)
        )
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Start server
    let addr = format!("{}:{}", config.server_host, config.server_port);
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener
        ::bind(&addr).await
        .map_err(|e| wash_alerts::AppError::Internal(e.to_string()))?;

    axum::serve(listener, app).await.map_err(|e| wash_alerts::AppError::Internal(e.to_string()))?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
