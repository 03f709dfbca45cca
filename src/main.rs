use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use dotenvy::dotenv;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;

use gather_server::config::Config;
use gather_server::db::PgStore;
use gather_server::jobs::{JobQueue, LogMailer, Mailer, WebhookMailer};
use gather_server::routes::create_routes;
use gather_server::state::AppState;

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Config::from_env();

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Successfully connected to database");

    sqlx::migrate!()
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    tracing::info!("Migrations run successfully");

    let mailer: Arc<dyn Mailer> = match config.mail_webhook_url.clone() {
        Some(url) => Arc::new(WebhookMailer::new(url)),
        None => {
            tracing::warn!("MAIL_WEBHOOK_URL not set, attendee mails will only be logged");
            Arc::new(LogMailer)
        }
    };
    let jobs = JobQueue::start(mailer);

    let state = AppState::new(Arc::new(PgStore::new(pool)), jobs);
    let app: Router = create_routes(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("🚀 Server running at http://{}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app).await.expect("Server failed");
}
