mod auth;
mod error;
mod routes;
mod state;

use db::{DbService, models::user::User};
use services::services::{auth::AuthService, importer::ImporterService};
use state::AppState;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    utils::logging::init();

    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://site.db".to_string());
    let db = DbService::new(&database_url).await?;

    bootstrap_admin(&db).await?;

    let state = AppState::new(db, ImporterService::new()?);

    let app = routes::router()
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "3001".to_string());
    let addr = format!("{host}:{port}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the first admin account from ADMIN_EMAIL / ADMIN_PASSWORD when
/// the users table is empty. No-op on every later start.
async fn bootstrap_admin(db: &DbService) -> anyhow::Result<()> {
    if User::count(&db.pool).await? > 0 {
        return Ok(());
    }

    match (std::env::var("ADMIN_EMAIL"), std::env::var("ADMIN_PASSWORD")) {
        (Ok(email), Ok(password)) => {
            let user = AuthService::create_user(&db.pool, &email, &password).await?;
            info!(email = %user.email, "bootstrap admin created");
        }
        _ => {
            warn!("no admin accounts exist and ADMIN_EMAIL/ADMIN_PASSWORD are unset");
        }
    }
    Ok(())
}
