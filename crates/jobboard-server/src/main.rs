use std::net::SocketAddr;

use tracing::{info, warn};

use jobboard_api::{AppStateInner, router};

const DEV_SECRET: &str = "dev-secret-change-me";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "jobboard=debug,jobboard_api=debug,tower_http=debug".into()),
        )
        .init();

    // Config
    let jwt_secret = std::env::var("JOBBOARD_JWT_SECRET").unwrap_or_else(|_| DEV_SECRET.into());
    if jwt_secret == DEV_SECRET {
        warn!("JOBBOARD_JWT_SECRET unset, using the development secret");
    }
    let host = std::env::var("JOBBOARD_HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let port: u16 = std::env::var("JOBBOARD_PORT")
        .unwrap_or_else(|_| "8080".into())
        .parse()?;

    let app = router(AppStateInner::new(jwt_secret));

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!(%addr, "job board dev server listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
