use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

mod config;
mod mailer;
mod models;

use config::Config;
use models::{mail_text, SendEmailRequest, SendEmailResponse};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();

    let cfg = Arc::new(Config::from_env()?);
    tracing::info!(
        "email-relay starting on port {} (sender {} <{}>)",
        cfg.http_port,
        cfg.sendgrid_from_name,
        cfg.sendgrid_from_email
    );

    let app = Router::new()
        .route("/health", get(health))
        .route("/send-email", post(send_email))
        .with_state(cfg.clone())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)),
        );

    let addr = SocketAddr::from(([0, 0, 0, 0], cfg.http_port));
    tracing::info!("email-relay binding on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server shutdown complete");
    Ok(())
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "email-relay",
        "time": chrono::Utc::now().to_rfc3339(),
    }))
}

// No authentication on this endpoint; any caller can trigger a send.
async fn send_email(
    State(cfg): State<Arc<Config>>,
    Json(req): Json<SendEmailRequest>,
) -> (StatusCode, Json<SendEmailResponse>) {
    let text = mail_text(&req);
    match mailer::send_sendgrid_email(
        &cfg.sendgrid_api_key,
        &cfg.sendgrid_from_name,
        &cfg.sendgrid_from_email,
        &req.email,
        &cfg.mail_subject,
        &text,
    )
    .await
    {
        Ok(()) => {
            tracing::info!("report forwarded to {}", req.email);
            (
                StatusCode::OK,
                Json(SendEmailResponse { message: "E-mail enviado com sucesso!".to_string() }),
            )
        }
        Err(e) => {
            tracing::error!("failed to forward report to {}: {:#}", req.email, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(SendEmailResponse {
                    message: "Não foi possível enviar o e-mail.".to_string(),
                }),
            )
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down gracefully...");
        },
        _ = terminate => {
            tracing::info!("Received terminate signal, shutting down gracefully...");
        },
    }
}
