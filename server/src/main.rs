use std::net::SocketAddr;

use axum::middleware::from_fn_with_state;
use axum::Router;
use error_stack::ResultExt;
use kernel::KernelError;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

use crate::auth::protect;
use crate::error::StackTrace;
use crate::handler::AppModule;
use crate::route::{
    BookingRouter, CourseRouter, CustomerRouter, GenreRouter, MovieRouter, RentalRouter,
    ReviewRouter, UserRouter,
};

mod auth;
mod controller;
mod error;
mod extract;
mod handler;
mod request;
mod response;
mod route;

const DEFAULT_ADDR: &str = "0.0.0.0:8080";

#[tokio::main]
async fn main() -> Result<(), StackTrace> {
    dotenvy::dotenv().ok();

    let appender = tracing_appender::rolling::daily(std::path::Path::new("./logs/"), "debug.log");
    let (non_blocking_appender, _guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_filter(tracing_subscriber::EnvFilter::new(
                    std::env::var("RUST_LOG").unwrap_or_else(|_| {
                        "driver=debug,application=debug,server=debug,tower_http=debug,sqlx=info"
                            .into()
                    }),
                ))
                .with_filter(tracing_subscriber::filter::LevelFilter::DEBUG),
        )
        .with(
            tracing_subscriber::fmt::Layer::default()
                .with_writer(non_blocking_appender)
                .with_ansi(false)
                .with_filter(tracing_subscriber::filter::LevelFilter::DEBUG),
        )
        .init();

    let app = AppModule::new().await?;

    let protected = Router::new()
        .route_movie()
        .route_genre()
        .route_customer()
        .route_review()
        .route_rental()
        .route_booking()
        .route_course()
        .route_user()
        .route_layer(from_fn_with_state(app.clone(), protect));
    let api = Router::new()
        .route_movie_public()
        .route_account_public()
        .merge(protected);

    let router = Router::new()
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app);

    let bind = std::env::var("SERVER_ADDR")
        .unwrap_or_else(|_| DEFAULT_ADDR.to_string())
        .parse::<SocketAddr>()
        .change_context_lazy(|| KernelError::Internal)
        .attach_printable_lazy(|| "SERVER_ADDR is not a socket address")?;
    let tcp = TcpListener::bind(bind)
        .await
        .change_context_lazy(|| KernelError::Internal)
        .attach_printable_lazy(|| "Failed to listen tcp")?;
    tracing::info!("listening on {bind}");

    axum::serve(tcp, router.into_make_service())
        .await
        .change_context_lazy(|| KernelError::Internal)?;

    Ok(())
}
