use crate::{Config, Error, api};
use axum::{
    Json, Router,
    body::Bytes,
    extract::{DefaultBodyLimit, State, rejection::BytesRejection},
    response::IntoResponse,
    routing::post,
};
use calc_core::expr;

/// Create the service routes.
pub fn router(config: &Config) -> Router {
    let calculator = expr::Calculator::new(config.expr);
    Router::new()
        .route(api::ROUTE, post(calculate))
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .with_state(calculator)
}

/// Serve until a shutdown signal is received.
pub async fn serve(config: Config) -> Result<(), Error> {
    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .map_err(|source| Error::Bind {
            addr: config.addr,
            source,
        })?;

    #[cfg(feature = "tracing")]
    tracing::info!(addr = %config.addr, route = api::ROUTE, "listening");

    axum::serve(listener, router(&config))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    #[cfg(feature = "tracing")]
    tracing::info!("shut down");
    Ok(())
}

async fn calculate(
    State(calculator): State<expr::Calculator>,
    body: Result<Bytes, BytesRejection>,
) -> impl IntoResponse {
    let (status, response) = match body {
        Ok(body) => api::respond(&calculator, &body),
        Err(rejection) => {
            #[cfg(feature = "tracing")]
            tracing::debug!(%rejection, "could not read request body");

            api::reject(rejection.status())
        }
    };
    (status, Json(response))
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        #[cfg(feature = "tracing")]
        tracing::error!(?err, "could not listen for shutdown signal");
        #[cfg(not(feature = "tracing"))]
        eprintln!("could not listen for shutdown signal: {err}");
    }
}
