//! On-demand trigger: `GET /` runs a poll cycle and answers its status line.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router,
    extract::{ConnectInfo, State},
    http::HeaderMap,
    routing::get,
};
use tokio::net::TcpListener;
use tracing::info;

use crate::error::AppError;
use crate::poller::StatusPoller;
use crate::riot::RiotApi;

pub fn router<A: RiotApi + 'static>(poller: Arc<StatusPoller<A>>) -> Router {
    Router::new()
        .route("/", get(status::<A>))
        .with_state(poller)
}

pub async fn serve<A: RiotApi + 'static>(
    addr: SocketAddr,
    poller: Arc<StatusPoller<A>>,
) -> Result<(), AppError> {
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "🌐 HTTP server listening");

    axum::serve(
        listener,
        router(poller).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;
    Ok(())
}

async fn status<A: RiotApi + 'static>(
    State(poller): State<Arc<StatusPoller<A>>>,
    peer: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
) -> Result<String, AppError> {
    info!(requester = %requester(&headers, peer), "🌐 Sending status");
    poller.poll_once().await
}

/// Proxy-forwarded address first, then the socket peer.
fn requester(headers: &HeaderMap, peer: Option<ConnectInfo<SocketAddr>>) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
        .or_else(|| peer.map(|ConnectInfo(addr)| addr.to_string()))
        .unwrap_or_else(|| "unknown".to_string())
}
