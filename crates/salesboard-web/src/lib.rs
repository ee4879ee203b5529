//! salesboard-web - HTTP API for salesboard using Axum

pub mod router;

pub use router::create_router;

use anyhow::Result;
use salesboard_core::{AnalyticsService, SalesRepository};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// Run the web server
pub async fn run<R>(service: Arc<AnalyticsService<R>>, port: u16) -> Result<()>
where
    R: SalesRepository + 'static,
{
    let source = service.source();
    let router = create_router(service);

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = TcpListener::bind(addr).await?;

    info!(source = source.label(), "Web server listening on http://{}", addr);
    println!("Web server listening on http://{}", addr);

    axum::serve(listener, router).await?;

    Ok(())
}
