use tokio::net::TcpListener;

use crate::router::build_router;
use crate::state::AppState;

/// The Verdant HTTP server.
pub struct ApiServer {
    state: AppState,
}

impl ApiServer {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(self.state.clone())
    }

    /// Start serving requests.
    pub async fn serve(self) -> std::io::Result<()> {
        let addr = self.state.config.bind_addr;
        let app = self.router();
        let listener = TcpListener::bind(addr).await?;
        tracing::info!("verdant server listening on {addr}");
        axum::serve(listener, app).await
    }
}
