use std::path::Path;

use axum::handler::Handler;
use axum::routing::get;
use axum::Router;
use reel_media::RangeStreamer;
use tokio::net::{TcpListener, ToSocketAddrs};
use tower::ServiceBuilder;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::{page, video, ReelAxumState};

pub struct ReelApp {
    router: Router<()>,
}

impl ReelApp {
    /// Player page at `/` and the ranged video at `/video.mp4`
    pub fn new(streamer: RangeStreamer) -> Self {
        let state = ReelAxumState::new(streamer);
        let router = Router::new()
            .route("/", get(page::player_page))
            .route("/video.mp4", get(video::stream_video))
            .with_state(state);
        Self { router }
    }

    pub fn use_get<H, T>(mut self, path: &str, handler: H) -> Self
    where
        H: Handler<T, ()> + Clone + Send + Sync + 'static,
        T: 'static,
    {
        self.router = self.router.route(path, get(handler));
        self
    }

    /// Serve files under `dir` for every path no route claims
    pub fn serve_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.router = self.router.fallback_service(ServeDir::new(dir));
        self
    }

    /// Final router with request ids and HTTP tracing applied
    pub fn into_router(self) -> Router<()> {
        self.router.layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
    }

    pub async fn listen<A>(self, addr: A) -> anyhow::Result<()>
    where
        A: ToSocketAddrs,
    {
        let listener = TcpListener::bind(addr).await?;
        info!("listening on http://{}", listener.local_addr()?);
        axum::serve(listener, self.into_router()).await?;
        Ok(())
    }
}

pub fn reel(streamer: RangeStreamer) -> ReelApp {
    ReelApp::new(streamer)
}
