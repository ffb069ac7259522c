use anyhow::Result;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = reel_server::settings::load()?;
    let server = reel_server::build(&settings);

    if let Some(watcher) = server.watcher {
        watcher.spawn();
    }

    tracing::info!(
        media = %settings.media_path.display(),
        chunk_size = settings.stream.chunk_size,
        "serving video"
    );

    server.app.listen(settings.addr()).await
}
