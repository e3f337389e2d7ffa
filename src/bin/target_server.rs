use std::net::SocketAddr;

use axum::Router;
use axum::http::{Method, Uri};
use axum::response::Html;
use clap::Parser;

use warmup_fuzz::error::Error;
use warmup_fuzz::logging;

const PAGE: &str = "<html>
    <head><title>Under construction</title></head>
    <body>
        <p>Hello world</p>
    </body>
</html>
";

/// Minimal HTTP server to point `warmup-fuzz spray` at.
#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    /// Port to listen on.
    #[arg(long, default_value_t = 8080, env = "WARMUP_FUZZ_TARGET_PORT")]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    logging::init(false, false);
    let args = Args::parse();

    // Every method and path gets the same page
    let app = Router::new().fallback(under_construction);

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    tracing::info!("Target server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
        tracing::error!("Failed to bind to {}: {}", addr, e);
        e
    })?;

    axum::serve(listener, app).await.map_err(|e| {
        tracing::error!("Server error: {}", e);
        e
    })?;

    Ok(())
}

async fn under_construction(method: Method, uri: Uri) -> Html<&'static str> {
    tracing::debug!(%method, %uri, "Request");
    Html(PAGE)
}
