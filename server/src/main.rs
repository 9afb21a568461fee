mod upload;

use axum::extract::DefaultBodyLimit;
use axum::{
    Router,
    routing::{get, post},
};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use upload::AppState;

/// Image upload server: per upload, produces a center crop, a rectangular
/// crop, a thumbnail, a grayscale derivative and an ASCII rendering, and
/// reports the elapsed time of each stage.
#[derive(Parser, Debug)]
#[command(name = "pixmill-serve")]
struct Args {
    /// Port to listen on
    #[arg(long, default_value_t = 8080)]
    port: u16,

    /// Directory where transformed artifacts are written
    #[arg(long, default_value = "edit-images")]
    out_dir: PathBuf,

    /// Maximum accepted upload size in megabytes
    #[arg(long, default_value_t = 10)]
    max_upload_mb: usize,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Flags are parsed exactly once at startup; request handlers only ever
    // see the resulting immutable state.
    let args = Args::parse();

    std::fs::create_dir_all(&args.out_dir)?;

    let state = Arc::new(AppState {
        out_dir: args.out_dir,
        config: pixmill::PipelineConfig::default(),
    });

    let app = Router::new()
        .route("/", get(|| async { "Welcome to pixmill!" }))
        .route("/upload", post(upload::upload_image))
        .layer(DefaultBodyLimit::max(args.max_upload_mb * 1024 * 1024))
        .with_state(state);

    log::info!("Starting the server");
    log::info!("Listening on: http://0.0.0.0:{}", args.port);
    log::info!("Press Ctrl+C to stop the server");

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", args.port)).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
