use actix_web::{web, App, HttpServer};
use clap::Parser;
use dotenv::dotenv;
use image_merger_lib::server_lib::{setup_app, AppState};
use image_merger_lib::{default_output_dir, ComposeOptions};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Address to listen on
    #[arg(long, env = "MERGE_BIND", default_value = "127.0.0.1:8080")]
    bind: String,

    /// Directory to save merged images to (defaults to the desktop)
    #[arg(long, env = "MERGE_OUTPUT_DIR")]
    output_dir: Option<PathBuf>,

    /// Gap between the two images, in pixels
    #[arg(long, env = "MERGE_PADDING", default_value = "10")]
    padding: u32,

    /// Height of the caption band below the images, in pixels
    #[arg(long, env = "MERGE_CAPTION_BAND_HEIGHT", default_value = "125")]
    caption_band_height: u32,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables from .env file if present
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let output_dir = args.output_dir.unwrap_or_else(default_output_dir);

    info!("Starting merge server at http://{}", args.bind);
    info!("POST /merge with {{\"before\": ..., \"after\": ...}} to merge a pair");
    info!("Merged images are saved to {}", output_dir.display());

    let app_state = web::Data::new(AppState {
        output_dir,
        options: ComposeOptions {
            padding: args.padding,
            caption_band_height: args.caption_band_height,
        },
    });

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .configure(setup_app)
    })
    .bind(args.bind.as_str())?
    .run()
    .await
}
