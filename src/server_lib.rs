use crate::compositor::ComposeOptions;
use crate::error::MergeError;
use crate::merge::{merge_into_dir, MergeConfig};
use actix_files::NamedFile;
use actix_web::{get, http::header, post, web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub struct AppState {
    pub output_dir: PathBuf,
    pub options: ComposeOptions,
}

impl MergeConfig for AppState {
    fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn padding(&self) -> u32 {
        self.options.padding
    }

    fn caption_band_height(&self) -> u32 {
        self.options.caption_band_height
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MergeRequest {
    pub before: PathBuf,
    pub after: PathBuf,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MergeResponse {
    pub path: PathBuf,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn error_response(e: &MergeError) -> HttpResponse {
    let body = ErrorResponse {
        error: format!("Error merging images: {}", e),
    };
    match e {
        MergeError::NotFound { .. } => HttpResponse::NotFound().json(body),
        e if e.is_input_error() => HttpResponse::UnprocessableEntity().json(body),
        _ => HttpResponse::InternalServerError().json(body),
    }
}

#[post("/merge")]
async fn merge_images(
    data: web::Data<AppState>,
    request: web::Json<MergeRequest>,
) -> actix_web::Result<HttpResponse> {
    let MergeRequest { before, after } = request.into_inner();
    info!("Merge requested: {} + {}", before.display(), after.display());

    let state = data.clone();
    let result = web::block(move || merge_into_dir(&before, &after, state.get_ref()))
        .await
        .map_err(actix_web::error::ErrorInternalServerError)?;

    match result {
        Ok(path) => Ok(HttpResponse::Ok().json(MergeResponse { path })),
        Err(e) => {
            warn!("Merge failed: {}", e);
            Ok(error_response(&e))
        }
    }
}

/// Only bare file names are served, so requests cannot escape the output
/// directory.
fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\'])
}

#[get("/merged/{file_name}")]
async fn get_merged(
    data: web::Data<AppState>,
    file_name: web::Path<String>,
    req: HttpRequest,
) -> actix_web::Result<HttpResponse> {
    let file_name = file_name.into_inner();
    if !is_plain_file_name(&file_name) {
        return Err(actix_web::error::ErrorBadRequest("Invalid file name"));
    }

    let path = data.output_dir.join(&file_name);
    info!("Serving merged image: {}", path.display());

    let file = NamedFile::open(path)?;
    let mut response = file.into_response(&req);

    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store, no-cache, must-revalidate, max-age=0"),
    );
    response.headers_mut().insert(
        header::PRAGMA,
        header::HeaderValue::from_static("no-cache"),
    );
    response.headers_mut().insert(
        header::EXPIRES,
        header::HeaderValue::from_static("0"),
    );

    Ok(response)
}

// Extract the app setup into a separate function for testing
pub fn setup_app(cfg: &mut web::ServiceConfig) {
    cfg.service(merge_images).service(get_merged);
}
