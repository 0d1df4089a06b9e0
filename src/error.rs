use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MergeError {
    #[error("Image not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to decode image {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Image has no pixels: {}", path.display())]
    EmptyImage { path: PathBuf },

    #[error("Merged image would be {width}x{height} pixels, which is too large")]
    CanvasTooLarge { width: u64, height: u64 },

    #[error("Failed to encode merged image: {0}")]
    Encode(#[source] image::ImageError),

    #[error("Failed to write merged image {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Merge task did not complete: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl MergeError {
    /// True for failures caused by the source images themselves rather than
    /// by the output side.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            MergeError::NotFound { .. } | MergeError::Decode { .. } | MergeError::EmptyImage { .. }
        )
    }
}

pub type MergeResult<T> = Result<T, MergeError>;
