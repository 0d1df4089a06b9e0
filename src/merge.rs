use crate::compositor::{compose, ComposeOptions};
use crate::error::{MergeError, MergeResult};
use crate::output_path::next_available_path;
use std::fs;
use std::path::{Path, PathBuf};

/// Settings a merge request needs from whoever drives it.
pub trait MergeConfig {
    fn output_dir(&self) -> &Path;
    fn padding(&self) -> u32;
    fn caption_band_height(&self) -> u32;

    fn compose_options(&self) -> ComposeOptions {
        ComposeOptions {
            padding: self.padding(),
            caption_band_height: self.caption_band_height(),
        }
    }
}

/// Merge a pair into the next free `merged_image*.png` of the configured
/// output directory.
pub fn merge_into_dir<T: MergeConfig + ?Sized>(before: &Path, after: &Path, config: &T) -> MergeResult<PathBuf> {
    let output_dir = config.output_dir();
    if !output_dir.exists() {
        fs::create_dir_all(output_dir).map_err(|source| MergeError::Write {
            path: output_dir.to_path_buf(),
            source,
        })?;
    }

    let output_path = next_available_path(output_dir);
    compose(before, after, output_path, config.compose_options())
}

/// Run [`merge_into_dir`] on a blocking worker thread. The returned future
/// resolves once the file is written; there is no way to cancel it early.
pub async fn merge_in_background<T>(before: PathBuf, after: PathBuf, config: T) -> MergeResult<PathBuf>
where
    T: MergeConfig + Send + 'static,
{
    tokio::task::spawn_blocking(move || merge_into_dir(&before, &after, &config)).await?
}
