use std::path::{Path, PathBuf};

pub const MERGED_STEM: &str = "merged_image";
pub const MERGED_EXTENSION: &str = "png";

/// Directory merged images are saved to when none is configured: the
/// desktop, falling back to `~/Desktop` and finally the working directory.
pub fn default_output_dir() -> PathBuf {
    dirs::desktop_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Desktop")))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// First unused path among `stem.ext`, `stem_1.ext`, `stem_2.ext`, ... in `dir`.
pub fn next_available_path_with(dir: &Path, stem: &str, extension: &str) -> PathBuf {
    let mut candidate = dir.join(format!("{}.{}", stem, extension));
    let mut counter = 1u64;
    while candidate.exists() {
        candidate = dir.join(format!("{}_{}.{}", stem, counter, extension));
        counter += 1;
    }
    candidate
}

/// Probe `dir` for the next free `merged_image*.png` name. Nothing is cached
/// between calls, so files added or removed in the meantime are respected.
pub fn next_available_path(dir: &Path) -> PathBuf {
    next_available_path_with(dir, MERGED_STEM, MERGED_EXTENSION)
}
