use anyhow::Result;
use image_merger_lib::{merge_in_background, merge_into_dir, MergeConfig, MergeError};
use std::path::{Path, PathBuf};
use tempfile::tempdir;

mod common;
use common::{write_gradient, write_solid, BLUE, RED};

struct MergeArgs {
    output_dir: PathBuf,
    padding: u32,
    caption_band_height: u32,
}

impl MergeConfig for MergeArgs {
    fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn padding(&self) -> u32 {
        self.padding
    }

    fn caption_band_height(&self) -> u32 {
        self.caption_band_height
    }
}

#[test]
fn test_repeated_merges_get_fresh_names() -> Result<()> {
    let temp_dir = tempdir()?;
    let before = write_gradient(temp_dir.path(), "before.png", 40, 30)?;
    let after = write_gradient(temp_dir.path(), "after.png", 20, 15)?;
    let args = MergeArgs {
        output_dir: temp_dir.path().join("Desktop"),
        padding: 10,
        caption_band_height: 125,
    };

    let first = merge_into_dir(&before, &after, &args)?;
    let second = merge_into_dir(&before, &after, &args)?;
    let third = merge_into_dir(&before, &after, &args)?;

    assert_eq!(first, args.output_dir.join("merged_image.png"));
    assert_eq!(second, args.output_dir.join("merged_image_1.png"));
    assert_eq!(third, args.output_dir.join("merged_image_2.png"));

    for path in [&first, &second, &third] {
        assert_eq!(image::image_dimensions(path)?, (40 + 40 + 10, 30 + 125 + 10));
    }
    assert_eq!(image::open(&first)?.to_rgba8(), image::open(&second)?.to_rgba8());
    Ok(())
}

#[test]
fn test_custom_padding_and_band() -> Result<()> {
    let temp_dir = tempdir()?;
    let before = write_solid(temp_dir.path(), "before.png", 50, 20, RED)?;
    let after = write_solid(temp_dir.path(), "after.png", 10, 40, BLUE)?;
    let args = MergeArgs {
        output_dir: temp_dir.path().to_path_buf(),
        padding: 0,
        caption_band_height: 30,
    };

    let path = merge_into_dir(&before, &after, &args)?;

    assert_eq!(image::image_dimensions(&path)?, (50 + 5, 20 + 30));
    Ok(())
}

#[test]
fn test_failed_merge_leaves_directory_empty() -> Result<()> {
    let temp_dir = tempdir()?;
    let after = write_solid(temp_dir.path(), "after.png", 10, 10, BLUE)?;
    let args = MergeArgs {
        output_dir: temp_dir.path().join("out"),
        padding: 10,
        caption_band_height: 125,
    };

    let err = merge_into_dir(&temp_dir.path().join("gone.png"), &after, &args).unwrap_err();

    assert!(matches!(err, MergeError::NotFound { .. }));
    assert_eq!(std::fs::read_dir(&args.output_dir)?.count(), 0);
    Ok(())
}

#[tokio::test]
async fn test_merge_in_background() -> Result<()> {
    let temp_dir = tempdir()?;
    let before = write_gradient(temp_dir.path(), "before.png", 32, 32)?;
    let after = write_gradient(temp_dir.path(), "after.png", 16, 16)?;
    let output_dir = temp_dir.path().join("merged");
    let args = MergeArgs {
        output_dir: output_dir.clone(),
        padding: 10,
        caption_band_height: 125,
    };

    let path = merge_in_background(before, after, args).await?;

    assert_eq!(path, output_dir.join("merged_image.png"));
    assert_eq!(image::image_dimensions(&path)?, (32 + 32 + 10, 32 + 125 + 10));
    Ok(())
}
