use crate::caption::{render_label, AFTER_LABEL, BEFORE_LABEL};
use crate::error::{MergeError, MergeResult};
use image::imageops::{self, FilterType};
use image::{ColorType, DynamicImage, GenericImageView, ImageFormat, ImageReader, Limits, Rgba, RgbaImage};
use std::fs::{self, OpenOptions};
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const DEFAULT_PADDING: u32 = 10;
pub const DEFAULT_CAPTION_BAND_HEIGHT: u32 = 125;
const MIN_FONT_SIZE: f32 = 16.0;
const FONT_SIZE_RATIO: f32 = 0.05;
const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComposeOptions {
    /// Gap between the two images, also added below the caption band.
    pub padding: u32,
    pub caption_band_height: u32,
}

impl Default for ComposeOptions {
    fn default() -> Self {
        Self {
            padding: DEFAULT_PADDING,
            caption_band_height: DEFAULT_CAPTION_BAND_HEIGHT,
        }
    }
}

/// Caption font size for a first image of the given height.
pub fn caption_font_size(before_height: u32) -> f32 {
    (before_height as f32 * FONT_SIZE_RATIO).max(MIN_FONT_SIZE)
}

/// Size of `(width, height)` once scaled to `target_height`, keeping its
/// aspect ratio. `None` when the scaled width does not fit in a `u32`.
pub fn contain_to_height(width: u32, height: u32, target_height: u32) -> Option<(u32, u32)> {
    if height == 0 {
        return Some((width, target_height));
    }
    let scaled = (width as f64 * target_height as f64 / height as f64).round();
    if scaled > u32::MAX as f64 {
        return None;
    }
    Some(((scaled as u32).max(1), target_height))
}

/// Geometry of one side-by-side composite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompositeLayout {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub before_size: (u32, u32),
    pub after_size: (u32, u32),
    pub after_origin: (u32, u32),
    /// Top edge of both caption overlays. The band overlaps the bottom of
    /// the images by `padding` pixels.
    pub caption_top: u32,
    pub caption_band_height: u32,
    pub font_size: f32,
}

impl CompositeLayout {
    /// Fails with [`MergeError::CanvasTooLarge`] when a dimension of the
    /// canvas or of the resized second image does not fit in a `u32`.
    pub fn new(before: (u32, u32), after: (u32, u32), options: ComposeOptions) -> MergeResult<Self> {
        let (before_width, before_height) = before;
        let scaled_width = (after.0 as f64 * before_height as f64 / after.1.max(1) as f64).round() as u64;
        let too_large = || MergeError::CanvasTooLarge {
            width: u64::from(before_width)
                .saturating_add(u64::from(options.padding))
                .saturating_add(scaled_width),
            height: u64::from(before_height)
                + u64::from(options.caption_band_height)
                + u64::from(options.padding),
        };

        let after_size = contain_to_height(after.0, after.1, before_height).ok_or_else(too_large)?;
        let after_left = before_width.checked_add(options.padding).ok_or_else(too_large)?;
        let canvas_width = after_left.checked_add(after_size.0).ok_or_else(too_large)?;
        let canvas_height = before_height
            .checked_add(options.caption_band_height)
            .and_then(|h| h.checked_add(options.padding))
            .ok_or_else(too_large)?;

        Ok(Self {
            canvas_width,
            canvas_height,
            before_size: before,
            after_size,
            after_origin: (after_left, 0),
            caption_top: before_height.saturating_sub(options.padding),
            caption_band_height: options.caption_band_height,
            font_size: caption_font_size(before_height),
        })
    }

    /// Reserve the canvas and the resized second image against `limits`
    /// before anything is allocated.
    pub fn check_limits(&self, limits: &mut Limits) -> MergeResult<()> {
        let too_large = |_| MergeError::CanvasTooLarge {
            width: u64::from(self.canvas_width),
            height: u64::from(self.canvas_height),
        };
        limits
            .reserve_buffer(self.canvas_width, self.canvas_height, ColorType::Rgba8)
            .map_err(too_large)?;
        limits
            .reserve_buffer(self.after_size.0, self.after_size.1, ColorType::Rgba8)
            .map_err(too_large)
    }
}

/// Place `before` and `after` side by side on a white canvas and label them.
pub fn compose_images(before: &DynamicImage, after: &DynamicImage, options: ComposeOptions) -> MergeResult<RgbaImage> {
    let layout = CompositeLayout::new(before.dimensions(), after.dimensions(), options)?;
    layout.check_limits(&mut Limits::default())?;
    debug!(?layout, "Computed composite layout");

    let resized_after = imageops::resize(
        &after.to_rgba8(),
        layout.after_size.0,
        layout.after_size.1,
        FilterType::Lanczos3,
    );

    let mut canvas = RgbaImage::from_pixel(layout.canvas_width, layout.canvas_height, BACKGROUND);
    imageops::overlay(&mut canvas, &before.to_rgba8(), 0, 0);
    imageops::overlay(
        &mut canvas,
        &resized_after,
        layout.after_origin.0 as i64,
        layout.after_origin.1 as i64,
    );

    let before_label = render_label(
        BEFORE_LABEL,
        layout.before_size.0,
        layout.caption_band_height,
        layout.font_size,
    );
    let after_label = render_label(
        AFTER_LABEL,
        layout.after_size.0,
        layout.caption_band_height,
        layout.font_size,
    );
    imageops::overlay(&mut canvas, &before_label, 0, layout.caption_top as i64);
    imageops::overlay(
        &mut canvas,
        &after_label,
        layout.after_origin.0 as i64,
        layout.caption_top as i64,
    );

    Ok(canvas)
}

fn decode(path: &Path) -> MergeResult<DynamicImage> {
    let image = ImageReader::open(path)
        .map_err(image::ImageError::IoError)
        .and_then(|reader| reader.with_guessed_format().map_err(image::ImageError::IoError))
        .and_then(|reader| reader.decode())
        .map_err(|source| MergeError::Decode {
            path: path.to_path_buf(),
            source,
        })?;

    if image.width() == 0 || image.height() == 0 {
        return Err(MergeError::EmptyImage {
            path: path.to_path_buf(),
        });
    }
    Ok(image)
}

fn encode_png(canvas: &RgbaImage) -> MergeResult<Vec<u8>> {
    let mut bytes = Vec::new();
    canvas
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(MergeError::Encode)?;
    Ok(bytes)
}

/// Write `bytes` to a new file at `path`. Existing files are never replaced,
/// and a partially written file is removed on failure.
fn write_new_file(path: &Path, bytes: &[u8]) -> MergeResult<()> {
    let write_error = |source| MergeError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(write_error)?;

    if let Err(e) = file.write_all(bytes).and_then(|_| file.sync_all()) {
        drop(file);
        let _ = fs::remove_file(path);
        return Err(write_error(e));
    }
    Ok(())
}

/// Merge the images at `before_path` and `after_path` into a labelled PNG
/// written to `output_path`, returning that path.
pub fn compose(
    before_path: impl AsRef<Path>,
    after_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    options: ComposeOptions,
) -> MergeResult<PathBuf> {
    let (before_path, after_path, output_path) =
        (before_path.as_ref(), after_path.as_ref(), output_path.as_ref());

    for path in [before_path, after_path] {
        if !path.exists() {
            return Err(MergeError::NotFound {
                path: path.to_path_buf(),
            });
        }
    }

    let before = decode(before_path)?;
    let after = decode(after_path)?;

    let canvas = compose_images(&before, &after, options)?;
    let bytes = encode_png(&canvas)?;
    write_new_file(output_path, &bytes)?;

    info!(
        "Merged {} and {} into {} ({}x{})",
        before_path.display(),
        after_path.display(),
        output_path.display(),
        canvas.width(),
        canvas.height()
    );
    Ok(output_path.to_path_buf())
}
