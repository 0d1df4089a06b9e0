#![allow(dead_code)]

use anyhow::Result;
use image::{Rgba, RgbaImage};
use std::path::{Path, PathBuf};

pub const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
pub const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);
pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

pub fn write_solid(dir: &Path, name: &str, width: u32, height: u32, color: Rgba<u8>) -> Result<PathBuf> {
    let path = dir.join(name);
    RgbaImage::from_pixel(width, height, color).save(&path)?;
    Ok(path)
}

pub fn write_gradient(dir: &Path, name: &str, width: u32, height: u32) -> Result<PathBuf> {
    let path = dir.join(name);
    RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x * 255 / width) as u8, (y * 255 / height) as u8, 128, 255])
    })
    .save(&path)?;
    Ok(path)
}

pub fn is_ink(pixel: &Rgba<u8>) -> bool {
    pixel.0[0] < 64 && pixel.0[1] < 64 && pixel.0[2] < 64 && pixel.0[3] == 255
}

/// True if any pixel in the `[x0, x1) x [y0, y1)` region is dark ink.
pub fn has_ink(image: &RgbaImage, x0: u32, x1: u32, y0: u32, y1: u32) -> bool {
    (y0..y1).any(|y| (x0..x1).any(|x| is_ink(image.get_pixel(x, y))))
}
