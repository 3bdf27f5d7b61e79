//! Image encoding for exports and frame dumps.

use crate::renderer::RenderResult;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use inkslate_core::shapes::SerializableColor;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tiny_skia::Pixmap;

pub const JPEG_QUALITY: u8 = 95;

/// Output image format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Jpeg,
    Png,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Jpeg => "jpg",
            ExportFormat::Png => "png",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown export format: {0}")]
pub struct ParseFormatError(pub String);

impl FromStr for ExportFormat {
    type Err = ParseFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Ok(ExportFormat::Jpeg),
            "png" => Ok(ExportFormat::Png),
            _ => Err(ParseFormatError(s.to_string())),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// An encoded export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedImage {
    pub format: ExportFormat,
    pub width: u32,
    pub height: u32,
    pub bytes: Vec<u8>,
}

/// Encode a rendered pixmap. JPEG has no alpha, so translucent pixels are
/// flattened onto `matte`.
pub fn encode_pixmap(
    pixmap: &Pixmap,
    format: ExportFormat,
    matte: SerializableColor,
) -> RenderResult<ExportedImage> {
    let (width, height) = (pixmap.width(), pixmap.height());
    let mut bytes = Vec::new();
    match format {
        ExportFormat::Jpeg => {
            let rgb = flatten_rgb(pixmap, matte);
            JpegEncoder::new_with_quality(&mut bytes, JPEG_QUALITY).write_image(
                &rgb,
                width,
                height,
                ExtendedColorType::Rgb8,
            )?;
        }
        ExportFormat::Png => {
            let rgba = straight_rgba(pixmap);
            PngEncoder::new(&mut bytes).write_image(&rgba, width, height, ExtendedColorType::Rgba8)?;
        }
    }
    log::debug!("encoded {width}x{height} {format} ({} bytes)", bytes.len());
    Ok(ExportedImage {
        format,
        width,
        height,
        bytes,
    })
}

fn straight_rgba(pixmap: &Pixmap) -> Vec<u8> {
    pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect()
}

// Source-over onto an opaque matte, starting from premultiplied pixels.
fn flatten_rgb(pixmap: &Pixmap, matte: SerializableColor) -> Vec<u8> {
    let over = |c: u8, a: u8, m: u8| -> u8 {
        let rest = u16::from(255 - a) * u16::from(m);
        (u16::from(c) + (rest + 127) / 255).min(255) as u8
    };
    pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let a = p.alpha();
            [
                over(p.red(), a, matte.r),
                over(p.green(), a, matte.g),
                over(p.blue(), a, matte.b),
            ]
        })
        .collect()
}
