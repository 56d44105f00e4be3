//! Frame export: PNG images from raster surfaces, JSON from display lists.

use crate::surface::{DisplayList, RasterSurface};
use image::{Rgb, RgbImage, RgbaImage};
use std::path::{Path, PathBuf};

/// Errors that can occur while exporting frames.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parse hex color to RGB floats (accepts 6-char RGB or 8-char RGBA, alpha is ignored).
pub fn parse_hex_color(hex: &str) -> Option<[f32; 3]> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 && hex.len() != 8 {
        return None;
    }
    let r = u8::from_str_radix(hex.get(0..2)?, 16).ok()? as f32 / 255.0;
    let g = u8::from_str_radix(hex.get(2..4)?, 16).ok()? as f32 / 255.0;
    let b = u8::from_str_radix(hex.get(4..6)?, 16).ok()? as f32 / 255.0;
    Some([r, g, b])
}

/// Composite a transparent frame over an opaque background colour.
pub fn flatten_onto(image: &RgbaImage, background: [f32; 3]) -> RgbImage {
    let bg = background.map(|c| c.clamp(0.0, 1.0) * 255.0);
    RgbImage::from_fn(image.width(), image.height(), |x, y| {
        let [r, g, b, a] = image.get_pixel(x, y).0;
        let alpha = a as f32 / 255.0;
        let mix = |src: u8, dst: f32| (src as f32 * alpha + dst * (1.0 - alpha)).round() as u8;
        Rgb([mix(r, bg[0]), mix(g, bg[1]), mix(b, bg[2])])
    })
}

/// Writes numbered frame files into a directory.
#[derive(Debug, Clone)]
pub struct FrameExporter {
    dir: PathBuf,
    prefix: String,
    background: Option<[f32; 3]>,
    written: usize,
}

impl FrameExporter {
    /// Create the exporter, creating `dir` if needed.
    pub fn new<P: AsRef<Path>>(dir: P) -> Result<Self, ExportError> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            prefix: "frame".to_string(),
            background: None,
            written: 0,
        })
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Flatten PNG frames onto this colour instead of keeping transparency.
    pub fn with_background(mut self, background: [f32; 3]) -> Self {
        self.background = Some(background);
        self
    }

    pub fn frames_written(&self) -> usize {
        self.written
    }

    fn next_path(&self, extension: &str) -> PathBuf {
        self.dir
            .join(format!("{}_{:05}.{}", self.prefix, self.written, extension))
    }

    pub fn write_png(&mut self, surface: &RasterSurface) -> Result<PathBuf, ExportError> {
        let path = self.next_path("png");
        match self.background {
            Some(bg) => flatten_onto(surface.image(), bg).save(&path)?,
            None => surface.image().save(&path)?,
        }
        self.written += 1;
        log::debug!("Wrote {}", path.display());
        Ok(path)
    }

    pub fn write_display_list(&mut self, list: &DisplayList) -> Result<PathBuf, ExportError> {
        let path = self.next_path("json");
        std::fs::write(&path, list.to_json()?)?;
        self.written += 1;
        log::debug!("Wrote {}", path.display());
        Ok(path)
    }
}
