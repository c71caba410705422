//! PNG export of the board.
//!
//! The board is painted at its native size (scale 1) onto an RGBA canvas in
//! paint order, encoded as PNG and handed to a [`DownloadSink`]. Failures
//! never reach the board: [`export_with_toast`] turns them into a toast.
//!
//! Remote (`http`/`https`) image sources are refused as tainted, since their
//! pixels cannot be read back cross-origin. Local paths and `data:` URLs are
//! decoded with the `image` crate. Text notes are painted as placeholder
//! bars, one per line, sized from the text metrics.

use crate::board::BoardState;
use crate::constants::{BOARD_BACKGROUND, MAX_EXPORT_PIXELS, TEXT_PLACEHOLDER_COLOR};
use crate::notifications::Toast;
use crate::profile_scope;
use crate::types::{BoardItem, HexColor, ItemContent, TextMetrics};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use image::imageops::FilterType;
use image::{ExtendedColorType, ImageEncoder, Rgba, RgbaImage};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum ExportError {
    /// Remote source whose pixels cannot be read back
    #[error("image source is cross-origin and taints the canvas: {0}")]
    TaintedSource(String),

    #[error("failed to load image {src}: {source}")]
    ImageLoad {
        src: String,
        #[source]
        source: image::ImageError,
    },

    #[error("malformed data URL for image")]
    DataUrl,

    #[error("board has an unusable size {width}x{height}")]
    InvalidCanvas { width: f64, height: f64 },

    #[error("board of {width}x{height} exceeds the export pixel budget")]
    TooLarge { width: f64, height: f64 },

    #[error("PNG encoding failed: {0}")]
    Encode(#[source] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Turns a board state into pixels.
pub trait RasterRenderer {
    fn render(&self, state: &BoardState) -> Result<RgbaImage, ExportError>;
}

/// Receives the encoded file, the way a browser receives a download.
pub trait DownloadSink {
    /// Store `bytes` under `file_name`; returns where they went.
    fn save(&mut self, file_name: &str, bytes: &[u8]) -> Result<PathBuf, ExportError>;
}

/// Writes downloads into a directory.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl DownloadSink for DirectorySink {
    fn save(&mut self, file_name: &str, bytes: &[u8]) -> Result<PathBuf, ExportError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(file_name);
        fs::write(&path, bytes)?;
        Ok(path)
    }
}

/// Keeps downloads in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub files: Vec<(String, Vec<u8>)>,
}

impl DownloadSink for MemorySink {
    fn save(&mut self, file_name: &str, bytes: &[u8]) -> Result<PathBuf, ExportError> {
        self.files.push((file_name.to_string(), bytes.to_vec()));
        Ok(PathBuf::from(file_name))
    }
}

/// The default renderer, backed by the `image` crate.
#[derive(Debug, Clone, Default)]
pub struct BoardRasterizer {
    metrics: TextMetrics,
    /// Directory relative image paths are resolved against
    base_dir: Option<PathBuf>,
}

impl BoardRasterizer {
    pub fn new(metrics: TextMetrics) -> Self {
        Self {
            metrics,
            base_dir: None,
        }
    }

    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    fn paint_item(&self, canvas: &mut RgbaImage, item: &BoardItem) -> Result<(), ExportError> {
        match &item.content {
            ItemContent::Color { hex, width, height } => {
                fill_rect(canvas, item.x, item.y, *width, *height, Rgba(hex.rgba()));
            }
            ItemContent::Text { text } => {
                let ink = Rgba(HexColor::parse(TEXT_PLACEHOLDER_COLOR).unwrap_or_default().rgba());
                let m = &self.metrics;
                for (row, line) in text.lines().enumerate() {
                    let len = line.chars().count() as f64;
                    if len == 0.0 {
                        continue;
                    }
                    let top = item.y + m.padding_y + row as f64 * m.line_height + m.line_height / 4.0;
                    fill_rect(canvas, item.x + m.padding_x, top, len * m.glyph_width, m.line_height / 2.0, ink);
                }
            }
            ItemContent::Image { src, width, height } => {
                let decoded = self.load_image(src)?.to_rgba8();
                paint_image(canvas, &decoded, item.x, item.y, *width, *height);
            }
        }
        Ok(())
    }

    fn load_image(&self, src: &str) -> Result<image::DynamicImage, ExportError> {
        let lower = src.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            return Err(ExportError::TaintedSource(src.to_string()));
        }
        if lower.starts_with("data:") {
            let bytes = decode_data_url(src)?;
            return image::load_from_memory(&bytes).map_err(|source| ExportError::ImageLoad {
                src: "data URL".to_string(),
                source,
            });
        }

        let path = Path::new(src.strip_prefix("file://").unwrap_or(src));
        let path = match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        };
        image::open(&path).map_err(|source| ExportError::ImageLoad {
            src: src.to_string(),
            source,
        })
    }
}

impl RasterRenderer for BoardRasterizer {
    fn render(&self, state: &BoardState) -> Result<RgbaImage, ExportError> {
        profile_scope!("export_render");

        let (width, height) = (state.board.width, state.board.height);
        if !width.is_finite() || !height.is_finite() || width < 1.0 || height < 1.0 {
            return Err(ExportError::InvalidCanvas { width, height });
        }
        if width.round() * height.round() > MAX_EXPORT_PIXELS {
            return Err(ExportError::TooLarge { width, height });
        }

        let background = Rgba(HexColor::parse(BOARD_BACKGROUND).unwrap_or_default().rgba());
        let mut canvas = RgbaImage::from_pixel(width.round() as u32, height.round() as u32, background);
        for item in state.paint_order() {
            self.paint_item(&mut canvas, item)?;
        }
        Ok(canvas)
    }
}

/// Fill the part of the rectangle that overlaps the canvas.
fn fill_rect(canvas: &mut RgbaImage, x: f64, y: f64, w: f64, h: f64, color: Rgba<u8>) {
    if !(x.is_finite() && y.is_finite() && w.is_finite() && h.is_finite()) {
        return;
    }
    let (cw, ch) = (canvas.width() as f64, canvas.height() as f64);
    let x0 = x.round().clamp(0.0, cw) as u32;
    let y0 = y.round().clamp(0.0, ch) as u32;
    let x1 = (x + w).round().clamp(0.0, cw) as u32;
    let y1 = (y + h).round().clamp(0.0, ch) as u32;
    for py in y0..y1 {
        for px in x0..x1 {
            canvas.put_pixel(px, py, color);
        }
    }
}

/// Draw `source` stretched over the box at `(x, y)`. Only the part of the box
/// that lands on the canvas is resampled, so the box itself may be far larger
/// than the canvas.
fn paint_image(canvas: &mut RgbaImage, source: &RgbaImage, x: f64, y: f64, w: f64, h: f64) {
    if source.width() == 0 || source.height() == 0 || !(w > 0.0 && h > 0.0) {
        return;
    }
    let Some((dx0, dx1)) = visible_span(x, w, canvas.width()) else {
        return;
    };
    let Some((dy0, dy1)) = visible_span(y, h, canvas.height()) else {
        return;
    };
    let (sx0, sx1) = source_span(dx0, dx1, x, w, source.width());
    let (sy0, sy1) = source_span(dy0, dy1, y, h, source.height());

    let visible = image::imageops::crop_imm(source, sx0, sy0, sx1 - sx0, sy1 - sy0).to_image();
    let resized = image::imageops::resize(&visible, dx1 - dx0, dy1 - dy0, FilterType::Triangle);
    image::imageops::overlay(canvas, &resized, dx0 as i64, dy0 as i64);
}

/// Canvas pixels covered by `[start, start + len)`, clipped to `0..limit`.
fn visible_span(start: f64, len: f64, limit: u32) -> Option<(u32, u32)> {
    if !(start.is_finite() && len.is_finite()) {
        return None;
    }
    let lo = start.round().clamp(0.0, limit as f64) as u32;
    let hi = (start + len).round().clamp(0.0, limit as f64) as u32;
    (hi > lo).then_some((lo, hi))
}

/// Source pixels that map onto canvas pixels `lo..hi` of a box spanning
/// `len` canvas pixels from `start`. Never empty.
fn source_span(lo: u32, hi: u32, start: f64, len: f64, source_len: u32) -> (u32, u32) {
    let ratio = source_len as f64 / len;
    let first = ((lo as f64 - start) * ratio)
        .floor()
        .clamp(0.0, (source_len - 1) as f64) as u32;
    let end = ((hi as f64 - start) * ratio)
        .ceil()
        .clamp((first + 1) as f64, source_len as f64) as u32;
    (first, end)
}

fn decode_data_url(src: &str) -> Result<Vec<u8>, ExportError> {
    let (header, payload) = src.split_once(',').ok_or(ExportError::DataUrl)?;
    if !header.ends_with(";base64") {
        return Err(ExportError::DataUrl);
    }
    STANDARD.decode(payload.trim()).map_err(|_| ExportError::DataUrl)
}

pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, ExportError> {
    let mut bytes = Vec::new();
    image::codecs::png::PngEncoder::new(&mut bytes)
        .write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            ExtendedColorType::Rgba8,
        )
        .map_err(ExportError::Encode)?;
    Ok(bytes)
}

/// `data:image/png;base64,...` for encoded PNG bytes.
pub fn png_data_url(png: &[u8]) -> String {
    format!("data:image/png;base64,{}", STANDARD.encode(png))
}

/// A finished export.
#[derive(Debug, Clone)]
pub struct ExportOutcome {
    pub location: PathBuf,
    pub width: u32,
    pub height: u32,
    pub data_url: String,
}

/// Render, encode and save the board.
pub fn export_board(
    state: &BoardState,
    renderer: &impl RasterRenderer,
    sink: &mut impl DownloadSink,
    file_name: &str,
) -> Result<ExportOutcome, ExportError> {
    let raster = renderer.render(state)?;
    let png = encode_png(&raster)?;
    debug!(bytes = png.len(), "Encoded board PNG");
    let location = sink.save(file_name, &png)?;
    info!(
        board = %state.board.id,
        path = %location.display(),
        width = raster.width(),
        height = raster.height(),
        "Board exported"
    );
    Ok(ExportOutcome {
        location,
        width: raster.width(),
        height: raster.height(),
        data_url: png_data_url(&png),
    })
}

/// Export and report the result as a toast. The board is untouched either way.
pub fn export_with_toast(
    state: &BoardState,
    renderer: &impl RasterRenderer,
    sink: &mut impl DownloadSink,
    file_name: &str,
) -> (Option<ExportOutcome>, Toast) {
    match export_board(state, renderer, sink, file_name) {
        Ok(outcome) => {
            let toast = Toast::success(format!("Exported {}", file_name));
            (Some(outcome), toast)
        }
        Err(e) => {
            warn!("Export failed: {}", e);
            (None, Toast::error(format!("Export failed: {}", e)))
        }
    }
}
