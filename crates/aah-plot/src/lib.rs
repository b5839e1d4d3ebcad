//! Raster plots of φx sweeps.
//!
//! Draws one marker per (φx/2π, E) point inside a framed plot area with
//! tick marks on both axes, and writes the result as a PNG. No text is
//! rendered; [`title`] returns the caption for the caller to log or embed.

use aah_core::{AahParams, SpectrumScan};
use image::{ImageFormat, Rgb, RgbImage};
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum PlotError {
    #[error("Nothing to plot: {0}")]
    EmptyScan(&'static str),

    #[error("Invalid plot style: {0}")]
    InvalidStyle(String),

    #[error("Image encoding error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PlotError>;

/// Figure geometry and colours.
#[derive(Debug, Clone)]
pub struct PlotStyle {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Gap between image border and plot frame, in pixels.
    pub margin: u32,
    /// Marker radius in pixels (0 draws single pixels).
    pub marker_radius: u32,
    /// Tick length in pixels.
    pub tick_len: u32,
    pub background: [u8; 3],
    pub foreground: [u8; 3],
    pub marker: [u8; 3],
}

impl Default for PlotStyle {
    /// A 7×4 inch figure at 160 dpi.
    fn default() -> Self {
        Self {
            width: 1120,
            height: 640,
            margin: 56,
            marker_radius: 1,
            tick_len: 6,
            background: [255, 255, 255],
            foreground: [0, 0, 0],
            marker: [0, 0, 0],
        }
    }
}

impl PlotStyle {
    fn validate(&self) -> Result<()> {
        if self.width <= 2 * self.margin + 1 || self.height <= 2 * self.margin + 1 {
            return Err(PlotError::InvalidStyle(format!(
                "{}x{} image leaves no room inside a {} px margin",
                self.width, self.height, self.margin
            )));
        }
        Ok(())
    }
}

/// Caption for a sweep, e.g. `2D AAH, L=8×8, t=1, λx=3.5, λy=3.5, open`.
pub fn title(params: &AahParams) -> String {
    format!(
        "2D AAH, L={}×{}, t={}, λx={}, λy={}, {}",
        params.lx,
        params.ly,
        params.t,
        params.lam_x,
        params.lam_y,
        params.boundary()
    )
}

/// Pixel rectangle of the plot area and the data ranges it spans.
#[derive(Debug, Clone, Copy)]
struct Frame {
    left: u32,
    right: u32,
    top: u32,
    bottom: u32,
    /// Horizontal inset keeping markers at u = 0 and u = 1 off the frame.
    x_pad: u32,
    e_lo: f64,
    e_hi: f64,
}

impl Frame {
    fn new(style: &PlotStyle, e_min: f64, e_max: f64) -> Self {
        let (e_lo, e_hi) = padded_range(e_min, e_max);
        Self {
            left: style.margin,
            right: style.width - style.margin - 1,
            top: style.margin,
            bottom: style.height - style.margin - 1,
            x_pad: style.marker_radius + 2,
            e_lo,
            e_hi,
        }
    }

    /// Horizontal pixel for u = φx/2π ∈ [0, 1].
    fn px(&self, u: f64) -> i64 {
        let lo = f64::from(self.left + self.x_pad);
        let span = f64::from((self.right - self.left).saturating_sub(2 * self.x_pad));
        (lo + u.clamp(0.0, 1.0) * span).round() as i64
    }

    /// Vertical pixel for energy `e`; larger energies sit higher.
    fn py(&self, e: f64) -> i64 {
        let span = f64::from(self.bottom - self.top);
        let frac = (e - self.e_lo) / (self.e_hi - self.e_lo);
        (f64::from(self.bottom) - frac * span).round() as i64
    }
}

/// Energy range with 5% headroom; a flat range is widened to ±1.
fn padded_range(e_min: f64, e_max: f64) -> (f64, f64) {
    if e_max - e_min <= f64::EPSILON * e_max.abs().max(1.0) {
        return (e_min - 1.0, e_max + 1.0);
    }
    let pad = 0.05 * (e_max - e_min);
    (e_min - pad, e_max + pad)
}

/// A 1-2-5 tick step giving roughly `target` intervals over `range`.
fn nice_step(range: f64, target: usize) -> f64 {
    let raw = range / target.max(1) as f64;
    let mag = 10f64.powf(raw.log10().floor());
    let norm = raw / mag;
    let nice = if norm < 1.5 {
        1.0
    } else if norm < 3.0 {
        2.0
    } else if norm < 7.0 {
        5.0
    } else {
        10.0
    };
    nice * mag
}

/// Multiples of `step` inside `[lo, hi]`.
fn ticks(lo: f64, hi: f64, step: f64) -> Vec<f64> {
    let first = (lo / step).ceil() as i64;
    let last = (hi / step).floor() as i64;
    (first..=last).map(|k| k as f64 * step).collect()
}

fn put(img: &mut RgbImage, x: i64, y: i64, color: Rgb<u8>) {
    if x >= 0 && y >= 0 && (x as u32) < img.width() && (y as u32) < img.height() {
        img.put_pixel(x as u32, y as u32, color);
    }
}

fn draw_frame(img: &mut RgbImage, frame: &Frame, style: &PlotStyle) {
    let fg = Rgb(style.foreground);
    for x in frame.left..=frame.right {
        img.put_pixel(x, frame.top, fg);
        img.put_pixel(x, frame.bottom, fg);
    }
    for y in frame.top..=frame.bottom {
        img.put_pixel(frame.left, y, fg);
        img.put_pixel(frame.right, y, fg);
    }

    let len = i64::from(style.tick_len);
    for u in [0.0, 0.25, 0.5, 0.75, 1.0] {
        let x = frame.px(u);
        for d in 1..=len {
            put(img, x, i64::from(frame.bottom) + d, fg);
        }
    }
    for e in ticks(frame.e_lo, frame.e_hi, nice_step(frame.e_hi - frame.e_lo, 6)) {
        let y = frame.py(e);
        for d in 1..=len {
            put(img, i64::from(frame.left) - d, y, fg);
        }
    }
}

fn draw_marker(img: &mut RgbImage, cx: i64, cy: i64, radius: u32, color: Rgb<u8>) {
    let r = i64::from(radius);
    for dy in -r..=r {
        for dx in -r..=r {
            if dx * dx + dy * dy <= r * r {
                put(img, cx + dx, cy + dy, color);
            }
        }
    }
}

/// Rasterize a sweep: E against φx/2π.
///
/// Non-finite energies are skipped.
pub fn render(scan: &SpectrumScan, style: &PlotStyle) -> Result<RgbImage> {
    style.validate()?;
    if scan.samples.is_empty() {
        return Err(PlotError::EmptyScan("scan has no samples"));
    }
    let (e_min, e_max) = scan
        .energy_range()
        .ok_or(PlotError::EmptyScan("scan has no finite energies"))?;

    let frame = Frame::new(style, e_min, e_max);
    let mut img = RgbImage::from_pixel(style.width, style.height, Rgb(style.background));
    draw_frame(&mut img, &frame, style);

    let color = Rgb(style.marker);
    let mut skipped = 0usize;
    for (u, sample) in scan.normalized_phases().into_iter().zip(&scan.samples) {
        let x = frame.px(u);
        for &e in &sample.energies {
            if !e.is_finite() {
                skipped += 1;
                continue;
            }
            draw_marker(&mut img, x, frame.py(e), style.marker_radius, color);
        }
    }
    if skipped > 0 {
        warn!(skipped, "non-finite energies left out of the plot");
    }

    Ok(img)
}

/// Render a sweep and write it as PNG, creating parent directories.
pub fn save_spectrum_png(scan: &SpectrumScan, style: &PlotStyle, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let img = render(scan, style)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    img.save_with_format(path, ImageFormat::Png)?;

    info!(
        path = %path.display(),
        title = %title(&scan.params),
        width = style.width,
        height = style.height,
        "spectrum plot written"
    );
    Ok(())
}
