//! Poster export: markup → raster → PNG → share sheet or download.
//!
//! The steps that need a browser (or a headless renderer) sit behind
//! [`Rasterizer`] and [`ShareTarget`]; everything else is plain data and is
//! exercised here with fakes. Every failure funnels through [`run_share`],
//! which logs the details and hands the UI one message.

use futures::future::LocalBoxFuture;

#[cfg(not(target_arch = "wasm32"))]
pub mod native;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub const EXPORT_FAILED_MESSAGE: &str = "We couldn't create your share image. Please try again.";

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const MARKUP_PREVIEW_CHARS: usize = 600;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExportError {
    #[error("poster markup has no <svg> element")]
    MissingSvgRoot,

    #[error("could not wrap poster in a blob: {0}")]
    Blob(String),

    #[error("failed to load poster image: {0}")]
    ImageLoad(String),

    #[error("raster surface unavailable: {0}")]
    CanvasUnavailable(String),

    #[error("could not create the image: {0}")]
    EncodeFailed(String),

    #[error("share failed: {0}")]
    Share(String),

    #[error("download failed: {0}")]
    Download(String),
}

impl ExportError {
    /// Pipeline stage the error came from, for logs.
    pub fn step(&self) -> &'static str {
        match self {
            ExportError::MissingSvgRoot => "prepare",
            ExportError::Blob(_) | ExportError::ImageLoad(_) => "load",
            ExportError::CanvasUnavailable(_) => "rasterize",
            ExportError::EncodeFailed(_) => "encode",
            ExportError::Share(_) | ExportError::Download(_) => "deliver",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FitMode {
    /// Scale both axes independently to fill the target.
    Stretch,
    /// Keep the aspect ratio, centre and letterbox.
    #[default]
    Contain,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportOptions {
    pub width: u32,
    pub height: u32,
    pub device_pixel_ratio: f64,
    pub scale_floor: f64,
    pub background: [u8; 3],
    pub fit: FitMode,
    pub title: String,
    pub text: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            width: 1080,
            height: 1920,
            device_pixel_ratio: 1.0,
            scale_floor: 1.0,
            background: [0x04, 0x06, 0x11],
            fit: FitMode::Contain,
            title: "Strava Roundup".to_string(),
            text: String::new(),
        }
    }
}

/// Pixel box handed to a [`Rasterizer`].
#[derive(Debug, Clone, PartialEq)]
pub struct RasterTarget {
    pub source_width: f64,
    pub source_height: f64,
    pub width: u32,
    pub height: u32,
    pub scale: f64,
    pub background: [u8; 3],
    pub fit: FitMode,
}

impl RasterTarget {
    pub fn from_options(options: &ExportOptions) -> Self {
        let scale = raster_scale(options.device_pixel_ratio, options.scale_floor);
        Self {
            source_width: options.width as f64,
            source_height: options.height as f64,
            width: ((options.width as f64) * scale).round().max(1.0) as u32,
            height: ((options.height as f64) * scale).round().max(1.0) as u32,
            scale,
            background: options.background,
            fit: options.fit,
        }
    }

    pub fn background_css(&self) -> String {
        let [r, g, b] = self.background;
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// Destination rectangle `(x, y, width, height)` for the source image.
    pub fn placement(&self, source_width: f64, source_height: f64) -> (f64, f64, f64, f64) {
        let (width, height) = (self.width as f64, self.height as f64);
        match self.fit {
            FitMode::Stretch => (0.0, 0.0, width, height),
            FitMode::Contain => fit_contain(source_width, source_height, width, height),
        }
    }
}

/// Straight (not premultiplied) RGBA8 pixels, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

pub trait Rasterizer {
    fn rasterize<'a>(
        &'a self,
        svg: &'a str,
        target: &'a RasterTarget,
    ) -> LocalBoxFuture<'a, Result<RasterImage, ExportError>>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct PosterFile {
    pub name: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Delivery {
    Shared,
    Downloaded { filename: String },
    Saved { path: String },
}

/// Where a finished poster goes.
pub trait ShareTarget {
    fn can_share_files(&self, file: &PosterFile) -> bool;

    fn share<'a>(
        &'a self,
        file: &'a PosterFile,
        title: &'a str,
        text: &'a str,
    ) -> LocalBoxFuture<'a, Result<(), ExportError>>;

    fn download<'a>(&'a self, file: &'a PosterFile) -> LocalBoxFuture<'a, Result<Delivery, ExportError>>;
}

pub fn poster_filename(epoch_ms: u64) -> String {
    format!("strava-roundup-{epoch_ms}.png")
}

/// `max(device_pixel_ratio, floor)`, never below 1.
pub fn raster_scale(device_pixel_ratio: f64, floor: f64) -> f64 {
    let dpr = if device_pixel_ratio.is_finite() { device_pixel_ratio } else { 1.0 };
    let floor = if floor.is_finite() { floor } else { 1.0 };
    dpr.max(floor).max(1.0)
}

/// Largest centred rectangle with the source's aspect ratio inside the target.
pub fn fit_contain(
    source_width: f64,
    source_height: f64,
    target_width: f64,
    target_height: f64,
) -> (f64, f64, f64, f64) {
    if source_width <= 0.0 || source_height <= 0.0 {
        return (0.0, 0.0, target_width, target_height);
    }
    let scale = (target_width / source_width).min(target_height / source_height);
    let width = source_width * scale;
    let height = source_height * scale;
    (
        (target_width - width) / 2.0,
        (target_height - height) / 2.0,
        width,
        height,
    )
}

/// Pull the `<svg>` element out of `markup` (it may be wrapped) and stamp the
/// attributes it needs to render on its own.
pub fn prepare_svg_markup(markup: &str, width: u32, height: u32) -> Result<String, ExportError> {
    let start = find_svg_open(markup).ok_or(ExportError::MissingSvgRoot)?;
    let tag_end = find_tag_end(markup, start).ok_or(ExportError::MissingSvgRoot)?;
    let open_tag = &markup[start..=tag_end];
    let self_closing = open_tag.trim_end_matches('>').trim_end().ends_with('/');

    let body = if self_closing {
        ""
    } else {
        let close = markup[tag_end..]
            .rfind("</svg>")
            .map(|offset| tag_end + offset)
            .ok_or(ExportError::MissingSvgRoot)?;
        &markup[tag_end + 1..close + "</svg>".len()]
    };

    let inner = open_tag["<svg".len()..]
        .trim_end_matches('>')
        .trim_end()
        .trim_end_matches('/');
    let mut attributes = parse_attributes(inner);

    let view_box = attributes
        .iter()
        .find(|(name, _)| name == "viewBox")
        .map(|(_, value)| value.clone())
        .unwrap_or_else(|| format!("0 0 {width} {height}"));
    attributes.retain(|(name, _)| {
        !matches!(
            name.as_str(),
            "xmlns" | "width" | "height" | "viewBox" | "preserveAspectRatio"
        )
    });

    let mut out = String::with_capacity(markup.len() + 128);
    out.push_str(&format!(
        r#"<svg xmlns="{SVG_NS}" width="{width}" height="{height}" viewBox="{view_box}" preserveAspectRatio="xMidYMid meet""#
    ));
    for (name, value) in &attributes {
        out.push(' ');
        out.push_str(name);
        if value.contains('"') {
            out.push_str(&format!("='{value}'"));
        } else {
            out.push_str(&format!("=\"{value}\""));
        }
    }
    if self_closing {
        out.push_str("/>");
    } else {
        out.push('>');
        out.push_str(body);
    }
    Ok(out)
}

fn find_svg_open(markup: &str) -> Option<usize> {
    let mut from = 0;
    while let Some(offset) = markup[from..].find("<svg") {
        let start = from + offset;
        match markup[start + 4..].chars().next() {
            Some(c) if c.is_whitespace() || c == '>' || c == '/' => return Some(start),
            _ => from = start + 4,
        }
    }
    None
}

/// Index of the `>` closing the tag opened at `start`, skipping quoted values.
fn find_tag_end(markup: &str, start: usize) -> Option<usize> {
    let mut quote: Option<char> = None;
    for (offset, c) in markup[start..].char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '>') => return Some(start + offset),
            _ => {}
        }
    }
    None
}

fn parse_attributes(source: &str) -> Vec<(String, String)> {
    let mut attributes = Vec::new();
    let mut chars = source.char_indices().peekable();

    while let Some(&(start, c)) = chars.peek() {
        if c.is_whitespace() || c == '/' {
            chars.next();
            continue;
        }

        let mut end = start;
        while let Some(&(index, c)) = chars.peek() {
            if c == '=' || c.is_whitespace() {
                break;
            }
            end = index + c.len_utf8();
            chars.next();
        }
        let name = source[start..end].to_string();

        while chars.peek().is_some_and(|(_, c)| c.is_whitespace()) {
            chars.next();
        }
        if chars.peek().map(|(_, c)| *c) != Some('=') {
            attributes.push((name, String::new()));
            continue;
        }
        chars.next();
        while chars.peek().is_some_and(|(_, c)| c.is_whitespace()) {
            chars.next();
        }

        let value = match chars.peek().map(|(_, c)| *c) {
            Some(q @ ('"' | '\'')) => {
                chars.next();
                let mut value = String::new();
                for (_, c) in chars.by_ref() {
                    if c == q {
                        break;
                    }
                    value.push(c);
                }
                value
            }
            _ => {
                let mut value = String::new();
                while let Some(&(_, c)) = chars.peek() {
                    if c.is_whitespace() {
                        break;
                    }
                    value.push(c);
                    chars.next();
                }
                value
            }
        };
        if !name.is_empty() {
            attributes.push((name, value));
        }
    }
    attributes
}

pub fn encode_png(image: &RasterImage) -> Result<Vec<u8>, ExportError> {
    let expected = image.width as usize * image.height as usize * 4;
    if image.width == 0 || image.height == 0 || image.rgba.len() != expected {
        return Err(ExportError::EncodeFailed(format!(
            "{}x{} surface with {} bytes",
            image.width,
            image.height,
            image.rgba.len()
        )));
    }

    let mut buffer = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut buffer, image.width, image.height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        encoder
            .write_header()
            .map_err(|err| ExportError::EncodeFailed(err.to_string()))?
            .write_image_data(&image.rgba)
            .map_err(|err| ExportError::EncodeFailed(err.to_string()))?;
    }
    Ok(buffer)
}

/// Render `markup` to a PNG and hand it to `target`.
pub async fn share_poster(
    markup: &str,
    options: &ExportOptions,
    rasterizer: &dyn Rasterizer,
    target: &dyn ShareTarget,
    epoch_ms: u64,
) -> Result<Delivery, ExportError> {
    let svg = prepare_svg_markup(markup, options.width, options.height)?;
    let raster = RasterTarget::from_options(options);
    let image = rasterizer.rasterize(&svg, &raster).await?;
    let file = PosterFile {
        name: poster_filename(epoch_ms),
        mime: "image/png",
        bytes: encode_png(&image)?,
    };

    if target.can_share_files(&file) {
        target.share(&file, &options.title, &options.text).await?;
        tracing::info!(file = %file.name, "poster shared");
        Ok(Delivery::Shared)
    } else {
        let delivery = target.download(&file).await?;
        tracing::info!(file = %file.name, ?delivery, "poster downloaded");
        Ok(delivery)
    }
}

/// [`share_poster`] with the error funnel applied: details go to the log,
/// the caller gets [`EXPORT_FAILED_MESSAGE`].
pub async fn run_share(
    markup: &str,
    options: &ExportOptions,
    rasterizer: &dyn Rasterizer,
    target: &dyn ShareTarget,
    epoch_ms: u64,
) -> Result<Delivery, String> {
    share_poster(markup, options, rasterizer, target, epoch_ms)
        .await
        .map_err(|err| {
            let preview: String = markup.chars().take(MARKUP_PREVIEW_CHARS).collect();
            tracing::error!(error = %err, step = err.step(), markup = %preview, "poster export failed");
            EXPORT_FAILED_MESSAGE.to_string()
        })
}

#[cfg(target_arch = "wasm32")]
pub fn platform_rasterizer() -> web::WebRasterizer {
    web::WebRasterizer
}

#[cfg(target_arch = "wasm32")]
pub fn platform_share_target() -> web::WebShareTarget {
    web::WebShareTarget
}

#[cfg(not(target_arch = "wasm32"))]
pub fn platform_rasterizer() -> native::ResvgRasterizer {
    native::ResvgRasterizer::new()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn platform_share_target() -> native::DesktopShareTarget {
    native::DesktopShareTarget::new()
}
