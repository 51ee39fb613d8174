//! Desktop export: `resvg` renders the poster, the PNG lands in the app's
//! data directory.

use std::path::PathBuf;
use std::sync::Arc;

use futures::future::{self, FutureExt, LocalBoxFuture};
use tiny_skia::{Color, Pixmap, Transform};
use usvg::fontdb;

use super::{Delivery, ExportError, PosterFile, RasterImage, RasterTarget, Rasterizer, ShareTarget};

pub struct ResvgRasterizer {
    fontdb: Arc<fontdb::Database>,
}

impl ResvgRasterizer {
    pub fn new() -> Self {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        Self { fontdb: Arc::new(db) }
    }

    pub fn render(&self, svg: &str, target: &RasterTarget) -> Result<RasterImage, ExportError> {
        let options = usvg::Options {
            fontdb: Arc::clone(&self.fontdb),
            ..Default::default()
        };
        let tree = usvg::Tree::from_str(svg, &options)
            .map_err(|err| ExportError::ImageLoad(err.to_string()))?;

        let mut pixmap = Pixmap::new(target.width, target.height).ok_or_else(|| {
            ExportError::CanvasUnavailable(format!(
                "cannot allocate {}x{} pixmap",
                target.width, target.height
            ))
        })?;
        let [r, g, b] = target.background;
        pixmap.fill(Color::from_rgba8(r, g, b, 255));

        let size = tree.size();
        let (source_width, source_height) = (size.width() as f64, size.height() as f64);
        let (x, y, width, height) = target.placement(source_width, source_height);
        let transform = Transform::from_row(
            (width / source_width) as f32,
            0.0,
            0.0,
            (height / source_height) as f32,
            x as f32,
            y as f32,
        );
        resvg::render(&tree, transform, &mut pixmap.as_mut());

        let rgba = pixmap
            .pixels()
            .iter()
            .flat_map(|pixel| {
                let c = pixel.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect();

        Ok(RasterImage {
            width: target.width,
            height: target.height,
            rgba,
        })
    }
}

impl Default for ResvgRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Rasterizer for ResvgRasterizer {
    fn rasterize<'a>(
        &'a self,
        svg: &'a str,
        target: &'a RasterTarget,
    ) -> LocalBoxFuture<'a, Result<RasterImage, ExportError>> {
        future::ready(self.render(svg, target)).boxed_local()
    }
}

/// No share sheet on desktop: posters are written to `<data dir>/exports`.
pub struct DesktopShareTarget {
    dir: Option<PathBuf>,
}

impl DesktopShareTarget {
    pub fn new() -> Self {
        let dir = directories::ProjectDirs::from("com", "StravaRoundup", "Strava Roundup")
            .map(|dirs| dirs.data_dir().join("exports"));
        Self { dir }
    }

    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Some(dir.into()),
        }
    }

    fn save(&self, file: &PosterFile) -> Result<PathBuf, ExportError> {
        let dir = self
            .dir
            .as_ref()
            .ok_or_else(|| ExportError::Download("unable to determine export directory".into()))?;
        std::fs::create_dir_all(dir).map_err(|err| ExportError::Download(err.to_string()))?;
        let path = dir.join(&file.name);
        std::fs::write(&path, &file.bytes).map_err(|err| ExportError::Download(err.to_string()))?;
        Ok(path)
    }
}

impl Default for DesktopShareTarget {
    fn default() -> Self {
        Self::new()
    }
}

impl ShareTarget for DesktopShareTarget {
    fn can_share_files(&self, _file: &PosterFile) -> bool {
        false
    }

    fn share<'a>(
        &'a self,
        _file: &'a PosterFile,
        _title: &'a str,
        _text: &'a str,
    ) -> LocalBoxFuture<'a, Result<(), ExportError>> {
        future::ready(Err(ExportError::Share("no share sheet on desktop".into()))).boxed_local()
    }

    fn download<'a>(&'a self, file: &'a PosterFile) -> LocalBoxFuture<'a, Result<Delivery, ExportError>> {
        let saved = self.save(file).map(|path| Delivery::Saved {
            path: path.to_string_lossy().to_string(),
        });
        future::ready(saved).boxed_local()
    }
}
