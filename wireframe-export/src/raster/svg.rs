//! In-process rasterization with `resvg`.

use std::path::Path;
use std::sync::Arc;

use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg::{self, fontdb};

use super::{Rasterize, RasterizeError};

/// Renders SVG files with `resvg` on a `tiny-skia` pixmap.
///
/// System fonts are loaded once and shared by every conversion.
pub struct ResvgRasterizer {
    fontdb: Arc<fontdb::Database>,
}

impl ResvgRasterizer {
    #[must_use]
    pub fn new() -> Self {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        tracing::debug!(faces = db.len(), "loaded system fonts");
        Self {
            fontdb: Arc::new(db),
        }
    }
}

impl Default for ResvgRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Rasterize for ResvgRasterizer {
    fn name(&self) -> &str {
        "resvg"
    }

    fn rasterize(&self, input: &Path, output: &Path, width: u32) -> Result<(), RasterizeError> {
        let data = std::fs::read(input).map_err(|e| {
            RasterizeError::Failed(format!("failed to read {}: {e}", input.display()))
        })?;

        let options = usvg::Options {
            resources_dir: input.parent().map(Path::to_path_buf),
            fontdb: Arc::clone(&self.fontdb),
            ..usvg::Options::default()
        };
        let tree = usvg::Tree::from_data(&data, &options)
            .map_err(|e| RasterizeError::Failed(e.to_string()))?;

        let size = tree.size();
        let (scale, height) = scaled_height(size.width(), size.height(), width).ok_or_else(|| {
            RasterizeError::Failed(format!(
                "cannot scale a {}x{} image to {width} px wide",
                size.width(),
                size.height()
            ))
        })?;

        let mut pixmap = Pixmap::new(width, height).ok_or_else(|| {
            RasterizeError::Failed(format!("cannot allocate a {width}x{height} pixmap"))
        })?;
        resvg::render(&tree, Transform::from_scale(scale, scale), &mut pixmap.as_mut());

        pixmap.save_png(output).map_err(|e| {
            RasterizeError::Failed(format!("failed to write {}: {e}", output.display()))
        })
    }
}

/// Uniform scale factor and pixel height for rendering at `width` pixels.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn scaled_height(svg_width: f32, svg_height: f32, width: u32) -> Option<(f32, u32)> {
    if width == 0 || svg_width <= 0.0 {
        return None;
    }
    let scale = width as f32 / svg_width;
    let height = (svg_height * scale).round();
    if !height.is_finite() || height < 1.0 {
        return None;
    }
    Some((scale, height as u32))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_scaled_height_keeps_aspect_ratio() {
        let (scale, height) = scaled_height(800.0, 600.0, 1600).unwrap();
        assert!((scale - 2.0).abs() < f32::EPSILON);
        assert_eq!(height, 1200);
    }

    #[test]
    fn test_scaled_height_rejects_degenerate_sizes() {
        assert!(scaled_height(800.0, 600.0, 0).is_none());
        assert!(scaled_height(10_000.0, 1.0, 16).is_none());
    }

    #[test]
    fn test_renders_png_at_requested_width() {
        let tmp = TempDir::new().unwrap();
        let svg = tmp.path().join("box_lowfi.svg");
        let png = tmp.path().join("box_lowfi.png");
        fs::write(
            &svg,
            r##"<svg xmlns="http://www.w3.org/2000/svg" width="400" height="300" viewBox="0 0 400 300">
  <rect x="10" y="10" width="380" height="280" fill="none" stroke="#333" stroke-width="4"/>
</svg>"##,
        )
        .unwrap();

        ResvgRasterizer::new().rasterize(&svg, &png, 1600).unwrap();

        let pixmap = Pixmap::load_png(&png).unwrap();
        assert_eq!(pixmap.width(), 1600);
        assert_eq!(pixmap.height(), 1200);
    }

    #[test]
    fn test_malformed_svg_is_generic_failure() {
        let tmp = TempDir::new().unwrap();
        let svg = tmp.path().join("broken_lowfi.svg");
        fs::write(&svg, "<svg").unwrap();

        let err = ResvgRasterizer::new()
            .rasterize(&svg, &tmp.path().join("broken_lowfi.png"), 1600)
            .unwrap_err();
        assert!(matches!(err, RasterizeError::Failed(_)), "got: {err}");
    }
}
