use std::{path::Path, sync::Arc};

use anyhow::Context as _;

use crate::foundation::error::{GrowError, GrowResult};

/// Straight-alpha RGBA8 image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRgba {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

fn svg_options() -> usvg::Options<'static> {
    let mut db = usvg::fontdb::Database::new();
    db.load_system_fonts();
    usvg::Options {
        fontdb: Arc::new(db),
        ..Default::default()
    }
}

/// Rasterize an SVG document at `scale` times its intrinsic size.
pub fn rasterize(svg: &str, scale: f32) -> GrowResult<FrameRgba> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(GrowError::render("raster scale must be > 0"));
    }
    let tree = usvg::Tree::from_str(svg, &svg_options()).context("parse svg tree")?;
    let size = tree.size();
    let width = (size.width() * scale).ceil() as u32;
    let height = (size.height() * scale).ceil() as u32;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| GrowError::render(format!("cannot allocate {width}x{height} pixmap")))?;
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );

    let mut data = Vec::with_capacity(pixmap.pixels().len() * 4);
    for px in pixmap.pixels() {
        let c = px.demultiply();
        data.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    Ok(FrameRgba {
        width,
        height,
        data,
    })
}

pub fn write_png(frame: &FrameRgba, out: &Path) -> GrowResult<()> {
    image::save_buffer_with_format(
        out,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", out.display()))?;
    Ok(())
}
