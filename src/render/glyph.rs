use crate::{foundation::core::Rect, model::tree::Icon, render::svg::num};

/// Resolves icon references into SVG markup filling `bounds`.
///
/// Returning `None` leaves the icon box empty.
pub trait GlyphSource {
    fn glyph(&self, icon: Icon, bounds: Rect) -> Option<String>;
}

/// Draws nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoGlyphs;

impl GlyphSource for NoGlyphs {
    fn glyph(&self, _icon: Icon, _bounds: Rect) -> Option<String> {
        None
    }
}

/// Rounded outline with the icon's initial; stands in when no icon set is available.
#[derive(Clone, Copy, Debug, Default)]
pub struct OutlineGlyphs;

const GLYPH_COLOR: &str = "#34d399";

impl GlyphSource for OutlineGlyphs {
    fn glyph(&self, icon: Icon, bounds: Rect) -> Option<String> {
        let inset = bounds.inset(-3.0);
        let initial = icon.name().chars().next()?.to_ascii_uppercase();
        let c = bounds.center();
        Some(format!(
            r#"<g data-icon="{name}"><rect x="{x}" y="{y}" width="{w}" height="{h}" rx="3" fill="none" stroke="{GLYPH_COLOR}" stroke-width="1.5"/><text x="{cx}" y="{ty}" fill="{GLYPH_COLOR}" font-size="9" font-family="monospace" font-weight="bold" text-anchor="middle">{initial}</text></g>"#,
            name = icon.name(),
            x = num(inset.x0),
            y = num(inset.y0),
            w = num(inset.width()),
            h = num(inset.height()),
            cx = num(c.x),
            ty = num(c.y + 3.0),
        ))
    }
}
