pub mod glyph;
pub mod raster;
pub mod svg;
