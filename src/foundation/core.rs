use crate::foundation::error::{GrowError, GrowResult};

pub use kurbo::{Line, Point, QuadBez, Rect};

/// Normalized scroll position, always inside `[0, 1]`.
///
/// Construction clamps; non-finite input collapses to `0`.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, serde::Serialize)]
pub struct Progress(f64);

impl Progress {
    /// Top of the page.
    pub const START: Self = Self(0.0);
    /// Bottom of the page.
    pub const END: Self = Self(1.0);

    /// Clamp `v` into `[0, 1]`.
    pub fn new(v: f64) -> Self {
        if v.is_finite() {
            Self(v.clamp(0.0, 1.0))
        } else {
            Self(0.0)
        }
    }

    /// Raw scalar value.
    pub fn get(self) -> f64 {
        self.0
    }
}

impl<'de> serde::Deserialize<'de> for Progress {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        f64::deserialize(d).map(Self::new)
    }
}

impl From<f64> for Progress {
    fn from(v: f64) -> Self {
        Self::new(v)
    }
}

/// Opaque sRGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    /// Build from a `0xRRGGBB` literal.
    pub const fn hex(v: u32) -> Self {
        Self {
            r: ((v >> 16) & 0xff) as u8,
            g: ((v >> 8) & 0xff) as u8,
            b: (v & 0xff) as u8,
        }
    }

    /// Parse `#rrggbb`.
    pub fn parse(s: &str) -> GrowResult<Self> {
        let digits = s
            .strip_prefix('#')
            .filter(|d| d.len() == 6)
            .ok_or_else(|| GrowError::validation(format!("color '{s}' must look like #rrggbb")))?;
        let v = u32::from_str_radix(digits, 16)
            .map_err(|_| GrowError::validation(format!("color '{s}' is not hex")))?;
        Ok(Self::hex(v))
    }

    /// CSS form, `#rrggbb`.
    pub fn to_css(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl serde::Serialize for Rgb8 {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&self.to_css())
    }
}

impl<'de> serde::Deserialize<'de> for Rgb8 {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s = String::deserialize(d)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Logical SVG coordinate space of the tree canvas.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewbox {
    pub width: f64,
    pub height: f64,
}

impl Viewbox {
    pub fn validate(self) -> GrowResult<()> {
        if !(self.width.is_finite() && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
        {
            return Err(GrowError::validation("viewbox width/height must be > 0"));
        }
        Ok(())
    }
}

impl Default for Viewbox {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

/// Project `length` from `origin` at `angle_deg`, measured clockwise from straight up.
pub fn polar_from(origin: Point, angle_deg: f64, length: f64) -> Point {
    let rad = angle_deg.to_radians();
    Point::new(origin.x + length * rad.sin(), origin.y - length * rad.cos())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_clamps_and_rejects_nan() {
        assert_eq!(Progress::new(-0.2).get(), 0.0);
        assert_eq!(Progress::new(1.7).get(), 1.0);
        assert_eq!(Progress::new(f64::NAN).get(), 0.0);
        assert_eq!(Progress::new(0.42).get(), 0.42);
    }

    #[test]
    fn progress_deserialize_clamps() {
        let p: Progress = serde_json::from_str("3.5").unwrap();
        assert_eq!(p, Progress::END);
    }

    #[test]
    fn rgb_roundtrips_css() {
        let c = Rgb8::hex(0x0ea5e9);
        assert_eq!(c.to_css(), "#0ea5e9");
        assert_eq!(Rgb8::parse("#0ea5e9").unwrap(), c);
        assert!(Rgb8::parse("0ea5e9").is_err());
        assert!(Rgb8::parse("#zzzzzz").is_err());
    }

    #[test]
    fn polar_zero_points_up_and_positive_sweeps_right() {
        let o = Point::new(100.0, 100.0);
        let up = polar_from(o, 0.0, 10.0);
        assert!((up.x - 100.0).abs() < 1e-9);
        assert!((up.y - 90.0).abs() < 1e-9);

        let right = polar_from(o, 90.0, 10.0);
        assert!((right.x - 110.0).abs() < 1e-9);
        assert!((right.y - 100.0).abs() < 1e-9);

        let down = polar_from(o, 180.0, 10.0);
        assert!((down.y - 110.0).abs() < 1e-9);
    }

    #[test]
    fn viewbox_rejects_degenerate() {
        assert!(Viewbox::default().validate().is_ok());
        assert!(
            Viewbox {
                width: 0.0,
                height: 10.0
            }
            .validate()
            .is_err()
        );
    }
}
