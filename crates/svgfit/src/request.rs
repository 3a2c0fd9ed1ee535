//! Per-call rendering parameters.

use ecow::{EcoString, eco_format};
use tiny_skia as sk;

use crate::FitMode;

/// What to render a document at.
///
/// # Examples
/// ```
/// # use svgfit::{FitMode, RenderRequest};
/// let request = RenderRequest::new().width(300).fit(FitMode::BestFit);
/// assert_eq!(request.width, Some(300));
/// assert_eq!(request.height, None);
/// ```
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RenderRequest {
    /// The requested output width in pixels.
    pub width: Option<u32>,
    /// The requested output height in pixels.
    pub height: Option<u32>,
    pub fit: FitMode,
    /// Replaces the computed scale transform when set.
    pub transform: Option<sk::Transform>,
    /// Fills the buffer before the document is drawn on top of it.
    pub background: sk::Color,
}

impl RenderRequest {
    /// A request for the document at its intrinsic size on a transparent
    /// background.
    pub fn new() -> Self {
        Self {
            width: None,
            height: None,
            fit: FitMode::None,
            transform: None,
            background: sk::Color::TRANSPARENT,
        }
    }

    /// Request an output width. Zero unsets it.
    pub fn width(mut self, width: u32) -> Self {
        self.width = (width != 0).then_some(width);
        self
    }

    /// Request an output height. Zero unsets it.
    pub fn height(mut self, height: u32) -> Self {
        self.height = (height != 0).then_some(height);
        self
    }

    pub fn fit(mut self, fit: FitMode) -> Self {
        self.fit = fit;
        self
    }

    /// Render with the affine transform `[a c e; b d f]` instead of the
    /// computed scale.
    pub fn transform(mut self, a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) -> Self {
        self.transform = Some(sk::Transform::from_row(a, b, c, d, e, f));
        self
    }

    pub fn background(mut self, background: sk::Color) -> Self {
        self.background = background;
        self
    }
}

impl Default for RenderRequest {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a background color.
///
/// Accepts any CSS color, e.g. `red`, `#f008`, `rgb(255 0 0 / 50%)` or
/// `hsl(120, 100%, 50%)`. The SVG keyword `none` is transparent.
pub fn parse_color(text: &str) -> Result<sk::Color, EcoString> {
    let text = text.trim();
    if text.eq_ignore_ascii_case("none") {
        return Ok(sk::Color::TRANSPARENT);
    }

    let color = csscolorparser::parse(text)
        .map_err(|err| eco_format!("invalid color `{text}` ({err})"))?;
    let [r, g, b, a] = color.to_rgba8();
    Ok(sk::Color::from_rgba8(r, g, b, a))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults() {
        let request = RenderRequest::default();
        assert_eq!(request.width, None);
        assert_eq!(request.height, None);
        assert_eq!(request.fit, FitMode::None);
        assert_eq!(request.transform, None);
        assert_eq!(request.background.alpha(), 0.0);
    }

    #[test]
    fn test_zero_unsets_target() {
        let request = RenderRequest::new().width(200).height(10).width(0);
        assert_eq!(request.width, None);
        assert_eq!(request.height, Some(10));
    }

    #[test]
    fn test_transform_row_order() {
        let request = RenderRequest::new().transform(2.0, 0.0, 0.0, 3.0, 5.0, 7.0);
        let ts = request.transform.unwrap();
        assert_eq!((ts.sx, ts.ky, ts.kx, ts.sy, ts.tx, ts.ty), (2.0, 0.0, 0.0, 3.0, 5.0, 7.0));
    }

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("white"), Ok(sk::Color::WHITE));
        assert_eq!(parse_color(" Transparent "), Ok(sk::Color::TRANSPARENT));
        assert_eq!(parse_color("none"), Ok(sk::Color::TRANSPARENT));
        assert_eq!(parse_color("#fff"), Ok(sk::Color::from_rgba8(255, 255, 255, 255)));
        assert_eq!(parse_color("#f008"), Ok(sk::Color::from_rgba8(255, 0, 0, 136)));
        assert_eq!(parse_color("#336699"), Ok(sk::Color::from_rgba8(0x33, 0x66, 0x99, 255)));
        assert_eq!(
            parse_color("#33669980"),
            Ok(sk::Color::from_rgba8(0x33, 0x66, 0x99, 0x80))
        );
    }

    #[test]
    fn test_parse_named_and_functional_colors() {
        let red = Ok(sk::Color::from_rgba8(255, 0, 0, 255));
        assert_eq!(parse_color("red"), red);
        assert_eq!(parse_color("rgb(255, 0, 0)"), red);
        assert_eq!(parse_color("RGB(255 0 0)"), red);
        assert_eq!(parse_color("hsl(120, 100%, 50%)"), Ok(sk::Color::from_rgba8(0, 255, 0, 255)));
        assert_eq!(parse_color("rebeccapurple"), Ok(sk::Color::from_rgba8(102, 51, 153, 255)));
    }

    #[test]
    fn test_parse_color_errors() {
        assert!(parse_color("").is_err());
        assert!(parse_color("mauvish").is_err());
        assert!(parse_color("#12").is_err());
        assert!(parse_color("#ggg").is_err());
        assert!(parse_color("rgb(1, 2)").is_err());
    }
}
