//! Rendering of SVG documents into fixed-size pixel buffers.
//!
//! A [`Renderer`] holds [`RenderOptions`] for the engine (fonts, DPI,
//! rendering quality). Each call takes a [`RenderRequest`] describing the
//! target size, [`FitMode`], transform and background, and returns a
//! premultiplied RGBA [`tiny_skia::Pixmap`].
//!
//! ```no_run
//! # use svgfit::{FitMode, RenderOptions, RenderRequest, Renderer};
//! let data = std::fs::read("drawing.svg").unwrap();
//! let renderer = Renderer::new(RenderOptions::default());
//! let request = RenderRequest::new().width(300).fit(FitMode::BestFit);
//! let pixmap = renderer.render(&data, &request).unwrap();
//! pixmap.save_png("drawing.png").unwrap();
//! ```

mod engine;
mod error;
mod fit;
mod image;
mod options;
mod raster;
mod renderer;
mod request;

#[cfg(test)]
mod fake;

pub use tiny_skia;

pub use self::engine::{DocumentHandle, Engine};
pub use self::error::{ConfigError, ParseError, RenderError, RenderResult, ValidationError};
pub use self::fit::{FitMode, Geometry, IntrinsicSize, resolve};
pub use self::image::{decode, decode_size, is_svg, to_rgba_image};
pub use self::options::{
    GenericFamilies, ImageRendering, RenderOptions, RenderOptionsBuilder, ShapeRendering,
    TextRendering,
};
pub use self::raster::Resvg;
pub use self::renderer::{Renderer, Stage};
pub use self::request::{RenderRequest, parse_color};

/// Render a document with a one-off resvg renderer.
pub fn render(
    data: &[u8],
    options: RenderOptions,
    request: &RenderRequest,
) -> RenderResult<tiny_skia::Pixmap> {
    Renderer::new(options).render(data, request)
}

/// Measure a document with a one-off resvg renderer.
pub fn query_size(data: &[u8], options: RenderOptions) -> RenderResult<(u32, u32)> {
    Renderer::new(options).query_size(data)
}

/// The version of this crate.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
