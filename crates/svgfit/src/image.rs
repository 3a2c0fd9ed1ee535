//! Interop with the `image` crate.

use image::{Rgba, RgbaImage};
use tiny_skia as sk;

use crate::{RenderRequest, RenderResult, Renderer};

/// Convert a premultiplied pixel buffer into a straight-alpha image.
pub fn to_rgba_image(pixmap: &sk::Pixmap) -> RgbaImage {
    let mut image = RgbaImage::new(pixmap.width(), pixmap.height());
    for (src, dest) in pixmap.pixels().iter().zip(image.pixels_mut()) {
        let color = src.demultiply();
        *dest = Rgba([color.red(), color.green(), color.blue(), color.alpha()]);
    }
    image
}

/// Render a document at its intrinsic size with the shared renderer.
pub fn decode(data: &[u8]) -> RenderResult<RgbaImage> {
    let pixmap = Renderer::shared().render(data, &RenderRequest::new())?;
    Ok(to_rgba_image(&pixmap))
}

/// Measure a document with the shared renderer.
pub fn decode_size(data: &[u8]) -> RenderResult<(u32, u32)> {
    Renderer::shared().query_size(data)
}

/// Whether the data looks like an SVG document, plain or gzip-compressed.
pub fn is_svg(data: &[u8]) -> bool {
    if data.starts_with(&[0x1f, 0x8b]) {
        return true;
    }

    let data = data.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(data);
    let start = data.iter().position(|b| !b.is_ascii_whitespace()).unwrap_or(data.len());
    let data = &data[start..];
    data.starts_with(b"<?xml") || data.starts_with(b"<svg")
}
