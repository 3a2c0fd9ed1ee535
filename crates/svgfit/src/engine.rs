//! The boundary to the rasterization engine.

use std::ops::Deref;

use tiny_skia as sk;

use crate::{ConfigError, IntrinsicSize, ParseError, RenderOptions};

/// A parser and rasterizer for vector documents.
///
/// Engines hand out two kinds of resources: an options value, built once per
/// renderer and kept for its lifetime, and a document, owned by a single
/// rendering call and handed back to [`destroy`](Self::destroy) exactly
/// once.
pub trait Engine {
    /// Parsed engine configuration.
    type Options;
    /// A parsed document.
    type Document;

    /// Build the engine configuration.
    fn create_options(&self, options: &RenderOptions) -> Result<Self::Options, ConfigError>;

    /// Parse a document.
    fn parse(&self, data: &[u8], options: &Self::Options) -> Result<Self::Document, ParseError>;

    /// The size the document declares for itself.
    fn size(&self, document: &Self::Document) -> IntrinsicSize;

    /// Draw the document onto the canvas, compositing over its current
    /// contents.
    fn render(
        &self,
        document: &Self::Document,
        transform: sk::Transform,
        canvas: &mut sk::PixmapMut,
    );

    /// Release a document.
    fn destroy(&self, document: Self::Document) {
        drop(document);
    }
}

/// A parsed document that is released when the handle goes out of scope.
pub struct DocumentHandle<'a, E: Engine + ?Sized> {
    engine: &'a E,
    document: Option<E::Document>,
}

impl<'a, E: Engine + ?Sized> DocumentHandle<'a, E> {
    /// Parse a document with the engine and take ownership of it.
    pub fn parse(
        engine: &'a E,
        data: &[u8],
        options: &E::Options,
    ) -> Result<Self, ParseError> {
        let document = engine.parse(data, options)?;
        Ok(Self { engine, document: Some(document) })
    }

    /// The size the document declares for itself.
    pub fn size(&self) -> IntrinsicSize {
        self.engine.size(self)
    }

    /// Draw the document onto the canvas.
    pub fn render(&self, transform: sk::Transform, canvas: &mut sk::PixmapMut) {
        self.engine.render(self, transform, canvas);
    }

    /// Release the document now.
    pub fn release(self) {
        drop(self);
    }
}

impl<E: Engine + ?Sized> Deref for DocumentHandle<'_, E> {
    type Target = E::Document;

    fn deref(&self) -> &Self::Target {
        self.document.as_ref().expect("document is present until the handle drops")
    }
}

impl<E: Engine + ?Sized> Drop for DocumentHandle<'_, E> {
    fn drop(&mut self) {
        if let Some(document) = self.document.take() {
            self.engine.destroy(document);
        }
    }
}
