//! The rendering pipeline.

use std::fs;
use std::path::Path;
use std::sync::{LazyLock, OnceLock};

use tiny_skia as sk;

use crate::engine::DocumentHandle;
use crate::{
    ConfigError, Engine, ParseError, RenderError, RenderOptions, RenderRequest,
    RenderResult, Resvg, fit,
};

/// The stage of a rendering call at which it failed.
///
/// Compositing, rasterizing and releasing cannot fail, so they have no
/// variant here.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Stage {
    /// Before parsing, while building the engine options.
    Idle,
    Parsing,
    SizeQuerying,
    ScaleResolving,
    Allocating,
}

/// Renders documents with a fixed set of options.
///
/// The engine options are built on first use and shared by all later calls,
/// including concurrent ones. A renderer whose options failed to build
/// fails every call with the same error.
pub struct Renderer<E: Engine = Resvg> {
    engine: E,
    options: RenderOptions,
    built: OnceLock<Result<E::Options, ConfigError>>,
}

impl Renderer {
    /// Create a resvg-backed renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self::with_engine(Resvg, options)
    }

    /// The process-wide renderer with default options.
    pub fn shared() -> &'static Self {
        static SHARED: LazyLock<Renderer> =
            LazyLock::new(|| Renderer::new(RenderOptions::default()));
        &SHARED
    }
}

impl<E: Engine> Renderer<E> {
    /// Create a renderer driving the given engine.
    pub fn with_engine(engine: E, options: RenderOptions) -> Self {
        Self { engine, options, built: OnceLock::new() }
    }

    /// The options this renderer was created with.
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// The engine this renderer drives.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Render a document into a premultiplied RGBA pixel buffer.
    pub fn render(&self, data: &[u8], request: &RenderRequest) -> RenderResult<sk::Pixmap> {
        let _span = tracing::debug_span!("render", bytes = data.len()).entered();
        let result = self.run(data, request);
        match &result {
            Ok(pixmap) => {
                tracing::debug!(
                    width = pixmap.width(),
                    height = pixmap.height(),
                    "rendered document"
                );
            }
            Err(err) => {
                tracing::debug!(stage = ?err.stage(), %err, "rendering failed");
            }
        }
        result
    }

    /// Render the document stored at a path.
    pub fn render_file(
        &self,
        path: &Path,
        request: &RenderRequest,
    ) -> RenderResult<sk::Pixmap> {
        self.render(&read(path)?, request)
    }

    /// The intrinsic size of a document in whole units.
    pub fn query_size(&self, data: &[u8]) -> RenderResult<(u32, u32)> {
        let options = self.engine_options()?;
        let document = DocumentHandle::parse(&self.engine, data, options)?;
        let size = document.size().whole();
        Ok((size.width as u32, size.height as u32))
    }

    /// The intrinsic size of the document stored at a path.
    pub fn query_size_file(&self, path: &Path) -> RenderResult<(u32, u32)> {
        self.query_size(&read(path)?)
    }

    fn run(&self, data: &[u8], request: &RenderRequest) -> RenderResult<sk::Pixmap> {
        let options = self.engine_options()?;

        // The document is released when `document` drops, which covers
        // every early return below.
        let document = DocumentHandle::parse(&self.engine, data, options)?;

        let intrinsic = document.size().whole();

        let geometry = fit::resolve(intrinsic, request.width, request.height, request.fit)?;
        tracing::trace!(?intrinsic, ?geometry, "resolved geometry");

        let mut pixmap = sk::Pixmap::new(geometry.width, geometry.height).ok_or(
            RenderError::PixmapAllocation {
                width: geometry.width,
                height: geometry.height,
            },
        )?;

        // The engine composites onto the buffer, so the background must be
        // in place before drawing.
        if request.background.alpha() > 0.0 {
            pixmap.fill(request.background);
        }

        let transform = request.transform.unwrap_or_else(|| {
            sk::Transform::from_scale(geometry.scale_x, geometry.scale_y)
        });
        document.render(transform, &mut pixmap.as_mut());

        document.release();

        Ok(pixmap)
    }

    /// Build the engine options on first use.
    fn engine_options(&self) -> RenderResult<&E::Options> {
        self.built
            .get_or_init(|| {
                let _span = tracing::debug_span!("build options").entered();
                let result = self.engine.create_options(&self.options);
                if let Err(err) = &result {
                    tracing::warn!(%err, "failed to build engine options");
                }
                result
            })
            .as_ref()
            .map_err(|err| RenderError::OptionsNotInitialized(err.clone()))
    }
}

/// Read a document, reporting failures as the engine would.
fn read(path: &Path) -> Result<Vec<u8>, ParseError> {
    fs::read(path).map_err(|err| {
        tracing::debug!(path = %path.display(), %err, "failed to open document");
        ParseError::FileOpenFailed
    })
}
