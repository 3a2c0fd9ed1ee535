//! The resvg engine.

use std::sync::Arc;

use tiny_skia as sk;

use crate::{
    ConfigError, Engine, ImageRendering, IntrinsicSize, ParseError, RenderOptions,
    ShapeRendering, TextRendering,
};

/// Parses documents with `usvg` and rasterizes them with `resvg`.
#[derive(Debug, Default, Copy, Clone)]
pub struct Resvg;

impl Engine for Resvg {
    type Options = usvg::Options<'static>;
    type Document = usvg::Tree;

    fn create_options(&self, options: &RenderOptions) -> Result<Self::Options, ConfigError> {
        let mut opts = usvg::Options::default();
        let db = Arc::make_mut(&mut opts.fontdb);

        if options.load_system_fonts {
            db.load_system_fonts();
        }

        for dir in &options.font_dirs {
            db.load_fonts_dir(dir);
        }

        for data in &options.fonts {
            db.load_font_data(data.as_ref().clone());
        }

        for path in &options.font_files {
            if let Err(err) = db.load_font_file(path) {
                tracing::warn!(path = %path.display(), %err, "failed to load font file");
            }
        }

        let families = &options.generic_families;
        if let Some(family) = &families.serif {
            db.set_serif_family(family.as_str());
        }
        if let Some(family) = &families.sans_serif {
            db.set_sans_serif_family(family.as_str());
        }
        if let Some(family) = &families.cursive {
            db.set_cursive_family(family.as_str());
        }
        if let Some(family) = &families.fantasy {
            db.set_fantasy_family(family.as_str());
        }
        if let Some(family) = &families.monospace {
            db.set_monospace_family(family.as_str());
        }

        tracing::debug!(faces = db.len(), "loaded fonts");

        if let Some(dir) = &options.resources_dir {
            opts.resources_dir = Some(dir.clone());
        }
        if let Some(dpi) = options.dpi {
            opts.dpi = dpi;
        }
        if let Some(family) = &options.font_family {
            opts.font_family = family.to_string();
        }
        if let Some(size) = options.font_size {
            opts.font_size = size;
        }
        if !options.languages.is_empty() {
            opts.languages = options.languages.iter().map(ToString::to_string).collect();
        }
        if let Some(mode) = options.shape_rendering {
            opts.shape_rendering = match mode {
                ShapeRendering::OptimizeSpeed => usvg::ShapeRendering::OptimizeSpeed,
                ShapeRendering::CrispEdges => usvg::ShapeRendering::CrispEdges,
                ShapeRendering::GeometricPrecision => {
                    usvg::ShapeRendering::GeometricPrecision
                }
            };
        }
        if let Some(mode) = options.text_rendering {
            opts.text_rendering = match mode {
                TextRendering::OptimizeSpeed => usvg::TextRendering::OptimizeSpeed,
                TextRendering::OptimizeLegibility => usvg::TextRendering::OptimizeLegibility,
                TextRendering::GeometricPrecision => usvg::TextRendering::GeometricPrecision,
            };
        }
        if let Some(mode) = options.image_rendering {
            opts.image_rendering = match mode {
                ImageRendering::OptimizeQuality => usvg::ImageRendering::OptimizeQuality,
                ImageRendering::OptimizeSpeed => usvg::ImageRendering::OptimizeSpeed,
            };
        }

        Ok(opts)
    }

    fn parse(&self, data: &[u8], options: &Self::Options) -> Result<Self::Document, ParseError> {
        usvg::Tree::from_data(data, options).map_err(ParseError::from)
    }

    fn size(&self, document: &Self::Document) -> IntrinsicSize {
        let size = document.size();
        IntrinsicSize::new(size.width(), size.height())
    }

    fn render(
        &self,
        document: &Self::Document,
        transform: sk::Transform,
        canvas: &mut sk::PixmapMut,
    ) {
        resvg::render(document, transform, canvas);
    }
}
