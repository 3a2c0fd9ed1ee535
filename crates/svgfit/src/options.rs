//! Engine configuration shared by all calls on a renderer.

use std::path::PathBuf;
use std::sync::Arc;

use ecow::EcoString;

/// How shapes are anti-aliased.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShapeRendering {
    OptimizeSpeed,
    CrispEdges,
    GeometricPrecision,
}

/// How text is rendered.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum TextRendering {
    OptimizeSpeed,
    OptimizeLegibility,
    GeometricPrecision,
}

/// How embedded raster images are scaled.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ImageRendering {
    OptimizeQuality,
    OptimizeSpeed,
}

/// Font families substituted for the CSS generic families.
#[derive(Debug, Default, Clone, Eq, PartialEq, Hash)]
pub struct GenericFamilies {
    pub serif: Option<EcoString>,
    pub sans_serif: Option<EcoString>,
    pub cursive: Option<EcoString>,
    pub fantasy: Option<EcoString>,
    pub monospace: Option<EcoString>,
}

/// Options the engine parses and renders documents with.
///
/// Unset values leave the engine's defaults in place. A renderer holds one
/// of these for its whole lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Whether to load the fonts installed on the system. Defaults to `true`.
    pub load_system_fonts: bool,
    /// The directory relative image references are resolved against.
    pub resources_dir: Option<PathBuf>,
    pub dpi: Option<f32>,
    /// The family used when a document does not name one.
    pub font_family: Option<EcoString>,
    pub font_size: Option<f32>,
    pub generic_families: GenericFamilies,
    /// Preferred languages, in order. Empty means the engine default.
    pub languages: Vec<EcoString>,
    pub shape_rendering: Option<ShapeRendering>,
    pub text_rendering: Option<TextRendering>,
    pub image_rendering: Option<ImageRendering>,
    /// Raw font data, loaded in order.
    pub fonts: Vec<Arc<Vec<u8>>>,
    /// Font files, loaded in order.
    pub font_files: Vec<PathBuf>,
    /// Directories searched for additional fonts.
    pub font_dirs: Vec<PathBuf>,
}

impl RenderOptions {
    /// Start building options from the defaults.
    pub fn builder() -> RenderOptionsBuilder {
        RenderOptionsBuilder::default()
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            load_system_fonts: true,
            resources_dir: None,
            dpi: None,
            font_family: None,
            font_size: None,
            generic_families: GenericFamilies::default(),
            languages: vec![],
            shape_rendering: None,
            text_rendering: None,
            image_rendering: None,
            fonts: vec![],
            font_files: vec![],
            font_dirs: vec![],
        }
    }
}

/// Builds [`RenderOptions`]. Later calls override earlier ones for the same
/// field.
///
/// # Examples
/// ```
/// # use svgfit::{RenderOptions, ShapeRendering};
/// let options = RenderOptions::builder()
///     .load_system_fonts(false)
///     .dpi(144.0)
///     .shape_rendering(ShapeRendering::CrispEdges)
///     .build();
/// assert_eq!(options.dpi, Some(144.0));
/// ```
#[derive(Debug, Default, Clone)]
pub struct RenderOptionsBuilder {
    options: RenderOptions,
}

impl RenderOptionsBuilder {
    /// Whether to load system fonts, defaults to `true`.
    pub fn load_system_fonts(mut self, value: bool) -> Self {
        self.options.load_system_fonts = value;
        self
    }

    pub fn resources_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.options.resources_dir = Some(dir.into());
        self
    }

    /// A DPI of zero leaves the engine default.
    pub fn dpi(mut self, dpi: f32) -> Self {
        self.options.dpi = (dpi != 0.0).then_some(dpi);
        self
    }

    pub fn font_family(mut self, family: impl Into<EcoString>) -> Self {
        self.options.font_family = non_empty(family.into());
        self
    }

    /// A size of zero leaves the engine default.
    pub fn font_size(mut self, size: f32) -> Self {
        self.options.font_size = (size != 0.0).then_some(size);
        self
    }

    pub fn serif_family(mut self, family: impl Into<EcoString>) -> Self {
        self.options.generic_families.serif = non_empty(family.into());
        self
    }

    pub fn sans_serif_family(mut self, family: impl Into<EcoString>) -> Self {
        self.options.generic_families.sans_serif = non_empty(family.into());
        self
    }

    pub fn cursive_family(mut self, family: impl Into<EcoString>) -> Self {
        self.options.generic_families.cursive = non_empty(family.into());
        self
    }

    pub fn fantasy_family(mut self, family: impl Into<EcoString>) -> Self {
        self.options.generic_families.fantasy = non_empty(family.into());
        self
    }

    pub fn monospace_family(mut self, family: impl Into<EcoString>) -> Self {
        self.options.generic_families.monospace = non_empty(family.into());
        self
    }

    /// Replace the preferred languages.
    pub fn languages<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<EcoString>,
    {
        self.options.languages = languages.into_iter().map(Into::into).collect();
        self
    }

    pub fn shape_rendering(mut self, mode: ShapeRendering) -> Self {
        self.options.shape_rendering = Some(mode);
        self
    }

    pub fn text_rendering(mut self, mode: TextRendering) -> Self {
        self.options.text_rendering = Some(mode);
        self
    }

    pub fn image_rendering(mut self, mode: ImageRendering) -> Self {
        self.options.image_rendering = Some(mode);
        self
    }

    /// Replace the raw font data.
    pub fn fonts<I>(mut self, fonts: I) -> Self
    where
        I: IntoIterator<Item = Vec<u8>>,
    {
        self.options.fonts = fonts.into_iter().map(Arc::new).collect();
        self
    }

    /// Replace the font files. Empty paths are skipped.
    pub fn font_files<I, P>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.options.font_files = files
            .into_iter()
            .map(Into::into)
            .filter(|path| !path.as_os_str().is_empty())
            .collect();
        self
    }

    /// Replace the font directories.
    pub fn font_dirs<I, P>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.options.font_dirs = dirs.into_iter().map(Into::into).collect();
        self
    }

    /// Finish building.
    pub fn build(self) -> RenderOptions {
        self.options
    }
}

fn non_empty(value: EcoString) -> Option<EcoString> {
    (!value.is_empty()).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = RenderOptions::builder().build();
        assert_eq!(options, RenderOptions::default());
        assert!(options.load_system_fonts);
        assert!(options.languages.is_empty());
        assert_eq!(options.shape_rendering, None);
    }

    #[test]
    fn test_later_calls_override() {
        let options = RenderOptions::builder()
            .dpi(72.0)
            .font_family("Noto Sans")
            .dpi(300.0)
            .languages(["en", "de"])
            .languages(["fr"])
            .build();
        assert_eq!(options.dpi, Some(300.0));
        assert_eq!(options.font_family.as_deref(), Some("Noto Sans"));
        assert_eq!(options.languages, vec![EcoString::from("fr")]);
    }

    #[test]
    fn test_zero_and_empty_unset() {
        let options = RenderOptions::builder()
            .dpi(96.0)
            .dpi(0.0)
            .font_size(0.0)
            .serif_family("Georgia")
            .serif_family("")
            .font_files(["a.ttf", "", "b.otf"])
            .build();
        assert_eq!(options.dpi, None);
        assert_eq!(options.font_size, None);
        assert_eq!(options.generic_families.serif, None);
        assert_eq!(
            options.font_files,
            vec![PathBuf::from("a.ttf"), PathBuf::from("b.otf")]
        );
    }

    #[test]
    fn test_builder_forks() {
        let base = RenderOptions::builder().font_size(10.0);
        let larger = base.clone().font_size(20.0).build();
        assert_eq!(base.build().font_size, Some(10.0));
        assert_eq!(larger.font_size, Some(20.0));
    }
}
