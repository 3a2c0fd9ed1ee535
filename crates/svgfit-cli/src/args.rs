use std::fmt::{self, Display, Formatter};
use std::path::PathBuf;
use std::str::FromStr;

use clap::{ArgAction, Args, ColorChoice, Parser, ValueEnum};
use svgfit::tiny_skia::Color;
use svgfit::{FitMode, RenderOptions, RenderRequest};

/// Renders SVG files into PNG images.
#[derive(Debug, Clone, Parser)]
#[clap(name = "svgfit", version, author)]
pub struct CliArguments {
    /// Path to the input SVG file, use `-` to read from stdin
    pub input: Input,

    /// Path to the output PNG file, use `-` to write to stdout
    pub output: Option<Output>,

    /// Prints the intrinsic size of the document instead of rendering it
    #[clap(long)]
    pub query: bool,

    /// Output size arguments.
    #[clap(flatten)]
    pub size: SizeArgs,

    /// Font and text arguments.
    #[clap(flatten)]
    pub fonts: FontArgs,

    /// The directory relative image references are resolved against
    #[clap(long, value_name = "DIR")]
    pub resources_dir: Option<PathBuf>,

    /// The DPI used to resolve physical units
    #[clap(long)]
    pub dpi: Option<f32>,

    /// How shapes are anti-aliased
    #[clap(long, value_name = "MODE")]
    pub shape_rendering: Option<ShapeRendering>,

    /// How text is rendered
    #[clap(long, value_name = "MODE")]
    pub text_rendering: Option<TextRendering>,

    /// How embedded raster images are scaled
    #[clap(long, value_name = "MODE")]
    pub image_rendering: Option<ImageRendering>,

    /// Whether to use color in error messages
    #[clap(long, default_value_t = ColorChoice::Auto, value_name = "WHEN")]
    pub color: ColorChoice,

    /// Sets the level of logging verbosity:
    /// -v = warning & error, -vv = info, -vvv = debug, -vvvv = trace
    #[clap(short, long, action = ArgAction::Count)]
    pub verbosity: u8,
}

impl CliArguments {
    /// The output, derived from the input path if not given.
    pub fn output(&self) -> Option<Output> {
        match (&self.output, &self.input) {
            (Some(output), _) => Some(output.clone()),
            (None, Input::Path(path)) => Some(Output::Path(path.with_extension("png"))),
            (None, Input::Stdin) => None,
        }
    }

    /// The engine options described by the arguments.
    pub fn options(&self) -> RenderOptions {
        let fonts = &self.fonts;
        let mut builder = RenderOptions::builder()
            .load_system_fonts(!fonts.no_system_fonts)
            .languages(fonts.languages.iter().map(String::as_str))
            .font_files(fonts.font_files.iter().cloned())
            .font_dirs(fonts.font_paths.iter().cloned());

        if let Some(dir) = &self.resources_dir {
            builder = builder.resources_dir(dir);
        }
        if let Some(dpi) = self.dpi {
            builder = builder.dpi(dpi);
        }
        if let Some(size) = fonts.font_size {
            builder = builder.font_size(size);
        }

        if let Some(family) = &fonts.font_family {
            builder = builder.font_family(family.as_str());
        }
        if let Some(family) = &fonts.serif_family {
            builder = builder.serif_family(family.as_str());
        }
        if let Some(family) = &fonts.sans_serif_family {
            builder = builder.sans_serif_family(family.as_str());
        }
        if let Some(family) = &fonts.cursive_family {
            builder = builder.cursive_family(family.as_str());
        }
        if let Some(family) = &fonts.fantasy_family {
            builder = builder.fantasy_family(family.as_str());
        }
        if let Some(family) = &fonts.monospace_family {
            builder = builder.monospace_family(family.as_str());
        }

        if let Some(mode) = self.shape_rendering {
            builder = builder.shape_rendering(mode.into());
        }
        if let Some(mode) = self.text_rendering {
            builder = builder.text_rendering(mode.into());
        }
        if let Some(mode) = self.image_rendering {
            builder = builder.image_rendering(mode.into());
        }

        builder.build()
    }

    /// The per-call request described by the arguments.
    pub fn request(&self) -> RenderRequest {
        let size = &self.size;
        let mut request = RenderRequest::new()
            .width(size.width.unwrap_or(0))
            .height(size.height.unwrap_or(0))
            .fit(size.fit.into());
        if let Some(background) = size.background {
            request = request.background(background);
        }
        if let Some(Transform([a, b, c, d, e, f])) = size.transform {
            request = request.transform(a, b, c, d, e, f);
        }
        request
    }
}

/// Arguments controlling the output size.
#[derive(Debug, Clone, Args)]
pub struct SizeArgs {
    /// The output width in pixels
    #[clap(long, short = 'W')]
    pub width: Option<u32>,

    /// The output height in pixels
    #[clap(long, short = 'H')]
    pub height: Option<u32>,

    /// How the width and height constrain the output
    #[clap(long, default_value_t = Fit::None)]
    pub fit: Fit,

    /// An affine transform `a,b,c,d,e,f` replacing the computed scale
    #[clap(long, allow_hyphen_values = true)]
    pub transform: Option<Transform>,

    /// The background color as a CSS color, e.g. `white`, `#ff000080` or `rgb(0 0 0 / 50%)`
    #[clap(long, value_parser = parse_background)]
    pub background: Option<Color>,
}

/// Arguments controlling fonts and text.
#[derive(Debug, Clone, Args)]
pub struct FontArgs {
    /// Does not load the fonts installed on the system
    #[clap(long)]
    pub no_system_fonts: bool,

    /// Adds additional directories to search for fonts
    #[clap(
        long = "font-path",
        env = "SVGFIT_FONT_PATHS",
        value_name = "DIR",
        value_delimiter = ',',
        action = ArgAction::Append,
    )]
    pub font_paths: Vec<PathBuf>,

    /// Loads an additional font file
    #[clap(long = "font-file", value_name = "FILE", action = ArgAction::Append)]
    pub font_files: Vec<PathBuf>,

    /// The family used when a document does not name one
    #[clap(long, value_name = "FAMILY")]
    pub font_family: Option<String>,

    /// The font size used when a document does not specify one
    #[clap(long)]
    pub font_size: Option<f32>,

    /// The family used for `serif`
    #[clap(long, value_name = "FAMILY")]
    pub serif_family: Option<String>,

    /// The family used for `sans-serif`
    #[clap(long, value_name = "FAMILY")]
    pub sans_serif_family: Option<String>,

    /// The family used for `cursive`
    #[clap(long, value_name = "FAMILY")]
    pub cursive_family: Option<String>,

    /// The family used for `fantasy`
    #[clap(long, value_name = "FAMILY")]
    pub fantasy_family: Option<String>,

    /// The family used for `monospace`
    #[clap(long, value_name = "FAMILY")]
    pub monospace_family: Option<String>,

    /// Preferred languages, e.g. `en,de`
    #[clap(long, value_delimiter = ',')]
    pub languages: Vec<String>,
}

/// An input that is either stdin or a real path.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Input {
    /// Stdin, represented by `-`.
    Stdin,
    /// A non-empty path.
    Path(PathBuf),
}

impl FromStr for Input {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "" => Err("input must not be empty".into()),
            "-" => Ok(Self::Stdin),
            path => Ok(Self::Path(path.into())),
        }
    }
}

/// An output that is either stdout or a real path.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Output {
    /// Stdout, represented by `-`.
    Stdout,
    /// A non-empty path.
    Path(PathBuf),
}

impl FromStr for Output {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "" => Err("output must not be empty".into()),
            "-" => Ok(Self::Stdout),
            path => Ok(Self::Path(path.into())),
        }
    }
}

impl Display for Output {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Output::Stdout => f.pad("stdout"),
            Output::Path(path) => path.display().fmt(f),
        }
    }
}

/// The six coefficients of an affine transform.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform(pub [f32; 6]);

impl FromStr for Transform {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let parts = value
            .split(',')
            .map(|part| part.trim().parse::<f32>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| format!("invalid transform coefficient ({err})"))?;
        let coefficients: [f32; 6] = parts
            .try_into()
            .map_err(|parts: Vec<f32>| format!("expected 6 coefficients, got {}", parts.len()))?;
        Ok(Self(coefficients))
    }
}

fn parse_background(value: &str) -> Result<Color, String> {
    svgfit::parse_color(value).map_err(|err| err.to_string())
}

/// How the requested size constrains the output.
#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
pub enum Fit {
    /// Scale each requested axis independently
    None,
    /// Scale up to the width if narrower
    MinWidth,
    /// Scale down to the width if wider
    MaxWidth,
    /// Scale up to the height if shorter
    MinHeight,
    /// Scale down to the height if taller
    MaxHeight,
    /// Fit into the requested box, preserving the aspect ratio
    BestFit,
}

impl Display for Fit {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        self.to_possible_value()
            .expect("no values are skipped")
            .get_name()
            .fmt(f)
    }
}

impl From<Fit> for FitMode {
    fn from(fit: Fit) -> Self {
        match fit {
            Fit::None => FitMode::None,
            Fit::MinWidth => FitMode::MinWidth,
            Fit::MaxWidth => FitMode::MaxWidth,
            Fit::MinHeight => FitMode::MinHeight,
            Fit::MaxHeight => FitMode::MaxHeight,
            Fit::BestFit => FitMode::BestFit,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
pub enum ShapeRendering {
    OptimizeSpeed,
    CrispEdges,
    GeometricPrecision,
}

impl From<ShapeRendering> for svgfit::ShapeRendering {
    fn from(mode: ShapeRendering) -> Self {
        match mode {
            ShapeRendering::OptimizeSpeed => Self::OptimizeSpeed,
            ShapeRendering::CrispEdges => Self::CrispEdges,
            ShapeRendering::GeometricPrecision => Self::GeometricPrecision,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
pub enum TextRendering {
    OptimizeSpeed,
    OptimizeLegibility,
    GeometricPrecision,
}

impl From<TextRendering> for svgfit::TextRendering {
    fn from(mode: TextRendering) -> Self {
        match mode {
            TextRendering::OptimizeSpeed => Self::OptimizeSpeed,
            TextRendering::OptimizeLegibility => Self::OptimizeLegibility,
            TextRendering::GeometricPrecision => Self::GeometricPrecision,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
pub enum ImageRendering {
    OptimizeQuality,
    OptimizeSpeed,
}

impl From<ImageRendering> for svgfit::ImageRendering {
    fn from(mode: ImageRendering) -> Self {
        match mode {
            ImageRendering::OptimizeQuality => Self::OptimizeQuality,
            ImageRendering::OptimizeSpeed => Self::OptimizeSpeed,
        }
    }
}
