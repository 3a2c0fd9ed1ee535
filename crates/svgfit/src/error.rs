//! Errors surfaced by the rendering pipeline.

use std::fmt::{self, Display, Formatter};

use ecow::{EcoString, eco_format};

use crate::Stage;

/// A result type with a rendering error.
pub type RenderResult<T> = Result<T, RenderError>;

/// An error that occurred while rendering or measuring a document.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum RenderError {
    /// The renderer's engine options could not be built. Every call on the
    /// same renderer fails with this error.
    OptionsNotInitialized(ConfigError),
    /// The engine rejected the document.
    Parse(ParseError),
    /// The document's size or the requested geometry is unusable.
    Validation(ValidationError),
    /// A pixel buffer of the resolved size could not be allocated.
    PixmapAllocation { width: u32, height: u32 },
}

impl RenderError {
    /// The pipeline stage in which the error was raised.
    pub fn stage(&self) -> Stage {
        match self {
            Self::OptionsNotInitialized(_) => Stage::Idle,
            Self::Parse(_) => Stage::Parsing,
            Self::Validation(ValidationError::InvalidDocumentSize) => Stage::SizeQuerying,
            Self::Validation(_) => Stage::ScaleResolving,
            Self::PixmapAllocation { .. } => Stage::Allocating,
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::OptionsNotInitialized(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::Validation(err) => Some(err),
            Self::PixmapAllocation { .. } => None,
        }
    }
}

impl Display for RenderError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::OptionsNotInitialized(err) => {
                write!(f, "options not initialized ({err})")
            }
            Self::Parse(err) => err.fmt(f),
            Self::Validation(err) => err.fmt(f),
            Self::PixmapAllocation { width, height } => {
                write!(f, "failed to allocate a {width}x{height} pixel buffer")
            }
        }
    }
}

impl From<ConfigError> for RenderError {
    fn from(err: ConfigError) -> Self {
        Self::OptionsNotInitialized(err)
    }
}

impl From<ParseError> for RenderError {
    fn from(err: ParseError) -> Self {
        Self::Parse(err)
    }
}

impl From<ValidationError> for RenderError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err)
    }
}

impl From<RenderError> for EcoString {
    fn from(err: RenderError) -> Self {
        eco_format!("{err}")
    }
}

/// An error that occurred while building the engine options.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum ConfigError {
    /// The options could not be allocated.
    Other(EcoString),
}

impl std::error::Error for ConfigError {}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::Other(message) => f.pad(message),
        }
    }
}

/// An error reported by the engine while parsing a document.
///
/// The numeric codes follow the status codes of the resvg C API.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum ParseError {
    /// The document is not valid UTF-8.
    NotUtf8Text,
    /// The document file could not be opened.
    FileOpenFailed,
    /// A compressed document is not valid GZip.
    MalformedCompression,
    /// The document has more elements than the engine allows.
    ElementLimitReached,
    /// The document has no valid size.
    InvalidSize,
    /// The XML could not be parsed. Carries the engine's message if it
    /// provided one.
    ParsingFailed(Option<EcoString>),
    /// A status code the engine is not known to produce.
    Unknown(i32),
}

impl ParseError {
    /// The status code for success.
    pub const OK: i32 = 0;

    /// Translate an engine status code.
    pub fn from_status(code: i32) -> Result<(), Self> {
        Err(match code {
            Self::OK => return Ok(()),
            1 => Self::NotUtf8Text,
            2 => Self::FileOpenFailed,
            3 => Self::MalformedCompression,
            4 => Self::ElementLimitReached,
            5 => Self::InvalidSize,
            6 => Self::ParsingFailed(None),
            code => Self::Unknown(code),
        })
    }

    /// The engine status code of this error.
    pub fn code(&self) -> i32 {
        match self {
            Self::NotUtf8Text => 1,
            Self::FileOpenFailed => 2,
            Self::MalformedCompression => 3,
            Self::ElementLimitReached => 4,
            Self::InvalidSize => 5,
            Self::ParsingFailed(_) => 6,
            Self::Unknown(code) => *code,
        }
    }
}

impl std::error::Error for ParseError {}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::NotUtf8Text => f.pad("only UTF-8 content is supported"),
            Self::FileOpenFailed => f.pad("failed to open the provided file"),
            Self::MalformedCompression => {
                f.pad("compressed SVG must use the GZip algorithm")
            }
            Self::ElementLimitReached => {
                f.pad("SVG has more than 1_000_000 elements")
            }
            Self::InvalidSize => f.pad("SVG doesn't have a valid size"),
            Self::ParsingFailed(Some(message)) => {
                write!(f, "failed to parse SVG data ({message})")
            }
            Self::ParsingFailed(None) => f.pad("failed to parse SVG data"),
            Self::Unknown(code) => write!(f, "unknown engine error (code {code})"),
        }
    }
}

impl From<usvg::Error> for ParseError {
    fn from(err: usvg::Error) -> Self {
        match err {
            usvg::Error::NotAnUtf8Str => Self::NotUtf8Text,
            usvg::Error::MalformedGZip => Self::MalformedCompression,
            usvg::Error::ElementsLimitReached => Self::ElementLimitReached,
            usvg::Error::InvalidSize => Self::InvalidSize,
            usvg::Error::ParsingFailed(err) => Self::ParsingFailed(Some(eco_format!("{err}"))),
        }
    }
}

/// A document size or requested geometry that cannot be rendered.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ValidationError {
    /// The document reported a zero, negative or non-finite size.
    InvalidDocumentSize,
    /// The resolved output width is zero.
    InvalidWidth,
    /// The resolved output height is zero.
    InvalidHeight,
    /// The resolved horizontal scale is not a positive finite number.
    InvalidScaleX,
    /// The resolved vertical scale is not a positive finite number.
    InvalidScaleY,
}

impl std::error::Error for ValidationError {}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.pad(match self {
            Self::InvalidDocumentSize => "invalid width or height",
            Self::InvalidWidth => "invalid width",
            Self::InvalidHeight => "invalid height",
            Self::InvalidScaleX => "invalid x scale",
            Self::InvalidScaleY => "invalid y scale",
        })
    }
}
