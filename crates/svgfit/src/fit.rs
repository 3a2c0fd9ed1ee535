//! Resolution of output dimensions and scale factors.

use crate::ValidationError;

/// How requested width and height constraints translate into the final
/// output size.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash)]
pub enum FitMode {
    /// Each requested axis is scaled independently, the aspect ratio is not
    /// preserved. Unrequested axes keep their intrinsic size.
    #[default]
    None,
    /// Scale up, preserving the aspect ratio, if narrower than the requested
    /// width.
    MinWidth,
    /// Scale down, preserving the aspect ratio, if wider than the requested
    /// width.
    MaxWidth,
    /// Scale up, preserving the aspect ratio, if shorter than the requested
    /// height.
    MinHeight,
    /// Scale down, preserving the aspect ratio, if taller than the requested
    /// height.
    MaxHeight,
    /// Fit into the requested box, preserving the aspect ratio. The tighter
    /// axis wins.
    BestFit,
}

/// The size a document declares for itself, in document units.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct IntrinsicSize {
    pub width: f32,
    pub height: f32,
}

impl IntrinsicSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// The size truncated to whole document units.
    pub fn whole(self) -> Self {
        Self::new(self.width.trunc(), self.height.trunc())
    }

    /// Whether both axes are positive and finite.
    pub fn is_valid(self) -> bool {
        self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0
    }
}

/// The pixel size and scale factors a document is rendered at.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Geometry {
    pub width: u32,
    pub height: u32,
    pub scale_x: f32,
    pub scale_y: f32,
}

impl Geometry {
    /// Validate raw policy output.
    fn checked(
        width: u32,
        height: u32,
        scale_x: f32,
        scale_y: f32,
    ) -> Result<Self, ValidationError> {
        let positive = |scale: f32| scale.is_finite() && scale > 0.0;
        if width == 0 {
            Err(ValidationError::InvalidWidth)
        } else if height == 0 {
            Err(ValidationError::InvalidHeight)
        } else if !positive(scale_x) {
            Err(ValidationError::InvalidScaleX)
        } else if !positive(scale_y) {
            Err(ValidationError::InvalidScaleY)
        } else {
            Ok(Self { width, height, scale_x, scale_y })
        }
    }
}

/// Resolve the output size and per-axis scale for a document.
///
/// Derived dimensions are rounded half away from zero. Degenerate document
/// sizes and outputs that end up zero pixels wide or high are rejected
/// instead of clamped.
pub fn resolve(
    intrinsic: IntrinsicSize,
    width: Option<u32>,
    height: Option<u32>,
    mode: FitMode,
) -> Result<Geometry, ValidationError> {
    if !intrinsic.is_valid() {
        return Err(ValidationError::InvalidDocumentSize);
    }

    let IntrinsicSize { width: iw, height: ih } = intrinsic;
    let unscaled = || (px(iw), px(ih), 1.0, 1.0);
    let uniform = |scale: f32| (px(iw * scale), px(ih * scale), scale, scale);
    let by_width = |w: u32| {
        let scale = w as f32 / iw;
        (w, px(ih * scale), scale, scale)
    };
    let by_height = |h: u32| {
        let scale = h as f32 / ih;
        (px(iw * scale), h, scale, scale)
    };

    let (w, h, scale_x, scale_y) = match mode {
        FitMode::None => match (width, height) {
            (Some(w), Some(h)) => (w, h, w as f32 / iw, h as f32 / ih),
            (Some(w), None) => (w, px(ih), w as f32 / iw, 1.0),
            (None, Some(h)) => (px(iw), h, 1.0, h as f32 / ih),
            (None, None) => unscaled(),
        },
        FitMode::MinWidth => match width {
            Some(w) if iw < w as f32 => by_width(w),
            _ => unscaled(),
        },
        FitMode::MaxWidth => match width {
            Some(w) if iw > w as f32 => by_width(w),
            _ => unscaled(),
        },
        FitMode::MinHeight => match height {
            Some(h) if ih < h as f32 => by_height(h),
            _ => unscaled(),
        },
        FitMode::MaxHeight => match height {
            Some(h) if ih > h as f32 => by_height(h),
            _ => unscaled(),
        },
        FitMode::BestFit => match (width, height) {
            (Some(w), Some(h)) => uniform(f32::min(w as f32 / iw, h as f32 / ih)),
            (Some(w), None) => by_width(w),
            (None, Some(h)) => by_height(h),
            (None, None) => unscaled(),
        },
    };

    Geometry::checked(w, h, scale_x, scale_y)
}

/// Round a dimension to whole pixels, half away from zero.
fn px(value: f32) -> u32 {
    value.round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(width: f32, height: f32) -> IntrinsicSize {
        IntrinsicSize::new(width, height)
    }

    fn geometry(width: u32, height: u32, scale_x: f32, scale_y: f32) -> Geometry {
        Geometry { width, height, scale_x, scale_y }
    }

    #[test]
    fn test_none_without_target() {
        for (w, h) in [(1.0, 1.0), (400.0, 180.0), (16.0, 9000.0)] {
            assert_eq!(
                resolve(size(w, h), None, None, FitMode::None),
                Ok(geometry(w as u32, h as u32, 1.0, 1.0)),
            );
        }
    }

    #[test]
    fn test_none_independent_axes() {
        assert_eq!(
            resolve(size(400.0, 180.0), Some(200), Some(700), FitMode::None),
            Ok(geometry(200, 700, 0.5, 700.0 / 180.0)),
        );
        assert_eq!(
            resolve(size(400.0, 180.0), Some(200), None, FitMode::None),
            Ok(geometry(200, 180, 0.5, 1.0)),
        );
        assert_eq!(
            resolve(size(400.0, 180.0), None, Some(90), FitMode::None),
            Ok(geometry(400, 90, 1.0, 0.5)),
        );
    }

    #[test]
    fn test_best_fit_tighter_axis() {
        assert_eq!(
            resolve(size(1000.0, 1000.0), Some(200), Some(300), FitMode::BestFit),
            Ok(geometry(200, 200, 0.2, 0.2)),
        );
        assert_eq!(
            resolve(size(1000.0, 1000.0), Some(300), Some(200), FitMode::BestFit),
            Ok(geometry(200, 200, 0.2, 0.2)),
        );
    }

    #[test]
    fn test_best_fit_single_axis() {
        assert_eq!(
            resolve(size(16.0, 16.0), Some(200), None, FitMode::BestFit),
            Ok(geometry(200, 200, 12.5, 12.5)),
        );
        assert_eq!(
            resolve(size(200.0, 200.0), None, Some(16), FitMode::BestFit),
            Ok(geometry(16, 16, 0.08, 0.08)),
        );
        assert_eq!(
            resolve(size(400.0, 180.0), Some(300), None, FitMode::BestFit),
            Ok(geometry(300, 135, 0.75, 0.75)),
        );
        assert_eq!(
            resolve(size(400.0, 180.0), None, Some(135), FitMode::BestFit),
            Ok(geometry(300, 135, 0.75, 0.75)),
        );
    }

    #[test]
    fn test_best_fit_rounds_half_away_from_zero() {
        assert_eq!(
            resolve(size(250.0, 200.0), None, Some(90), FitMode::BestFit),
            Ok(geometry(113, 90, 0.45, 0.45)),
        );
    }

    #[test]
    fn test_best_fit_without_target() {
        assert_eq!(
            resolve(size(30.0, 40.0), None, None, FitMode::BestFit),
            Ok(geometry(30, 40, 1.0, 1.0)),
        );
    }

    #[test]
    fn test_min_width() {
        assert_eq!(
            resolve(size(100.0, 50.0), Some(200), None, FitMode::MinWidth),
            Ok(geometry(200, 100, 2.0, 2.0)),
        );
        assert_eq!(
            resolve(size(300.0, 50.0), Some(200), None, FitMode::MinWidth),
            Ok(geometry(300, 50, 1.0, 1.0)),
        );
        assert_eq!(
            resolve(size(100.0, 50.0), None, Some(500), FitMode::MinWidth),
            Ok(geometry(100, 50, 1.0, 1.0)),
        );
    }

    #[test]
    fn test_max_width() {
        assert_eq!(
            resolve(size(400.0, 100.0), Some(200), None, FitMode::MaxWidth),
            Ok(geometry(200, 50, 0.5, 0.5)),
        );
        assert_eq!(
            resolve(size(100.0, 50.0), Some(200), None, FitMode::MaxWidth),
            Ok(geometry(100, 50, 1.0, 1.0)),
        );
    }

    #[test]
    fn test_min_height() {
        assert_eq!(
            resolve(size(50.0, 100.0), None, Some(300), FitMode::MinHeight),
            Ok(geometry(150, 300, 3.0, 3.0)),
        );
        assert_eq!(
            resolve(size(50.0, 400.0), None, Some(300), FitMode::MinHeight),
            Ok(geometry(50, 400, 1.0, 1.0)),
        );
    }

    #[test]
    fn test_max_height() {
        assert_eq!(
            resolve(size(80.0, 400.0), None, Some(100), FitMode::MaxHeight),
            Ok(geometry(20, 100, 0.25, 0.25)),
        );
        assert_eq!(
            resolve(size(80.0, 40.0), None, Some(100), FitMode::MaxHeight),
            Ok(geometry(80, 40, 1.0, 1.0)),
        );
    }

    #[test]
    fn test_equal_size_passes_through() {
        for mode in [FitMode::MinWidth, FitMode::MaxWidth] {
            assert_eq!(
                resolve(size(64.0, 32.0), Some(64), None, mode),
                Ok(geometry(64, 32, 1.0, 1.0)),
            );
        }
        for mode in [FitMode::MinHeight, FitMode::MaxHeight] {
            assert_eq!(
                resolve(size(64.0, 32.0), None, Some(32), mode),
                Ok(geometry(64, 32, 1.0, 1.0)),
            );
        }
    }

    #[test]
    fn test_degenerate_document() {
        let modes = [
            FitMode::None,
            FitMode::MinWidth,
            FitMode::MaxWidth,
            FitMode::MinHeight,
            FitMode::MaxHeight,
            FitMode::BestFit,
        ];
        let sizes = [
            size(0.0, 10.0),
            size(10.0, 0.0),
            size(0.0, 0.0),
            size(-5.0, 10.0),
            size(f32::NAN, 10.0),
            size(10.0, f32::INFINITY),
        ];
        for mode in modes {
            for intrinsic in sizes {
                assert_eq!(
                    resolve(intrinsic, Some(100), Some(100), mode),
                    Err(ValidationError::InvalidDocumentSize),
                );
            }
        }
    }

    #[test]
    fn test_zero_output_is_rejected() {
        assert_eq!(
            resolve(size(1000.0, 1.0), Some(100), None, FitMode::BestFit),
            Err(ValidationError::InvalidHeight),
        );
        assert_eq!(
            resolve(size(1.0, 1000.0), None, Some(100), FitMode::BestFit),
            Err(ValidationError::InvalidWidth),
        );
        assert_eq!(
            resolve(size(10.0, 10.0), Some(0), None, FitMode::None),
            Err(ValidationError::InvalidWidth),
        );
        assert_eq!(
            resolve(size(10.0, 10.0), Some(5), Some(0), FitMode::None),
            Err(ValidationError::InvalidHeight),
        );
    }

    #[test]
    fn test_whole_truncates() {
        assert_eq!(size(400.9, 180.2).whole(), size(400.0, 180.0));
        assert!(!size(0.5, 10.0).whole().is_valid());
    }
}
