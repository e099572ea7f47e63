//! Display layout: how large the editing surface is, and the pairing of image
//! frame and display size used for every coordinate conversion.

#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use crate::consts::{
    HEADER_HEIGHT_PX, MIN_AVAILABLE_PX, MIN_DISPLAY_PX, PLACEHOLDER_MAX_HEIGHT_PX, RES_LABEL_AREA_PX,
    SIDE_PADDING_PX, WIDGETS_ABOVE_PX,
};
use crate::geom::{self, ImageFrame, Point, Size};

/// The current image frame together with the size it is displayed at.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub frame: ImageFrame,
    pub display: Size,
}

impl Viewport {
    #[must_use]
    pub fn new(frame: ImageFrame, display: Size) -> Self {
        Self { frame, display }
    }

    /// Whether an image is loaded. Pointer input is ignored otherwise.
    #[must_use]
    pub fn has_image(&self) -> bool {
        !self.frame.is_degenerate()
    }

    #[must_use]
    pub fn image_to_display(&self, p: Point) -> Point {
        geom::image_to_display(p, self.frame, self.display)
    }

    #[must_use]
    pub fn display_to_image(&self, p: Point) -> Point {
        geom::display_to_image(p, self.frame, self.display)
    }

    /// Convert a display point to image space and clamp it into the frame.
    #[must_use]
    pub fn display_to_image_clamped(&self, p: Point) -> Point {
        geom::clamp_to_frame(self.display_to_image(p), self.frame)
    }
}

/// Area left for the canvas inside a host node of `node_size`.
#[must_use]
pub fn available_area(node_size: Size) -> Size {
    Size {
        width: (node_size.width - SIDE_PADDING_PX).max(MIN_AVAILABLE_PX),
        height: (node_size.height - HEADER_HEIGHT_PX - WIDGETS_ABOVE_PX - RES_LABEL_AREA_PX).max(MIN_AVAILABLE_PX),
    }
}

/// Size of the editing surface inside `available`.
///
/// With an image, the surface keeps the image aspect ratio: full available
/// width unless that overflows the height, floored to whole pixels. Without
/// one, the surface is a short placeholder strip.
#[must_use]
pub fn fit_display(frame: ImageFrame, available: Size) -> Size {
    let Some(aspect) = frame.aspect() else {
        return Size {
            width: available.width,
            height: PLACEHOLDER_MAX_HEIGHT_PX.min(available.height),
        };
    };

    let mut width = available.width;
    let mut height = width / aspect;
    if height > available.height {
        height = available.height;
        width = height * aspect;
    }

    Size {
        width: width.floor().max(MIN_DISPLAY_PX),
        height: height.floor().max(MIN_DISPLAY_PX),
    }
}
