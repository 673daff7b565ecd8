// cartograph/text/src/engine.rs
//
// Copyright © 2019 The Cartograph Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use cartograph_color::{Pixel, PixelBuffer};
use pathfinder_geometry::rect::RectI;
use pathfinder_geometry::vector::Vector2I;

/// The metrics and drawing primitives of one font at one size.
///
/// All values are in pixels. The coordinate system is the usual raster one: x grows to the right,
/// y grows downward, and the origin is the pen position on the baseline.
pub trait FontEngine {
    /// The tight bounding box of the ink of `character`. Ink above the baseline has negative y.
    fn bounding_rect(&self, character: char) -> RectI;

    /// Distance from the origin to the left-most ink; negative if ink extends left of the origin.
    fn left_bearing(&self, character: char) -> f32;

    /// Distance from the right-most ink to the advance; negative if ink extends past the advance.
    fn right_bearing(&self, character: char) -> f32;

    fn horizontal_advance(&self, character: char) -> f32;

    /// Ascent plus descent plus leading.
    fn line_spacing(&self) -> f32;

    /// Draws `character` in `color`, blended over `surface`, with the pen at `origin`.
    fn draw_char(&self, character: char, surface: &mut PixelBuffer, origin: Vector2I, color: Pixel);
}
