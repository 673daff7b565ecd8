// cartograph/text/src/font.rs
//
// Copyright © 2019 The Cartograph Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::engine::FontEngine;
use crate::{Font, Glyph};
use cartograph_color::{Pixel, PixelBuffer, PixelFormat};
use log::trace;
use pathfinder_geometry::vector::Vector2I;
use std::char;
use std::iter;

// Transparent border added around the ink box so antialiased edges are never clipped.
const GLYPH_PADDING: i32 = 1;

/// A `Font` that rasterizes glyphs with a `FontEngine`.
pub struct EngineFont<E> where E: FontEngine {
    engine: E,
}

impl<E> EngineFont<E> where E: FontEngine {
    #[inline]
    pub fn new(engine: E) -> EngineFont<E> {
        EngineFont { engine }
    }

    #[inline]
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Rasterizes a UTF-16 code unit. Unpaired surrogates render as U+FFFD.
    pub fn rasterize(&self, character: u16) -> Glyph {
        let character = char::decode_utf16(iter::once(character))
            .next()
            .and_then(Result::ok)
            .unwrap_or(char::REPLACEMENT_CHARACTER);
        self.rasterize_char(character)
    }

    pub fn rasterize_char(&self, character: char) -> Glyph {
        let rect = self.engine.bounding_rect(character);
        let (origin, size) = (rect.origin(), rect.size());

        let width = size.x() + GLYPH_PADDING * 2;
        let height = size.y() + GLYPH_PADDING * 2;

        let mut surface = PixelBuffer::filled(Vector2I::new(width, height),
                                              PixelFormat::NATIVE,
                                              Pixel::transparent_white());
        let pen = Vector2I::new(GLYPH_PADDING - origin.x(), GLYPH_PADDING - origin.y());
        self.engine.draw_char(character, &mut surface, pen, Pixel::white());

        trace!("rasterized {:?}: ink {:?}, bitmap {}x{}", character, rect, width, height);

        Glyph {
            left_bearing: self.engine.left_bearing(character),
            right_bearing: -self.engine.right_bearing(character),
            top_bearing: -origin.y() as f32,
            bottom_bearing: -(size.y() + origin.y()) as f32,
            kerning_width: self.engine.horizontal_advance(character),
            w: width,
            h: height,
            data: surface.to_bottom_up_pixels(),
        }
    }
}

impl<E> Font for EngineFont<E> where E: FontEngine {
    fn prepare_glyph(&self, character: u16, add_glyph: &mut dyn FnMut(&Glyph)) {
        let glyph = self.rasterize(character);
        add_glyph(&glyph);
    }

    #[inline]
    fn line_height(&self) -> f32 {
        self.engine.line_spacing()
    }
}
