// cartograph/text/src/lib.rs
//
// Copyright © 2019 The Cartograph Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Glyph rasterization for the map engine.
//!
//! The engine draws text from per-character RGBA bitmaps. `EngineFont` produces them from any
//! `FontEngine`; `FontKitEngine` is the stock engine, backed by `font-kit`.

use cartograph_color::Pixel;

pub use crate::engine::FontEngine;
pub use crate::font::EngineFont;
pub use crate::loader::{FontError, FontKitEngine};

mod engine;
mod font;
mod loader;


/// A font as the map engine sees it.
pub trait Font {
    /// Rasterizes `character` (a UTF-16 code unit) and passes the result to `add_glyph`.
    ///
    /// `add_glyph` is called exactly once, before this method returns. The glyph is only
    /// borrowed for the duration of the call; clone it to keep it.
    fn prepare_glyph(&self, character: u16, add_glyph: &mut dyn FnMut(&Glyph));

    /// The recommended distance between baselines, in pixels.
    fn line_height(&self) -> f32;
}

/// A rasterized character and its metrics.
///
/// Bearings use the engine's conventions: `left_bearing` is negative when ink starts left of the
/// origin, `right_bearing` is positive when ink ends right of the advance, and `top_bearing` and
/// `bottom_bearing` are measured upward from the baseline.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Glyph {
    pub left_bearing: f32,
    pub right_bearing: f32,
    pub top_bearing: f32,
    pub bottom_bearing: f32,
    pub kerning_width: f32,
    pub w: i32,
    pub h: i32,
    /// `w * h` pixels, bottom row first.
    pub data: Vec<Pixel>,
}

impl Glyph {
    /// The pixel at column `x` of row `y`, counting rows up from the bottom.
    #[inline]
    pub fn pixel(&self, x: i32, y: i32) -> Pixel {
        self.data[(y * self.w + x) as usize]
    }
}
