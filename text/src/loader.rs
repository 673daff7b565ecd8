// cartograph/text/src/loader.rs
//
// Copyright © 2019 The Cartograph Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A `FontEngine` backed by the platform font loader of `font-kit`.

use crate::engine::FontEngine;
use cartograph_color::{Pixel, PixelBuffer};
use font_kit::canvas::{Canvas, Format, RasterizationOptions};
use font_kit::error::{FontLoadingError, SelectionError};
use font_kit::family_name::FamilyName;
use font_kit::hinting::HintingOptions;
use font_kit::loaders::default::Font as LoadedFont;
use font_kit::metrics::Metrics;
use font_kit::properties::Properties;
use font_kit::source::SystemSource;
use log::debug;
use pathfinder_geometry::rect::RectI;
use pathfinder_geometry::transform2d::Transform2F;
use pathfinder_geometry::vector::{Vector2F, Vector2I};
use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::path::Path;

// TODO: Make hinting configurable.
const HINTING_OPTIONS: HintingOptions = HintingOptions::None;
const RASTERIZATION_OPTIONS: RasterizationOptions = RasterizationOptions::GrayscaleAa;

// Glyph 0 is `.notdef` in every OpenType font.
const NOTDEF_GLYPH_ID: u32 = 0;

pub struct FontKitEngine {
    font: LoadedFont,
    point_size: f32,
    metrics: Metrics,
    scale: f32,
}

impl FontKitEngine {
    pub fn new(font: LoadedFont, point_size: f32) -> FontKitEngine {
        let metrics = font.metrics();
        let scale = point_size / metrics.units_per_em as f32;
        FontKitEngine { font, point_size, metrics, scale }
    }

    /// Loads the font at `font_index` in the font file at `path`.
    pub fn from_path<P>(path: P, font_index: u32, point_size: f32)
                        -> Result<FontKitEngine, FontError>
                        where P: AsRef<Path> {
        let font = LoadedFont::from_path(path, font_index)?;
        Ok(FontKitEngine::new(font, point_size))
    }

    /// Loads the installed font that best matches `family` with default properties.
    pub fn from_family(family: FamilyName, point_size: f32) -> Result<FontKitEngine, FontError> {
        let handle = SystemSource::new().select_best_match(&[family], &Properties::new())?;
        let font = handle.load()?;
        Ok(FontKitEngine::new(font, point_size))
    }

    #[inline]
    pub fn font(&self) -> &LoadedFont {
        &self.font
    }

    #[inline]
    pub fn point_size(&self) -> f32 {
        self.point_size
    }

    fn glyph_id(&self, character: char) -> u32 {
        self.font.glyph_for_char(character).unwrap_or(NOTDEF_GLYPH_ID)
    }

    fn advance(&self, glyph_id: u32) -> f32 {
        match self.font.advance(glyph_id) {
            Ok(advance) => advance.x() * self.scale,
            Err(err) => {
                debug!("no advance for glyph {}: {:?}", glyph_id, err);
                0.0
            }
        }
    }

    // Ink extents in pixels, y up: (left, right).
    fn horizontal_extents(&self, glyph_id: u32) -> (f32, f32) {
        match self.font.typographic_bounds(glyph_id) {
            Ok(bounds) => (bounds.min_x() * self.scale, bounds.max_x() * self.scale),
            Err(err) => {
                debug!("no bounds for glyph {}: {:?}", glyph_id, err);
                (0.0, 0.0)
            }
        }
    }
}

impl FontEngine for FontKitEngine {
    fn bounding_rect(&self, character: char) -> RectI {
        let glyph_id = self.glyph_id(character);
        match self.font.raster_bounds(glyph_id,
                                      self.point_size,
                                      Transform2F::default(),
                                      HINTING_OPTIONS,
                                      RASTERIZATION_OPTIONS) {
            Ok(rect) => rect,
            Err(err) => {
                debug!("no raster bounds for {:?}: {:?}", character, err);
                RectI::default()
            }
        }
    }

    fn left_bearing(&self, character: char) -> f32 {
        self.horizontal_extents(self.glyph_id(character)).0
    }

    fn right_bearing(&self, character: char) -> f32 {
        let glyph_id = self.glyph_id(character);
        self.advance(glyph_id) - self.horizontal_extents(glyph_id).1
    }

    fn horizontal_advance(&self, character: char) -> f32 {
        self.advance(self.glyph_id(character))
    }

    fn line_spacing(&self) -> f32 {
        // `descent` is negative.
        (self.metrics.ascent - self.metrics.descent + self.metrics.line_gap) * self.scale
    }

    fn draw_char(&self, character: char, surface: &mut PixelBuffer, origin: Vector2I, color: Pixel) {
        if surface.is_null() {
            return;
        }

        let glyph_id = self.glyph_id(character);
        let mut canvas = Canvas::new(surface.size(), Format::A8);
        let transform = Transform2F::from_translation(Vector2F::new(origin.x() as f32,
                                                                    origin.y() as f32));
        if let Err(err) = self.font.rasterize_glyph(&mut canvas,
                                                    glyph_id,
                                                    self.point_size,
                                                    transform,
                                                    HINTING_OPTIONS,
                                                    RASTERIZATION_OPTIONS) {
            debug!("failed to rasterize {:?}: {:?}", character, err);
            return;
        }

        for y in 0..surface.height() {
            let row = &canvas.pixels[(y as usize * canvas.stride)..];
            for x in 0..surface.width() {
                let coverage = row[x as usize];
                if coverage != 0 {
                    surface.blend_pixel(x, y, color.with_coverage(coverage));
                }
            }
        }
    }
}

/// Errors that can occur when loading a font for a `FontKitEngine`.
#[derive(Debug)]
pub enum FontError {
    /// The font file could not be read or parsed.
    Loading(FontLoadingError),
    /// No installed font matched the request.
    Selection(SelectionError),
}

impl Display for FontError {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        match *self {
            FontError::Loading(ref err) => write!(formatter, "failed to load font: {:?}", err),
            FontError::Selection(ref err) => write!(formatter, "no matching font: {:?}", err),
        }
    }
}

impl Error for FontError {}

impl From<FontLoadingError> for FontError {
    #[inline]
    fn from(err: FontLoadingError) -> FontError {
        FontError::Loading(err)
    }
}

impl From<SelectionError> for FontError {
    #[inline]
    fn from(err: SelectionError) -> FontError {
        FontError::Selection(err)
    }
}
