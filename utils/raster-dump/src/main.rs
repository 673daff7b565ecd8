// cartograph/utils/raster-dump/src/main.rs
//
// Copyright © 2019 The Cartograph Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Runs the glyph and texture adapters on the CPU and writes what they produce as PNG files.

use cartograph_color::{PixelBuffer, PixelFormat};
use cartograph_gpu::{ContextState, ImageTexture, Texture, TextureFilter, TextureOptions};
use cartograph_text::{EngineFont, Font, FontKitEngine, Glyph};
use clap::{App, Arg, ArgMatches};
use font_kit::family_name::FamilyName;
use image::ColorType;
use log::info;
use pathfinder_geometry::vector::Vector2I;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use std::rc::Rc;

const DEFAULT_POINT_SIZE: f32 = 32.0;
const DEFAULT_CHARS: &str = "Ag";

const FILTER_NAMES: [&str; 6] = [
    "nearest",
    "linear",
    "nearest-mipmap-nearest",
    "linear-mipmap-nearest",
    "nearest-mipmap-linear",
    "linear-mipmap-linear",
];

fn main() {
    color_backtrace::install();
    pretty_env_logger::init();

    let matches = App::new("raster-dump")
        .arg(
            Arg::with_name("font")
                .short("f")
                .long("font")
                .value_name("PATH")
                .takes_value(true)
                .conflicts_with("family")
                .help("Font file to rasterize from"),
        )
        .arg(
            Arg::with_name("family")
                .long("family")
                .value_name("NAME")
                .takes_value(true)
                .help("Installed font family to rasterize from (default: sans-serif)"),
        )
        .arg(
            Arg::with_name("size")
                .short("s")
                .long("size")
                .value_name("PT")
                .takes_value(true)
                .help("Point size"),
        )
        .arg(
            Arg::with_name("chars")
                .short("c")
                .long("chars")
                .value_name("TEXT")
                .takes_value(true)
                .help("Characters to rasterize"),
        )
        .arg(
            Arg::with_name("image")
                .short("i")
                .long("image")
                .value_name("PATH")
                .takes_value(true)
                .help("Image to pad into a texture"),
        )
        .arg(
            Arg::with_name("min-filter")
                .long("min-filter")
                .takes_value(true)
                .possible_values(&FILTER_NAMES)
                .help("Minification filter of the texture"),
        )
        .arg(
            Arg::with_name("output")
                .short("o")
                .long("output")
                .value_name("DIR")
                .takes_value(true)
                .help("Directory to write PNG files to"),
        )
        .get_matches();

    if let Err(err) = run(&matches) {
        eprintln!("raster-dump: {}", err);
        process::exit(1);
    }
}

fn run(matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let output_dir = PathBuf::from(matches.value_of("output").unwrap_or("."));
    fs::create_dir_all(&output_dir)?;

    let point_size = match matches.value_of("size") {
        Some(size) => size.parse::<f32>()?,
        None => DEFAULT_POINT_SIZE,
    };

    let engine = match matches.value_of("font") {
        Some(path) => FontKitEngine::from_path(path, 0, point_size)?,
        None => {
            let family = family_name(matches.value_of("family").unwrap_or("sans-serif"));
            FontKitEngine::from_family(family, point_size)?
        }
    };
    let font = EngineFont::new(engine);
    info!("line height: {}", font.line_height());

    let text = matches.value_of("chars").unwrap_or(DEFAULT_CHARS);
    for character in text.encode_utf16() {
        let mut result = Ok(());
        font.prepare_glyph(character, &mut |glyph| {
            info!("{:04x}: {}x{}, bearings l={} r={} t={} b={}, advance {}",
                  character,
                  glyph.w,
                  glyph.h,
                  glyph.left_bearing,
                  glyph.right_bearing,
                  glyph.top_bearing,
                  glyph.bottom_bearing,
                  glyph.kerning_width);
            let path = output_dir.join(format!("glyph-{:04x}.png", character));
            result = save_glyph(&path, glyph);
        });
        result?;
    }

    if let Some(path) = matches.value_of("image") {
        let min_filter = matches.value_of("min-filter").map(filter).unwrap_or_default();
        let options = TextureOptions { min_filter, ..TextureOptions::default() };
        dump_texture(Path::new(path), &output_dir.join("texture.png"), options)?;
    }

    Ok(())
}

fn dump_texture(input_path: &Path, output_path: &Path, options: TextureOptions)
                -> Result<(), Box<dyn Error>> {
    let source = image::open(input_path)?.to_rgba();
    let size = Vector2I::new(source.width() as i32, source.height() as i32);
    let source = PixelBuffer::from_bytes(size, PixelFormat::RGBA8, source.into_raw())
        .ok_or("image data does not match its dimensions")?;

    let mut texture = ImageTexture::with_options(Rc::new(ContextState::initialized_now()), options);
    texture.on_image_changed(|| info!("image changed"));
    texture.set_image(&source);

    info!("image dims: {:?}, texture dims: {:?}, mipmaps: {}",
          texture.image_dims(),
          texture.texture_dims(),
          texture.min_filter().generates_mipmaps());

    save_buffer(output_path, &texture.image().convert(PixelFormat::RGBA8))
}

fn save_glyph(path: &Path, glyph: &Glyph) -> Result<(), Box<dyn Error>> {
    let mut buffer = PixelBuffer::new(Vector2I::new(glyph.w, glyph.h), PixelFormat::RGBA8);
    for y in 0..glyph.h {
        for x in 0..glyph.w {
            buffer.set_pixel(x, glyph.h - 1 - y, glyph.pixel(x, y));
        }
    }
    save_buffer(path, &buffer)
}

fn save_buffer(path: &Path, buffer: &PixelBuffer) -> Result<(), Box<dyn Error>> {
    image::save_buffer(path,
                       buffer.bytes(),
                       buffer.width() as u32,
                       buffer.height() as u32,
                       ColorType::Rgba8)?;
    Ok(())
}

fn family_name(name: &str) -> FamilyName {
    match name {
        "serif" => FamilyName::Serif,
        "sans-serif" => FamilyName::SansSerif,
        "monospace" => FamilyName::Monospace,
        "cursive" => FamilyName::Cursive,
        "fantasy" => FamilyName::Fantasy,
        _ => FamilyName::Title(name.to_owned()),
    }
}

fn filter(name: &str) -> TextureFilter {
    match name {
        "nearest" => TextureFilter::Nearest,
        "nearest-mipmap-nearest" => TextureFilter::NearestMipmapNearest,
        "linear-mipmap-nearest" => TextureFilter::LinearMipmapNearest,
        "nearest-mipmap-linear" => TextureFilter::NearestMipmapLinear,
        "linear-mipmap-linear" => TextureFilter::LinearMipmapLinear,
        _ => TextureFilter::Linear,
    }
}
