// cartograph/gpu/src/error.rs
//
// Copyright © 2019 The Cartograph Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Errors.

use std::error::Error;
use std::fmt::{self, Display, Formatter};

/// Reasons a texture could not be created.
///
/// Neither is fatal. Callers going through `Texture::bind_texture` only ever see
/// `TextureHandle::NONE`; the error is logged with a backtrace instead.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TextureError {
    /// The host's graphics context has not been initialized yet.
    UninitializedContext,
    /// The image is smaller than 1×1.
    InvalidImage,
}

impl Display for TextureError {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        match *self {
            TextureError::UninitializedContext => {
                formatter.write_str("trying to generate a texture on a map that is not initialized")
            }
            TextureError::InvalidImage => {
                formatter.write_str("trying to generate a texture from a null image")
            }
        }
    }
}

impl Error for TextureError {}
